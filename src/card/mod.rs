pub mod cards;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::CardTemplate,
    condition::Condition,
    effect::EffectKey,
    enums::{CardType, TICKET_ID_PREFIX, TICKET_NAME, TICKET_TEXT},
};

/// 존(덱, 손패, 필드, 트래시) 위의 카드 한 장
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    uuid: Uuid,
    #[serde(flatten)]
    template: CardTemplate,
    #[serde(default)]
    is_tapped: bool,
}

impl Card {
    pub fn new(uuid: Uuid, template: CardTemplate) -> Card {
        Card {
            uuid,
            template,
            is_tapped: false,
        }
    }

    /// 후공 플레이어에게 주어지는 PP 회복 티켓
    pub fn ticket(uuid: Uuid) -> Card {
        let mut template = CardTemplate::new(
            &format!("{}{}", TICKET_ID_PREFIX, uuid),
            TICKET_NAME,
            CardType::Ticket,
            0,
        );
        template.text = Some(TICKET_TEXT.to_string());
        Card::new(uuid, template)
    }

    pub fn get_uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn get_id(&self) -> &str {
        &self.template.id
    }

    pub fn get_name(&self) -> &str {
        &self.template.name
    }

    pub fn get_card_type(&self) -> CardType {
        self.template.card_type
    }

    pub fn get_cost(&self) -> u32 {
        self.template.cost
    }

    pub fn get_template(&self) -> &CardTemplate {
        &self.template
    }

    pub fn get_condition(&self) -> Option<&Condition> {
        self.template.condition.as_ref()
    }

    pub fn get_on_play(&self) -> Option<&EffectKey> {
        self.template.on_play.as_ref()
    }

    pub fn get_on_hit(&self) -> Option<&EffectKey> {
        self.template.on_hit.as_ref()
    }

    pub fn get_on_attack_end(&self) -> Option<&EffectKey> {
        self.template.on_attack_end.as_ref()
    }

    pub fn get_effect(&self) -> Option<&EffectKey> {
        self.template.effect.as_ref()
    }

    pub fn is_tapped(&self) -> bool {
        self.is_tapped
    }

    pub fn set_tapped(&mut self, tapped: bool) {
        self.is_tapped = tapped;
    }

    pub fn is_type(&self, card_type: CardType) -> bool {
        self.template.card_type == card_type
    }

    pub fn is_memoria(&self) -> bool {
        self.is_type(CardType::Memoria)
    }

    pub fn is_ticket(&self) -> bool {
        self.is_type(CardType::Ticket)
    }

    pub fn is_ace(&self) -> bool {
        self.template.is_ace
    }

    pub fn is_equipment(&self) -> bool {
        self.template.is_equipment()
    }

    pub fn equip_hp(&self) -> i32 {
        self.template.equip_hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_is_free_and_tagged() {
        let card = Card::ticket(Uuid::nil());
        assert!(card.is_ticket());
        assert_eq!(card.get_cost(), 0);
        assert!(card.get_id().starts_with(TICKET_ID_PREFIX));
    }

    #[test]
    fn serializes_flat_with_type_tag() {
        let card = Card::new(
            Uuid::nil(),
            CardTemplate::new("M001", "Cheer", CardType::Memoria, 1),
        );
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "MEMORIA");
        assert_eq!(json["id"], "M001");
        assert_eq!(json["isTapped"], false);
    }
}
