use serde::{Deserialize, Serialize};

use crate::{card::Card, catalog::LeaderTemplate};

/// 한 번의 피격 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hit {
    pub downed: bool,
    pub overkill: i32,
}

/// 매치 중의 리더. 템플릿 수치를 기준으로 매 라운드 초기화됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    #[serde(flatten)]
    template: LeaderTemplate,
    current_hp: i32,
    max_hp: i32,
    atk: i32,
    is_down: bool,
    is_awakened: bool,
    equipped: Vec<Card>,
}

impl Leader {
    pub fn new(template: LeaderTemplate) -> Leader {
        Leader {
            current_hp: template.hp_before,
            max_hp: template.hp_before,
            atk: template.atk_before,
            is_down: false,
            is_awakened: false,
            equipped: vec![],
            template,
        }
    }

    pub fn get_template(&self) -> &LeaderTemplate {
        &self.template
    }

    pub fn get_name(&self) -> &str {
        &self.template.name
    }

    pub fn get_color(&self) -> &str {
        &self.template.color
    }

    pub fn get_current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn get_max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn get_atk(&self) -> i32 {
        self.atk
    }

    pub fn get_equipped(&self) -> &Vec<Card> {
        &self.equipped
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }

    pub fn is_alive(&self) -> bool {
        !self.is_down
    }

    pub fn is_awakened(&self) -> bool {
        self.is_awakened
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.template.has_tag(tag)
    }

    /// 장비로 늘어난 최대 HP
    pub fn equip_bonus(&self) -> i32 {
        self.equipped.iter().map(|c| c.equip_hp()).sum()
    }

    /// 라운드 시작 시 기준 수치로 되돌리고 완전히 회복합니다.
    /// 각성 여부와 장비는 유지됩니다.
    pub fn reset_for_round(&mut self) {
        let (hp, atk) = if self.is_awakened {
            (self.template.hp_after, self.template.atk_after)
        } else {
            (self.template.hp_before, self.template.atk_before)
        };
        self.max_hp = hp + self.equip_bonus();
        self.current_hp = self.max_hp;
        self.atk = atk;
        self.is_down = false;
    }

    /// 데미지를 받습니다. 0 이하가 되면 다운되고 초과분을 돌려줍니다.
    /// 각성은 호출한 쪽에서 처리합니다.
    pub fn take_damage(&mut self, amount: i32) -> Hit {
        self.current_hp -= amount;
        if self.current_hp <= 0 {
            let overkill = -self.current_hp;
            self.current_hp = 0;
            self.is_down = true;
            return Hit {
                downed: true,
                overkill,
            };
        }
        Hit::default()
    }

    /// 각성 전환. 받은 데미지는 유지한 채 HP 를 (hp_after - hp_before) 만큼 옮깁니다.
    /// 이미 각성했다면 아무 일도 하지 않고 false 를 반환합니다.
    pub fn awaken(&mut self) -> bool {
        if self.is_awakened {
            return false;
        }
        let hp_diff = self.template.hp_after - self.template.hp_before;

        self.is_awakened = true;
        self.max_hp = self.template.hp_after + self.equip_bonus();
        self.current_hp = (self.current_hp + hp_diff).clamp(0, self.max_hp);
        self.atk = self.template.atk_after;
        self.is_down = self.current_hp == 0;
        true
    }

    pub fn heal(&mut self, amount: i32) {
        if self.is_down {
            return;
        }
        self.current_hp = (self.current_hp + amount).clamp(0, self.max_hp);
    }

    pub fn equip(&mut self, card: Card) {
        let bonus = card.equip_hp();
        self.equipped.push(card);
        self.max_hp += bonus;
        self.current_hp += bonus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::CardTemplate, enums::CardType};
    use uuid::Uuid;

    fn leader() -> Leader {
        Leader::new(LeaderTemplate {
            id: "L1".into(),
            name: "Alpha".into(),
            color: "Red".into(),
            team: vec![],
            hp_before: 100,
            hp_after: 130,
            atk_before: 30,
            atk_after: 40,
            ability: None,
        })
    }

    #[test]
    fn overkill_is_excess_damage() {
        let mut l = leader();
        let hit = l.take_damage(130);
        assert_eq!(hit, Hit { downed: true, overkill: 30 });
        assert_eq!(l.get_current_hp(), 0);
        assert!(l.is_down());
    }

    #[test]
    fn awaken_keeps_damage_taken() {
        let mut l = leader();
        l.take_damage(40);
        assert!(l.awaken());
        assert_eq!(l.get_max_hp(), 130);
        assert_eq!(l.get_current_hp(), 90);
        assert_eq!(l.get_atk(), 40);
        assert!(!l.awaken());
    }

    #[test]
    fn downed_leader_revives_with_difference() {
        let mut l = leader();
        l.take_damage(100);
        l.awaken();
        assert!(!l.is_down());
        assert_eq!(l.get_current_hp(), 30);
    }

    #[test]
    fn heal_clamps_to_max() {
        let mut l = leader();
        l.take_damage(10);
        l.heal(50);
        assert_eq!(l.get_current_hp(), 100);
    }

    #[test]
    fn equipment_survives_round_reset() {
        let mut l = leader();
        let mut shield = CardTemplate::new("T007", "Light Shield", CardType::Tactics, 1);
        shield.equip_hp = 30;
        l.equip(Card::new(Uuid::nil(), shield));
        assert_eq!(l.get_max_hp(), 130);
        l.take_damage(50);
        l.reset_for_round();
        assert_eq!(l.get_max_hp(), 130);
        assert_eq!(l.get_current_hp(), 130);
    }
}
