use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{card::Card, condition::Condition, effect::EffectKey, game::action::TargetInfo};

/// 대상 선택이 끝나면 적용할 효과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetedEffect {
    Damage { amount: i32 },
    Heal { amount: i32, own: bool },
    /// 고른 대상으로 효과 키를 다시 실행
    Replay { effect: EffectKey },
}

/// 플레이어의 입력을 기다리는 결정 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum PendingAction {
    SelectEffectTarget {
        effect: TargetedEffect,
        exclude_index: Option<usize>,
        attacker_index: Option<usize>,
    },
    CheckAwakening {
        leader_index: usize,
    },
    SelectDiscard {
        count: usize,
        next_effect: Option<EffectKey>,
        is_hand_limit: bool,
    },
    /// 공격 카드의 선택적 버리기. 해결되면 공격을 이어서 진행합니다.
    SelectOptionalDiscard {
        card_index: usize,
        card_uuid: Uuid,
        target_info: TargetInfo,
        condition: Condition,
    },
    MsgSelectDiscard {
        count: usize,
        next_effect: Option<EffectKey>,
    },
    MsgSelectMemoriaCascade {
        candidates: Vec<Uuid>,
        max_cost: u32,
    },
    MsgConfirmTrash {
        card: Card,
    },
    /// 덱에서 꺼낸 카드들. 고르지 않은 카드는 트래시로 갑니다.
    MsgSelectCascade {
        cards: Vec<Card>,
        max_cost: u32,
    },
    MsgDeclareType {
        draw: usize,
    },
}

impl PendingAction {
    pub fn kind(&self) -> &'static str {
        match self {
            PendingAction::SelectEffectTarget { .. } => "SELECT_EFFECT_TARGET",
            PendingAction::CheckAwakening { .. } => "CHECK_AWAKENING",
            PendingAction::SelectDiscard { .. } => "SELECT_DISCARD",
            PendingAction::SelectOptionalDiscard { .. } => "SELECT_OPTIONAL_DISCARD",
            PendingAction::MsgSelectDiscard { .. } => "MSG_SELECT_DISCARD",
            PendingAction::MsgSelectMemoriaCascade { .. } => "MSG_SELECT_MEMORIA_CASCADE",
            PendingAction::MsgConfirmTrash { .. } => "MSG_CONFIRM_TRASH",
            PendingAction::MsgSelectCascade { .. } => "MSG_SELECT_CASCADE",
            PendingAction::MsgDeclareType { .. } => "MSG_DECLARE_TYPE",
        }
    }

    /// 라운드가 바뀌어도 의미가 남는 결정인지
    pub fn survives_round_reset(&self) -> bool {
        matches!(self, PendingAction::CheckAwakening { .. })
    }
}

/// 플레이어별 대기열. 항상 맨 앞부터 처리합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingQueue(VecDeque<PendingAction>);

impl PendingQueue {
    pub fn push(&mut self, action: PendingAction) {
        self.0.push_back(action);
    }

    pub fn head(&self) -> Option<&PendingAction> {
        self.0.front()
    }

    pub fn advance(&mut self) -> Option<PendingAction> {
        self.0.pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingAction> {
        self.0.iter()
    }

    /// 라운드 전환 시 이전 라운드의 카드/인덱스를 가리키는 결정을 버립니다.
    pub fn drop_stale(&mut self) {
        self.0.retain(|a| a.survives_round_reset());
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.0.iter().map(|a| a.kind()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut queue = PendingQueue::default();
        queue.push(PendingAction::CheckAwakening { leader_index: 0 });
        queue.push(PendingAction::MsgDeclareType { draw: 4 });
        assert_eq!(queue.kinds(), vec!["CHECK_AWAKENING", "MSG_DECLARE_TYPE"]);
        assert_eq!(
            queue.advance(),
            Some(PendingAction::CheckAwakening { leader_index: 0 })
        );
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn drop_stale_keeps_awakening_only() {
        let mut queue = PendingQueue::default();
        queue.push(PendingAction::SelectDiscard {
            count: 1,
            next_effect: None,
            is_hand_limit: true,
        });
        queue.push(PendingAction::CheckAwakening { leader_index: 2 });
        queue.drop_stale();
        assert_eq!(queue.kinds(), vec!["CHECK_AWAKENING"]);
    }

    #[test]
    fn serializes_with_type_tag() {
        let action = PendingAction::SelectDiscard {
            count: 2,
            next_effect: Some(EffectKey::new("discard_opp_1")),
            is_hand_limit: false,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "SELECT_DISCARD");
        assert_eq!(json["count"], 2);
        assert_eq!(json["nextEffect"], "discard_opp_1");
        assert_eq!(json["isHandLimit"], false);
    }
}
