use tracing::{debug, warn};

use super::AoeMode;
use crate::{
    catalog::{Ability, AbilityKind, AbilityTarget},
    enums::opponent_of,
    game::{
        pending::{PendingAction, TargetedEffect},
        Game,
    },
};

/// 리더 능력의 효과 목록을 순서대로 실행합니다.
pub fn process_ability(game: &mut Game, slot: usize, ability: &Ability) {
    for effect in &ability.effect {
        debug!(
            "리더 능력 처리: slot={}, kind={:?}, target={:?}, value={}",
            slot, effect.kind, effect.target, effect.value
        );
        match (effect.kind, effect.target) {
            (AbilityKind::Damage, Some(AbilityTarget::OpponentAllLeaders)) => {
                game.deal_aoe(opponent_of(slot), effect.value, AoeMode::All, None);
            }
            (AbilityKind::Damage, Some(AbilityTarget::OpponentOneLeader)) => game.enqueue(
                slot,
                PendingAction::SelectEffectTarget {
                    effect: TargetedEffect::Damage {
                        amount: effect.value,
                    },
                    exclude_index: None,
                    attacker_index: None,
                },
            ),
            (AbilityKind::Draw, _) => {
                game.draw_cards(slot, effect.value.max(0) as usize);
            }
            (AbilityKind::Discard, _) => {
                game.request_discard(slot, effect.value.max(0) as usize, None, false);
            }
            (AbilityKind::Heal, Some(AbilityTarget::OwnLeaderOne)) => game.enqueue(
                slot,
                PendingAction::SelectEffectTarget {
                    effect: TargetedEffect::Heal {
                        amount: effect.value,
                        own: true,
                    },
                    exclude_index: None,
                    attacker_index: None,
                },
            ),
            _ => warn!(
                "처리할 수 없는 리더 능력: kind={:?}, target={:?}",
                effect.kind, effect.target
            ),
        }
    }
}
