use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{pending::PendingAction, ActionOutcome, Game};
use crate::{
    card::{cards::CardVecExt, Card},
    condition::DiscardArg,
    effect::EffectContext,
    enums::{opponent_of, phase::Phase, CardType},
    exception::GameError,
    unit::IResource,
};

/// 공격 카드의 선택적 버리기 진행 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscardChoice {
    /// 아직 묻지 않았음
    #[default]
    Unresolved,
    /// 버리지 않기로 함
    Skipped,
    /// 이미 버렸음
    Discarded,
}

/// 카드 사용 시 함께 보내는 대상 정보
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetInfo {
    pub attacker_index: Option<usize>,
    pub target_index: Option<usize>,
    /// 조건 비용으로 버릴 손패 인덱스 (카드를 내기 전 기준)
    pub discard_index: Option<usize>,
    pub discard: DiscardChoice,
}

impl TargetInfo {
    pub fn attack(attacker_index: usize, target_index: usize) -> Self {
        Self {
            attacker_index: Some(attacker_index),
            target_index: Some(target_index),
            ..Default::default()
        }
    }

    pub fn with_discard(mut self, index: usize) -> Self {
        self.discard_index = Some(index);
        self
    }

    /// 사용한 카드가 손패에서 빠진 뒤의 버리기 인자
    pub(crate) fn discard_arg(&self, removed_index: usize) -> DiscardArg {
        match self.discard {
            DiscardChoice::Skipped => DiscardArg::Declined,
            DiscardChoice::Discarded => DiscardArg::Paid,
            DiscardChoice::Unresolved => match self.discard_index {
                Some(i) if i > removed_index => DiscardArg::Pick(i - 1),
                Some(i) => DiscardArg::Pick(i),
                None => DiscardArg::Check,
            },
        }
    }
}

impl Game {
    /// 손패의 카드를 사용합니다. 공격 카드는 target 이 필요합니다.
    #[instrument(skip(self))]
    pub fn play_card(
        &mut self,
        player_id: &str,
        hand_index: usize,
        target: Option<TargetInfo>,
    ) -> Result<ActionOutcome, GameError> {
        let slot = self.slot_of(player_id)?;
        self.play_card_at(slot, hand_index, target)
    }

    /// 택틱스 영역의 카드를 사용합니다.
    #[instrument(skip(self))]
    pub fn use_tactics(
        &mut self,
        player_id: &str,
        area_index: usize,
    ) -> Result<ActionOutcome, GameError> {
        let slot = self.slot_of(player_id)?;
        self.use_tactics_at(slot, area_index)
    }

    /// 턴을 마칩니다. 손패 제한을 넘으면 버릴 카드를 고를 때까지 멈춥니다.
    #[instrument(skip(self))]
    pub fn end_turn(&mut self, player_id: &str) -> Result<ActionOutcome, GameError> {
        let slot = self.slot_of(player_id)?;
        self.end_turn_at(slot)
    }

    /// 같은 카드가 필드에 정확히 한 장 있으면 무료가 되는 규칙을 적용한 비용
    pub fn effective_cost(&self, slot: usize, card: &Card) -> u32 {
        if card.get_template().has_free_copy_rule()
            && self.players[slot].field.count_by_id(card.get_id()) == 1
        {
            return 0;
        }
        card.get_cost()
    }

    /// 상태를 바꾸기 전에 모든 조건을 확인하고 (카드, 비용) 을 돌려줍니다.
    pub(crate) fn validate_play(
        &self,
        slot: usize,
        hand_index: usize,
        target: Option<&TargetInfo>,
    ) -> Result<(Card, u32), GameError> {
        self.ensure_not_over()?;
        self.ensure_phase(Phase::Main)?;
        self.ensure_turn(slot)?;
        self.ensure_turn_not_ending(slot)?;

        let player = &self.players[slot];
        let card = player.hand.get(hand_index).ok_or(GameError::CardNotFound)?;

        let cost = self.effective_cost(slot, card);
        let available = player.pp_cards.available();
        if available < cost {
            return Err(GameError::InsufficientResources {
                needed: cost,
                available,
            });
        }

        if card.is_type(CardType::Attack) {
            let info = target.ok_or(GameError::MissingTarget)?;
            let (Some(attacker_index), Some(target_index)) =
                (info.attacker_index, info.target_index)
            else {
                return Err(GameError::MissingTarget);
            };

            let attacker = player
                .leaders
                .get(attacker_index)
                .ok_or(GameError::InvalidTarget("attacker"))?;
            let victim = self.players[opponent_of(slot)]
                .leaders
                .get(target_index)
                .ok_or(GameError::InvalidTarget("target"))?;
            if attacker.is_down() {
                return Err(GameError::AttackerDown);
            }
            if victim.is_down() {
                return Err(GameError::TargetDown);
            }
            if info.discard == DiscardChoice::Unresolved && info.discard_index == Some(hand_index)
            {
                return Err(GameError::InvalidIndex);
            }
        }

        Ok((card.clone(), cost))
    }

    pub(crate) fn play_card_at(
        &mut self,
        slot: usize,
        hand_index: usize,
        target: Option<TargetInfo>,
    ) -> Result<ActionOutcome, GameError> {
        let (card, cost) = self.validate_play(slot, hand_index, target.as_ref())?;
        let info = target.unwrap_or_default();

        if card.is_type(CardType::Attack) && info.discard == DiscardChoice::Unresolved {
            if let Some(condition) = card.get_condition().filter(|c| c.is_optional_discard()) {
                self.enqueue(
                    slot,
                    PendingAction::SelectOptionalDiscard {
                        card_index: hand_index,
                        card_uuid: card.get_uuid(),
                        target_info: info,
                        condition: condition.clone(),
                    },
                );
                return Ok(ActionOutcome::AwaitingInput);
            }
        }

        let strike = if card.is_type(CardType::Attack) {
            info.attacker_index.zip(info.target_index)
        } else {
            None
        };

        let player = &mut self.players[slot];
        player.pp_cards.spend(cost);
        let card = player.hand.remove(hand_index);
        info!(
            "카드 사용: player={}, card={}, type={}, cost={}",
            player.id,
            card.get_id(),
            card.get_card_type(),
            cost
        );

        if let Some((attacker_index, target_index)) = strike {
            let discard = info.discard_arg(hand_index);
            let report = self.execute_attack(slot, &card, attacker_index, target_index, discard);
            // 라운드가 끝났으면 필드가 이미 정리된 상태
            if report.round_ended {
                self.players[slot].trash.push(card);
            } else {
                self.players[slot].field.push(card);
            }
        } else if card.is_memoria() {
            let on_play = card.get_on_play().cloned();
            self.players[slot].field.push(card.clone());
            if let Some(key) = on_play {
                let mut ctx = EffectContext::targeting(info.target_index);
                self.process_effect(slot, &key, &mut ctx, Some(&card));
            }
            self.settle_round(slot);
        } else {
            self.players[slot].field.push(card);
        }

        Ok(self.outcome_for(slot))
    }

    pub(crate) fn use_tactics_at(
        &mut self,
        slot: usize,
        area_index: usize,
    ) -> Result<ActionOutcome, GameError> {
        self.ensure_not_over()?;
        self.ensure_phase(Phase::Main)?;
        self.ensure_turn(slot)?;
        self.ensure_turn_not_ending(slot)?;

        let card = self.players[slot]
            .tactics_area
            .get(area_index)
            .ok_or(GameError::CardNotFound)?;

        // 티켓은 사용 횟수 제한 없이 PP 한 장을 되돌립니다
        if card.is_ticket() {
            let recovered = self.recover_pp(slot, 1);
            let player = &mut self.players[slot];
            let ticket = player.tactics_area.remove(area_index);
            debug!("티켓 사용: player={}, recovered={}", player.id, recovered);
            player.trash.push(ticket);
            return Ok(self.outcome_for(slot));
        }

        if self.current_round == 1 && self.turn_count() == 1 {
            return Err(GameError::FirstTurnTactics);
        }
        let player = &self.players[slot];
        if player.tactics_used_this_turn >= 1 {
            return Err(GameError::TacticsLimitReached);
        }
        let cost = card.get_cost();
        let available = player.pp_cards.available();
        if available < cost {
            return Err(GameError::InsufficientResources {
                needed: cost,
                available,
            });
        }

        let player = &mut self.players[slot];
        player.pp_cards.spend(cost);
        player.tactics_used_this_turn += 1;
        let mut card = player.tactics_area.remove(area_index);
        info!("택틱스 사용: player={}, card={}, cost={}", player.id, card.get_id(), cost);

        if card.is_equipment() {
            match player.first_live_leader() {
                Some(index) => {
                    debug!("장비 장착: leader={}, hp+{}", index, card.equip_hp());
                    player.leaders[index].equip(card);
                }
                None => player.trash.push(card),
            }
            return Ok(self.outcome_for(slot));
        }

        card.set_tapped(true);
        let on_play = card.get_on_play().cloned();
        player.field.push(card.clone());
        if let Some(key) = on_play {
            self.process_effect(slot, &key, &mut EffectContext::default(), Some(&card));
        }
        self.settle_round(slot);
        Ok(self.outcome_for(slot))
    }

    pub(crate) fn end_turn_at(&mut self, slot: usize) -> Result<ActionOutcome, GameError> {
        self.ensure_not_over()?;
        self.ensure_phase(Phase::Main)?;
        self.ensure_turn(slot)?;
        if !self.players[slot].pending.is_empty() {
            return Err(GameError::PendingActionExists);
        }

        let player = &mut self.players[slot];
        player.reset_turn_buffers();
        let unused = player.pp_cards.available();
        // 남은 PP 는 드로우로 바뀌며 탭됩니다
        player.pp_cards.spend(unused);
        debug!("턴 종료: player={}, unused_pp={}", player.id, unused);
        self.draw_cards(slot, unused as usize);
        if self.is_over() {
            return Ok(ActionOutcome::Completed);
        }

        let excess = self.players[slot]
            .hand
            .len()
            .saturating_sub(self.rules.hand_limit);
        if excess > 0 {
            self.request_discard(slot, excess, None, true);
            return Ok(ActionOutcome::AwaitingInput);
        }

        self.continue_end_turn(slot);
        Ok(ActionOutcome::Completed)
    }

    /// 필드를 비우고 상대 턴을 시작합니다.
    pub(crate) fn continue_end_turn(&mut self, slot: usize) {
        self.players[slot].clear_field();

        let next = self.turn.change_turn();
        self.players[next].pp_cards.untap_all();
        self.draw_cards(next, 1);
        let count = self.turn.increase_turn_count();
        info!("턴 시작: player={}, turn_count={}", self.players[next].id, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_index_shifts_past_played_card() {
        let info = TargetInfo::attack(0, 1).with_discard(3);
        assert_eq!(info.discard_arg(1), DiscardArg::Pick(2));
        assert_eq!(info.discard_arg(4), DiscardArg::Pick(3));
    }

    #[test]
    fn resolved_choice_overrides_index() {
        let mut info = TargetInfo::attack(0, 0).with_discard(2);
        info.discard = DiscardChoice::Skipped;
        assert_eq!(info.discard_arg(0), DiscardArg::Declined);
        info.discard = DiscardChoice::Discarded;
        assert_eq!(info.discard_arg(0), DiscardArg::Paid);
        assert_eq!(TargetInfo::attack(0, 0).discard_arg(0), DiscardArg::Check);
    }

    #[test]
    fn target_info_reads_camel_case() {
        let info: TargetInfo =
            serde_json::from_str(r#"{"attackerIndex":1,"targetIndex":2}"#).unwrap();
        assert_eq!(info, TargetInfo::attack(1, 2));
    }
}
