use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    action::{DiscardChoice, TargetInfo},
    pending::{PendingAction, TargetedEffect},
    ActionOutcome, Game,
};
use crate::{
    card::{cards::CardVecExt, Card},
    condition::{Condition, DiscardArg},
    effect::{EffectContext, EffectKey},
    enums::{opponent_of, CardType},
    exception::GameError,
};

/// 대기 중인 결정에 대한 플레이어의 응답. 결정 종류에 따라 필요한 필드만 읽습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolvePayload {
    pub target_index: Option<usize>,
    pub card_index: Option<usize>,
    pub card_indices: Option<Vec<usize>>,
    pub skip: bool,
    pub selected_card_ids: Vec<Uuid>,
    pub confirm: bool,
    pub index: Option<usize>,
    pub declared_type: Option<CardType>,
}

impl ResolvePayload {
    pub fn target(index: usize) -> Self {
        Self {
            target_index: Some(index),
            ..Default::default()
        }
    }

    pub fn discard(indices: Vec<usize>) -> Self {
        Self {
            card_indices: Some(indices),
            ..Default::default()
        }
    }

    pub fn skip() -> Self {
        Self {
            skip: true,
            ..Default::default()
        }
    }

    /// card_indices 가 없으면 card_index 한 장
    fn indices(&self) -> Vec<usize> {
        match (&self.card_indices, self.card_index) {
            (Some(indices), _) => indices.clone(),
            (None, Some(index)) => vec![index],
            (None, None) => vec![],
        }
    }
}

/// 중복 없이 모두 손패 범위 안인지
fn check_indices(indices: &[usize], hand_len: usize) -> Result<(), GameError> {
    let mut seen = HashSet::new();
    if indices.iter().all(|i| *i < hand_len && seen.insert(*i)) {
        Ok(())
    } else {
        Err(GameError::InvalidIndex)
    }
}

impl Game {
    /// 대기열 맨 앞의 결정을 처리합니다.
    /// 검증에서 거절되면 대기열은 그대로이고, 그 외에는 항상 한 칸 진행합니다.
    #[instrument(skip(self))]
    pub fn resolve_action(
        &mut self,
        player_id: &str,
        payload: ResolvePayload,
    ) -> Result<ActionOutcome, GameError> {
        let slot = self.slot_of(player_id)?;
        self.ensure_not_over()?;
        let head = self.players[slot]
            .pending
            .head()
            .cloned()
            .ok_or(GameError::NoPendingAction)?;

        self.validate_resolution(slot, &head, &payload)?;

        self.players[slot].pending.advance();
        debug!("결정 처리: player={}, type={}", player_id, head.kind());
        self.apply_resolution(slot, head, payload)?;
        self.settle_round(slot);
        Ok(self.outcome_for(slot))
    }

    /// 상태를 바꾸지 않는 사전 검증
    fn validate_resolution(
        &self,
        slot: usize,
        head: &PendingAction,
        payload: &ResolvePayload,
    ) -> Result<(), GameError> {
        let hand = &self.players[slot].hand;
        match head {
            PendingAction::SelectEffectTarget {
                effect,
                exclude_index,
                ..
            } => {
                let Some(index) = payload.target_index else {
                    return Ok(());
                };
                if Some(index) == *exclude_index {
                    return Err(GameError::InvalidTarget("excluded"));
                }
                let side = self.target_side(slot, effect);
                let leader = self.players[side]
                    .leaders
                    .get(index)
                    .ok_or(GameError::InvalidTarget("out of range"))?;
                if leader.is_down() {
                    return Err(GameError::TargetDown);
                }
                Ok(())
            }
            PendingAction::SelectDiscard { count, .. } => {
                // 대기 중에 손패가 줄었을 수 있습니다
                let required = (*count).min(hand.len());
                let indices = payload.indices();
                if indices.len() != required {
                    return Err(GameError::DiscardCountMismatch {
                        expected: required,
                        got: indices.len(),
                    });
                }
                check_indices(&indices, hand.len())
            }
            PendingAction::SelectOptionalDiscard {
                card_uuid,
                condition,
                ..
            } => {
                if payload.skip {
                    return Ok(());
                }
                let index = payload.card_index.ok_or(GameError::InvalidPayload)?;
                let card = hand.get(index).ok_or(GameError::InvalidIndex)?;
                if card.get_uuid() == *card_uuid {
                    return Err(GameError::InvalidIndex);
                }
                if *condition == Condition::DiscardZeroCost && card.get_cost() != 0 {
                    return Err(GameError::MustDiscardZeroCost);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// 효과가 향하는 플레이어
    fn target_side(&self, slot: usize, effect: &TargetedEffect) -> usize {
        match effect {
            TargetedEffect::Heal { own: true, .. } => slot,
            _ => opponent_of(slot),
        }
    }

    fn apply_resolution(
        &mut self,
        slot: usize,
        head: PendingAction,
        payload: ResolvePayload,
    ) -> Result<ActionOutcome, GameError> {
        match head {
            PendingAction::SelectEffectTarget {
                effect,
                exclude_index,
                attacker_index,
            } => self.resolve_effect_target(slot, effect, exclude_index, attacker_index, &payload),
            PendingAction::CheckAwakening { leader_index } => {
                if self.players[slot]
                    .leaders
                    .get(leader_index)
                    .is_some_and(|l| !l.is_awakened() && l.is_alive())
                {
                    self.awaken_leader(slot, leader_index);
                }
            }
            PendingAction::SelectDiscard {
                next_effect,
                is_hand_limit,
                ..
            } => {
                self.discard_indices(slot, payload.indices());
                if let Some(key) = next_effect {
                    self.process_effect(slot, &key, &mut EffectContext::default(), None);
                }
                if is_hand_limit && !self.is_over() && self.turn.is_turn_of(slot) {
                    self.continue_end_turn(slot);
                }
            }
            PendingAction::MsgSelectDiscard { count, next_effect } => {
                let hand_len = self.players[slot].hand.len();
                let indices = payload.indices();
                let valid = indices.len() == count.min(hand_len)
                    && check_indices(&indices, hand_len).is_ok();
                if valid {
                    self.discard_indices(slot, indices);
                    if let Some(key) = next_effect {
                        self.process_effect(slot, &key, &mut EffectContext::default(), None);
                    }
                } else {
                    warn!("잘못된 버리기 선택: player={}, payload={:?}", self.players[slot].id, payload);
                }
            }
            PendingAction::SelectOptionalDiscard {
                card_uuid,
                target_info,
                condition,
                ..
            } => {
                return self.resume_attack(slot, card_uuid, target_info, condition, &payload);
            }
            PendingAction::MsgSelectMemoriaCascade {
                candidates,
                max_cost,
            } => self.resolve_memoria_cascade(slot, &candidates, max_cost, &payload.selected_card_ids),
            PendingAction::MsgConfirmTrash { card } => {
                let player = &mut self.players[slot];
                let still_on_top = player
                    .main_deck
                    .first()
                    .is_some_and(|top| top.get_uuid() == card.get_uuid());
                if payload.confirm && still_on_top {
                    let top = player.main_deck.remove(0);
                    debug!("덱 맨 위 카드 트래시: card={}", top.get_id());
                    player.trash.push(top);
                }
            }
            PendingAction::MsgSelectCascade { cards, max_cost } => {
                self.resolve_cascade(slot, cards, max_cost, payload.index)
            }
            PendingAction::MsgDeclareType { draw } => {
                let top_type = self.players[slot].main_deck.first().map(|c| c.get_card_type());
                if let (Some(declared), Some(actual)) = (payload.declared_type, top_type) {
                    info!("타입 선언: declared={}, actual={}", declared, actual);
                    if declared == actual {
                        self.draw_cards(slot, draw);
                    }
                }
            }
        }
        Ok(self.outcome_for(slot))
    }

    fn resolve_effect_target(
        &mut self,
        slot: usize,
        effect: TargetedEffect,
        exclude_index: Option<usize>,
        attacker_index: Option<usize>,
        payload: &ResolvePayload,
    ) {
        let side = self.target_side(slot, &effect);
        let target = payload.target_index.or_else(|| {
            self.players[side]
                .leaders
                .iter()
                .enumerate()
                .find(|(i, l)| l.is_alive() && Some(*i) != exclude_index)
                .map(|(i, _)| i)
        });
        let Some(target) = target else {
            debug!("고를 수 있는 대상이 없습니다: player={}", self.players[slot].id);
            return;
        };

        match effect {
            TargetedEffect::Damage { amount } => {
                let report = self.deal_damage_to_leader(side, amount, Some(target));
                if report.downed {
                    if let Some(attacker) = attacker_index {
                        self.check_awakening(slot, attacker);
                    }
                }
            }
            TargetedEffect::Heal { amount, .. } => self.heal_leader(side, amount, Some(target)),
            TargetedEffect::Replay { effect } => {
                let mut ctx = EffectContext {
                    target_index: Some(target),
                    attacker_index,
                    ..Default::default()
                };
                self.process_effect(slot, &effect, &mut ctx, None);
            }
        }
    }

    /// 큰 인덱스부터 버립니다.
    fn discard_indices(&mut self, slot: usize, mut indices: Vec<usize>) {
        indices.sort_unstable_by(|a, b| b.cmp(a));
        let player = &mut self.players[slot];
        for index in indices {
            player.discard_from_hand(index);
        }
    }

    /// 선택적 버리기를 정리한 뒤 멈춰 있던 공격 카드를 다시 사용합니다.
    fn resume_attack(
        &mut self,
        slot: usize,
        card_uuid: Uuid,
        mut target_info: TargetInfo,
        condition: Condition,
        payload: &ResolvePayload,
    ) -> Result<ActionOutcome, GameError> {
        let index = self.players[slot]
            .hand
            .position_by_uuid(card_uuid)
            .ok_or(GameError::CardNotFound)?;
        target_info.discard_index = None;
        self.validate_play(slot, index, Some(&target_info))?;

        match payload.card_index {
            Some(discard_index) if !payload.skip => {
                let mut arg = DiscardArg::Pick(discard_index);
                condition.evaluate(self, slot, &mut arg);
                target_info.discard = DiscardChoice::Discarded;
            }
            _ => target_info.discard = DiscardChoice::Skipped,
        }

        let index = self.players[slot]
            .hand
            .position_by_uuid(card_uuid)
            .ok_or(GameError::CardNotFound)?;
        self.play_card_at(slot, index, Some(target_info))
    }

    /// 고른 메모리아만 필드로 나가고, 고르지 않은 후보는 손패에 그대로 남습니다.
    /// 손패에서 고르는 효과라 트래시로 보내지 않습니다.
    fn resolve_memoria_cascade(
        &mut self,
        slot: usize,
        candidates: &[Uuid],
        max_cost: u32,
        selected: &[Uuid],
    ) {
        let hand = &self.players[slot].hand;
        let mut total = 0;
        let mut seen = HashSet::new();
        for uuid in selected {
            let card = hand.find_by_uuid(*uuid);
            let playable = candidates.contains(uuid)
                && seen.insert(*uuid)
                && card.is_some_and(|c| c.is_memoria() && !c.is_ace() && c.get_cost() <= max_cost);
            if !playable {
                warn!("메모리아 선택이 올바르지 않습니다: uuid={}", uuid);
                return;
            }
            total += card.map_or(0, |c| c.get_cost());
        }
        if total > max_cost {
            warn!("메모리아 비용 합계 초과: total={}, max={}", total, max_cost);
            return;
        }

        for uuid in selected {
            let player = &mut self.players[slot];
            let Some(index) = player.hand.position_by_uuid(*uuid) else {
                continue;
            };
            let card = player.hand.remove(index);
            self.place_memoria(slot, card);
        }
    }

    fn resolve_cascade(&mut self, slot: usize, mut cards: Vec<Card>, max_cost: u32, index: Option<usize>) {
        let chosen = index.filter(|i| {
            cards
                .get(*i)
                .is_some_and(|c| c.is_memoria() && c.get_cost() <= max_cost)
        });
        if let Some(i) = chosen {
            let card = cards.remove(i);
            self.place_memoria(slot, card);
        }
        debug!("공개한 카드 트래시: count={}", cards.len());
        self.players[slot].trash.append(&mut cards);
    }

    /// 필드에 메모리아를 놓고 등장 효과를 실행합니다.
    fn place_memoria(&mut self, slot: usize, card: Card) {
        let on_play: Option<EffectKey> = card.get_on_play().cloned();
        debug!("메모리아 등장: player={}, card={}", self.players[slot].id, card.get_id());
        self.players[slot].field.push(card.clone());
        if let Some(key) = on_play {
            self.process_effect(slot, &key, &mut EffectContext::default(), Some(&card));
        }
    }
}
