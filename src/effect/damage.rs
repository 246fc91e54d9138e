use tracing::debug;

use super::{AoeMode, EffectContext, EffectKey, Gates, OtherAmount};
use crate::{
    card::Card,
    condition::{Condition, DiscardArg},
    enums::opponent_of,
    game::{
        pending::{PendingAction, TargetedEffect},
        Game,
    },
};

const HAND_LOW: usize = 2;
const MEMORIA_GATE: usize = 2;
const TEAM_DAMAGE_PER_LEADER: i32 = 10;

pub fn damage_enemy(game: &mut Game, slot: usize, ctx: &EffectContext, amount: i32) {
    game.deal_damage_to_leader(opponent_of(slot), amount, ctx.target_index);
}

pub fn aoe(game: &mut Game, slot: usize, ctx: &EffectContext, amount: i32, mode: AoeMode) {
    game.deal_aoe(opponent_of(slot), amount, mode, ctx.target_index);
}

pub fn conditional_aoe(
    game: &mut Game,
    slot: usize,
    ctx: &EffectContext,
    amount: i32,
    condition: &Condition,
) {
    if condition.evaluate(game, slot, &mut DiscardArg::Check) {
        game.deal_aoe(opponent_of(slot), amount, AoeMode::Others, ctx.target_index);
    }
}

pub fn damage_if_down(game: &mut Game, slot: usize, ctx: &EffectContext, amount: i32) {
    if ctx.target_down {
        game.deal_damage_to_leader(opponent_of(slot), amount, ctx.target_index);
    }
}

pub fn damage_if_hand_low(game: &mut Game, slot: usize, ctx: &EffectContext, amount: i32) {
    if game.player(slot).hand.len() <= HAND_LOW {
        game.deal_damage_to_leader(opponent_of(slot), amount, ctx.target_index);
    }
}

/// 대상이 정해져 있으면 바로, 아니면 대상 선택을 요청합니다.
pub fn damage_one_enemy(
    game: &mut Game,
    slot: usize,
    ctx: &EffectContext,
    amount: i32,
    key: &EffectKey,
) {
    match ctx.target_index {
        Some(index) => {
            game.deal_damage_to_leader(opponent_of(slot), amount, Some(index));
        }
        None => game.enqueue(
            slot,
            PendingAction::SelectEffectTarget {
                effect: TargetedEffect::Replay { effect: key.clone() },
                exclude_index: None,
                attacker_index: ctx.attacker_index,
            },
        ),
    }
}

/// 공격 대상이 아닌 다른 적 리더 하나를 고르게 합니다.
pub fn damage_one_other(
    game: &mut Game,
    slot: usize,
    ctx: &mut EffectContext,
    source: Option<&Card>,
    amount: &OtherAmount,
    gates: &Gates,
) {
    if let Some(condition) = source.and_then(|c| c.get_condition()) {
        if !condition.evaluate(game, slot, &mut ctx.discard) {
            return;
        }
    }

    let opponent = game.player(opponent_of(slot));
    let has_other_target = opponent
        .leaders
        .iter()
        .enumerate()
        .any(|(i, l)| l.is_alive() && Some(i) != ctx.target_index);
    if !has_other_target {
        debug!("다른 대상이 없어 효과를 건너뜁니다: slot={}", slot);
        return;
    }

    if gates.if_down && !ctx.target_down {
        return;
    }
    if gates.if_memoria_2 && game.player(slot).memoria_on_field() < MEMORIA_GATE {
        return;
    }
    if gates.if_hand_low && game.player(slot).hand.len() > HAND_LOW {
        return;
    }
    if gates.overkill && ctx.overkill < game.rules().overkill_threshold {
        return;
    }

    let value = match amount {
        OtherAmount::Flat(n) => *n,
        OtherAmount::PerTeam(tag) => {
            game.player(slot).leader_count_by_tag(tag) as i32 * TEAM_DAMAGE_PER_LEADER
        }
        OtherAmount::DefaultOverkill => game.rules().default_overkill_damage,
    };

    game.enqueue(
        slot,
        PendingAction::SelectEffectTarget {
            effect: TargetedEffect::Damage { amount: value },
            exclude_index: ctx.target_index,
            attacker_index: ctx.attacker_index,
        },
    );
}

pub fn instant_down(game: &mut Game, slot: usize, ctx: &EffectContext) {
    if let Some(index) = ctx.target_index {
        let lethal = game.rules().lethal_damage;
        game.deal_damage_to_leader(opponent_of(slot), lethal, Some(index));
    }
}
