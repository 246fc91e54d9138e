use super::{EffectContext, EffectKey};
use crate::{
    enums::opponent_of,
    game::{pending::PendingAction, Game},
};

/// discard_all_1 이 시전자의 버리기 뒤에 이어서 실행하는 효과
const OPPONENT_DISCARD_KEY: &str = "discard_opp_1";

pub fn heal(game: &mut Game, slot: usize, ctx: &EffectContext, amount: i32) {
    game.heal_leader(slot, amount, ctx.target_index);
}

pub fn buff_attack(game: &mut Game, slot: usize, amount: i32) {
    game.player_mut(slot).turn_buffs.attack += amount;
}

pub fn boost_next_attack(game: &mut Game, slot: usize, amount: i32) {
    game.player_mut(slot).next_attack_boost += amount;
}

pub fn overkill_recover_pp(
    game: &mut Game,
    slot: usize,
    ctx: &EffectContext,
    threshold: i32,
    amount: u32,
) {
    if ctx.overkill >= threshold {
        game.recover_pp(slot, amount);
    }
}

pub fn overkill(game: &mut Game, slot: usize, ctx: &EffectContext, recover_pp: bool, damage: bool) {
    if ctx.overkill < game.rules().overkill_threshold {
        return;
    }
    if recover_pp {
        game.recover_pp(slot, 1);
    }
    if damage {
        let amount = game.rules().default_overkill_damage;
        game.deal_damage_to_leader(opponent_of(slot), amount, None);
    }
}

/// 시전자가 먼저 버리고, 이어서 상대가 버립니다.
pub fn discard_self_then_opp(game: &mut Game, slot: usize, count: usize) {
    let next = EffectKey::new(OPPONENT_DISCARD_KEY);
    if game.player(slot).hand.is_empty() {
        discard_opp(game, slot, count);
        return;
    }
    game.enqueue(
        slot,
        PendingAction::MsgSelectDiscard {
            count,
            next_effect: Some(next),
        },
    );
}

/// 상대가 자기 손패에서 고릅니다.
pub fn discard_opp(game: &mut Game, slot: usize, count: usize) {
    let opponent = opponent_of(slot);
    if game.player(opponent).hand.is_empty() {
        return;
    }
    game.enqueue(
        opponent,
        PendingAction::MsgSelectDiscard {
            count,
            next_effect: None,
        },
    );
}

pub fn discard_opp_if_down(game: &mut Game, slot: usize, ctx: &EffectContext, count: usize) {
    if ctx.target_down {
        game.request_discard(opponent_of(slot), count, None, false);
    }
}

/// 손패의 메모리아를 비용 합계 max_cost 까지 골라 필드에 냅니다.
pub fn play_memoria(game: &mut Game, slot: usize, max_cost: u32) {
    let candidates: Vec<_> = game
        .player(slot)
        .hand
        .iter()
        .filter(|c| c.is_memoria() && !c.is_ace() && c.get_cost() <= max_cost)
        .map(|c| c.get_uuid())
        .collect();
    if candidates.is_empty() {
        return;
    }
    game.enqueue(
        slot,
        PendingAction::MsgSelectMemoriaCascade {
            candidates,
            max_cost,
        },
    );
}

pub fn scry_trash(game: &mut Game, slot: usize) {
    if let Some(top) = game.player(slot).main_deck.first().cloned() {
        game.enqueue(slot, PendingAction::MsgConfirmTrash { card: top });
    }
}

pub fn scry_declare(game: &mut Game, slot: usize, draw: usize) {
    game.enqueue(slot, PendingAction::MsgDeclareType { draw });
}
