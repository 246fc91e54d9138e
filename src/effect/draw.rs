use super::EffectContext;
use crate::{
    enums::opponent_of,
    game::{pending::PendingAction, Game},
};

pub fn draw(game: &mut Game, slot: usize, count: usize) {
    game.draw_cards(slot, count);
}

/// 양쪽 플레이어가 뽑습니다. 시전자가 먼저.
pub fn draw_all(game: &mut Game, slot: usize, count: usize) {
    game.draw_cards(slot, count);
    game.draw_cards(opponent_of(slot), count);
}

/// 뽑은 뒤 직접 고른 카드를 버립니다.
pub fn draw_then_discard(game: &mut Game, slot: usize, draw: usize, discard: usize) {
    game.draw_cards(slot, draw);
    game.request_discard(slot, discard, None, false);
}

/// 덱 위 카드를 공개하고 그중 하나를 고르게 합니다.
pub fn cascade(game: &mut Game, slot: usize, max_cost: u32) {
    let reveal = game.rules().cascade_reveal;
    let deck = &mut game.player_mut(slot).main_deck;
    let count = reveal.min(deck.len());
    let cards: Vec<_> = deck.drain(..count).collect();
    if cards.is_empty() {
        return;
    }
    game.enqueue(slot, PendingAction::MsgSelectCascade { cards, max_cost });
}

pub fn draw_if_down(game: &mut Game, slot: usize, ctx: &EffectContext, count: usize) {
    if ctx.target_down {
        game.draw_cards(slot, count);
    }
}
