use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::{ActionOutcome, Game};
use crate::{
    card::{cards::CardVecExt, Card},
    enums::{opponent_of, phase::Phase, WinReason, PLAYER_1, PLAYER_2},
    exception::GameError,
    unit::PpPool,
};

impl Game {
    /// 라운드 준비. 필드와 손패를 비우고 리더와 PP 를 라운드 기준으로 되돌립니다.
    pub(crate) fn setup_round(&mut self) {
        self.phase = Phase::TacticsSelection;
        self.turn.reset_turn_count();
        self.max_pp = self.rules.max_pp_for_round(self.current_round);

        for slot in [PLAYER_1, PLAYER_2] {
            let ids: Vec<_> = (0..self.max_pp).map(|_| self.next_uuid()).collect();
            let player = &mut self.players[slot];
            player.tactics_ready = false;
            player.clear_field();
            player.clear_hand();
            player.leaders.iter_mut().for_each(|l| l.reset_for_round());
            player.pp_cards = PpPool::new(ids);
            player.reset_turn_buffers();
            player.pending.drop_stale();
        }

        if self.current_round == 1 {
            self.turn.set_turn(self.first_player);
        } else if let Some(winner) = self.round_winner {
            self.turn.set_turn(opponent_of(winner));
        }
        self.round_winner = None;

        info!(
            "라운드 준비 완료: round={}, max_pp={}, first={}",
            self.current_round,
            self.max_pp,
            self.turn_player_id()
        );
    }

    /// 라운드 시작 전 택틱스 한 장을 고릅니다. 양쪽이 모두 고르면 메인 페이즈로.
    #[instrument(skip(self))]
    pub fn select_tactics(
        &mut self,
        player_id: &str,
        deck_index: usize,
    ) -> Result<ActionOutcome, GameError> {
        let slot = self.slot_of(player_id)?;
        self.ensure_not_over()?;
        self.ensure_phase(Phase::TacticsSelection)?;

        let player = &mut self.players[slot];
        if player.tactics_ready {
            return Err(GameError::AlreadySelected);
        }

        // 택틱스 덱이 비었으면 고를 것 없이 준비 완료
        if !player.tactics_deck.is_empty() {
            if deck_index >= player.tactics_deck.len() {
                return Err(GameError::CardNotFound);
            }
            let card = player.tactics_deck.remove(deck_index);
            debug!("택틱스 선택: player={}, card={}", player_id, card.get_id());
            player.tactics_area.push(card);
        }
        player.tactics_ready = true;

        if self.players.iter().all(|p| p.tactics_ready) {
            self.start_round_main();
        }
        Ok(self.outcome_for(slot))
    }

    fn start_round_main(&mut self) {
        self.phase = Phase::Main;

        let second = self.turn.get_opponent_turn();
        let ticket = Card::ticket(self.next_uuid());
        self.players[second].tactics_area.push(ticket);

        let opening = self.rules.opening_hand;
        let first = self.turn.current_turn();
        self.draw_cards(first, opening);
        self.draw_cards(second, opening);

        info!("메인 페이즈 시작: round={}, turn={}", self.current_round, self.turn_player_id());
    }

    /// 덱 위에서 count 장을 뽑습니다. 덱이 비면 덱 아웃 처리 후 계속 뽑습니다.
    pub(crate) fn draw_cards(&mut self, slot: usize, count: usize) {
        for _ in 0..count {
            if self.players[slot].main_deck.is_empty() {
                self.handle_deck_out(slot);
                if self.is_over() {
                    return;
                }
            }
            let player = &mut self.players[slot];
            if !player.main_deck.is_empty() {
                let card = player.main_deck.remove(0);
                player.hand.push(card);
            }
        }
    }

    /// 메인 덱이 비었을 때. 택틱스 덱도 비었으면 패배.
    /// 아니면 트래시의 메인 카드를 섞어 덱으로 만들고 택틱스 한 장을 벌칙으로 버립니다.
    pub(crate) fn handle_deck_out(&mut self, slot: usize) {
        if self.players[slot].tactics_deck.is_empty() {
            warn!("덱 아웃 패배: player={}", self.players[slot].id);
            self.end_game(opponent_of(slot), WinReason::DeckOut);
            return;
        }

        let mut recycled = self.players[slot]
            .trash
            .split_off_where(|c| c.get_card_type().is_main_deck_type());
        recycled.shuffle_with(self.rng());

        let penalty_index = {
            let len = self.players[slot].tactics_deck.len();
            self.rng().gen_range(0..len)
        };

        let player = &mut self.players[slot];
        player.main_deck = recycled;
        let penalty = player.tactics_deck.remove(penalty_index);
        info!(
            "덱 아웃: player={}, recycled={}, penalty={}",
            player.id,
            player.main_deck.len(),
            penalty.get_id()
        );
        player.trash.push(penalty);
    }

    /// 라운드 승리 처리. 필요한 승수에 도달하면 매치가 끝납니다.
    pub(crate) fn handle_round_win(&mut self, winner: usize) {
        self.players[winner].rounds_won += 1;
        self.round_winner = Some(winner);
        info!(
            "라운드 승리: round={}, winner={}, rounds_won={}",
            self.current_round, self.players[winner].id, self.players[winner].rounds_won
        );

        if self.players[winner].rounds_won >= self.rules.rounds_to_win {
            self.end_game(winner, WinReason::RoundsWon);
        } else {
            self.current_round += 1;
            self.setup_round();
        }
    }

    pub(crate) fn end_game(&mut self, winner: usize, reason: WinReason) {
        if self.game_winner.is_some() {
            return;
        }
        self.game_winner = Some(winner);
        self.win_reason = Some(reason);
        info!("매치 종료: winner={}, reason={}", self.players[winner].id, reason);
    }
}
