pub mod action;
pub mod combat;
pub mod command;
pub mod pending;
pub mod phase;
pub mod resolve;
pub mod turn;
pub mod view;

pub use action::{DiscardChoice, TargetInfo};
pub use command::ClientCommand;
pub use resolve::ResolvePayload;
pub use view::{CardView, MatchView, PlayerView};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    card::{cards::CardVecExt, Card},
    catalog::{CardCatalog, PlayerEntry},
    config::RulesConfig,
    effect::{EffectContext, EffectKey},
    enums::{phase::Phase, WinReason, PLAYER_1, PLAYER_2},
    exception::GameError,
    unit::{Leader, PlayerState},
    utils::uuid_from_rng,
};

use pending::PendingAction;
use turn::Turn;

/// 명령 처리 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionOutcome {
    Completed,
    /// 처리할 결정이 대기열에 남아 있음
    AwaitingInput,
}

/// 한 매치의 전체 상태. 모든 명령은 이 구조체를 통해 순서대로 적용됩니다.
#[derive(Debug, Clone)]
pub struct Game {
    players: [PlayerState; 2],
    rules: RulesConfig,
    rng: StdRng,
    turn: Turn,
    current_round: u32,
    max_pp: u32,
    phase: Phase,
    first_player: usize,
    round_winner: Option<usize>,
    game_winner: Option<usize>,
    win_reason: Option<WinReason>,
}

impl Game {
    /// 덱을 구성하고 1라운드를 준비합니다.
    /// 같은 시드와 같은 명령 순서라면 항상 같은 결과가 나옵니다.
    pub fn new<C: CardCatalog + ?Sized>(
        catalog: &C,
        entries: [PlayerEntry; 2],
        rules: RulesConfig,
        seed: u64,
    ) -> Result<Game, GameError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let [p1, p2] = entries;
        let players = [
            Self::build_player(catalog, p1, &mut rng)?,
            Self::build_player(catalog, p2, &mut rng)?,
        ];
        let first_player = rng.gen_range(PLAYER_1..=PLAYER_2);

        let mut game = Game {
            players,
            rules,
            rng,
            turn: Turn::new(),
            current_round: 1,
            max_pp: 0,
            phase: Phase::TacticsSelection,
            first_player,
            round_winner: None,
            game_winner: None,
            win_reason: None,
        };
        info!(
            "매치 생성: p1={}, p2={}, seed={}, first={}",
            game.players[PLAYER_1].id, game.players[PLAYER_2].id, seed, first_player
        );
        game.setup_round();
        Ok(game)
    }

    /// 전역 규칙으로 매치를 만듭니다.
    pub fn with_global_rules<C: CardCatalog + ?Sized>(
        catalog: &C,
        entries: [PlayerEntry; 2],
        seed: u64,
    ) -> Result<Game, GameError> {
        Self::new(catalog, entries, RulesConfig::global().clone(), seed)
    }

    fn build_player<C: CardCatalog + ?Sized>(
        catalog: &C,
        entry: PlayerEntry,
        rng: &mut StdRng,
    ) -> Result<PlayerState, GameError> {
        let leaders = entry
            .deck
            .leaders
            .iter()
            .map(|id| catalog.require_leader(id).map(|t| Leader::new(t.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let mut instantiate = |ids: &[String]| -> Result<Vec<Card>, GameError> {
            ids.iter()
                .map(|id| {
                    catalog
                        .require_card(id)
                        .map(|t| Card::new(uuid_from_rng(rng), t.clone()))
                })
                .collect()
        };
        let mut main_deck = instantiate(&entry.deck.main)?;
        let tactics_deck = instantiate(&entry.deck.tactics)?;
        main_deck.shuffle_with(rng);

        let name = if entry.name.is_empty() {
            entry.id.clone()
        } else {
            entry.name
        };
        Ok(PlayerState::new(
            entry.id,
            name,
            leaders,
            main_deck,
            tactics_deck,
        ))
    }

    pub fn player(&self, slot: usize) -> &PlayerState {
        &self.players[slot]
    }

    pub fn player_mut(&mut self, slot: usize) -> &mut PlayerState {
        &mut self.players[slot]
    }

    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn max_pp(&self) -> u32 {
        self.max_pp
    }

    pub fn turn_player(&self) -> usize {
        self.turn.current_turn()
    }

    pub fn turn_player_id(&self) -> &str {
        &self.players[self.turn.current_turn()].id
    }

    pub fn turn_count(&self) -> u32 {
        self.turn.get_turn_count()
    }

    pub fn round_winner(&self) -> Option<usize> {
        self.round_winner
    }

    pub fn game_winner(&self) -> Option<usize> {
        self.game_winner
    }

    pub fn win_reason(&self) -> Option<WinReason> {
        self.win_reason
    }

    pub fn is_over(&self) -> bool {
        self.game_winner.is_some()
    }

    pub fn slot_of(&self, player_id: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))
    }

    pub fn player_id(&self, slot: usize) -> &str {
        &self.players[slot].id
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub(crate) fn next_uuid(&mut self) -> Uuid {
        uuid_from_rng(&mut self.rng)
    }

    pub(crate) fn ensure_not_over(&self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    pub(crate) fn ensure_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected: expected.as_str(),
                actual: self.phase.as_str(),
            });
        }
        Ok(())
    }

    pub(crate) fn ensure_turn(&self, slot: usize) -> Result<(), GameError> {
        if !self.turn.is_turn_of(slot) {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// 손패 제한 버리기로 턴 종료가 멈춰 있는 동안에는 다른 행동을 받지 않습니다.
    pub(crate) fn ensure_turn_not_ending(&self, slot: usize) -> Result<(), GameError> {
        let ending = self.players[slot].pending.iter().any(|action| {
            matches!(
                action,
                PendingAction::SelectDiscard {
                    is_hand_limit: true,
                    ..
                }
            )
        });
        if ending {
            return Err(GameError::PendingActionExists);
        }
        Ok(())
    }

    /// 대기열이 남아 있으면 입력 대기
    pub(crate) fn outcome_for(&self, slot: usize) -> ActionOutcome {
        if self.players[slot].pending.is_empty() {
            ActionOutcome::Completed
        } else {
            ActionOutcome::AwaitingInput
        }
    }

    pub(crate) fn enqueue(&mut self, slot: usize, action: PendingAction) {
        debug!("결정 대기열 추가: slot={}, type={}", slot, action.kind());
        self.players[slot].pending.push(action);
    }

    /// 손패에서 count 장을 직접 고르게 합니다. 손패보다 많이 요구하지 않습니다.
    pub(crate) fn request_discard(
        &mut self,
        slot: usize,
        count: usize,
        next_effect: Option<EffectKey>,
        is_hand_limit: bool,
    ) {
        let count = count.min(self.players[slot].hand.len());
        if count == 0 {
            return;
        }
        self.enqueue(
            slot,
            PendingAction::SelectDiscard {
                count,
                next_effect,
                is_hand_limit,
            },
        );
    }

    /// 효과 키 하나를 실행합니다. 알 수 없는 키는 로그만 남기고 넘어갑니다.
    pub fn process_effect(
        &mut self,
        slot: usize,
        key: &EffectKey,
        ctx: &mut EffectContext,
        source: Option<&Card>,
    ) {
        debug!("효과 처리: slot={}, key={}, ctx={:?}", slot, key, ctx);
        let effect = key.effect().clone();
        effect.apply(self, slot, ctx, source, key);
    }
}
