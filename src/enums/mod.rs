pub mod phase;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const PLAYER_1: usize = 0;
pub const PLAYER_2: usize = 1;
pub const PLAYER_COUNT: usize = 2;

pub const RULES_PATH_ENV: &str = "DUEL_RULES_PATH";
pub const DEFAULT_RULES_PATH: &str = "config/rules.toml";

pub const TICKET_ID_PREFIX: &str = "pp_ticket_";
pub const TICKET_NAME: &str = "PP Ticket";
pub const TICKET_TEXT: &str = "Recover 1 PP";

/// 리더 팀 태그
pub const TEAM_VSPO: &str = "VSPO!";
pub const TEAM_CR: &str = "CR";

/// 대상 플레이어의 상대 슬롯
pub fn opponent_of(slot: usize) -> usize {
    (slot + 1) % PLAYER_COUNT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Attack,
    Memoria,
    Tactics,
    Ticket,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Attack => "ATTACK",
            CardType::Memoria => "MEMORIA",
            CardType::Tactics => "TACTICS",
            CardType::Ticket => "TICKET",
        }
    }

    /// 덱 아웃 시 메인 덱으로 돌아가는 카드인지 여부
    pub fn is_main_deck_type(&self) -> bool {
        matches!(self, CardType::Attack | CardType::Memoria)
    }
}

impl Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    #[serde(rename = "DECK_OUT")]
    DeckOut,
    #[serde(rename = "2_ROUNDS_WON")]
    RoundsWon,
}

impl Display for WinReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinReason::DeckOut => write!(f, "DECK_OUT"),
            WinReason::RoundsWon => write!(f, "2_ROUNDS_WON"),
        }
    }
}
