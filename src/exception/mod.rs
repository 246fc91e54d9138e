use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::ActionOutcome;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("wrong phase! expected: {expected}, got: {actual}")]
    WrongPhase {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("not your turn")]
    NotYourTurn,
    #[error("unknown player: {0}")]
    UnknownPlayer(String),
    #[error("card not found")]
    CardNotFound,
    #[error("invalid index")]
    InvalidIndex,
    #[error("not enough PP: needed {needed}, available {available}")]
    InsufficientResources { needed: u32, available: u32 },
    #[error("missing target info for attack")]
    MissingTarget,
    #[error("invalid target: {0}")]
    InvalidTarget(&'static str),
    #[error("attacker is down")]
    AttackerDown,
    #[error("target is already down")]
    TargetDown,
    #[error("tactics already selected")]
    AlreadySelected,
    #[error("cannot use tactics on the very first turn")]
    FirstTurnTactics,
    #[error("already used tactics this turn")]
    TacticsLimitReached,
    #[error("no pending action")]
    NoPendingAction,
    #[error("must discard exactly {expected} card(s), got {got}")]
    DiscardCountMismatch { expected: usize, got: usize },
    #[error("must discard a cost 0 card")]
    MustDiscardZeroCost,
    #[error("invalid payload")]
    InvalidPayload,
    #[error("pending action must be resolved first")]
    PendingActionExists,
    #[error("template not found: {0}")]
    TemplateNotFound(String),
    #[error("catalog parse error: {0}")]
    CatalogParse(String),
    #[error("config load error: {0}")]
    ConfigLoad(String),
    #[error("io error: {0}")]
    Io(String),
}

impl GameError {
    /// 전송 계층에 실리는 reason 코드
    pub fn code(&self) -> &'static str {
        match self {
            Self::GameOver => "GAME_OVER",
            Self::WrongPhase { .. } => "WRONG_PHASE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::UnknownPlayer(_) => "UNKNOWN_PLAYER",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::InvalidIndex => "INVALID_INDEX",
            Self::InsufficientResources { .. } => "INSUFFICIENT_RESOURCES",
            Self::MissingTarget => "MISSING_TARGET",
            Self::InvalidTarget(_) => "INVALID_TARGET",
            Self::AttackerDown => "ATTACKER_DOWN",
            Self::TargetDown => "TARGET_DOWN",
            Self::AlreadySelected => "ALREADY_SELECTED",
            Self::FirstTurnTactics => "FIRST_TURN_TACTICS",
            Self::TacticsLimitReached => "TACTICS_LIMIT_REACHED",
            Self::NoPendingAction => "NO_PENDING_ACTION",
            Self::DiscardCountMismatch { .. } => "DISCARD_COUNT_MISMATCH",
            Self::MustDiscardZeroCost => "MUST_DISCARD_ZERO_COST",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::PendingActionExists => "PENDING_ACTION_EXISTS",
            Self::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            Self::CatalogParse(_) => "CATALOG_PARSE",
            Self::ConfigLoad(_) => "CONFIG_LOAD",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// 클라이언트로 전달되는 명령 처리 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub waiting_for_discard: bool,
}

impl From<Result<ActionOutcome, GameError>> for CommandResponse {
    fn from(result: Result<ActionOutcome, GameError>) -> Self {
        match result {
            Ok(outcome) => Self {
                success: true,
                reason: None,
                waiting_for_discard: outcome == ActionOutcome::AwaitingInput,
            },
            Err(e) => Self {
                success: false,
                reason: Some(e.code().to_string()),
                waiting_for_discard: false,
            },
        }
    }
}
