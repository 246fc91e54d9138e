use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    // 라운드 시작 시 양쪽이 택틱스를 한 장씩 고르는 단계
    TacticsSelection,

    // 카드 사용, 공격, 턴 종료가 가능한 단계
    Main,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::TacticsSelection => "TACTICS_SELECTION",
            Phase::Main => "MAIN",
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self, Phase::Main)
    }

    pub fn is_tactics_selection(&self) -> bool {
        matches!(self, Phase::TacticsSelection)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
