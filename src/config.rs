use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{
    enums::{DEFAULT_RULES_PATH, RULES_PATH_ENV},
    exception::GameError,
};

/// 매치 규칙 수치
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub hand_limit: usize,
    pub opening_hand: usize,
    /// 라운드별 최대 PP (1라운드부터)
    pub max_pp_by_round: Vec<u32>,
    pub rounds_to_win: u32,
    pub lethal_damage: i32,
    pub overkill_threshold: i32,
    pub default_overkill_damage: i32,
    /// cascade 효과로 공개하는 덱 위 카드 수
    pub cascade_reveal: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_limit: 7,
            opening_hand: 4,
            max_pp_by_round: vec![3, 4, 5],
            rounds_to_win: 2,
            lethal_damage: 999,
            overkill_threshold: 30,
            default_overkill_damage: 50,
            cascade_reveal: 3,
        }
    }
}

/// 전역 규칙 인스턴스
static RULES: Lazy<RulesConfig> = Lazy::new(|| {
    RulesConfig::load().unwrap_or_else(|e| {
        warn!("규칙 파일을 읽지 못했습니다: {}. 기본값을 사용합니다.", e);
        RulesConfig::default()
    })
});

impl RulesConfig {
    /// 전역 설정 인스턴스 가져오기
    pub fn global() -> &'static RulesConfig {
        &RULES
    }

    /// 설정 파일 로드
    pub fn load() -> Result<Self, GameError> {
        let path = Self::find_config_file()?;
        let config = Self::from_path(&path)?;
        info!("규칙 설정 로드: {:?}", path);
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, GameError> {
        let config: RulesConfig =
            toml::from_str(content).map_err(|e| GameError::ConfigLoad(e.to_string()))?;
        config.validate().map_err(GameError::ConfigLoad)?;
        Ok(config)
    }

    /// 환경 변수, 작업 디렉토리 순으로 찾습니다.
    fn find_config_file() -> Result<PathBuf, GameError> {
        if let Ok(path) = std::env::var(RULES_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
            return Err(GameError::ConfigLoad(format!(
                "{} points to a missing file: {:?}",
                RULES_PATH_ENV, path
            )));
        }

        let cwd_config = std::env::current_dir()?.join(DEFAULT_RULES_PATH);
        if cwd_config.exists() {
            return Ok(cwd_config);
        }

        Err(GameError::ConfigLoad("rules file not found".to_string()))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_pp_by_round.is_empty() {
            return Err("max_pp_by_round must not be empty".to_string());
        }
        if self.hand_limit == 0 {
            return Err(format!("Invalid hand_limit: {} (must be > 0)", self.hand_limit));
        }
        if self.rounds_to_win == 0 {
            return Err(format!(
                "Invalid rounds_to_win: {} (must be > 0)",
                self.rounds_to_win
            ));
        }
        if self.lethal_damage <= 0 {
            return Err(format!(
                "Invalid lethal_damage: {} (must be > 0)",
                self.lethal_damage
            ));
        }
        Ok(())
    }

    /// 라운드 번호(1부터)의 최대 PP. 표를 넘어가면 마지막 값을 씁니다.
    pub fn max_pp_for_round(&self, round: u32) -> u32 {
        let index = (round.max(1) - 1) as usize;
        self.max_pp_by_round
            .get(index)
            .or(self.max_pp_by_round.last())
            .copied()
            .unwrap_or(0)
    }
}
