pub mod template;

use std::{
    collections::{hash_map::Entry, HashMap},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::exception::GameError;

pub use template::{Ability, AbilityEffect, AbilityKind, AbilityTarget, CardTemplate, LeaderTemplate};

/// 카드/리더 원본 데이터 조회 창구
pub trait CardCatalog {
    fn card(&self, id: &str) -> Option<&CardTemplate>;
    fn leader(&self, id: &str) -> Option<&LeaderTemplate>;

    fn require_card(&self, id: &str) -> Result<&CardTemplate, GameError> {
        self.card(id)
            .ok_or_else(|| GameError::TemplateNotFound(id.to_string()))
    }

    fn require_leader(&self, id: &str) -> Result<&LeaderTemplate, GameError> {
        self.leader(id)
            .ok_or_else(|| GameError::TemplateNotFound(id.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    cards: Vec<CardTemplate>,
    #[serde(default)]
    leaders: Vec<LeaderTemplate>,
}

/// 메모리에 올려둔 카탈로그
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: HashMap<String, CardTemplate>,
    leaders: HashMap<String, LeaderTemplate>,
    /// 이름 -> id. 이름이 겹치면 먼저 나온 템플릿을 가리킵니다.
    card_names: HashMap<String, String>,
    leader_names: HashMap<String, String>,
}

fn index_name(names: &mut HashMap<String, String>, name: &str, id: &str) {
    match names.entry(name.to_string()) {
        Entry::Vacant(e) => {
            e.insert(id.to_string());
        }
        Entry::Occupied(e) => {
            warn!("이름이 겹치는 템플릿: name={}, kept={}, ignored={}", name, e.get(), id);
        }
    }
}

impl Catalog {
    pub fn new(cards: Vec<CardTemplate>, leaders: Vec<LeaderTemplate>) -> Self {
        let mut card_names = HashMap::new();
        for card in &cards {
            index_name(&mut card_names, &card.name, &card.id);
        }
        let mut leader_names = HashMap::new();
        for leader in &leaders {
            index_name(&mut leader_names, &leader.name, &leader.id);
        }

        Self {
            cards: cards.into_iter().map(|c| (c.id.clone(), c)).collect(),
            leaders: leaders.into_iter().map(|l| (l.id.clone(), l)).collect(),
            card_names,
            leader_names,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| GameError::CatalogParse(e.to_string()))?;
        Ok(Self::new(file.cards, file.leaders))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&json)?;
        info!(
            "카탈로그 로드 완료: path={:?}, cards={}, leaders={}",
            path.as_ref(),
            catalog.cards.len(),
            catalog.leaders.len()
        );
        Ok(catalog)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn leader_count(&self) -> usize {
        self.leaders.len()
    }
}

impl CardCatalog for Catalog {
    fn card(&self, id: &str) -> Option<&CardTemplate> {
        self.cards
            .get(id)
            .or_else(|| self.card_names.get(id).and_then(|id| self.cards.get(id)))
    }

    // 리더는 이름으로도 찾을 수 있습니다.
    fn leader(&self, id: &str) -> Option<&LeaderTemplate> {
        self.leaders
            .get(id)
            .or_else(|| self.leader_names.get(id).and_then(|id| self.leaders.get(id)))
    }
}

/// 카드 id 로 구성된 덱
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub leaders: Vec<String>,
    #[serde(default)]
    pub main: Vec<String>,
    #[serde(default)]
    pub tactics: Vec<String>,
}

/// 매치에 참가하는 플레이어 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub deck: DeckList,
}
