use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::{
    enums::{opponent_of, CardType, TEAM_CR, TEAM_VSPO},
    game::Game,
    utils::capitalize,
};

/// 카드 데이터의 조건 키를 파싱한 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// memoria_count_N
    MemoriaCount(usize),
    /// {color}_leaders_N
    ColorLeaders { color: String, count: usize },
    /// leaders_down_N
    LeadersDown(usize),
    /// hand_len_le_N
    HandLenLe(usize),
    Discard1,
    Discard1Optional,
    DiscardZeroCost,
    /// 모든 리더가 해당 팀 태그를 가짐
    AllTeam(String),
    MillEnemyAttack,
    Unknown(String),
}

/// 버리기 조건에 넘기는 선택 상태.
/// 한 번 버리기가 처리되면 Paid/Declined 로 바뀌어 다시 버리지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscardArg {
    /// 선택 없음. 버릴 수 있는지만 확인합니다.
    #[default]
    Check,
    /// 손패 인덱스를 골랐음
    Pick(usize),
    /// 이미 버렸음
    Paid,
    /// 버리지 않기로 함
    Declined,
}

fn trailing_number(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)?.parse().ok()
}

impl Condition {
    pub fn parse(key: &str) -> Condition {
        if let Some(n) = trailing_number(key, "memoria_count_") {
            return Condition::MemoriaCount(n);
        }

        if key.contains("_leaders_") {
            let parts: Vec<&str> = key.split('_').collect();
            if let (Some(color), Some(count)) = (parts.first(), parts.get(2)) {
                if let Ok(count) = count.parse() {
                    return Condition::ColorLeaders {
                        color: capitalize(color),
                        count,
                    };
                }
            }
            return Condition::Unknown(key.to_string());
        }

        if let Some(n) = trailing_number(key, "leaders_down_") {
            return Condition::LeadersDown(n);
        }
        if let Some(n) = trailing_number(key, "hand_len_le_") {
            return Condition::HandLenLe(n);
        }

        match key {
            "discard_1" => Condition::Discard1,
            "discard_1_optional" => Condition::Discard1Optional,
            "discard_0_cost" => Condition::DiscardZeroCost,
            "leaders_all_vspo" | "all_vspo" => Condition::AllTeam(TEAM_VSPO.to_string()),
            "leaders_all_cr" | "all_cr" => Condition::AllTeam(TEAM_CR.to_string()),
            "mill_enemy_attack" => Condition::MillEnemyAttack,
            _ => Condition::Unknown(key.to_string()),
        }
    }

    pub fn as_key(&self) -> String {
        match self {
            Condition::MemoriaCount(n) => format!("memoria_count_{}", n),
            Condition::ColorLeaders { color, count } => {
                format!("{}_leaders_{}", color.to_lowercase(), count)
            }
            Condition::LeadersDown(n) => format!("leaders_down_{}", n),
            Condition::HandLenLe(n) => format!("hand_len_le_{}", n),
            Condition::Discard1 => "discard_1".to_string(),
            Condition::Discard1Optional => "discard_1_optional".to_string(),
            Condition::DiscardZeroCost => "discard_0_cost".to_string(),
            Condition::AllTeam(tag) if tag == TEAM_VSPO => "leaders_all_vspo".to_string(),
            Condition::AllTeam(tag) if tag == TEAM_CR => "leaders_all_cr".to_string(),
            Condition::AllTeam(tag) => format!("leaders_all_{}", tag.to_lowercase()),
            Condition::MillEnemyAttack => "mill_enemy_attack".to_string(),
            Condition::Unknown(key) => key.clone(),
        }
    }

    /// 공격 전에 플레이어에게 버릴지 물어봐야 하는 조건인지
    pub fn is_optional_discard(&self) -> bool {
        matches!(self, Condition::Discard1Optional | Condition::DiscardZeroCost)
    }

    pub fn is_discard(&self) -> bool {
        matches!(
            self,
            Condition::Discard1 | Condition::Discard1Optional | Condition::DiscardZeroCost
        )
    }

    /// slot 플레이어 기준으로 조건을 평가합니다.
    /// 버리기 조건과 mill_enemy_attack 은 상태를 바꿉니다.
    pub fn evaluate(&self, game: &mut Game, slot: usize, discard: &mut DiscardArg) -> bool {
        let result = match self {
            Condition::MemoriaCount(n) => game.player(slot).memoria_on_field() >= *n,
            Condition::ColorLeaders { color, count } => {
                game.player(slot).leader_count_by_color(color) >= *count
            }
            Condition::LeadersDown(n) => game.player(slot).downed_leaders() >= *n,
            Condition::HandLenLe(n) => game.player(slot).hand.len() <= *n,
            Condition::Discard1 | Condition::Discard1Optional | Condition::DiscardZeroCost => {
                self.evaluate_discard(game, slot, discard)
            }
            Condition::AllTeam(tag) => game.player(slot).leaders.iter().all(|l| l.has_tag(tag)),
            Condition::MillEnemyAttack => {
                let opponent = game.player_mut(opponent_of(slot));
                if opponent.main_deck.is_empty() {
                    false
                } else {
                    let card = opponent.main_deck.remove(0);
                    let is_attack = card.is_type(CardType::Attack);
                    debug!("상대 덱 맨 위 카드 공개 후 트래시: card={}, attack={}", card.get_id(), is_attack);
                    opponent.trash.push(card);
                    is_attack
                }
            }
            Condition::Unknown(key) => {
                warn!("처리할 수 없는 조건 키: {}", key);
                false
            }
        };
        debug!("조건 평가: slot={}, condition={}, result={}", slot, self, result);
        result
    }

    fn evaluate_discard(&self, game: &mut Game, slot: usize, discard: &mut DiscardArg) -> bool {
        match *discard {
            DiscardArg::Paid => true,
            DiscardArg::Declined => false,
            DiscardArg::Check => {
                let hand = &game.player(slot).hand;
                match self {
                    Condition::Discard1 => !hand.is_empty(),
                    Condition::DiscardZeroCost => hand.iter().any(|c| c.get_cost() == 0),
                    _ => false,
                }
            }
            DiscardArg::Pick(index) => {
                let player = game.player_mut(slot);
                let allowed = match player.hand.get(index) {
                    Some(card) if *self == Condition::DiscardZeroCost => card.get_cost() == 0,
                    Some(_) => true,
                    None => false,
                };
                if allowed {
                    player.discard_from_hand(index);
                    *discard = DiscardArg::Paid;
                } else {
                    *discard = DiscardArg::Declined;
                }
                allowed
            }
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_key())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Condition::parse(&key))
    }
}
