use serde::{Deserialize, Serialize};

use crate::{condition::Condition, effect::EffectKey, enums::CardType, utils::one_or_many};

/// 카드 카탈로그의 한 항목. 게임 중에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_play: Option<EffectKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_hit: Option<EffectKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_attack_end: Option<EffectKey>,
    // 공격 전에 데미지를 바꾸는 효과 (덱 공개, 즉사 판정)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<EffectKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub damage_add: i32,
    #[serde(default)]
    pub damage_boost: i32,
    #[serde(default)]
    pub conditional_boost: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
    #[serde(default)]
    pub is_ace: bool,
    #[serde(default)]
    pub equip_hp: i32,
}

impl CardTemplate {
    pub const COST_REDUCTION: &'static str = "cost_reduction";

    pub fn new(id: &str, name: &str, card_type: CardType, cost: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            card_type,
            cost,
            color: None,
            text: None,
            on_play: None,
            on_hit: None,
            on_attack_end: None,
            effect: None,
            condition: None,
            damage_add: 0,
            damage_boost: 0,
            conditional_boost: 0,
            special: None,
            is_ace: false,
            equip_hp: 0,
        }
    }

    /// 필드에 같은 카드가 정확히 한 장 있으면 비용이 0이 되는 카드인지
    pub fn has_free_copy_rule(&self) -> bool {
        self.special.as_deref() == Some(Self::COST_REDUCTION)
    }

    pub fn is_equipment(&self) -> bool {
        self.equip_hp > 0
    }
}

fn default_hp_before() -> i32 {
    100
}

fn default_hp_after() -> i32 {
    130
}

fn default_atk_before() -> i32 {
    30
}

fn default_atk_after() -> i32 {
    40
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub team: Vec<String>,
    #[serde(default = "default_hp_before")]
    pub hp_before: i32,
    #[serde(default = "default_hp_after")]
    pub hp_after: i32,
    #[serde(default = "default_atk_before")]
    pub atk_before: i32,
    #[serde(default = "default_atk_after")]
    pub atk_after: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<Ability>,
}

impl LeaderTemplate {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.team.iter().any(|t| t == tag)
    }
}

/// 리더 고유 능력
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub trigger: String,
    #[serde(default)]
    pub effect: Vec<AbilityEffect>,
}

impl Ability {
    pub const AWAKEN: &'static str = "awaken";

    pub fn triggers_on_awaken(&self) -> bool {
        self.trigger == Self::AWAKEN
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityEffect {
    #[serde(rename = "type")]
    pub kind: AbilityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<AbilityTarget>,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    Damage,
    Draw,
    Discard,
    Heal,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTarget {
    OpponentAllLeaders,
    OpponentOneLeader,
    OwnLeaderOne,
    #[serde(other)]
    Other,
}
