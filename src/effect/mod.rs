//! 카드 효과 키를 해석하고 실행합니다.
//!
//! 효과 키는 카드 데이터에서만 문자열로 존재하고, 로드 시점에 [`registry`] 를 거쳐
//! [`Effect`] 로 바뀝니다. 실행은 항상 [`Effect`] 에 대한 match 로 이루어집니다.

pub mod ability;
pub mod damage;
pub mod draw;
pub mod misc;
pub mod registry;

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{card::Card, condition::Condition, condition::DiscardArg, game::Game};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AoeMode {
    /// 살아 있는 모든 리더
    All,
    /// 지정한 대상을 제외한 나머지
    Others,
}

/// `_one_other` 계열의 데미지 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherAmount {
    Flat(i32),
    /// 태그를 가진 아군 리더 수 x 10
    PerTeam(String),
    /// overkill_ 키에서 값을 읽지 못함. 규칙의 기본 overkill 데미지를 씁니다.
    DefaultOverkill,
}

/// 키 안의 조건 접미사. 키에 있는 조건은 모두 만족해야 합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gates {
    pub if_down: bool,
    pub if_memoria_2: bool,
    pub if_hand_low: bool,
    pub overkill: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Draw(usize),
    DrawAll(usize),
    DrawThenDiscard { draw: usize, discard: usize },
    Cascade { max_cost: u32 },
    DrawIfDown(usize),

    DamageEnemy(i32),
    Aoe { amount: i32, mode: AoeMode },
    ConditionalAoe { amount: i32, condition: Condition },
    DamageIfDown(i32),
    DamageIfHandLow(i32),
    DamageOneEnemy(i32),
    DamageOneOther { amount: OtherAmount, gates: Gates },
    InstantDown,

    Heal(i32),
    BuffAttack(i32),
    BoostNextAttack(i32),
    OverkillRecoverPp { threshold: i32, amount: u32 },
    Overkill { recover_pp: bool, damage: bool },

    DiscardSelfThenOpp(usize),
    DiscardOpp(usize),
    DiscardOppIfDown(usize),
    PlayMemoria { max_cost: u32 },
    ScryTrash,
    ScryDeclare { draw: usize },

    // 공격 데미지 계산 단계에서만 읽는 효과
    MillEnemyAttackBonus(i32),
    InstantDownIf(Condition),

    Unknown,
}

impl Effect {
    /// 공격 계산 중에만 의미가 있는 효과인지
    pub fn is_pre_attack(&self) -> bool {
        matches!(self, Effect::MillEnemyAttackBonus(_) | Effect::InstantDownIf(_))
    }
}

/// 원본 키 문자열과 해석된 효과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectKey {
    key: String,
    effect: Effect,
}

impl EffectKey {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            effect: registry::lookup(key),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn is_known(&self) -> bool {
        self.effect != Effect::Unknown
    }
}

impl From<&str> for EffectKey {
    fn from(key: &str) -> Self {
        EffectKey::new(key)
    }
}

impl Display for EffectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl Serialize for EffectKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

impl<'de> Deserialize<'de> for EffectKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(EffectKey::new(&key))
    }
}

/// 효과가 실행되는 상황
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectContext {
    pub target_down: bool,
    pub overkill: i32,
    pub target_index: Option<usize>,
    pub attacker_index: Option<usize>,
    pub discard: DiscardArg,
}

impl EffectContext {
    pub fn targeting(target_index: Option<usize>) -> Self {
        Self {
            target_index,
            ..Default::default()
        }
    }
}

impl Effect {
    /// slot 플레이어가 효과를 실행합니다.
    pub(crate) fn apply(
        &self,
        game: &mut Game,
        slot: usize,
        ctx: &mut EffectContext,
        source: Option<&Card>,
        key: &EffectKey,
    ) {
        match self {
            Effect::Draw(count) => draw::draw(game, slot, *count),
            Effect::DrawAll(count) => draw::draw_all(game, slot, *count),
            Effect::DrawThenDiscard { draw, discard } => {
                draw::draw_then_discard(game, slot, *draw, *discard)
            }
            Effect::Cascade { max_cost } => draw::cascade(game, slot, *max_cost),
            Effect::DrawIfDown(count) => draw::draw_if_down(game, slot, ctx, *count),

            Effect::DamageEnemy(amount) => damage::damage_enemy(game, slot, ctx, *amount),
            Effect::Aoe { amount, mode } => damage::aoe(game, slot, ctx, *amount, *mode),
            Effect::ConditionalAoe { amount, condition } => {
                damage::conditional_aoe(game, slot, ctx, *amount, condition)
            }
            Effect::DamageIfDown(amount) => damage::damage_if_down(game, slot, ctx, *amount),
            Effect::DamageIfHandLow(amount) => {
                damage::damage_if_hand_low(game, slot, ctx, *amount)
            }
            Effect::DamageOneEnemy(amount) => {
                damage::damage_one_enemy(game, slot, ctx, *amount, key)
            }
            Effect::DamageOneOther { amount, gates } => {
                damage::damage_one_other(game, slot, ctx, source, amount, gates)
            }
            Effect::InstantDown => damage::instant_down(game, slot, ctx),

            Effect::Heal(amount) => misc::heal(game, slot, ctx, *amount),
            Effect::BuffAttack(amount) => misc::buff_attack(game, slot, *amount),
            Effect::BoostNextAttack(amount) => misc::boost_next_attack(game, slot, *amount),
            Effect::OverkillRecoverPp { threshold, amount } => {
                misc::overkill_recover_pp(game, slot, ctx, *threshold, *amount)
            }
            Effect::Overkill { recover_pp, damage } => {
                misc::overkill(game, slot, ctx, *recover_pp, *damage)
            }

            Effect::DiscardSelfThenOpp(count) => misc::discard_self_then_opp(game, slot, *count),
            Effect::DiscardOpp(count) => misc::discard_opp(game, slot, *count),
            Effect::DiscardOppIfDown(count) => misc::discard_opp_if_down(game, slot, ctx, *count),
            Effect::PlayMemoria { max_cost } => misc::play_memoria(game, slot, *max_cost),
            Effect::ScryTrash => misc::scry_trash(game, slot),
            Effect::ScryDeclare { draw } => misc::scry_declare(game, slot, *draw),

            Effect::MillEnemyAttackBonus(_) | Effect::InstantDownIf(_) => {
                tracing::debug!("공격 계산 전용 효과는 여기서 실행하지 않습니다: {}", key);
            }
            Effect::Unknown => {
                tracing::warn!("처리되지 않은 효과: {}", key);
            }
        }
    }
}
