use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{AoeMode, Effect, Gates, OtherAmount};
use crate::{
    condition::Condition,
    enums::{TEAM_CR, TEAM_VSPO},
};

/// 정확히 일치하는 키 표
static EXACT: Lazy<HashMap<&'static str, Effect>> = Lazy::new(|| {
    use Effect::*;

    let aoe = |amount, mode| Aoe { amount, mode };
    let memoria_2 = || ConditionalAoe {
        amount: 10,
        condition: Condition::MemoriaCount(2),
    };

    HashMap::from([
        // 드로우
        ("draw_1", Draw(1)),
        ("draw_2", Draw(2)),
        ("draw_3", Draw(3)),
        ("draw_all_1", DrawAll(1)),
        ("draw_2_discard_2", DrawThenDiscard { draw: 2, discard: 2 }),
        ("draw_1_discard_1", DrawThenDiscard { draw: 1, discard: 1 }),
        ("cascade_1_cost", Cascade { max_cost: 1 }),
        ("draw_if_down", DrawIfDown(1)),
        // 직접 데미지
        ("damage_20_enemy", DamageEnemy(20)),
        ("damage_50_all_enemy", aoe(50, AoeMode::All)),
        ("damage_10_all_enemy", aoe(10, AoeMode::All)),
        ("damage_20_all_enemy", aoe(20, AoeMode::All)),
        ("aoe_10_others", aoe(10, AoeMode::Others)),
        ("damage_10_all_others", aoe(10, AoeMode::Others)),
        ("damage_20_all_others", aoe(20, AoeMode::Others)),
        ("aoe_10_if_memoria_2", memoria_2()),
        ("damage_10_all_others_if_memoria_2", memoria_2()),
        ("aoe_20_one_if_down", DamageIfDown(20)),
        ("damage_20_if_hand_low", DamageIfHandLow(20)),
        ("instant_down", InstantDown),
        // 회복, 버프
        ("heal_leader_30", Heal(30)),
        ("buff_leaders_30", BuffAttack(30)),
        ("overkill_30_pp_1", OverkillRecoverPp { threshold: 30, amount: 1 }),
        // 버리기
        ("discard_all_1", DiscardSelfThenOpp(1)),
        ("discard_opp_1", DiscardOpp(1)),
        ("discard_opp_1_if_down", DiscardOppIfDown(1)),
        // 특수
        ("play_memoria_upto_3", PlayMemoria { max_cost: 3 }),
        ("scryt_1_optional_trash", ScryTrash),
        ("scryt_declare_type_draw_4", ScryDeclare { draw: 4 }),
        ("instant_down_if_vspo", InstantDownIf(Condition::AllTeam(TEAM_VSPO.to_string()))),
        ("instant_down_if_cr", InstantDownIf(Condition::AllTeam(TEAM_CR.to_string()))),
    ])
});

/// 숫자 인자를 키에서 읽어야 하는 효과 계열
struct PatternRule {
    name: &'static str,
    matches: fn(&str) -> bool,
    build: fn(&str) -> Effect,
}

/// 순서대로 검사합니다. 먼저 맞는 규칙이 이깁니다.
static PATTERNS: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule {
            name: "one_other",
            matches: |key| key.contains("_one_other"),
            build: build_one_other,
        },
        PatternRule {
            name: "damage_n_one_enemy",
            matches: |key| number_between(key, "damage_", "_one_enemy").is_some(),
            build: |key| {
                Effect::DamageOneEnemy(number_between(key, "damage_", "_one_enemy").unwrap_or(0))
            },
        },
        PatternRule {
            name: "overkill",
            matches: |key| key.starts_with("overkill_"),
            build: |key| Effect::Overkill {
                recover_pp: key.contains("pp_1"),
                damage: key.contains("dmg_50"),
            },
        },
        PatternRule {
            name: "boost_next_attack",
            matches: |key| trailing_number(key, "boost_next_attack_").is_some(),
            build: |key| {
                Effect::BoostNextAttack(trailing_number(key, "boost_next_attack_").unwrap_or(0))
            },
        },
        PatternRule {
            name: "mill_enemy_attack_damage",
            matches: |key| trailing_number(key, "mill_enemy_attack_damage_").is_some(),
            build: |key| {
                Effect::MillEnemyAttackBonus(
                    trailing_number(key, "mill_enemy_attack_damage_").unwrap_or(0),
                )
            },
        },
    ]
});

/// 키를 효과로 바꿉니다. 표와 패턴 모두에 없으면 Unknown.
pub fn lookup(key: &str) -> Effect {
    if let Some(effect) = EXACT.get(key) {
        return effect.clone();
    }

    PATTERNS
        .iter()
        .find(|rule| (rule.matches)(key))
        .map(|rule| {
            tracing::trace!("패턴 매칭: key={}, rule={}", key, rule.name);
            (rule.build)(key)
        })
        .unwrap_or(Effect::Unknown)
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// "{prefix}{N}" 꼴이면 N
fn trailing_number(key: &str, prefix: &str) -> Option<i32> {
    key.strip_prefix(prefix)
        .filter(|rest| is_number(rest))
        .and_then(|rest| rest.parse().ok())
}

/// "{prefix}{N}{suffix}" 꼴이면 N
fn number_between(key: &str, prefix: &str, suffix: &str) -> Option<i32> {
    key.strip_prefix(prefix)?
        .strip_suffix(suffix)
        .filter(|n| is_number(n))
        .and_then(|n| n.parse().ok())
}

/// 키 안에서 가장 먼저 나오는 "damage_N_" 또는 "aoe_N_" 의 N
fn first_tagged_number(key: &str) -> Option<i32> {
    ["damage_", "aoe_"]
        .iter()
        .flat_map(|tag| {
            key.match_indices(tag).filter_map(move |(pos, _)| {
                let rest = &key[pos + tag.len()..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                let after = &rest[digits.len()..];
                if !digits.is_empty() && after.starts_with('_') {
                    digits.parse().ok().map(|n| (pos, n))
                } else {
                    None
                }
            })
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, n)| n)
}

fn build_one_other(key: &str) -> Effect {
    let mut amount = if key.contains("damage_cr_") {
        OtherAmount::PerTeam(TEAM_CR.to_string())
    } else if key.contains("damage_vspo_") {
        OtherAmount::PerTeam(TEAM_VSPO.to_string())
    } else {
        OtherAmount::Flat(first_tagged_number(key).unwrap_or(0))
    };

    // overkill_30_<tag>_<N>_... 은 네 번째 토큰이 데미지
    if key.starts_with("overkill_") {
        amount = match key.split('_').nth(3).and_then(|t| t.parse::<i32>().ok()) {
            Some(n) if n != 0 => OtherAmount::Flat(n),
            _ => OtherAmount::DefaultOverkill,
        };
    }

    Effect::DamageOneOther {
        amount,
        gates: Gates {
            if_down: key.contains("_if_down"),
            if_memoria_2: key.contains("_if_memoria_2"),
            if_hand_low: key.contains("_if_hand_low"),
            overkill: key.contains("overkill_30"),
        },
    }
}
