use tracing::{debug, info};

use super::{pending::PendingAction, Game};
use crate::{
    card::Card,
    condition::{Condition, DiscardArg},
    effect::{ability::process_ability, AoeMode, Effect, EffectContext},
    enums::{opponent_of, phase::Phase},
    unit::IResource,
};

/// 공격 한 번의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackReport {
    pub damage: i32,
    pub target_down: bool,
    pub overkill: i32,
    pub round_ended: bool,
}

/// 효과 데미지 한 번의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageReport {
    pub index: Option<usize>,
    /// 이번 데미지로 HP 가 0 이 되었음 (각성으로 되살아났더라도)
    pub downed: bool,
    pub awakened: bool,
}

impl Game {
    /// 공격 데미지를 계산해 대상에게 적용하고 적중 후 효과를 실행합니다.
    /// 호출 전에 공격자와 대상이 살아 있는지 검증되어 있어야 합니다.
    pub(crate) fn execute_attack(
        &mut self,
        slot: usize,
        card: &Card,
        attacker_index: usize,
        target_index: usize,
        mut discard: DiscardArg,
    ) -> AttackReport {
        let opponent = opponent_of(slot);
        let damage = self.attack_damage(slot, card, attacker_index, &mut discard);

        let downed_before: Vec<bool> = self.players[opponent]
            .leaders
            .iter()
            .map(|l| l.is_down())
            .collect();

        let hit = self.players[opponent].leaders[target_index].take_damage(damage);
        info!(
            "공격: attacker={}:{}, target={}:{}, damage={}, down={}, overkill={}",
            self.players[slot].id,
            attacker_index,
            self.players[opponent].id,
            target_index,
            damage,
            hit.downed,
            hit.overkill
        );

        let mut ctx = EffectContext {
            target_down: hit.downed,
            overkill: hit.overkill,
            target_index: Some(target_index),
            attacker_index: Some(attacker_index),
            discard,
        };

        if let Some(key) = card.get_on_hit().cloned() {
            self.process_effect(slot, &key, &mut ctx, Some(card));
        }

        let attack_end: Vec<Card> = self.players[slot]
            .field
            .iter()
            .filter(|c| c.is_memoria() && c.get_on_attack_end().is_some())
            .cloned()
            .collect();
        for memoria in attack_end {
            if let Some(key) = memoria.get_on_attack_end() {
                self.process_effect(slot, key, &mut ctx, Some(&memoria));
            }
        }

        // 각성 판정은 같은 공격의 다른 효과가 모두 끝난 뒤에
        let newly_downed = self.players[opponent]
            .leaders
            .iter()
            .zip(downed_before)
            .any(|(l, before)| l.is_down() && !before);
        if newly_downed {
            self.check_awakening(slot, attacker_index);
        }

        self.players[slot].next_attack_boost = 0;

        AttackReport {
            damage,
            target_down: hit.downed,
            overkill: hit.overkill,
            round_ended: self.settle_round(slot),
        }
    }

    /// 한쪽 리더가 모두 쓰러졌으면 라운드를 끝냅니다.
    /// 행동한 플레이어의 상대를 먼저 봅니다. 라운드가 끝났으면 true.
    pub(crate) fn settle_round(&mut self, slot: usize) -> bool {
        if self.is_over() || self.phase != Phase::Main {
            return false;
        }
        let opponent = opponent_of(slot);
        let winner = if self.players[opponent].all_leaders_down() {
            slot
        } else if self.players[slot].all_leaders_down() {
            opponent
        } else {
            return false;
        };
        self.handle_round_win(winner);
        true
    }

    fn attack_damage(
        &mut self,
        slot: usize,
        card: &Card,
        attacker_index: usize,
        discard: &mut DiscardArg,
    ) -> i32 {
        let player = &self.players[slot];
        let mut damage = player.leaders[attacker_index].get_atk()
            + player.next_attack_boost
            + player.turn_buffs.attack;

        let template = card.get_template();
        if template.damage_add != 0 {
            let granted = match template.condition.clone() {
                Some(condition) => condition.evaluate(self, slot, discard),
                None => true,
            };
            if granted {
                damage += template.damage_add;
            }
        }

        match card.get_effect().map(|k| k.effect().clone()) {
            Some(Effect::MillEnemyAttackBonus(bonus)) => {
                if Condition::MillEnemyAttack.evaluate(self, slot, &mut DiscardArg::Check) {
                    damage += bonus;
                }
            }
            Some(Effect::InstantDownIf(condition)) => {
                if condition.evaluate(self, slot, &mut DiscardArg::Check) {
                    damage = self.rules.lethal_damage;
                }
            }
            _ => {}
        }

        let memoria: Vec<Card> = self.players[slot]
            .field
            .iter()
            .filter(|c| c.is_memoria())
            .cloned()
            .collect();
        for card in memoria {
            let template = card.get_template();
            damage += template.damage_boost;
            if template.conditional_boost != 0 {
                if let Some(condition) = &template.condition {
                    if condition.evaluate(self, slot, &mut DiscardArg::Check) {
                        damage += template.conditional_boost;
                    }
                }
            }
        }

        debug!("공격 데미지 계산: slot={}, card={}, damage={}", slot, card.get_id(), damage);
        damage
    }

    /// 공격한 리더의 각성 판정을 대기열에 넣습니다.
    pub(crate) fn check_awakening(&mut self, slot: usize, leader_index: usize) -> bool {
        let eligible = self.players[slot]
            .leaders
            .get(leader_index)
            .is_some_and(|l| !l.is_awakened() && l.is_alive());
        if eligible {
            self.enqueue(slot, PendingAction::CheckAwakening { leader_index });
        }
        eligible
    }

    /// 리더를 각성시키고 각성 능력을 실행합니다.
    pub(crate) fn awaken_leader(&mut self, slot: usize, leader_index: usize) -> bool {
        let Some(leader) = self.players[slot].leaders.get_mut(leader_index) else {
            return false;
        };
        if !leader.awaken() {
            return false;
        }
        info!(
            "리더 각성: player={}, leader={}, hp={}/{}, atk={}",
            self.players[slot].id,
            leader.get_name(),
            leader.get_current_hp(),
            leader.get_max_hp(),
            leader.get_atk()
        );

        let ability = leader
            .get_template()
            .ability
            .clone()
            .filter(|a| a.triggers_on_awaken());
        if let Some(ability) = ability {
            process_ability(self, slot, &ability);
        }
        true
    }

    /// 지정한 생존 리더, 없으면 첫 번째 생존 리더에게 데미지를 줍니다.
    /// HP 가 0 이 되면 그 자리에서 각성을 시도합니다.
    pub fn deal_damage_to_leader(
        &mut self,
        target_slot: usize,
        amount: i32,
        explicit_index: Option<usize>,
    ) -> DamageReport {
        let Some(index) = self.players[target_slot].live_leader_or_first(explicit_index) else {
            return DamageReport::default();
        };

        let hit = self.players[target_slot].leaders[index].take_damage(amount);
        debug!(
            "효과 데미지: target={}:{}, amount={}, down={}",
            self.players[target_slot].id, index, amount, hit.downed
        );

        let awakened = hit.downed && self.awaken_leader(target_slot, index);
        DamageReport {
            index: Some(index),
            downed: hit.downed,
            awakened,
        }
    }

    /// 살아 있는 리더 전원(Others 면 exclude 제외)에게 데미지를 줍니다.
    pub fn deal_aoe(
        &mut self,
        target_slot: usize,
        amount: i32,
        mode: AoeMode,
        exclude_index: Option<usize>,
    ) {
        for index in 0..self.players[target_slot].leaders.len() {
            if mode == AoeMode::Others && Some(index) == exclude_index {
                continue;
            }
            if self.players[target_slot].leaders[index].is_down() {
                continue;
            }
            let hit = self.players[target_slot].leaders[index].take_damage(amount);
            if hit.downed {
                self.awaken_leader(target_slot, index);
            }
        }
        debug!(
            "광역 데미지: target={}, amount={}, mode={:?}, exclude={:?}",
            self.players[target_slot].id, amount, mode, exclude_index
        );
    }

    /// 지정한 생존 리더, 없으면 HP 가 줄어든 첫 번째 생존 리더를 회복합니다.
    pub fn heal_leader(&mut self, slot: usize, amount: i32, explicit_index: Option<usize>) {
        let player = &mut self.players[slot];
        let index = match explicit_index {
            Some(i) if player.is_live_leader(i) => Some(i),
            _ => player
                .leaders
                .iter()
                .position(|l| l.is_alive() && l.get_current_hp() < l.get_max_hp()),
        };
        if let Some(index) = index {
            player.leaders[index].heal(amount);
        }
    }

    /// 탭된 PP 를 최대 amount 장 되돌립니다.
    pub fn recover_pp(&mut self, slot: usize, amount: u32) -> u32 {
        self.players[slot].pp_cards.recover(amount)
    }
}
