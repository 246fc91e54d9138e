use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    card::{cards::Cards, Card},
    enums::CardType,
    game::pending::PendingQueue,
    unit::Leader,
};

/// PP 카드 한 장
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpCard {
    pub id: Uuid,
    pub is_tapped: bool,
}

pub trait IResource {
    /// 사용 가능한 양
    fn available(&self) -> u32;

    /// 비용만큼 소모합니다. 모자라면 아무것도 하지 않고 false.
    fn spend(&mut self, cost: u32) -> bool;

    /// 최대 amount 만큼 되돌리고 실제로 되돌린 양을 반환합니다.
    fn recover(&mut self, amount: u32) -> u32;
}

/// 라운드마다 새로 만들어지는 PP 카드 묶음
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PpPool(Vec<PpCard>);

impl PpPool {
    pub fn new(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self(
            ids.into_iter()
                .map(|id| PpCard {
                    id,
                    is_tapped: false,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[PpCard] {
        &self.0
    }

    pub fn untap_all(&mut self) {
        self.0.iter_mut().for_each(|pp| pp.is_tapped = false);
    }

    pub fn tapped(&self) -> u32 {
        self.0.iter().filter(|pp| pp.is_tapped).count() as u32
    }
}

impl IResource for PpPool {
    fn available(&self) -> u32 {
        self.0.iter().filter(|pp| !pp.is_tapped).count() as u32
    }

    fn spend(&mut self, cost: u32) -> bool {
        if self.available() < cost {
            return false;
        }
        self.0
            .iter_mut()
            .filter(|pp| !pp.is_tapped)
            .take(cost as usize)
            .for_each(|pp| pp.is_tapped = true);
        true
    }

    fn recover(&mut self, amount: u32) -> u32 {
        let mut recovered = 0;
        for pp in self.0.iter_mut().filter(|pp| pp.is_tapped) {
            if recovered >= amount {
                break;
            }
            pp.is_tapped = false;
            recovered += 1;
        }
        recovered
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnBuffs {
    pub attack: i32,
}

/// 플레이어 한 명의 존, 자원, 진행 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub id: String,
    pub name: String,
    pub leaders: Vec<Leader>,
    pub main_deck: Cards,
    pub hand: Cards,
    pub tactics_deck: Cards,
    pub tactics_area: Cards,
    pub field: Cards,
    pub trash: Cards,
    pub pp_cards: PpPool,
    pub rounds_won: u32,
    pub tactics_ready: bool,
    pub turn_buffs: TurnBuffs,
    pub next_attack_boost: i32,
    pub tactics_used_this_turn: u32,
    pub pending: PendingQueue,
}

impl PlayerState {
    pub fn new(
        id: String,
        name: String,
        leaders: Vec<Leader>,
        main_deck: Cards,
        tactics_deck: Cards,
    ) -> Self {
        Self {
            id,
            name,
            leaders,
            main_deck,
            hand: vec![],
            tactics_deck,
            tactics_area: vec![],
            field: vec![],
            trash: vec![],
            pp_cards: PpPool::default(),
            rounds_won: 0,
            tactics_ready: false,
            turn_buffs: TurnBuffs::default(),
            next_attack_boost: 0,
            tactics_used_this_turn: 0,
            pending: PendingQueue::default(),
        }
    }

    pub fn reset_turn_buffers(&mut self) {
        self.turn_buffs = TurnBuffs::default();
        self.next_attack_boost = 0;
        self.tactics_used_this_turn = 0;
    }

    /// 필드의 카드를 모두 트래시로 보냅니다.
    pub fn clear_field(&mut self) {
        self.trash.append(&mut self.field);
    }

    pub fn clear_hand(&mut self) {
        self.trash.append(&mut self.hand);
    }

    /// 손패의 카드를 트래시로 보냅니다.
    pub fn discard_from_hand(&mut self, index: usize) -> Option<&Card> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        self.trash.push(card);
        self.trash.last()
    }

    pub fn memoria_on_field(&self) -> usize {
        self.field.iter().filter(|c| c.is_type(CardType::Memoria)).count()
    }

    pub fn leader_count_by_color(&self, color: &str) -> usize {
        self.leaders.iter().filter(|l| l.get_color() == color).count()
    }

    pub fn leader_count_by_tag(&self, tag: &str) -> usize {
        self.leaders.iter().filter(|l| l.has_tag(tag)).count()
    }

    pub fn downed_leaders(&self) -> usize {
        self.leaders.iter().filter(|l| l.is_down()).count()
    }

    pub fn all_leaders_down(&self) -> bool {
        self.leaders.iter().all(|l| l.is_down())
    }

    pub fn first_live_leader(&self) -> Option<usize> {
        self.leaders.iter().position(|l| l.is_alive())
    }

    /// 지정한 리더가 살아 있으면 그 리더, 아니면 목록 순서상 첫 번째 생존 리더
    pub fn live_leader_or_first(&self, index: Option<usize>) -> Option<usize> {
        match index {
            Some(i) if self.leaders.get(i).is_some_and(|l| l.is_alive()) => Some(i),
            _ => self.first_live_leader(),
        }
    }

    pub fn is_live_leader(&self, index: usize) -> bool {
        self.leaders.get(index).is_some_and(|l| l.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: u128) -> PpPool {
        PpPool::new((0..n).map(Uuid::from_u128))
    }

    #[test]
    fn spend_taps_in_order() {
        let mut pp = pool(3);
        assert!(pp.spend(2));
        assert_eq!(pp.available(), 1);
        assert!(pp.cards()[0].is_tapped && pp.cards()[1].is_tapped);
        assert!(!pp.spend(2));
        assert_eq!(pp.available(), 1);
    }

    #[test]
    fn recover_is_bounded_by_tapped() {
        let mut pp = pool(3);
        pp.spend(1);
        assert_eq!(pp.recover(2), 1);
        assert_eq!(pp.available(), 3);
    }
}
