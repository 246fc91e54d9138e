use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

use super::Card;
use crate::enums::CardType;

/// Vec<Card> 타입의 별칭
pub type Cards = Vec<Card>;

/// Vec<Card> 확장 트레이트
pub trait CardVecExt {
    fn contains_uuid<U: Into<Uuid>>(&self, uuid: U) -> bool;
    fn find_by_uuid<U: Into<Uuid>>(&self, uuid: U) -> Option<&Card>;
    fn position_by_uuid<U: Into<Uuid>>(&self, uuid: U) -> Option<usize>;
    fn count_by_id(&self, id: &str) -> usize;
    fn count_type(&self, card_type: CardType) -> usize;
    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Card) -> bool;
    fn shuffle_with<R: Rng>(&mut self, rng: &mut R);
    /// 조건에 맞는 카드와 나머지로 나눕니다. 순서는 유지됩니다.
    fn split_off_where<F>(&mut self, predicate: F) -> Cards
    where
        F: Fn(&Card) -> bool;
}

impl CardVecExt for Vec<Card> {
    fn contains_uuid<U: Into<Uuid>>(&self, uuid: U) -> bool {
        let uuid = uuid.into();
        self.iter().any(|card| card.get_uuid() == uuid)
    }

    fn find_by_uuid<U: Into<Uuid>>(&self, uuid: U) -> Option<&Card> {
        let uuid = uuid.into();
        self.iter().find(|card| card.get_uuid() == uuid)
    }

    fn position_by_uuid<U: Into<Uuid>>(&self, uuid: U) -> Option<usize> {
        let uuid = uuid.into();
        self.iter().position(|card| card.get_uuid() == uuid)
    }

    fn count_by_id(&self, id: &str) -> usize {
        self.count(|card| card.get_id() == id)
    }

    fn count_type(&self, card_type: CardType) -> usize {
        self.count(|card| card.is_type(card_type))
    }

    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Card) -> bool,
    {
        self.iter().filter(|card| predicate(card)).count()
    }

    fn shuffle_with<R: Rng>(&mut self, rng: &mut R) {
        self.as_mut_slice().shuffle(rng);
    }

    fn split_off_where<F>(&mut self, predicate: F) -> Cards
    where
        F: Fn(&Card) -> bool,
    {
        let (taken, kept): (Cards, Cards) = std::mem::take(self).into_iter().partition(|c| predicate(c));
        *self = kept;
        taken
    }
}
