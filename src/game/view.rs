use serde::Serialize;

use super::{pending::PendingQueue, Game};
use crate::{
    card::{cards::Cards, Card},
    enums::{phase::Phase, WinReason},
    unit::{player::TurnBuffs, Leader, PlayerState, PpPool},
};

const HIDDEN: &str = "HIDDEN";
const CARD_BACK: &str = "Back";

/// 보는 사람에 따라 앞면 또는 뒷면으로 보이는 카드
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardView {
    Visible(Card),
    Hidden {
        #[serde(rename = "type")]
        card_type: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<&'static str>,
    },
}

impl CardView {
    pub fn hidden() -> Self {
        CardView::Hidden {
            card_type: HIDDEN,
            name: None,
        }
    }

    pub fn back() -> Self {
        CardView::Hidden {
            card_type: HIDDEN,
            name: Some(CARD_BACK),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, CardView::Hidden { .. })
    }
}

/// 상대에게는 결정 종류만 보입니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PendingView {
    Full(PendingQueue),
    Kinds(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub leaders: Vec<Leader>,
    pub main_deck: Vec<CardView>,
    pub hand: Vec<CardView>,
    pub tactics_deck: Vec<CardView>,
    pub tactics_area: Vec<CardView>,
    pub field: Cards,
    pub trash: Cards,
    pub pp_cards: PpPool,
    pub rounds_won: u32,
    pub tactics_ready: bool,
    pub turn_buffs: TurnBuffs,
    pub next_attack_boost: i32,
    pub tactics_used_this_turn: u32,
    pub pending: PendingView,
}

fn visible(cards: &Cards) -> Vec<CardView> {
    cards.iter().cloned().map(CardView::Visible).collect()
}

fn hidden(cards: &Cards) -> Vec<CardView> {
    cards.iter().map(|_| CardView::hidden()).collect()
}

impl PlayerView {
    /// 주인이 보는 전체 상태
    pub fn owner(player: &PlayerState) -> Self {
        Self::build(player, true)
    }

    /// 상대가 보는 상태. 배열 길이는 유지됩니다.
    pub fn redacted(player: &PlayerState) -> Self {
        Self::build(player, false)
    }

    fn build(player: &PlayerState, is_owner: bool) -> Self {
        let (main_deck, hand, tactics_deck, tactics_area, pending) = if is_owner {
            (
                visible(&player.main_deck),
                visible(&player.hand),
                visible(&player.tactics_deck),
                visible(&player.tactics_area),
                PendingView::Full(player.pending.clone()),
            )
        } else {
            (
                hidden(&player.main_deck),
                hidden(&player.hand),
                hidden(&player.tactics_deck),
                player
                    .tactics_area
                    .iter()
                    .map(|c| {
                        if c.is_ticket() {
                            CardView::Visible(c.clone())
                        } else {
                            CardView::back()
                        }
                    })
                    .collect(),
                PendingView::Kinds(player.pending.kinds()),
            )
        };

        PlayerView {
            id: player.id.clone(),
            name: player.name.clone(),
            leaders: player.leaders.clone(),
            main_deck,
            hand,
            tactics_deck,
            tactics_area,
            field: player.field.clone(),
            trash: player.trash.clone(),
            pp_cards: player.pp_cards.clone(),
            rounds_won: player.rounds_won,
            tactics_ready: player.tactics_ready,
            turn_buffs: player.turn_buffs,
            next_attack_boost: player.next_attack_boost,
            tactics_used_this_turn: player.tactics_used_this_turn,
            pending,
        }
    }
}

/// 매치 전체 상태의 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub players: [PlayerView; 2],
    pub player_ids: [String; 2],
    pub current_round: u32,
    #[serde(rename = "maxPP")]
    pub max_pp: u32,
    pub turn_player_id: String,
    pub turn_count: u32,
    pub phase: Phase,
    pub round_winner: Option<String>,
    pub winner: Option<String>,
    pub win_reason: Option<WinReason>,
}

impl Game {
    /// 숨김 없는 전체 상태 (디버그, 호스트용)
    pub fn get_state(&self) -> MatchView {
        self.snapshot(|_| true)
    }

    /// viewer 가 아닌 플레이어의 비공개 존을 가린 상태
    pub fn get_secret_state(&self, viewer_id: &str) -> MatchView {
        self.snapshot(|player| player.id == viewer_id)
    }

    fn snapshot<F>(&self, can_see: F) -> MatchView
    where
        F: Fn(&PlayerState) -> bool,
    {
        let view = |player: &PlayerState| {
            if can_see(player) {
                PlayerView::owner(player)
            } else {
                PlayerView::redacted(player)
            }
        };
        let [p1, p2] = self.players();
        let id_of = |slot: usize| self.player_id(slot).to_string();

        MatchView {
            players: [view(p1), view(p2)],
            player_ids: [p1.id.clone(), p2.id.clone()],
            current_round: self.current_round(),
            max_pp: self.max_pp(),
            turn_player_id: self.turn_player_id().to_string(),
            turn_count: self.turn_count(),
            phase: self.phase(),
            round_winner: self.round_winner().map(id_of),
            winner: self.game_winner().map(id_of),
            win_reason: self.win_reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_card_serializes_as_placeholder() {
        let json = serde_json::to_value(CardView::hidden()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "HIDDEN" }));
        let json = serde_json::to_value(CardView::back()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "HIDDEN", "name": "Back" }));
    }
}
