//! 테스트와 벤치마크에서 함께 쓰는 매치 준비 도구

use uuid::Uuid;

use crate::{
    card::Card,
    catalog::{Catalog, CardTemplate, DeckList, LeaderTemplate, PlayerEntry},
    config::RulesConfig,
    enums::{CardType, TEAM_CR, TEAM_VSPO},
    exception::GameError,
    game::Game,
};

pub const P1_ID: &str = "player1";
pub const P2_ID: &str = "player2";

pub const ATTACK_ID: &str = "A_BASIC";
pub const MEMORIA_ID: &str = "M_BASIC";
pub const TACTICS_ID: &str = "T_BOOST";
pub const SHIELD_ID: &str = "T_SHIELD";

pub const MAIN_DECK_SIZE: usize = 30;

pub fn leader(id: &str, color: &str, team: &[&str]) -> LeaderTemplate {
    LeaderTemplate {
        id: id.to_string(),
        name: id.to_string(),
        color: color.to_string(),
        team: team.iter().map(|t| t.to_string()).collect(),
        hp_before: 100,
        hp_after: 130,
        atk_before: 30,
        atk_after: 40,
        ability: None,
    }
}

pub fn attack(id: &str, cost: u32) -> CardTemplate {
    CardTemplate::new(id, id, CardType::Attack, cost)
}

pub fn memoria(id: &str, cost: u32) -> CardTemplate {
    CardTemplate::new(id, id, CardType::Memoria, cost)
}

pub fn tactics(id: &str, cost: u32) -> CardTemplate {
    CardTemplate::new(id, id, CardType::Tactics, cost)
}

/// 템플릿으로 새 카드 인스턴스를 만듭니다.
pub fn card(template: CardTemplate) -> Card {
    Card::new(Uuid::new_v4(), template)
}

/// 기본 리더 셋(적, 청 VSPO!, 녹 CR)과 무효과 카드로 이루어진 카탈로그
pub fn default_catalog() -> Catalog {
    let mut boost = tactics(TACTICS_ID, 1);
    boost.on_play = Some("boost_next_attack_10".into());
    let mut shield = tactics(SHIELD_ID, 1);
    shield.equip_hp = 30;

    Catalog::new(
        vec![attack(ATTACK_ID, 1), memoria(MEMORIA_ID, 1), boost, shield],
        vec![
            leader("L_RED", "Red", &[TEAM_VSPO]),
            leader("L_BLUE", "Blue", &[TEAM_VSPO]),
            leader("L_GREEN", "Green", &[TEAM_CR]),
        ],
    )
}

pub fn default_deck() -> DeckList {
    let mut main = vec![ATTACK_ID.to_string(); 20];
    main.extend(vec![MEMORIA_ID.to_string(); MAIN_DECK_SIZE - 20]);
    DeckList {
        leaders: vec!["L_RED".into(), "L_BLUE".into(), "L_GREEN".into()],
        main,
        tactics: vec![
            TACTICS_ID.into(),
            SHIELD_ID.into(),
            TACTICS_ID.into(),
            TACTICS_ID.into(),
        ],
    }
}

pub fn entry(id: &str, deck: DeckList) -> PlayerEntry {
    PlayerEntry {
        id: id.to_string(),
        name: String::new(),
        deck,
    }
}

/// 기본 덱 두 개로 택틱스 선택 단계의 매치를 만듭니다.
pub fn initialize_game(seed: u64) -> Result<Game, GameError> {
    Game::new(
        &default_catalog(),
        [entry(P1_ID, default_deck()), entry(P2_ID, default_deck())],
        RulesConfig::default(),
        seed,
    )
}

/// 양쪽이 택틱스 덱 첫 장을 골라 메인 페이즈로 넘어간 매치
pub fn start_main(seed: u64) -> Result<Game, GameError> {
    let mut game = initialize_game(seed)?;
    game.select_tactics(P1_ID, 0)?;
    game.select_tactics(P2_ID, 0)?;
    Ok(game)
}

/// 현재 턴 플레이어와 상대의 (slot, id)
pub fn turn_players(game: &Game) -> ((usize, String), (usize, String)) {
    let current = game.turn_player();
    let other = crate::enums::opponent_of(current);
    (
        (current, game.player_id(current).to_string()),
        (other, game.player_id(other).to_string()),
    )
}

/// 손패를 주어진 카드들로 바꿉니다. 원래 손패는 트래시로 갑니다.
pub fn set_hand(game: &mut Game, slot: usize, templates: Vec<CardTemplate>) {
    let player = game.player_mut(slot);
    player.clear_hand();
    player.hand = templates.into_iter().map(card).collect();
}

/// 덱 맨 위에 카드를 올립니다. 첫 템플릿이 맨 위.
pub fn stack_deck_top(game: &mut Game, slot: usize, templates: Vec<CardTemplate>) {
    let deck = &mut game.player_mut(slot).main_deck;
    for (i, template) in templates.into_iter().enumerate() {
        deck.insert(i, card(template));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::phase::Phase;

    #[test]
    fn start_main_deals_opening_hands() {
        let game = start_main(7).unwrap();
        assert_eq!(game.phase(), Phase::Main);
        for player in game.players() {
            assert_eq!(player.hand.len(), 4);
            assert_eq!(player.leaders.len(), 3);
        }
    }
}
