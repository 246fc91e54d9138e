use duel_core::{
    card::cards::CardVecExt,
    enums::{phase::Phase, CardType, WinReason},
    exception::GameError,
    game::{pending::PendingAction, ActionOutcome, ResolvePayload, TargetInfo},
    test::{attack, card, initialize_game, set_hand, start_main, tactics, turn_players, P1_ID, P2_ID},
    unit::IResource,
};

#[test]
fn round_one_setup_gives_three_untapped_pp() {
    let game = initialize_game(11).unwrap();
    assert_eq!(game.phase(), Phase::TacticsSelection);
    assert_eq!(game.current_round(), 1);
    assert_eq!(game.max_pp(), 3);
    for player in game.players() {
        assert_eq!(player.pp_cards.len(), 3);
        assert_eq!(player.pp_cards.available(), 3);
        assert!(player.hand.is_empty());
        assert!(!player.tactics_ready);
    }
}

#[test]
fn both_players_draw_four_when_main_starts() {
    let mut game = initialize_game(11).unwrap();
    assert_eq!(game.select_tactics(P1_ID, 0), Ok(ActionOutcome::Completed));
    assert_eq!(game.phase(), Phase::TacticsSelection);
    assert_eq!(game.select_tactics(P1_ID, 0), Err(GameError::AlreadySelected));

    game.select_tactics(P2_ID, 0).unwrap();
    assert_eq!(game.phase(), Phase::Main);
    for player in game.players() {
        assert_eq!(player.hand.len(), 4);
        assert_eq!(player.tactics_deck.len(), 3);
    }

    // 후공만 티켓을 받습니다
    let ((first, _), (second, _)) = turn_players(&game);
    assert_eq!(game.player(first).tactics_area.len(), 1);
    let second_area = &game.player(second).tactics_area;
    assert_eq!(second_area.len(), 2);
    assert!(second_area[1].is_ticket());
}

#[test]
fn select_tactics_is_rejected_in_main() {
    let mut game = start_main(3).unwrap();
    assert!(matches!(
        game.select_tactics(P1_ID, 0),
        Err(GameError::WrongPhase { .. })
    ));
}

#[test]
fn unknown_player_is_rejected() {
    let mut game = start_main(3).unwrap();
    assert_eq!(
        game.end_turn("nobody"),
        Err(GameError::UnknownPlayer("nobody".to_string()))
    );
}

#[test]
fn end_turn_converts_unused_pp_into_draws() {
    let mut game = start_main(5).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    game.player_mut(me).pp_cards.spend(1);

    assert_eq!(game.end_turn(&my_id), Ok(ActionOutcome::Completed));
    assert_eq!(game.player(me).hand.len(), 6);
    assert_eq!(game.turn_player(), other);
    assert_eq!(game.player(other).hand.len(), 5);
    assert_eq!(game.player(other).pp_cards.available(), 3);
    assert_eq!(game.turn_count(), 2);
}

#[test]
fn pp_turned_into_draws_cannot_be_spent() {
    let mut game = start_main(5).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    set_hand(&mut game, me, vec![attack("A", 1); 7]);

    assert_eq!(game.end_turn(&my_id), Ok(ActionOutcome::AwaitingInput));
    assert_eq!(game.player(me).pp_cards.available(), 0);
    assert_eq!(
        game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 0))),
        Err(GameError::PendingActionExists)
    );
    assert_eq!(game.use_tactics(&my_id, 0), Err(GameError::PendingActionExists));
    assert_eq!(game.player(other).leaders[0].get_current_hp(), 100);

    game.resolve_action(&my_id, ResolvePayload::discard(vec![0, 1, 2]))
        .unwrap();
    assert_eq!(game.player(me).hand.len(), 7);
    assert_eq!(game.turn_player(), other);
}

#[test]
fn hand_limit_holds_the_turn_until_discarded() {
    let mut game = start_main(5).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    set_hand(&mut game, me, vec![attack("A", 1); 7]);

    assert_eq!(game.end_turn(&my_id), Ok(ActionOutcome::AwaitingInput));
    assert_eq!(game.player(me).hand.len(), 10);
    assert_eq!(game.turn_player(), me);
    assert_eq!(
        game.player(me).pending.head(),
        Some(&PendingAction::SelectDiscard {
            count: 3,
            next_effect: None,
            is_hand_limit: true,
        })
    );
    assert_eq!(game.end_turn(&my_id), Err(GameError::PendingActionExists));

    assert_eq!(
        game.resolve_action(&my_id, ResolvePayload::discard(vec![0])),
        Err(GameError::DiscardCountMismatch { expected: 3, got: 1 })
    );
    assert_eq!(game.player(me).pending.len(), 1);

    assert_eq!(
        game.resolve_action(&my_id, ResolvePayload::discard(vec![9, 0, 4])),
        Ok(ActionOutcome::Completed)
    );
    assert_eq!(game.player(me).hand.len(), 7);
    assert!(game.player(me).pending.is_empty());
    assert_eq!(game.turn_player(), other);
}

#[test]
fn deck_out_recycles_trash_and_burns_a_tactics_card() {
    let mut game = start_main(9).unwrap();
    let ((me, my_id), _) = turn_players(&game);
    set_hand(&mut game, me, vec![]);
    {
        let player = game.player_mut(me);
        player.main_deck.clear();
        player.trash.push(card(tactics("T_USED", 0)));
    }

    game.end_turn(&my_id).unwrap();

    let player = game.player(me);
    assert_eq!(player.hand.len(), 3);
    assert_eq!(player.main_deck.len(), 1);
    assert_eq!(player.tactics_deck.len(), 2);
    assert_eq!(player.trash.len(), 2);
    assert_eq!(player.trash.count_type(CardType::Tactics), 2);
    assert!(!game.is_over());
}

#[test]
fn deck_out_with_empty_tactics_deck_loses() {
    let mut game = start_main(9).unwrap();
    let ((me, my_id), (other, other_id)) = turn_players(&game);
    {
        let player = game.player_mut(me);
        player.main_deck.clear();
        player.tactics_deck.clear();
    }

    assert_eq!(game.end_turn(&my_id), Ok(ActionOutcome::Completed));
    assert_eq!(game.game_winner(), Some(other));
    assert_eq!(game.win_reason(), Some(WinReason::DeckOut));
    assert_eq!(game.end_turn(&other_id), Err(GameError::GameOver));
}

#[test]
fn same_seed_same_match() {
    let a = start_main(42).unwrap();
    let b = start_main(42).unwrap();
    assert_eq!(a.get_state(), b.get_state());
}
