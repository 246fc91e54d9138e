use duel_core::{
    catalog::{Ability, AbilityEffect, AbilityKind, Catalog, CardTemplate},
    config::RulesConfig,
    enums::{phase::Phase, WinReason},
    exception::GameError,
    game::{pending::PendingAction, ActionOutcome, Game, ResolvePayload, TargetInfo},
    test::{
        attack, default_catalog, default_deck, entry, leader, memoria, set_hand, stack_deck_top,
        start_main, turn_players, P1_ID, P2_ID,
    },
    unit::IResource,
};

#[test]
fn basic_attack_deals_attacker_atk() {
    let mut game = start_main(1).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    set_hand(&mut game, me, vec![attack("A", 1)]);

    let outcome = game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 0)));
    assert_eq!(outcome, Ok(ActionOutcome::Completed));

    let target = &game.player(other).leaders[0];
    assert_eq!(target.get_current_hp(), 70);
    assert!(!target.is_down());
    assert_eq!(game.player(me).pp_cards.available(), 2);
    assert!(game.player(me).hand.is_empty());
    assert_eq!(game.player(me).field.len(), 1);
}

#[test]
fn lethal_attack_queues_awakening_for_attacker() {
    let mut game = start_main(1).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    set_hand(&mut game, me, vec![attack("A", 1)]);
    game.player_mut(other).leaders[0].take_damage(70);

    let outcome = game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 0)));
    assert_eq!(outcome, Ok(ActionOutcome::AwaitingInput));

    let target = &game.player(other).leaders[0];
    assert_eq!(target.get_current_hp(), 0);
    assert!(target.is_down());
    assert!(!target.is_awakened());
    assert_eq!(
        game.player(me).pending.head(),
        Some(&PendingAction::CheckAwakening { leader_index: 0 })
    );

    game.resolve_action(&my_id, ResolvePayload::default()).unwrap();
    let attacker = &game.player(me).leaders[0];
    assert!(attacker.is_awakened());
    assert_eq!(attacker.get_max_hp(), 130);
    assert_eq!(attacker.get_current_hp(), 130);
    assert_eq!(attacker.get_atk(), 40);
    assert!(game.player(me).pending.is_empty());
}

#[test]
fn effect_kill_awakens_victim_only_once() {
    let mut game = start_main(1).unwrap();
    let (_, (other, _)) = turn_players(&game);

    let report = game.deal_damage_to_leader(other, 100, Some(1));
    assert!(report.downed && report.awakened);
    let leader = &game.player(other).leaders[1];
    assert!(leader.is_alive());
    assert_eq!(leader.get_current_hp(), 30);
    assert_eq!(leader.get_max_hp(), 130);

    let report = game.deal_damage_to_leader(other, 50, Some(1));
    assert!(report.downed && !report.awakened);
    let leader = &game.player(other).leaders[1];
    assert!(leader.is_down());
    assert_eq!(leader.get_current_hp(), 0);
}

#[test]
fn rejected_attacks_do_not_spend_anything() {
    let mut game = start_main(2).unwrap();
    let ((me, my_id), (other, other_id)) = turn_players(&game);
    set_hand(&mut game, me, vec![attack("A", 1), attack("BIG", 5)]);

    assert_eq!(game.play_card(&my_id, 0, None), Err(GameError::MissingTarget));
    assert_eq!(
        game.play_card(&my_id, 1, Some(TargetInfo::attack(0, 0))),
        Err(GameError::InsufficientResources {
            needed: 5,
            available: 3
        })
    );
    assert_eq!(
        game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 7))),
        Err(GameError::InvalidTarget("target"))
    );
    assert_eq!(
        game.play_card(&my_id, 9, Some(TargetInfo::attack(0, 0))),
        Err(GameError::CardNotFound)
    );
    assert_eq!(
        game.play_card(&other_id, 0, Some(TargetInfo::attack(0, 0))),
        Err(GameError::NotYourTurn)
    );

    game.player_mut(other).leaders[2].take_damage(100);
    assert_eq!(
        game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 2))),
        Err(GameError::TargetDown)
    );

    assert_eq!(game.player(me).hand.len(), 2);
    assert_eq!(game.player(me).pp_cards.available(), 3);
}

#[test]
fn field_memoria_adds_damage() {
    let mut game = start_main(4).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    let mut banner = memoria("BANNER", 1);
    banner.damage_boost = 10;
    set_hand(&mut game, me, vec![banner, attack("A", 1)]);

    game.play_card(&my_id, 0, None).unwrap();
    game.play_card(&my_id, 0, Some(TargetInfo::attack(1, 1))).unwrap();
    assert_eq!(game.player(other).leaders[1].get_current_hp(), 60);
}

#[test]
fn milling_an_attack_card_adds_bonus() {
    let mut game = start_main(4).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    let mut probe = attack("PROBE", 1);
    probe.effect = Some("mill_enemy_attack_damage_20".into());
    set_hand(&mut game, me, vec![probe]);
    stack_deck_top(&mut game, other, vec![attack("TOP", 1)]);
    let trash_before = game.player(other).trash.len();

    game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 0))).unwrap();
    assert_eq!(game.player(other).leaders[0].get_current_hp(), 50);
    assert_eq!(game.player(other).trash.len(), trash_before + 1);
}

#[test]
fn mandatory_discard_condition_pays_from_target_info() {
    let mut game = start_main(4).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    let mut heavy = attack("HEAVY", 1);
    heavy.condition = Some(duel_core::condition::Condition::Discard1);
    heavy.damage_add = 20;
    set_hand(&mut game, me, vec![memoria("FODDER", 0), heavy]);

    // 내는 카드를 버리는 것은 불가
    assert_eq!(
        game.play_card(&my_id, 1, Some(TargetInfo::attack(0, 0).with_discard(1))),
        Err(GameError::InvalidIndex)
    );

    game.play_card(&my_id, 1, Some(TargetInfo::attack(0, 0).with_discard(0)))
        .unwrap();
    assert_eq!(game.player(other).leaders[0].get_current_hp(), 50);
    assert!(game.player(me).hand.is_empty());
    assert_eq!(game.player(me).trash.last().map(|c| c.get_id()), Some("FODDER"));
}

#[test]
fn wiping_the_board_wins_the_round() {
    let mut game = start_main(6).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    set_hand(&mut game, me, vec![attack("FINISHER", 1)]);
    {
        let leaders = &mut game.player_mut(other).leaders;
        leaders[0].take_damage(100);
        leaders[1].take_damage(100);
        leaders[2].take_damage(80);
    }

    game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 2))).unwrap();

    assert_eq!(game.player(me).rounds_won, 1);
    assert_eq!(game.current_round(), 2);
    assert_eq!(game.phase(), Phase::TacticsSelection);
    assert_eq!(game.max_pp(), 4);
    assert_eq!(game.round_winner(), None);
    assert_eq!(game.turn_player(), other);
    for player in game.players() {
        assert_eq!(player.pp_cards.len(), 4);
        assert!(player.hand.is_empty());
        assert!(player.field.is_empty());
        assert!(player.leaders.iter().all(|l| l.is_alive()));
    }
    assert_eq!(game.player(other).leaders[0].get_current_hp(), 100);
    assert_eq!(game.player(me).trash.last().map(|c| c.get_id()), Some("FINISHER"));
    assert_eq!(game.player(me).pending.kinds(), vec!["CHECK_AWAKENING"]);
}

#[test]
fn second_round_win_ends_the_match() {
    let mut game = start_main(6).unwrap();
    let ((me, my_id), (other, other_id)) = turn_players(&game);
    game.player_mut(me).rounds_won = 1;
    set_hand(&mut game, me, vec![attack("FINISHER", 1)]);
    {
        let leaders = &mut game.player_mut(other).leaders;
        leaders[0].take_damage(100);
        leaders[1].take_damage(100);
        leaders[2].take_damage(80);
    }

    game.play_card(&my_id, 0, Some(TargetInfo::attack(0, 2))).unwrap();
    assert_eq!(game.game_winner(), Some(me));
    assert_eq!(game.win_reason(), Some(WinReason::RoundsWon));
    assert_eq!(game.end_turn(&other_id), Err(GameError::GameOver));
    assert_eq!(
        game.resolve_action(&my_id, ResolvePayload::default()),
        Err(GameError::GameOver)
    );
}

fn catalog_with_awaken_draw() -> Catalog {
    let base = default_catalog();
    let mut red = leader("L_RED", "Red", &["VSPO!"]);
    red.ability = Some(Ability {
        trigger: Ability::AWAKEN.to_string(),
        effect: vec![AbilityEffect {
            kind: AbilityKind::Draw,
            target: None,
            value: 2,
        }],
    });
    let cards: Vec<CardTemplate> = ["A_BASIC", "M_BASIC", "T_BOOST", "T_SHIELD"]
        .iter()
        .filter_map(|id| duel_core::catalog::CardCatalog::card(&base, id).cloned())
        .collect();
    Catalog::new(
        cards,
        vec![
            red,
            leader("L_BLUE", "Blue", &["VSPO!"]),
            leader("L_GREEN", "Green", &["CR"]),
        ],
    )
}

#[test]
fn awaken_ability_runs_for_the_awakened_leader() {
    let catalog = catalog_with_awaken_draw();
    let mut game = Game::new(
        &catalog,
        [entry(P1_ID, default_deck()), entry(P2_ID, default_deck())],
        RulesConfig::default(),
        8,
    )
    .unwrap();
    game.select_tactics(P1_ID, 0).unwrap();
    game.select_tactics(P2_ID, 0).unwrap();

    let (_, (other, _)) = turn_players(&game);
    let hand_before = game.player(other).hand.len();
    game.deal_damage_to_leader(other, 100, Some(0));

    assert!(game.player(other).leaders[0].is_awakened());
    assert_eq!(game.player(other).hand.len(), hand_before + 2);
}

/// 리더를 각성시킨 뒤 HP 를 left 만 남깁니다. left 가 0 이면 다운.
fn wear_down(game: &mut Game, slot: usize, index: usize, left: i32) {
    let leader = &mut game.player_mut(slot).leaders[index];
    leader.take_damage(100);
    leader.awaken();
    leader.take_damage(30 - left);
}

#[test]
fn targeted_effect_kill_ends_the_round() {
    let mut game = start_main(4).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    wear_down(&mut game, other, 0, 0);
    wear_down(&mut game, other, 1, 0);
    wear_down(&mut game, other, 2, 10);
    let mut snipe = memoria("SNIPE", 0);
    snipe.on_play = Some("damage_20_one_enemy".into());
    set_hand(&mut game, me, vec![snipe]);

    game.play_card(&my_id, 0, None).unwrap();
    assert_eq!(game.player(me).pending.kinds(), vec!["SELECT_EFFECT_TARGET"]);
    game.resolve_action(&my_id, ResolvePayload::target(2)).unwrap();

    assert_eq!(game.player(me).rounds_won, 1);
    assert_eq!(game.current_round(), 2);
    assert_eq!(game.phase(), Phase::TacticsSelection);
}

#[test]
fn on_play_aoe_kill_ends_the_round() {
    let mut game = start_main(4).unwrap();
    let ((me, my_id), (other, _)) = turn_players(&game);
    for index in 0..3 {
        wear_down(&mut game, other, index, 10);
    }
    let mut blast = memoria("BLAST", 0);
    blast.on_play = Some("damage_20_all_enemy".into());
    set_hand(&mut game, me, vec![blast]);

    game.play_card(&my_id, 0, None).unwrap();

    assert_eq!(game.player(me).rounds_won, 1);
    assert_eq!(game.current_round(), 2);
    assert!(game.player(me).field.is_empty());
    assert!(game.player(me).trash.iter().any(|c| c.get_id() == "BLAST"));
}
