use criterion::{black_box, criterion_group, criterion_main, Criterion};
use duel_core::{
    game::{pending::PendingAction, ClientCommand, Game, ResolvePayload, TargetInfo},
    test::{start_main, turn_players},
};

/// 대기 중인 결정에 기본 응답을 보냅니다. 버리기는 앞에서부터 고릅니다.
fn drain_pending(game: &mut Game, slot: usize) {
    let id = game.player_id(slot).to_string();
    for _ in 0..8 {
        let payload = match game.player(slot).pending.head() {
            None => return,
            Some(PendingAction::SelectDiscard { count, .. }) => {
                ResolvePayload::discard((0..*count).collect())
            }
            Some(PendingAction::SelectOptionalDiscard { .. }) => ResolvePayload::skip(),
            Some(_) => ResolvePayload::default(),
        };
        game.dispatch(&id, ClientCommand::ResolveAction { payload });
    }
}

/// 양쪽이 번갈아 가능한 공격을 모두 하고 턴을 넘기는 것을 반복합니다.
fn play_scripted_round(seed: u64) -> Game {
    let mut game = start_main(seed).expect("match setup");
    for _ in 0..12 {
        if game.is_over() {
            break;
        }
        let ((me, my_id), (other, _)) = turn_players(&game);
        drain_pending(&mut game, me);
        let Some(target) = game.player(other).first_live_leader() else {
            break;
        };
        let Some(attacker) = game.player(me).first_live_leader() else {
            break;
        };
        game.dispatch(
            &my_id,
            ClientCommand::PlayCard {
                card_index: 0,
                target: Some(TargetInfo::attack(attacker, target)),
            },
        );
        drain_pending(&mut game, me);
        game.dispatch(&my_id, ClientCommand::EndTurn);
        drain_pending(&mut game, me);
    }
    game
}

fn bench_scripted_round(c: &mut Criterion) {
    c.bench_function("scripted_round", |b| {
        b.iter(|| black_box(play_scripted_round(black_box(7))))
    });
}

fn bench_secret_state(c: &mut Criterion) {
    let game = play_scripted_round(7);
    let viewer = game.player_id(0).to_string();
    c.bench_function("secret_state_json", |b| {
        b.iter(|| serde_json::to_string(&game.get_secret_state(black_box(&viewer))))
    });
}

criterion_group!(benches, bench_scripted_round, bench_secret_state);
criterion_main!(benches);
