use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gomoku_mcts::board::{Board, Move};
use gomoku_mcts::eval;
use gomoku_mcts::search::{Mcts, MctsConfig};

fn midgame_board() -> Board {
    let mut board = Board::new();
    board.apply(Move::new(7, 7));
    board.apply(Move::new(8, 7));
    board.apply(Move::new(7, 8));
    board.apply(Move::new(8, 8));
    board.apply(Move::new(6, 6));
    board.apply(Move::new(9, 9));
    board
}

fn bench_apply_undo(c: &mut Criterion) {
    let mut board = midgame_board();
    c.bench_function("board apply/undo", |b| {
        b.iter(|| {
            let mv = Move::new(6, 7);
            board.apply(black_box(mv));
            board.undo(mv);
        })
    });
}

fn bench_evaluate_move(c: &mut Criterion) {
    let board = midgame_board();
    let mv = Move::new(6, 7);
    c.bench_function("heuristic evaluate_move", |b| {
        b.iter(|| black_box(eval::evaluate_move(&board, black_box(mv))))
    });
}

fn bench_scored_moves(c: &mut Criterion) {
    let board = midgame_board();
    c.bench_function("heuristic scored_moves", |b| {
        b.iter(|| black_box(eval::scored_moves(&board)))
    });
}

fn bench_mcts_iterations(c: &mut Criterion) {
    let mut board = Board::new();
    board.apply(Move::new(7, 7));
    board.apply(Move::new(8, 7));

    c.bench_function("mcts 200 iterations", |b| {
        b.iter(|| {
            let mut mcts = Mcts::new(MctsConfig {
                max_iterations: 200,
                max_time_ms: 0,
                seed: 42,
                ..MctsConfig::default()
            });
            black_box(mcts.search(&board))
        })
    });
}

criterion_group!(
    benches,
    bench_apply_undo,
    bench_evaluate_move,
    bench_scored_moves,
    bench_mcts_iterations
);
criterion_main!(benches);
