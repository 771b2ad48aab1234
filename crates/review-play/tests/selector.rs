//! Seeded distribution tests for the human-likeness selector.

use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::fen::Fen;
use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, Move};

use review_play::select_human_move;

fn position(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .unwrap()
        .into_position(CastlingMode::Standard)
        .unwrap()
}

fn mv(pos: &Chess, uci: &str) -> Move {
    uci.parse::<Uci>().unwrap().to_move(pos).unwrap()
}

/// White to move; Black threatens the back-rank mate Re1#. Interposing
/// with Rb2-e2 averts it, Rb2-b6 ignores it.
const BACK_RANK_FEN: &str = "4r1k1/8/8/8/8/8/1R3PPP/6K1 w - - 0 1";

#[test]
fn strong_players_avert_an_active_mate_threat_with_high_probability() {
    let pos = position(BACK_RANK_FEN);
    let ignore = mv(&pos, "b2b6");
    let avert = mv(&pos, "b2e2");
    // The ignoring move comes first so an unrestricted tie-break prefers
    // it; picking the averting move means the restriction fired.
    let candidates = vec![(ignore.clone(), 10), (avert.clone(), 5)];

    const TRIALS: u64 = 600;
    let mut averted = 0u32;
    for seed in 0..TRIALS {
        let mut rng = StdRng::seed_from_u64(seed);
        let choice = select_human_move(&pos, &candidates, 2000, &mut rng).expect("non-empty");
        if choice == avert {
            averted += 1;
        } else {
            assert_eq!(choice, ignore);
        }
    }

    // Awareness at 2000+ is 0.95; allow sampling tolerance.
    let fraction = f64::from(averted) / TRIALS as f64;
    assert!(
        (0.90..=0.99).contains(&fraction),
        "averting fraction was {fraction}"
    );
}

#[test]
fn without_a_mate_threat_the_top_candidate_wins_deterministically() {
    // Same material, black rook parked harmlessly on a7: no mate threat,
    // so at 2000 the tie-break always keeps the first candidate.
    let pos = position("6k1/r7/8/8/8/8/1R3PPP/6K1 w - - 0 1");
    let first = mv(&pos, "b2b6");
    let second = mv(&pos, "b2e2");
    let candidates = vec![(first.clone(), 10), (second, 5)];

    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let choice = select_human_move(&pos, &candidates, 2000, &mut rng).expect("non-empty");
        assert_eq!(choice, first);
    }
}

#[test]
fn selection_is_reproducible_per_seed() {
    let pos = position(BACK_RANK_FEN);
    let candidates = vec![
        (mv(&pos, "b2b6"), 10),
        (mv(&pos, "b2e2"), 5),
        (mv(&pos, "g1f1"), 0),
    ];

    for elo in [500, 1000, 1500, 2200] {
        for seed in 0..25 {
            let first = select_human_move(
                &pos,
                &candidates,
                elo,
                &mut StdRng::seed_from_u64(seed),
            );
            let second = select_human_move(
                &pos,
                &candidates,
                elo,
                &mut StdRng::seed_from_u64(seed),
            );
            assert_eq!(first, second);
        }
    }
}
