use bitboard_chess::fen;
use bitboard_chess::game_logic::{GameEngine, GameOutcome, RandomSelector, Tick};
use bitboard_chess::movegen;
use bitboard_chess::{Color, Move, MoveSelector, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use test_case::test_case;

/// Helper: engine seeded from a fixed rng.
fn seeded_engine(record: &str, seed: u64) -> GameEngine<RandomSelector<StdRng>> {
    let position = fen::parse(record).expect("valid record");
    GameEngine::from_position(position, RandomSelector::new(StdRng::seed_from_u64(seed)))
}

/// Helper: parse a space-separated move list.
fn moves(script: &str) -> Vec<Move> {
    script
        .split_whitespace()
        .map(|m| m.parse().expect("valid move"))
        .collect()
}

// ---------------------------------------------------------------
// End-to-end: record → generate → apply → record
// ---------------------------------------------------------------

#[test]
fn single_pawn_scenario() {
    let pos = fen::parse("8/8/8/8/8/8/P7/8 w - - 0 1").expect("valid record");
    let candidates = movegen::generate(&pos);
    assert_eq!(candidates, moves("a2a3 a2a4"));

    let next = pos.play(candidates[1]).expect("generated move applies");
    let record = fen::serialize(&next);
    let fields: Vec<&str> = record.split(' ').collect();

    assert_eq!(fields[0], "8/8/8/8/P7/8/8/8", "pawn should stand on a4");
    assert_eq!(fields[1], "b", "black to move");
    assert_eq!(fields[4], "0", "halfmove clock reset");
    assert_eq!(fields[5], "1", "fullmove number unchanged");
}

#[test]
fn initial_position_candidate_counts() {
    let candidates = movegen::generate(&Position::new());
    let (pawns, knights): (Vec<Move>, Vec<Move>) = candidates
        .into_iter()
        .partition(|mv| mv.from.value() >= 8);

    assert_eq!(pawns.len(), 16, "8 single + 8 double pushes");
    assert_eq!(knights.len(), 4, "two destinations per knight");
}

#[test]
fn replayed_opening_matches_record() {
    let mut pos = Position::new();
    for mv in moves("e2e4 g8f6 e4e5 d7d5") {
        assert!(movegen::generate(&pos).contains(&mv), "{mv} should be a candidate");
        pos = pos.play(mv).expect("candidate applies");
    }

    assert_eq!(
        pos.to_string(),
        "rnbqkb1r/ppp1pppp/5n2/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
    );

    let ep: Move = "e5d6".parse().expect("valid move");
    assert!(movegen::generate(&pos).contains(&ep));
    let after = pos.play(ep).expect("en passant applies");
    assert_eq!(
        after.to_string(),
        "rnbqkb1r/ppp1pppp/3P1n2/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
    );
}

// ---------------------------------------------------------------
// Invariants over random self-play
// ---------------------------------------------------------------

#[test_case(fen::STARTING_FEN, 1)]
#[test_case(fen::STARTING_FEN, 2)]
#[test_case(fen::STARTING_FEN, 99)]
#[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 5)]
#[test_case("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 11)]
fn self_play_preserves_invariants(record: &str, seed: u64) {
    let mut engine = seeded_engine(record, seed);

    for _ in 0..200 {
        let before = engine.position().clone();
        match engine.tick().expect("generated moves always apply") {
            Tick::Exhausted { side } => {
                assert_eq!(side, before.turn());
                break;
            }
            Tick::Moved(info) => {
                let after = engine.position();
                assert!(after.is_consistent(), "masks overlap after {}", info.mv);
                assert_eq!(after.turn(), !before.turn());

                if info.is_irreversible() {
                    assert_eq!(after.halfmove_clock(), 0);
                } else {
                    assert_eq!(after.halfmove_clock(), before.halfmove_clock() + 1);
                }

                let expected_fullmove = before.fullmove_number()
                    + u32::from(before.turn() == Color::Black);
                assert_eq!(after.fullmove_number(), expected_fullmove);

                let reparsed =
                    fen::parse(&fen::serialize(after)).expect("serialized record parses");
                assert_eq!(&reparsed, after, "record round trip");
            }
        }
    }
}

#[test]
fn run_reports_side_without_moves() {
    let mut engine = seeded_engine("8/8/8/8/8/p7/P7/8 w - - 0 1", 0);
    assert_eq!(
        engine.run(10),
        Ok(GameOutcome::NoMoves {
            side: Color::White,
            plies: 0
        })
    );
}

#[test]
fn custom_selector_drives_engine() {
    /// Always takes the last candidate.
    struct LastCandidate;

    impl MoveSelector for LastCandidate {
        fn select(&mut self, moves: &[Move]) -> Option<Move> {
            moves.last().copied()
        }
    }

    let position = fen::parse("8/8/8/8/8/8/P7/8 w - - 0 1").expect("valid record");
    let mut engine = GameEngine::from_position(position, LastCandidate);
    engine.tick().expect("move applies");

    assert_eq!(engine.history(), moves("a2a4").as_slice());
}
