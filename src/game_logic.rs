use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::MoveSelector;
use crate::board::Color;
use crate::movegen;
use crate::moves::Move;
use crate::play::{MoveError, MoveInfo};
use crate::position::Position;

/// Picks uniformly among the candidate moves.
#[derive(Debug, Clone)]
pub struct RandomSelector<R> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for RandomSelector<R> {
    fn select(&mut self, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }
}

/// Result of a single engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A move was selected and played.
    Moved(MoveInfo),
    /// The side to move had no candidate moves; the position is unchanged.
    Exhausted { side: Color },
}

/// How a [`GameEngine::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// `side` had no moves after `plies` half-moves.
    ///
    /// Stalemate and checkmate are indistinguishable here since check is never detected.
    NoMoves { side: Color, plies: usize },
    /// The ply cap was reached with moves still available.
    PlyLimit { plies: usize },
}

/// Drives generate → select → apply over a position.
pub struct GameEngine<S> {
    position: Position,
    selector: S,
    history: Vec<Move>,
}

impl<S: MoveSelector> GameEngine<S> {
    /// Starts from the standard initial layout.
    #[inline]
    pub fn new(selector: S) -> Self {
        Self::from_position(Position::new(), selector)
    }

    pub fn from_position(position: Position, selector: S) -> Self {
        Self {
            position,
            selector,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Moves played so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Plays one selected move, or reports that the side to move is out of moves.
    pub fn tick(&mut self) -> Result<Tick, MoveError> {
        let moves = movegen::generate(&self.position);
        let Some(mv) = self.selector.select(&moves) else {
            return Ok(Tick::Exhausted {
                side: self.position.turn(),
            });
        };

        let info = self.position.inspect(mv)?;
        self.position = self.position.play(mv)?;
        self.history.push(mv);

        match info.captured {
            Some(capture) => debug!(
                "{:?} {} plays {} capturing {} on {}",
                info.piece.color, info.piece, mv, capture.piece, capture.square
            ),
            None => debug!(
                "{:?} {} plays {} ({:?})",
                info.piece.color, info.piece, mv, info.kind
            ),
        }

        Ok(Tick::Moved(info))
    }

    /// Ticks until a side runs out of moves or `max_plies` more moves were played.
    pub fn run(&mut self, max_plies: usize) -> Result<GameOutcome, MoveError> {
        for _ in 0..max_plies {
            if let Tick::Exhausted { side } = self.tick()? {
                let plies = self.history.len();
                info!("{side:?} has no moves after {plies} plies");
                return Ok(GameOutcome::NoMoves { side, plies });
            }
        }

        let plies = self.history.len();
        info!("stopped after {plies} plies");
        Ok(GameOutcome::PlyLimit { plies })
    }
}

impl<S> std::fmt::Debug for GameEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("position", &format_args!("{}", self.position))
            .field("plies", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Role};
    use crate::fen;
    use crate::play::MoveKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Replays a fixed list of moves, then reports nothing.
    struct ScriptedSelector {
        script: std::vec::IntoIter<Move>,
    }

    impl ScriptedSelector {
        fn new(moves: &str) -> Self {
            let script: Vec<Move> = moves
                .split_whitespace()
                .map(|m| m.parse().expect("script move is valid"))
                .collect();
            Self {
                script: script.into_iter(),
            }
        }
    }

    impl MoveSelector for ScriptedSelector {
        fn select(&mut self, moves: &[Move]) -> Option<Move> {
            let next = self.script.next()?;
            assert!(moves.contains(&next), "{next} is not a candidate");
            Some(next)
        }
    }

    /// Always takes the first candidate.
    struct FirstSelector;

    impl MoveSelector for FirstSelector {
        fn select(&mut self, moves: &[Move]) -> Option<Move> {
            moves.first().copied()
        }
    }

    fn engine_from_fen<S: MoveSelector>(text: &str, selector: S) -> GameEngine<S> {
        GameEngine::from_position(fen::parse(text).expect("invalid record"), selector)
    }

    #[test]
    fn test_game_sequence() {
        let mut engine = GameEngine::new(ScriptedSelector::new("e2e4 e7e5 g1f3 b8c6"));
        for _ in 0..4 {
            assert!(matches!(engine.tick(), Ok(Tick::Moved(_))));
        }

        assert_eq!(
            engine.position().to_string(),
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
        );
        assert_eq!(engine.history().len(), 4);
    }

    #[test]
    fn test_tick_reports_capture() {
        let mut engine = engine_from_fen(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
            ScriptedSelector::new("e4d5"),
        );

        let Ok(Tick::Moved(info)) = engine.tick() else {
            panic!("expected a move");
        };
        assert_eq!(info.kind, MoveKind::Capture);
        assert_eq!(info.piece, Piece::new(Color::White, Role::Pawn));
        assert_eq!(
            info.captured.map(|c| c.piece),
            Some(Piece::new(Color::Black, Role::Pawn))
        );
    }

    #[test]
    fn test_exhausted_when_no_moves() {
        let mut engine = engine_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1", FirstSelector);
        let before = engine.position().clone();

        assert_eq!(engine.tick(), Ok(Tick::Exhausted { side: Color::White }));
        assert_eq!(engine.position(), &before);
    }

    #[test]
    fn test_run_until_blocked() {
        // a2 pawn runs into the a5 pawn; black's pawn is blocked too
        let mut engine = engine_from_fen("8/8/8/p7/8/8/P7/8 w - - 0 1", FirstSelector);

        let outcome = engine.run(10).unwrap();

        assert_eq!(
            outcome,
            GameOutcome::NoMoves {
                side: Color::White,
                plies: 2
            }
        );
        assert_eq!(engine.history()[0].to_string(), "a2a3");
        assert_eq!(engine.history()[1].to_string(), "a5a4");
        assert_eq!(engine.position().fullmove_number(), 2);
    }

    #[test]
    fn test_run_stops_at_ply_limit() {
        let mut engine = GameEngine::new(RandomSelector::new(StdRng::seed_from_u64(7)));
        let outcome = engine.run(6).unwrap();

        assert_eq!(outcome, GameOutcome::PlyLimit { plies: 6 });
        assert_eq!(engine.position().fullmove_number(), 4);
        assert!(engine.position().is_consistent());
    }

    #[test]
    fn test_random_selector_picks_a_candidate() {
        let mut selector = RandomSelector::new(StdRng::seed_from_u64(42));
        let moves = movegen::generate(&Position::new());

        for _ in 0..50 {
            let picked = selector.select(&moves).unwrap();
            assert!(moves.contains(&picked));
        }
        assert_eq!(selector.select(&[]), None);
    }

    #[test]
    fn test_random_selector_is_reproducible_with_seed() {
        let mut first = GameEngine::new(RandomSelector::new(StdRng::seed_from_u64(3)));
        let mut second = GameEngine::new(RandomSelector::new(StdRng::seed_from_u64(3)));
        first.run(40).unwrap();
        second.run(40).unwrap();

        assert_eq!(first.history(), second.history());
        assert_eq!(first.position(), second.position());
    }
}
