// Automatic players: a strategy picks one of the legal tile moves.

use super::game::GameState;
use super::moves::{ExchangeMove, Move};

pub trait Robot {
    fn pick_move(&self, state: &GameState, moves: Vec<Move>) -> Move;
}

// Wraps a strategy with move generation.
pub struct RobotWrapper<R: Robot> {
    robot: R,
}

impl<R: Robot> RobotWrapper<R> {
    pub fn new(robot: R) -> RobotWrapper<R> {
        RobotWrapper { robot }
    }

    // Generates the legal tile moves, then asks the strategy to pick
    // one of them to play.
    pub fn generate_move(&self, state: &GameState) -> Move {
        let moves = state.generate_moves();
        self.robot.pick_move(state, moves)
    }
}

// Always picks the highest-scoring move available, exchanges all tiles
// when there is no tile move, and passes as a last resort.
pub struct HighScoreRobot;

impl Robot for HighScoreRobot {
    fn pick_move(&self, state: &GameState, mut moves: Vec<Move>) -> Move {
        if !moves.is_empty() {
            moves.sort_by_key(|mv| std::cmp::Reverse(mv.score(state)));
            return moves.swap_remove(0);
        }
        if !state.exchange_forbidden {
            return Move::Exchange(ExchangeMove::new(&state.rack.as_string()));
        }
        Move::Pass
    }
}

pub fn new_high_score_robot() -> RobotWrapper<HighScoreRobot> {
    RobotWrapper::new(HighScoreRobot)
}
