use std::time::Duration;

use super::direction::Direction;
use super::state::{CollisionType, Food, FoodKind, GameState, Phase, Position, PowerUp};

/// XP the host grants for a finished game
pub fn xp_for_score(final_score: u32) -> u32 {
    final_score / 10
}

/// Immutable view of the engine after a tick, consumed by renderers
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Segments, head first
    pub body: Vec<Position>,
    pub direction: Direction,
    pub food: Food,
    pub power_up: Option<PowerUp>,
    pub score: u32,
    pub phase: Phase,
    pub grid_size: usize,
    pub tick_interval: Duration,
}

impl Snapshot {
    pub(crate) fn capture(state: &GameState) -> Self {
        Self {
            body: state.snake.body.clone(),
            direction: state.snake.direction,
            food: state.food,
            power_up: state.power_up,
            score: state.score,
            phase: state.phase,
            grid_size: state.grid_size,
            tick_interval: Duration::from_millis(state.tick_ms),
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn is_slowed(&self) -> bool {
        self.power_up.is_some()
    }
}

/// Terminal report of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub final_score: u32,
    pub collision: CollisionType,
}

impl GameOutcome {
    pub fn xp_earned(&self) -> u32 {
        xp_for_score(self.final_score)
    }
}

/// What happened during a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Kind of food eaten this step, if any
    pub ate: Option<FoodKind>,
    /// Points added to the score this step
    pub points: u32,
    pub power_up_started: bool,
    pub power_up_expired: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// The snake moved; the board is in the snapshot
    Advanced { snapshot: Snapshot, info: StepInfo },
    /// Nothing moved because the session is not running
    Idle(Snapshot),
    /// The snake collided on this step
    GameOver(GameOutcome),
}

impl StepResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepResult::GameOver(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_for_score() {
        assert_eq!(xp_for_score(47), 4);
        assert_eq!(xp_for_score(9), 0);
        assert_eq!(xp_for_score(0), 0);
        assert_eq!(xp_for_score(10), 1);
        assert_eq!(xp_for_score(1234), 123);
    }

    #[test]
    fn test_outcome_xp() {
        let outcome = GameOutcome {
            final_score: 47,
            collision: CollisionType::Wall,
        };
        assert_eq!(outcome.xp_earned(), 4);
    }
}
