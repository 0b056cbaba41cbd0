use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    profile::SnakeProfile,
    snapshot::{GameOutcome, Snapshot, StepInfo, StepResult},
    state::{CollisionType, Food, FoodKind, GameState, Phase, Position, PowerUp, PowerUpKind, Snake},
};

/// The game engine that owns the board and handles all game logic
///
/// The engine never touches a rendering surface or a timer. Callers feed it
/// directional input through [`GameEngine::set_pending_direction`], call
/// [`GameEngine::step`] once per tick, and re-arm their timer with
/// [`GameEngine::tick_interval`] afterwards.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    profile: SnakeProfile,
    rng: R,
    state: GameState,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from the operating system's entropy source
    pub fn new(config: GameConfig, profile: SnakeProfile) -> Self {
        Self::with_rng(config, profile, StdRng::from_entropy())
    }

    /// Create an engine whose food and power-up draws are reproducible
    pub fn seeded(config: GameConfig, profile: SnakeProfile, seed: u64) -> Self {
        Self::with_rng(config, profile, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine on the opening board, waiting for the first input
    pub fn with_rng(config: GameConfig, profile: SnakeProfile, rng: R) -> Self {
        let state = GameState::opening(&config);
        Self {
            config,
            profile: profile.normalized(),
            rng,
            state,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn profile(&self) -> &SnakeProfile {
        &self.profile
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Period the scheduler should use for the next tick
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.tick_ms)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Buffer a direction for the next tick.
    ///
    /// The reverse of the current direction is ignored. Before the session has
    /// started any direction starts it without turning the snake. After game
    /// over all input is ignored. Returns whether the input was accepted.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        match self.state.phase {
            Phase::GameOver => false,
            Phase::NotStarted => {
                self.state.phase = Phase::Running;
                info!(profile = %self.profile.name, "session started");
                true
            }
            Phase::Running => {
                if self.state.snake.direction.is_opposite(direction) {
                    return false;
                }
                self.state.snake.pending = direction;
                true
            }
        }
    }

    /// Start a fresh game on a new board, already running
    pub fn reset(&mut self) -> Snapshot {
        let mut state = GameState::opening(&self.config);
        state.food = spawn_food(&mut self.rng, &self.config, &state.snake);
        state.phase = Phase::Running;
        self.state = state;

        info!(profile = %self.profile.name, "game restarted");
        self.snapshot()
    }

    /// Execute one tick of the game
    pub fn step(&mut self) -> StepResult {
        if self.state.phase != Phase::Running {
            return StepResult::Idle(self.snapshot());
        }

        let state = &mut self.state;
        state.snake.direction = state.snake.pending;

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(collision) = check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            state.collision = Some(collision);

            let outcome = GameOutcome {
                final_score: state.score,
                collision,
            };
            info!(
                score = outcome.final_score,
                ?collision,
                steps = state.steps,
                "game over"
            );
            return StepResult::GameOver(outcome);
        }

        state.snake.body.insert(0, new_head);
        state.steps += 1;

        let mut info = StepInfo::default();

        if new_head == state.food.position {
            let kind = state.food.kind;
            let points = self.profile.award(kind.base_points());
            state.score = state.score.saturating_add(points);
            info.ate = Some(kind);
            info.points = points;
            debug!(?kind, points, score = state.score, "food eaten");

            // The snake has grown, so the new food must avoid the longer body
            state.food = spawn_food(&mut self.rng, &self.config, &state.snake);

            let roll: f64 = self.rng.gen();
            if roll < self.config.power_up_chance && state.power_up.is_none() {
                state.power_up = Some(PowerUp {
                    kind: PowerUpKind::Slow,
                    remaining_ms: self.config.slow_duration_ms as i64,
                });
                state.tick_ms = self.config.slow_tick_ms;
                info.power_up_started = true;
                debug!(tick_ms = state.tick_ms, "slow power-up started");
            }
        } else {
            state.snake.body.pop();
        }

        if let Some(power_up) = state.power_up.as_mut() {
            power_up.remaining_ms -= state.tick_ms as i64;
            if power_up.remaining_ms <= 0 {
                state.power_up = None;
                state.tick_ms = self.config.base_tick_ms;
                info.power_up_expired = true;
                debug!(tick_ms = state.tick_ms, "slow power-up expired");
            }
        }

        StepResult::Advanced {
            snapshot: Snapshot::capture(state),
            info,
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

/// Check if the new head position causes a collision
fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
    if !state.is_in_bounds(pos) {
        return Some(CollisionType::Wall);
    }

    if state.snake.collides_with_body(pos) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Place food on a random cell not covered by the snake.
///
/// Rejection sampling is capped at `max_spawn_attempts`. When the cap runs out
/// the free cells are scanned instead; only a completely full grid leaves the
/// food on the last (occupied) sample.
fn spawn_food<R: Rng>(rng: &mut R, config: &GameConfig, snake: &Snake) -> Food {
    let roll: f64 = rng.gen();
    let kind = if roll < config.golden_food_chance {
        FoodKind::Golden
    } else {
        FoodKind::Regular
    };

    let size = config.grid_size as i32;
    let mut position = Position::new(0, 0);

    for _ in 0..config.max_spawn_attempts.max(1) {
        position = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !snake.occupies(position) {
            return Food::new(position, kind);
        }
    }

    let free: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.occupies(*pos))
        .collect();

    match free.choose(rng) {
        Some(&cell) => Food::new(cell, kind),
        None => {
            warn!(?position, "no free cell left, food placed on the snake");
            Food::new(position, kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(config: GameConfig, multiplier: f64) -> GameEngine {
        let profile = SnakeProfile {
            scoring_multiplier: multiplier,
            ..Default::default()
        };
        GameEngine::seeded(config, profile, 7)
    }

    fn running_engine() -> GameEngine {
        let mut engine = engine_with(GameConfig::default(), 1.0);
        engine.set_pending_direction(Direction::Right);
        engine
    }

    fn advanced(result: StepResult) -> (Snapshot, StepInfo) {
        match result {
            StepResult::Advanced { snapshot, info } => (snapshot, info),
            other => panic!("expected the snake to move, got {:?}", other),
        }
    }

    #[test]
    fn test_new_engine_waits_for_input() {
        let mut engine = engine_with(GameConfig::default(), 1.0);
        assert_eq!(engine.phase(), Phase::NotStarted);

        let result = engine.step();

        assert!(matches!(result, StepResult::Idle(_)));
        assert_eq!(engine.state().snake.head(), Position::new(10, 10));
    }

    #[test]
    fn test_first_input_starts_without_turning() {
        let mut engine = engine_with(GameConfig::default(), 1.0);

        assert!(engine.set_pending_direction(Direction::Up));
        assert_eq!(engine.phase(), Phase::Running);

        let (snapshot, _) = advanced(engine.step());
        assert_eq!(snapshot.head(), Position::new(11, 10));
        assert_eq!(snapshot.direction, Direction::Right);
    }

    #[test]
    fn test_eat_food_after_five_steps() {
        let mut engine = running_engine();

        for _ in 0..4 {
            let (snapshot, info) = advanced(engine.step());
            assert_eq!(info.ate, None);
            assert_eq!(snapshot.body.len(), 2);
        }

        let (snapshot, info) = advanced(engine.step());
        assert_eq!(info.ate, Some(FoodKind::Regular));
        assert_eq!(snapshot.head(), Position::new(15, 10));
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.body.len(), 3);
        assert!(!snapshot.body.contains(&snapshot.food.position));
    }

    #[test]
    fn test_golden_food_with_multiplier() {
        let mut engine = engine_with(GameConfig::default(), 2.0);
        engine.set_pending_direction(Direction::Right);
        engine.state_mut().food = Food::new(Position::new(11, 10), FoodKind::Golden);

        let (snapshot, info) = advanced(engine.step());

        assert_eq!(info.points, 10);
        assert_eq!(snapshot.score, 10);
    }

    #[test]
    fn test_fractional_multiplier_floors() {
        let mut engine = engine_with(GameConfig::default(), 1.5);
        engine.set_pending_direction(Direction::Right);
        engine.state_mut().food = Food::new(Position::new(11, 10), FoodKind::Regular);

        let (snapshot, _) = advanced(engine.step());

        assert_eq!(snapshot.score, 1);
    }

    #[test]
    fn test_invalid_multiplier_defaults_to_one() {
        let engine = engine_with(GameConfig::default(), 0.0);
        assert_eq!(engine.profile().scoring_multiplier, 1.0);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = running_engine();
        engine.state_mut().snake = Snake::new(Position::new(0, 10), Direction::Left, 2);
        assert_eq!(
            engine.state().snake.body,
            vec![Position::new(0, 10), Position::new(1, 10)]
        );

        let result = engine.step();

        let StepResult::GameOver(outcome) = result else {
            panic!("expected game over, got {:?}", result);
        };
        assert_eq!(outcome.collision, CollisionType::Wall);
        assert_eq!(outcome.final_score, 0);
        assert_eq!(outcome.xp_earned(), 0);
        assert_eq!(engine.phase(), Phase::GameOver);
    }

    #[test]
    fn test_collision_keeps_pre_collision_score() {
        let mut engine = running_engine();
        engine.state_mut().snake = Snake::new(Position::new(19, 3), Direction::Right, 2);
        engine.state_mut().score = 47;
        engine.state_mut().food = Food::new(Position::new(0, 0), FoodKind::Golden);

        let result = engine.step();

        let StepResult::GameOver(outcome) = result else {
            panic!("expected game over, got {:?}", result);
        };
        assert_eq!(outcome.final_score, 47);
        assert_eq!(outcome.xp_earned(), 4);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = running_engine();

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        engine.state_mut().snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        engine.state_mut().food = Food::new(Position::new(15, 15), FoodKind::Regular);

        // Down: (5,6) ... Left: (4,6) ... Up: (4,5) hits the body
        assert!(engine.set_pending_direction(Direction::Down));
        advanced(engine.step());
        assert!(engine.set_pending_direction(Direction::Left));
        advanced(engine.step());
        assert!(engine.set_pending_direction(Direction::Up));
        let result = engine.step();

        let StepResult::GameOver(outcome) = result else {
            panic!("expected game over, got {:?}", result);
        };
        assert_eq!(outcome.collision, CollisionType::SelfCollision);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = running_engine();

        assert!(!engine.set_pending_direction(Direction::Left));
        let (snapshot, _) = advanced(engine.step());

        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.head(), Position::new(11, 10));
    }

    #[test]
    fn test_reversal_checked_against_current_direction() {
        let mut engine = running_engine();

        // Up is buffered, but Left is still the reverse of the applied direction
        assert!(engine.set_pending_direction(Direction::Up));
        assert!(!engine.set_pending_direction(Direction::Left));

        let (snapshot, _) = advanced(engine.step());
        assert_eq!(snapshot.direction, Direction::Up);
    }

    #[test]
    fn test_last_pending_direction_wins() {
        let mut engine = running_engine();

        engine.set_pending_direction(Direction::Up);
        engine.set_pending_direction(Direction::Down);

        let (snapshot, _) = advanced(engine.step());
        assert_eq!(snapshot.head(), Position::new(10, 11));
    }

    #[test]
    fn test_game_over_ignores_input_and_ticks() {
        let mut engine = running_engine();
        engine.state_mut().snake = Snake::new(Position::new(0, 10), Direction::Left, 2);
        assert!(engine.step().is_terminal());

        assert!(!engine.set_pending_direction(Direction::Up));
        assert!(matches!(engine.step(), StepResult::Idle(_)));
        assert_eq!(engine.phase(), Phase::GameOver);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut engine = running_engine();
        engine.state_mut().snake = Snake::new(Position::new(0, 10), Direction::Left, 2);
        engine.state_mut().score = 12;
        engine.step();

        let snapshot = engine.reset();

        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.score, 0);
        assert_eq!(
            snapshot.body,
            vec![Position::new(10, 10), Position::new(9, 10)]
        );
        assert!(!snapshot.body.contains(&snapshot.food.position));
        assert_eq!(snapshot.tick_interval, Duration::from_millis(150));
    }

    #[test]
    fn test_slow_power_up_lifecycle() {
        let config = GameConfig {
            power_up_chance: 1.0,
            ..Default::default()
        };
        let mut engine = engine_with(config, 1.0);
        engine.set_pending_direction(Direction::Right);
        engine.state_mut().snake = Snake::new(Position::new(2, 10), Direction::Right, 2);
        engine.state_mut().food = Food::new(Position::new(3, 10), FoodKind::Regular);

        let (snapshot, info) = advanced(engine.step());
        assert!(info.power_up_started);
        assert_eq!(engine.tick_interval(), Duration::from_millis(250));
        assert_eq!(snapshot.power_up.map(|p| p.remaining_ms), Some(2750));

        for _ in 0..10 {
            let (snapshot, info) = advanced(engine.step());
            assert!(!info.power_up_expired);
            assert!(snapshot.is_slowed());
            assert_eq!(engine.tick_interval(), Duration::from_millis(250));
        }

        // Twelfth slowed tick: 12 * 250 = 3000 elapsed
        let (snapshot, info) = advanced(engine.step());
        assert!(info.power_up_expired);
        assert!(snapshot.power_up.is_none());
        assert_eq!(engine.tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_power_up_not_stacked() {
        let config = GameConfig {
            power_up_chance: 1.0,
            ..Default::default()
        };
        let mut engine = engine_with(config, 1.0);
        engine.set_pending_direction(Direction::Right);
        engine.state_mut().food = Food::new(Position::new(11, 10), FoodKind::Regular);
        advanced(engine.step());

        engine.state_mut().food = Food::new(Position::new(12, 10), FoodKind::Regular);
        let (snapshot, info) = advanced(engine.step());

        assert!(!info.power_up_started);
        assert_eq!(snapshot.power_up.map(|p| p.remaining_ms), Some(2500));
    }

    #[test]
    fn test_no_power_up_when_chance_is_zero() {
        let config = GameConfig {
            power_up_chance: 0.0,
            ..Default::default()
        };
        let mut engine = engine_with(config, 1.0);
        engine.set_pending_direction(Direction::Right);
        engine.state_mut().food = Food::new(Position::new(11, 10), FoodKind::Regular);

        let (snapshot, info) = advanced(engine.step());
        assert!(!info.power_up_started);
        assert!(snapshot.power_up.is_none());
        assert_eq!(snapshot.tick_interval, Duration::from_millis(150));
    }

    #[test]
    fn test_spawn_food_avoids_snake() {
        let config = GameConfig::new(4);
        let snake = Snake::new(Position::new(3, 0), Direction::Right, 4);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let food = spawn_food(&mut rng, &config, &snake);
            assert!(!snake.occupies(food.position));
            assert!((0..4).contains(&food.position.x));
            assert!((0..4).contains(&food.position.y));
        }
    }

    #[test]
    fn test_spawn_food_scans_when_attempts_run_out() {
        let config = GameConfig {
            grid_size: 4,
            max_spawn_attempts: 1,
            ..Default::default()
        };
        let free = Position::new(2, 3);
        let body: Vec<Position> = (0..4)
            .flat_map(|y| (0..4).map(move |x| Position::new(x, y)))
            .filter(|pos| *pos != free)
            .collect();
        let snake = Snake {
            body,
            direction: Direction::Right,
            pending: Direction::Right,
        };

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(spawn_food(&mut rng, &config, &snake).position, free);
        }
    }

    #[test]
    fn test_spawn_food_kind_follows_chance() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 2);
        let mut rng = StdRng::seed_from_u64(11);

        let always = GameConfig {
            golden_food_chance: 1.0,
            ..Default::default()
        };
        assert_eq!(spawn_food(&mut rng, &always, &snake).kind, FoodKind::Golden);

        let never = GameConfig {
            golden_food_chance: 0.0,
            ..Default::default()
        };
        assert_eq!(spawn_food(&mut rng, &never, &snake).kind, FoodKind::Regular);
    }

    #[test]
    fn test_length_and_head_invariants_over_random_play() {
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

        for seed in 0..10 {
            let mut engine = engine_with(GameConfig::small(), 1.0);
            let mut rng = StdRng::seed_from_u64(seed);
            engine.set_pending_direction(Direction::Right);

            for _ in 0..500 {
                if rng.gen_bool(0.3) {
                    engine.set_pending_direction(turns[rng.gen_range(0..turns.len())]);
                }

                let before = engine.snapshot();
                match engine.step() {
                    StepResult::Advanced { snapshot, info } => {
                        let grown = snapshot.body.len() - before.body.len();
                        assert_eq!(grown, usize::from(info.ate.is_some()));

                        let expected = before.head().moved_in_direction(snapshot.direction);
                        assert_eq!(snapshot.head(), expected);
                        assert!(!snapshot.direction.is_opposite(before.direction));
                        assert!(snapshot.score >= before.score);
                    }
                    StepResult::GameOver(outcome) => {
                        assert_eq!(outcome.final_score, before.score);
                        break;
                    }
                    StepResult::Idle(_) => panic!("running engine must not idle"),
                }
            }
        }
    }
}
