use super::config::GameConfig;
use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the last tick
    pub direction: Direction,
    /// Direction buffered from input, promoted at the start of the next tick
    pub pending: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            pending: direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Kind of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Regular,
    Golden,
}

impl FoodKind {
    /// Points before the profile multiplier is applied
    pub fn base_points(&self) -> u32 {
        match self {
            FoodKind::Regular => 1,
            FoodKind::Golden => 5,
        }
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Lengthens the tick interval
    Slow,
}

/// An active power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Remaining duration in ms of elapsed ticks
    pub remaining_ms: i64,
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Board is set up, waiting for the first directional input
    NotStarted,
    Running,
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub power_up: Option<PowerUp>,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    /// Current tick interval in ms
    pub tick_ms: u64,
    pub phase: Phase,
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, config: &GameConfig) -> Self {
        Self {
            snake,
            food,
            power_up: None,
            grid_size: config.grid_size,
            score: 0,
            steps: 0,
            tick_ms: config.base_tick_ms,
            phase: Phase::NotStarted,
            collision: None,
        }
    }

    /// The opening board: a two-segment snake in the middle facing right,
    /// with regular food three quarters of the way across
    pub fn opening(config: &GameConfig) -> Self {
        let center = (config.grid_size / 2) as i32;
        let snake = Snake::new(Position::new(center, center), Direction::Right, 2);
        let food = Food::new(
            Position::new((config.grid_size * 3 / 4) as i32, center),
            FoodKind::Regular,
        );
        Self::new(snake, food, config)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }
}
