use log::{debug, info};

use super::{
    action::{Direction, Intent},
    config::GameConfig,
    food::{CellPicker, Food, Placement},
    state::{Cell, CollisionKind, Grid, Snake},
};

/// Where the game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    /// The snake crashed; only restart and quit are accepted
    GameOver(CollisionKind),
    /// The snake filled the board
    Won,
}

impl Status {
    pub fn is_playing(&self) -> bool {
        matches!(self, Status::Playing)
    }
}

/// What the caller should do after an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Information about a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the snake moved this tick
    pub moved: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionKind>,
}

/// Read-only view of the game for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    /// Snake cells, head first
    pub body: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub ticks: u64,
    pub status: Status,
}

impl Snapshot {
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn is_game_over(&self) -> bool {
        !self.status.is_playing()
    }
}

/// The game controller: owns the snake, the food and the score, and advances them one tick at a time
pub struct GameEngine<P> {
    config: GameConfig,
    picker: P,
    snake: Snake,
    food: Food,
    score: u32,
    ticks: u64,
    status: Status,
}

impl<P: CellPicker> GameEngine<P> {
    /// Create an engine with a game already started
    pub fn new(config: GameConfig, mut picker: P) -> Self {
        let (snake, food, status) = fresh_game(config.grid(), &mut picker);
        Self {
            config,
            picker,
            snake,
            food,
            score: 0,
            ticks: 0,
            status,
        }
    }

    /// Start over with a fresh snake, fresh food and a zero score
    pub fn restart(&mut self) {
        let (snake, food, status) = fresh_game(self.config.grid(), &mut self.picker);
        self.snake = snake;
        self.food = food;
        self.status = status;
        self.score = 0;
        self.ticks = 0;
        info!("New game on a {}x{} grid", self.config.columns, self.config.rows);
    }

    /// Apply an intent arriving between ticks
    pub fn handle_intent(&mut self, intent: Intent) -> Flow {
        match intent {
            Intent::Quit => return Flow::Quit,
            Intent::Turn(direction) if self.status.is_playing() => self.turn(direction),
            Intent::Restart if !self.status.is_playing() => self.restart(),
            Intent::Turn(_) | Intent::Restart => {}
        }
        Flow::Continue
    }

    fn turn(&mut self, direction: Direction) {
        if !self.snake.set_direction(direction) {
            debug!(
                "Ignored reversal {:?} while heading {:?}",
                direction,
                self.snake.direction()
            );
        }
    }

    /// Execute one tick of the game
    pub fn tick(&mut self) -> TickOutcome {
        if !self.status.is_playing() {
            return TickOutcome::default();
        }

        self.snake.move_forward();
        self.ticks += 1;

        if let Some(collision) = self.check_collision() {
            self.status = Status::GameOver(collision);
            info!(
                "Game over after {} ticks: {:?}, score {}",
                self.ticks, collision, self.score
            );
            return TickOutcome {
                moved: true,
                ate_food: false,
                collision: Some(collision),
            };
        }

        let ate_food = self.snake.head() == self.food.pos();
        if ate_food {
            self.snake.grow(1);
            self.score += 1;
            let placement = self
                .food
                .respawn(self.config.grid(), &self.snake.occupied_cells(), &mut self.picker);
            match placement {
                Placement::Placed(cell) => debug!("Food respawned at {:?}", cell),
                Placement::BoardFull => {
                    self.status = Status::Won;
                    info!("Board full, game won with score {}", self.score);
                }
            }
        }

        TickOutcome {
            moved: true,
            ate_food,
            collision: None,
        }
    }

    fn check_collision(&self) -> Option<CollisionKind> {
        if self.snake.hits_wall(self.config.grid()) {
            return Some(CollisionKind::Wall);
        }

        if self.snake.hits_self() {
            return Some(CollisionKind::SelfCollision);
        }

        None
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.config.grid(),
            body: self.snake.body().collect(),
            food: self.food.pos(),
            score: self.score,
            ticks: self.ticks,
            status: self.status,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

fn fresh_game(grid: Grid, picker: &mut impl CellPicker) -> (Snake, Food, Status) {
    let snake = Snake::new(grid.start_cell());
    let (food, placement) = Food::spawn(grid, &snake.occupied_cells(), picker);
    let status = match placement {
        Placement::Placed(_) => Status::Playing,
        Placement::BoardFull => Status::Won,
    };
    (snake, food, status)
}

#[cfg(test)]
impl<P: CellPicker> GameEngine<P> {
    fn place_food(&mut self, cell: Cell) {
        self.food = Food::at(cell);
    }

    fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::{RandomPicker, testing::ScriptedPicker};

    fn engine() -> GameEngine<ScriptedPicker> {
        GameEngine::new(GameConfig::small(), ScriptedPicker::default())
    }

    #[test]
    fn test_new_game() {
        let engine = engine();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.status, Status::Playing);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.ticks, 0);
        assert_eq!(snapshot.body, vec![Cell::new(2, 5), Cell::new(1, 5)]);
        assert!(!snapshot.body.contains(&snapshot.food));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        engine.place_food(Cell::new(9, 9));

        for _ in 0..3 {
            let outcome = engine.tick();
            assert!(outcome.moved);
            assert!(!outcome.ate_food);
        }

        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.snake().head(), Cell::new(10 / 4 + 3, 10 / 2));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::new(
            GameConfig::small(),
            ScriptedPicker::new([Cell::new(8, 8), Cell::new(7, 1)]),
        );
        assert_eq!(engine.food().pos(), Cell::new(8, 8));
        engine.place_food(Cell::new(3, 5));

        let outcome = engine.tick();

        assert!(outcome.ate_food);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.food().pos(), Cell::new(7, 1));
        assert!(!engine.snake().occupied_cells().contains(&engine.food().pos()));

        // Growth shows up on the following move
        engine.tick();
        assert_eq!(engine.snake().len(), 3);
        engine.tick();
        assert_eq!(engine.snake().len(), 3);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        engine.place_food(Cell::new(0, 0));

        let mut outcome = TickOutcome::default();
        for _ in 0..8 {
            outcome = engine.tick();
        }

        assert_eq!(engine.snake().head(), Cell::new(10, 5));
        assert_eq!(outcome.collision, Some(CollisionKind::Wall));
        assert_eq!(engine.status(), Status::GameOver(CollisionKind::Wall));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut engine = engine();
        engine.replace_snake(Snake::with_body(
            [Cell::new(0, 3), Cell::new(1, 3)],
            Direction::Left,
        ));
        engine.tick();
        assert!(engine.snapshot().is_game_over());
        let frozen = engine.snapshot();

        assert_eq!(engine.handle_intent(Intent::Turn(Direction::Down)), Flow::Continue);
        assert_eq!(engine.snake().pending_direction(), Direction::Left);

        let outcome = engine.tick();
        assert!(!outcome.moved);
        assert_eq!(engine.snapshot(), frozen);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        engine.place_food(Cell::new(9, 9));
        let body = (1..=5).rev().map(|column| Cell::new(column, 2));
        engine.replace_snake(Snake::with_body(body, Direction::Right));

        engine.handle_intent(Intent::Turn(Direction::Down));
        engine.tick();
        engine.handle_intent(Intent::Turn(Direction::Left));
        engine.tick();
        engine.handle_intent(Intent::Turn(Direction::Up));
        let outcome = engine.tick();

        assert_eq!(outcome.collision, Some(CollisionKind::SelfCollision));
        assert_eq!(
            engine.status(),
            Status::GameOver(CollisionKind::SelfCollision)
        );
    }

    #[test]
    fn test_collision_skips_food() {
        let mut engine = engine();
        engine.replace_snake(Snake::with_body(
            [Cell::new(9, 0), Cell::new(8, 0)],
            Direction::Right,
        ));
        engine.place_food(Cell::new(9, 9));

        let outcome = engine.tick();
        assert!(outcome.collision.is_some());
        assert!(!outcome.ate_food);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        engine.place_food(Cell::new(9, 9));

        engine.handle_intent(Intent::Turn(Direction::Left));
        engine.tick();

        assert_eq!(engine.snake().direction(), Direction::Right);
        assert_eq!(engine.status(), Status::Playing);
    }

    #[test]
    fn test_repeated_turns_same_as_one() {
        let mut once = engine();
        let mut many = engine();

        once.handle_intent(Intent::Turn(Direction::Up));
        for _ in 0..4 {
            many.handle_intent(Intent::Turn(Direction::Up));
        }
        once.tick();
        many.tick();

        assert_eq!(once.snapshot(), many.snapshot());
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut engine = engine();
        engine.place_food(Cell::new(9, 9));
        engine.tick();
        engine.handle_intent(Intent::Restart);
        assert_eq!(engine.snapshot().ticks, 1);

        engine.replace_snake(Snake::with_body(
            [Cell::new(9, 0), Cell::new(8, 0)],
            Direction::Right,
        ));
        engine.place_food(Cell::new(5, 5));
        engine.tick();
        engine.score = 4;
        assert!(!engine.status().is_playing());

        assert_eq!(engine.handle_intent(Intent::Restart), Flow::Continue);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.status, Status::Playing);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.ticks, 0);
        assert_eq!(snapshot.head(), Cell::new(2, 5));

        engine.handle_intent(Intent::Turn(Direction::Up));
        assert_eq!(engine.snake().pending_direction(), Direction::Up);
    }

    #[test]
    fn test_quit_from_any_state() {
        let mut engine = engine();
        assert_eq!(engine.handle_intent(Intent::Quit), Flow::Quit);

        engine.replace_snake(Snake::with_body(
            [Cell::new(0, 0), Cell::new(1, 0)],
            Direction::Left,
        ));
        engine.tick();
        assert_eq!(engine.handle_intent(Intent::Quit), Flow::Quit);
    }

    #[test]
    fn test_filling_the_board_wins() {
        let mut engine = GameEngine::new(GameConfig::new(4, 1), ScriptedPicker::default());
        let mut snake = Snake::with_body(
            [Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)],
            Direction::Right,
        );
        snake.grow(1);
        engine.replace_snake(snake);
        engine.place_food(Cell::new(3, 0));

        let outcome = engine.tick();

        assert!(outcome.ate_food);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.snake().len(), 4);
        assert_eq!(engine.status(), Status::Won);
        assert_eq!(engine.food().pos(), Cell::new(0, 0));

        // Won is terminal until restart
        assert!(!engine.tick().moved);
        engine.handle_intent(Intent::Restart);
        assert_eq!(engine.status(), Status::Playing);
        assert_eq!(engine.snake().len(), 2);
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut engine = GameEngine::new(GameConfig::new(12, 8), RandomPicker::seeded(3));
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

        for (i, dir) in turns.iter().cycle().take(200).enumerate() {
            if i % 3 == 0 {
                engine.handle_intent(Intent::Turn(*dir));
            }
            engine.tick();
            if !engine.status().is_playing() {
                engine.handle_intent(Intent::Restart);
                continue;
            }
            let snapshot = engine.snapshot();
            assert!(snapshot.body.len() >= 2);
            assert!(!snapshot.body.contains(&snapshot.food));
            assert!(snapshot.body.iter().all(|cell| snapshot.grid.contains(*cell)));
        }
    }
}
