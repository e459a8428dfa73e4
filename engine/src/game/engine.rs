use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use crate::log;

use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{DeathReason, Direction, FieldSize, GameStatus, Point};

const SNAKE_START: Point = Point { x: 0, y: 0 };
const FOOD_SPAWN_ATTEMPTS: usize = 100;

/// Authoritative simulation state for one game. All mutation happens
/// inside `tick`, `handle_direction` and `toggle_pause`, driven from a
/// single external loop; a reader between calls sees either the
/// pre-step or the fully post-step state.
pub struct GameEngine {
    field_size: FieldSize,
    tick_interval: Duration,
    last_step: Option<Duration>,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    score: u32,
    food_set: HashSet<usize>,
    snake: Snake,
    rng: SessionRng,
}

impl GameEngine {
    pub fn new(settings: GameSettings, rng: SessionRng) -> Result<Self, String> {
        settings.validate()?;

        let field_size = FieldSize {
            width: settings.field_width,
            height: settings.field_height,
        };

        let mut snake = Snake::new(SNAKE_START, &field_size);
        snake.change_direction(Direction::Right, &field_size);

        let mut engine = Self {
            field_size,
            tick_interval: settings.tick_interval,
            last_step: None,
            status: GameStatus::Alive,
            death_reason: None,
            score: 0,
            food_set: HashSet::new(),
            snake,
            rng,
        };
        engine.spawn_food();
        Ok(engine)
    }

    /// Advances the simulation by at most one step. The first call
    /// while Alive only records `now`; later calls step once when the
    /// elapsed time reaches the tick interval, then reset the
    /// accumulator. Surplus elapsed time is dropped rather than turned
    /// into catch-up steps.
    pub fn tick(&mut self, now: Duration) {
        if self.status != GameStatus::Alive {
            return;
        }

        let Some(last_step) = self.last_step else {
            self.last_step = Some(now);
            return;
        };

        if now.saturating_sub(last_step) < self.tick_interval {
            return;
        }

        self.last_step = Some(now);
        self.step();
    }

    /// Forwards a direction request to the snake. Ignored unless Alive.
    pub fn handle_direction(&mut self, direction: Direction) {
        if self.status != GameStatus::Alive {
            return;
        }
        self.snake.change_direction(direction, &self.field_size);
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Alive => self.status = GameStatus::Paused,
            GameStatus::Paused => self.status = GameStatus::Alive,
            GameStatus::Dead => {}
        }
    }

    pub fn field_size(&self) -> &FieldSize {
        &self.field_size
    }

    pub fn snake_segments(&self) -> &VecDeque<Point> {
        self.snake.segments()
    }

    pub fn food_cells(&self) -> Vec<Point> {
        self.food_set
            .iter()
            .map(|&index| Point::from_index(index, self.field_size.width))
            .collect()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    fn step(&mut self) {
        let Some(direction) = self.snake.direction() else {
            return;
        };

        let next = match self.snake.propose_move(direction, &self.field_size) {
            Ok(next) => next,
            Err(reason) => {
                self.kill(reason);
                return;
            }
        };

        if self.snake.occupies(next) {
            self.kill(DeathReason::SelfCollision);
            return;
        }

        if self.food_set.remove(&next.to_index(self.field_size.width)) {
            self.score += 1;
            log!("Ate food at ({}, {}). Score: {}", next.x, next.y, self.score);
            // Advance before respawning so the new food cannot land on
            // the cell the head is taking.
            self.snake.advance_head(next);
            self.spawn_food();
        } else {
            self.snake.advance_head(next);
            self.snake.remove_tail();
        }
    }

    fn kill(&mut self, reason: DeathReason) {
        self.status = GameStatus::Dead;
        self.death_reason = Some(reason);
        log!("Game over: {:?}", reason);
    }

    fn spawn_food(&mut self) {
        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let pos = self.rng.interior_cell(&self.field_size);
            let index = pos.to_index(self.field_size.width);

            if self.food_set.contains(&index) || self.snake.occupies(pos) {
                continue;
            }

            self.food_set.insert(index);
            log!("Food spawned at ({}, {})", pos.x, pos.y);
            return;
        }
    }

    #[cfg(test)]
    fn set_food(&mut self, cells: &[Point]) {
        self.food_set = cells
            .iter()
            .map(|p| p.to_index(self.field_size.width))
            .collect();
    }

    #[cfg(test)]
    fn set_snake(&mut self, segments: &[Point], direction: Option<Direction>) {
        self.snake = Snake::from_segments(segments, direction, &self.field_size);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    fn create_engine(width: usize, height: usize) -> GameEngine {
        let settings = GameSettings {
            field_width: width,
            field_height: height,
            tick_interval: TICK,
        };
        let mut engine =
            GameEngine::new(settings, SessionRng::new(42)).expect("settings should be valid");
        // Arm the tick clock so that tick(TICK * n) performs step n.
        engine.tick(Duration::ZERO);
        engine
    }

    fn segments_of(engine: &GameEngine) -> Vec<Point> {
        engine.snake_segments().iter().copied().collect()
    }

    fn assert_food_invariants(engine: &GameEngine) {
        let field = engine.field_size();
        for food in engine.food_cells() {
            assert!(food.x >= 1 && food.x <= field.width - 2);
            assert!(food.y >= 1 && food.y <= field.height - 2);
            assert!(!engine.snake.occupies(food));
        }
    }

    #[test]
    fn test_construction_rejects_invalid_settings() {
        let settings = GameSettings {
            field_width: 2,
            ..GameSettings::default()
        };
        assert!(GameEngine::new(settings, SessionRng::new(1)).is_err());

        let settings = GameSettings {
            tick_interval: Duration::ZERO,
            ..GameSettings::default()
        };
        assert!(GameEngine::new(settings, SessionRng::new(1)).is_err());
    }

    #[test]
    fn test_initial_state() {
        let engine = create_engine(5, 5);
        assert_eq!(engine.status(), GameStatus::Alive);
        assert_eq!(engine.score(), 0);
        assert_eq!(segments_of(&engine), vec![Point::new(0, 0)]);
        assert_eq!(engine.food_cells().len(), 1);
        assert_food_invariants(&engine);
    }

    #[test]
    fn test_tick_throttles_to_interval() {
        let mut engine = create_engine(5, 5);

        engine.tick(TICK / 2);
        assert_eq!(segments_of(&engine), vec![Point::new(0, 0)]);

        engine.tick(TICK);
        assert_eq!(segments_of(&engine), vec![Point::new(1, 0)]);

        // A long gap yields exactly one step, not a catch-up burst.
        engine.tick(TICK * 10);
        assert_eq!(segments_of(&engine), vec![Point::new(2, 0)]);
    }

    #[test]
    fn test_scenario_growth_on_food() {
        let mut engine = create_engine(5, 5);
        engine.set_food(&[Point::new(1, 0)]);

        engine.tick(TICK);

        assert_eq!(segments_of(&engine), vec![Point::new(1, 0), Point::new(0, 0)]);
        assert_eq!(engine.score(), 1);
        let food = engine.food_cells();
        assert_eq!(food.len(), 1);
        assert_ne!(food[0], Point::new(1, 0));
        assert_food_invariants(&engine);
        assert!(engine.snake.is_consistent());
    }

    #[test]
    fn test_scenario_wall_death() {
        let mut engine = create_engine(3, 3);
        engine.set_snake(&[Point::new(2, 0)], Some(Direction::Right));

        engine.tick(TICK);

        assert_eq!(engine.status(), GameStatus::Dead);
        assert_eq!(engine.death_reason(), Some(DeathReason::WallCollision));
        assert_eq!(segments_of(&engine), vec![Point::new(2, 0)]);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_scenario_self_collision_death() {
        let mut engine = create_engine(5, 5);
        engine.set_snake(
            &[
                Point::new(2, 2),
                Point::new(2, 1),
                Point::new(1, 1),
                Point::new(1, 2),
            ],
            Some(Direction::Left),
        );

        engine.tick(TICK);

        assert_eq!(engine.status(), GameStatus::Dead);
        assert_eq!(engine.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_moving_into_tail_cell_is_self_collision() {
        let mut engine = create_engine(5, 5);
        engine.set_snake(
            &[
                Point::new(1, 1),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(2, 1),
            ],
            Some(Direction::Right),
        );

        engine.tick(TICK);

        assert_eq!(engine.status(), GameStatus::Dead);
        assert_eq!(engine.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn test_scenario_pause_freezes_simulation() {
        let mut engine = create_engine(5, 5);
        let food_before = engine.food_cells();

        engine.toggle_pause();
        assert_eq!(engine.status(), GameStatus::Paused);

        engine.tick(TICK);
        engine.tick(TICK * 2);
        engine.tick(TICK * 3);
        assert_eq!(segments_of(&engine), vec![Point::new(0, 0)]);
        assert_eq!(engine.food_cells(), food_before);
        assert_eq!(engine.score(), 0);

        engine.toggle_pause();
        assert_eq!(engine.status(), GameStatus::Alive);
        engine.tick(TICK * 4);
        assert_eq!(segments_of(&engine), vec![Point::new(1, 0)]);
    }

    #[test]
    fn test_direction_requests_ignored_while_paused() {
        let mut engine = create_engine(5, 5);
        engine.toggle_pause();

        engine.handle_direction(Direction::Down);
        engine.toggle_pause();
        engine.tick(TICK);

        // The request while paused was dropped; still moving Right.
        assert_eq!(segments_of(&engine), vec![Point::new(1, 0)]);
    }

    #[test]
    fn test_dead_state_absorbs_all_commands() {
        let mut engine = create_engine(3, 3);
        engine.set_snake(&[Point::new(2, 0)], Some(Direction::Right));
        engine.tick(TICK);
        assert_eq!(engine.status(), GameStatus::Dead);

        let segments = segments_of(&engine);
        let food = engine.food_cells();
        let score = engine.score();

        engine.handle_direction(Direction::Down);
        engine.toggle_pause();
        engine.tick(TICK * 2);
        engine.tick(TICK * 3);

        assert_eq!(engine.status(), GameStatus::Dead);
        assert_eq!(segments_of(&engine), segments);
        assert_eq!(engine.food_cells(), food);
        assert_eq!(engine.score(), score);
    }

    #[test]
    fn test_reversal_rejected_after_growth() {
        let mut engine = create_engine(5, 5);
        engine.set_food(&[Point::new(1, 0)]);
        engine.tick(TICK);
        assert_eq!(engine.snake_segments().len(), 2);

        // Reversing onto the second segment is silently dropped.
        engine.handle_direction(Direction::Left);
        engine.tick(TICK * 2);
        assert_eq!(
            segments_of(&engine),
            vec![Point::new(2, 0), Point::new(1, 0)]
        );
    }

    #[test]
    fn test_latest_accepted_direction_wins() {
        let mut engine = create_engine(5, 5);
        engine.set_food(&[Point::new(1, 0)]);
        engine.tick(TICK);
        // Pin the respawned food away from the path under test.
        engine.set_food(&[Point::new(3, 3)]);

        engine.handle_direction(Direction::Down);
        engine.handle_direction(Direction::Left); // rejected, (0, 0) occupied
        engine.tick(TICK * 2);

        assert_eq!(
            segments_of(&engine),
            vec![Point::new(1, 1), Point::new(1, 0)]
        );
    }

    #[test]
    fn test_score_increments_once_per_meal() {
        let mut engine = create_engine(7, 7);
        engine.set_snake(&[Point::new(1, 1)], Some(Direction::Right));

        for (step, x) in (2..=4).enumerate() {
            engine.set_food(&[Point::new(x, 1)]);
            engine.tick(TICK * (step as u32 + 1));
            assert_eq!(engine.score(), step as u32 + 1);
            assert_eq!(engine.snake_segments().len(), step + 2);
            assert!(engine.snake.is_consistent());
            assert_food_invariants(&engine);
        }
    }

    #[test]
    fn test_no_direction_means_no_movement() {
        let mut engine = create_engine(5, 5);
        engine.set_snake(&[Point::new(2, 2)], None);

        engine.tick(TICK);

        assert_eq!(engine.status(), GameStatus::Alive);
        assert_eq!(segments_of(&engine), vec![Point::new(2, 2)]);
    }

    #[test]
    fn test_invariants_hold_over_long_run() {
        let width = 8;
        let height = 8;
        let mut engine = create_engine(width, height);

        for step in 1..=200u32 {
            let head = engine.snake_segments().front().copied().unwrap();
            let direction = if head.y == 0 && head.x < width - 1 {
                Direction::Right
            } else if head.x == width - 1 && head.y < height - 1 {
                Direction::Down
            } else if head.y == height - 1 && head.x > 0 {
                Direction::Left
            } else {
                Direction::Up
            };
            engine.handle_direction(direction);
            engine.tick(TICK * step);

            assert_eq!(engine.status(), GameStatus::Alive);
            assert!(engine.snake.is_consistent());
            let unique: HashSet<Point> = engine.snake_segments().iter().copied().collect();
            assert_eq!(unique.len(), engine.snake_segments().len());
            assert_eq!(engine.food_cells().len(), 1);
            assert_food_invariants(&engine);
        }
    }
}
