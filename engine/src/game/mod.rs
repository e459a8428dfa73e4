pub mod engine;
pub mod session_rng;
pub mod settings;
pub mod snake;
pub mod types;

pub use engine::GameEngine;
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use snake::Snake;
pub use types::{DeathReason, Direction, FieldSize, GameStatus, Point};
