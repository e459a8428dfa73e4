use std::time::Duration;

use serde::{Deserialize, Serialize};
use snake_engine::config::Validate;
use snake_engine::game::GameSettings;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct GameConfig {
    pub field_width: u32,
    pub field_height: u32,
    pub tick_interval_ms: u32,
    pub pixels_per_cell: u32,
    pub seed: Option<u64>,
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.field_width < 3 || self.field_width > 100 {
            return Err(format!(
                "Field width must be between 3 and 100, got {}",
                self.field_width
            ));
        }
        if self.field_height < 3 || self.field_height > 100 {
            return Err(format!(
                "Field height must be between 3 and 100, got {}",
                self.field_height
            ));
        }
        if self.tick_interval_ms < 10 || self.tick_interval_ms > 5000 {
            return Err(format!(
                "Tick interval must be between 10ms and 5000ms, got {}",
                self.tick_interval_ms
            ));
        }
        if self.pixels_per_cell < 4 || self.pixels_per_cell > 64 {
            return Err(format!(
                "Pixels per cell must be between 4 and 64, got {}",
                self.pixels_per_cell
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 40,
            tick_interval_ms: 100,
            pixels_per_cell: 15,
            seed: None,
        }
    }
}

impl From<&GameConfig> for GameSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            field_width: config.field_width as usize,
            field_height: config.field_height as usize,
            tick_interval: Duration::from_millis(config.tick_interval_ms as u64),
        }
    }
}
