use std::time::Duration;

#[derive(Clone, Debug)]
pub struct GameSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub tick_interval: Duration,
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), String> {
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
        if self.tick_interval.is_zero() {
            return Err("Tick interval must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            field_width: 40,
            field_height: 40,
            tick_interval: Duration::from_millis(100),
        }
    }
}
