use std::time::Duration;

use eframe::egui;
use snake_engine::game::{GameEngine, GameStatus, Point};

use crate::input::{InputCommand, poll_input};

pub struct SnakeApp {
    engine: GameEngine,
    pixels_per_cell: f32,
}

impl SnakeApp {
    pub fn new(engine: GameEngine, pixels_per_cell: u32) -> Self {
        Self {
            engine,
            pixels_per_cell: pixels_per_cell as f32,
        }
    }

    fn render_board(&self, ui: &mut egui::Ui) {
        let field = self.engine.field_size();
        let cell = self.pixels_per_cell;
        let canvas_width = field.width as f32 * cell;
        let canvas_height = field.height as f32 * cell;

        let (response, painter) = ui.allocate_painter(
            egui::Vec2::new(canvas_width, canvas_height),
            egui::Sense::hover(),
        );
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

        for segment in self.engine.snake_segments() {
            painter.rect_filled(cell_rect(rect.min, *segment, cell), 0.0, egui::Color32::WHITE);
        }

        for food in self.engine.food_cells() {
            painter.rect_filled(cell_rect(rect.min, food, cell), 0.0, egui::Color32::WHITE);
        }

        let grid_stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
        for i in 0..=field.width {
            let x = rect.min.x + i as f32 * cell;
            painter.line_segment(
                [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
                grid_stroke,
            );
        }
        for j in 0..=field.height {
            let y = rect.min.y + j as f32 * cell;
            painter.line_segment(
                [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
                grid_stroke,
            );
        }

        let overlay = match self.engine.status() {
            GameStatus::Dead => Some("Game Over"),
            GameStatus::Paused => Some("Paused"),
            GameStatus::Alive => None,
        };
        if let Some(text) = overlay {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                text,
                egui::FontId::proportional(48.0),
                egui::Color32::RED,
            );
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match poll_input(ctx) {
            Some(InputCommand::Turn(direction)) => self.engine.handle_direction(direction),
            Some(InputCommand::TogglePause) => self.engine.toggle_pause(),
            None => {}
        }

        let now = Duration::from_secs_f64(ctx.input(|i| i.time));
        self.engine.tick(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("Score: {}", self.engine.score()));
            ui.separator();
            self.render_board(ui);
        });

        // The engine throttles itself to its tick interval; repaint at
        // the display's natural cadence.
        ctx.request_repaint();
    }
}

fn cell_rect(origin: egui::Pos2, cell: Point, size: f32) -> egui::Rect {
    let min = egui::pos2(
        origin.x + cell.x as f32 * size,
        origin.y + cell.y as f32 * size,
    );
    egui::Rect::from_min_size(min, egui::Vec2::splat(size))
}
