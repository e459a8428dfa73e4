use eframe::egui;
use snake_engine::game::Direction;

pub enum InputCommand {
    Turn(Direction),
    TogglePause,
}

/// Maps this frame's key presses to a game command. Keys outside the
/// map are ignored.
pub fn poll_input(ctx: &egui::Context) -> Option<InputCommand> {
    ctx.input(|i| {
        if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
            Some(InputCommand::Turn(Direction::Up))
        } else if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
            Some(InputCommand::Turn(Direction::Down))
        } else if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
            Some(InputCommand::Turn(Direction::Left))
        } else if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
            Some(InputCommand::Turn(Direction::Right))
        } else if i.key_pressed(egui::Key::P) || i.key_pressed(egui::Key::Escape) {
            Some(InputCommand::TogglePause)
        } else {
            None
        }
    })
}
