pub mod action_hud;
pub mod calendar;
pub mod edit_modal;
pub mod home;
pub mod launch;
pub mod settings_view;
pub mod text_input;

use ratatui::{layout::Rect, Frame};

use crate::state::AppState;

/// Trait for renderable TUI components.
pub trait Component {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);
}

/// Rectangle of at most `width` x `height` centered in `area`, keeping a
/// two-cell margin on every side.
pub fn dialog_area(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
