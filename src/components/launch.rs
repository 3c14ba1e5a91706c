use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::AppState;

use super::{dialog_area, Component};

/// Signed-out entry screen presented after logout.
pub struct LaunchView;

impl Component for LaunchView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let card = dialog_area(area, 36, 7);
        let lines = vec![
            Line::from(Span::styled(
                "LiftLog",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled("You are signed out.", Style::default().fg(theme.text))),
            Line::from(Span::styled(
                "Press Enter to sign in",
                Style::default().fg(theme.text_muted),
            )),
        ];
        let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.secondary)),
        );
        frame.render_widget(widget, card);
    }
}
