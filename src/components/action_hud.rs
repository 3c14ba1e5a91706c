use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::{AppState, Screen};

use super::Component;

/// Bottom bar: the status message if one is showing, otherwise key hints.
pub struct ActionHud;

impl Component for ActionHud {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        if let Some((ref msg, is_error)) = state.status_message {
            let color = if is_error { theme.error } else { theme.success };
            let bar = Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(msg.as_str(), Style::default().fg(color)),
            ]))
            .style(Style::default().bg(theme.surface));
            frame.render_widget(bar, area);
            return;
        }

        let bindings: &[(&str, &str)] = if state.modal.is_open() {
            &[("Enter", "save"), ("Esc", "back")]
        } else {
            match state.screen {
                Screen::Launch => &[("Enter", "sign in"), ("q", "quit")],
                Screen::Home if state.home.calendar_open => {
                    &[("hjkl", "move"), ("[ ]", "month"), ("Enter", "done")]
                }
                Screen::Home => &[
                    ("q", "quit"),
                    ("c", "calendar"),
                    ("d", "details"),
                    ("s", "settings"),
                ],
                Screen::Settings => &[
                    ("q", "quit"),
                    ("j/k", "nav"),
                    ("Enter/Space", "toggle/edit"),
                    ("L", "logout"),
                    ("Esc", "back"),
                ],
            }
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, desc) in bindings {
            spans.push(Span::styled(
                format!("[{key}]"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!("{desc} "), Style::default().fg(theme.text_muted)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface)),
            area,
        );
    }
}
