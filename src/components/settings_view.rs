use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::edit_session::EditTarget;
use crate::state::profile::Avatar;
use crate::state::settings_rows::{RowKind, Section, SettingsRow, SETTINGS_ROWS};
use crate::state::AppState;
use crate::theme::Theme;

use super::Component;

pub struct SettingsView;

impl Component for SettingsView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let block = Block::default()
            .title(" \u{2039} Settings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected = state.settings_view.selected_row;
        let mut lines: Vec<Line> = Vec::new();
        let mut selected_line = 0;
        let mut section: Option<Section> = None;

        for (idx, row) in SETTINGS_ROWS.iter().enumerate() {
            if section != Some(row.section) {
                if section.is_some() {
                    lines.push(Line::default());
                }
                lines.push(Line::from(Span::styled(
                    format!(" {}", row.section.title()),
                    Style::default()
                        .fg(theme.text)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )));
                section = Some(row.section);
            }
            if idx == selected {
                selected_line = lines.len();
            }
            lines.push(setting_line(row, idx == selected, state));
        }

        // Keep the selected row in view
        let height = inner.height as usize;
        let scroll = if selected_line >= height {
            selected_line + 1 - height
        } else {
            0
        };

        frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner);
    }
}

fn setting_line(row: &SettingsRow, is_selected: bool, state: &AppState) -> Line<'static> {
    let theme = &state.theme;
    let settings = state.store.settings();

    let mut value = row.display_value(settings, &state.profile);
    if row.kind == RowKind::Edit(EditTarget::Profile) {
        value = match &state.avatar {
            Avatar::Image { .. } => format!("{value}  [photo]"),
            Avatar::Placeholder { initials } => format!("{value}  ({initials})"),
        };
    }

    let prefix = if is_selected { " \u{25b6} " } else { "   " };
    let label_style = label_style(row, is_selected, theme);
    let value_style = if is_selected {
        Style::default()
            .fg(theme.warning)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let affordance = match row.kind {
        RowKind::Edit(_) => " \u{270e}",
        _ => "",
    };

    // Pad label to align values
    let padded_label = format!("{} {:<26}", row.icon, row.label);
    let line = Line::from(vec![
        Span::styled(prefix, label_style),
        Span::styled(padded_label, label_style),
        Span::styled(value, value_style),
        Span::styled(affordance, Style::default().fg(theme.text_muted)),
    ]);

    let bg = match row.kind {
        _ if is_selected => Style::default().bg(theme.selection_bg),
        RowKind::Toggle(field) if state.store.flag(field) => Style::default().bg(theme.toggle_on_bg),
        _ => Style::default(),
    };
    line.style(bg)
}

fn label_style(row: &SettingsRow, is_selected: bool, theme: &Theme) -> Style {
    let base = match row.kind {
        RowKind::Logout => Style::default().fg(theme.error),
        _ if is_selected => Style::default().fg(theme.accent),
        _ => Style::default().fg(theme.text),
    };
    if is_selected {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}
