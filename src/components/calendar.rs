use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::calendar::{month_grid, month_title};
use crate::state::AppState;
use crate::theme::Theme;

use super::dialog_area;

const WEEKDAY_HEADER: &str = " Su Mo Tu We Th Fr Sa";

/// Month grid with `selected` highlighted. Needs 22 columns and 8 rows.
pub fn render_month_grid(frame: &mut Frame, area: Rect, selected: NaiveDate, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", month_title(selected)),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(WEEKDAY_HEADER, Style::default().fg(theme.text_muted))),
    ];

    for week in month_grid(selected) {
        let mut spans = vec![Span::raw(" ")];
        for cell in week {
            let span = match cell {
                Some(day) if day == selected => Span::styled(
                    format!("{:>2}", day.day()),
                    Style::default()
                        .fg(theme.surface)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Some(day) => Span::styled(format!("{:>2}", day.day()), Style::default().fg(theme.text)),
                None => Span::raw("  "),
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Date picker popup over the home dashboard.
pub fn render_calendar_overlay(frame: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let dialog = dialog_area(frame.area(), 30, 13);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Select a Date ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // grid
            Constraint::Length(1), // movement hints
            Constraint::Length(1), // close hints
        ])
        .split(inner);

    render_month_grid(frame, rows[0], state.home.selected_date, theme);

    let key = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(theme.text_muted);
    let movement = Line::from(vec![
        Span::styled(" [hjkl]", key),
        Span::styled("day/week ", muted),
        Span::styled("[[ ]]", key),
        Span::styled("month", muted),
    ]);
    frame.render_widget(Paragraph::new(movement), rows[1]);
    let close = Line::from(vec![
        Span::styled(" [Enter]", key),
        Span::styled("done  ", muted),
        Span::styled("[Esc]", key),
        Span::styled("close", muted),
    ]);
    frame.render_widget(Paragraph::new(close), rows[2]);
}
