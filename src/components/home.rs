use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::state::calendar::header_label;
use crate::state::dashboard::{group_thousands, Dashboard, ExerciseCard};
use crate::state::profile::Avatar;
use crate::state::AppState;
use crate::theme::Theme;

use super::Component;

pub struct HomeView;

impl Component for HomeView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let dashboard = &state.home.dashboard;
        let card_height = if state.home.details_open { 8 } else { 6 };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(card_height),
                Constraint::Length(5),
                Constraint::Min(6),
            ])
            .split(area);

        render_header(frame, rows[0], state);
        render_calories_card(frame, rows[1], dashboard, state.home.details_open, theme);
        render_exercise_cards(frame, rows[2], &dashboard.exercises, theme);
        render_plan(frame, rows[3], dashboard, theme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let badge = match &state.avatar {
        Avatar::Image { .. } => "(\u{25c9})".to_string(),
        Avatar::Placeholder { initials } => format!("({initials})"),
    };
    let greeting = match state.profile.first_name() {
        "" => "Hello!".to_string(),
        first => format!("Hello {first}!"),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {badge} "), Style::default().fg(theme.accent)),
            Span::styled(greeting, Style::default().fg(theme.text_muted)),
        ]),
        Line::from(Span::styled(
            format!("      {}", header_label(state.home.selected_date)),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_calories_card(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    details_open: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let calories = &dashboard.calories;
    let steps = &dashboard.steps;

    let mut constraints = vec![
        Constraint::Length(1), // label + total
        Constraint::Length(1), // gauge
        Constraint::Length(1), // distance / steps
    ];
    if details_open {
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let total = Line::from(vec![
        Span::styled(format!(" {}  ", calories.label), Style::default().fg(theme.text_muted)),
        Span::styled(
            group_thousands(calories.value),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" / {} {}", group_thousands(calories.goal), calories.unit),
            Style::default().fg(theme.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(total), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent).bg(theme.surface))
        .ratio(calories.progress())
        .label(format!("{:.0}%", calories.progress() * 100.0));
    frame.render_widget(gauge, rows[1]);

    let stats = Line::from(vec![
        Span::styled(
            format!(" {:.1} km", dashboard.distance_km),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Distance    ", Style::default().fg(theme.text_muted)),
        Span::styled(
            steps.value.to_string(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" / {} {}", group_thousands(steps.goal), steps.label),
            Style::default().fg(theme.text_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(stats), rows[2]);

    if details_open {
        let remaining = calories.goal.saturating_sub(calories.value);
        let detail = Line::from(Span::styled(
            format!(" {} {} left to reach today's goal", group_thousands(remaining), calories.unit),
            Style::default().fg(theme.secondary),
        ));
        frame.render_widget(Paragraph::new(detail), rows[3]);

        let step_gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.success).bg(theme.surface))
            .ratio(steps.progress())
            .label(format!("steps {:.0}%", steps.progress() * 100.0));
        frame.render_widget(step_gauge, rows[4]);
    }
}

fn render_exercise_cards(frame: &mut Frame, area: Rect, cards: &[ExerciseCard], theme: &Theme) {
    if cards.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, col) in cards.iter().zip(cols.iter()) {
        let lines = vec![
            Line::from(Span::styled(card.icon, Style::default().fg(theme.accent))),
            Line::from(Span::styled(
                card.amount,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.title, Style::default().fg(theme.text_muted))),
        ];
        let widget = Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.text_muted)),
            );
        frame.render_widget(widget, *col);
    }
}

fn render_plan(frame: &mut Frame, area: Rect, dashboard: &Dashboard, theme: &Theme) {
    let plan = &dashboard.plan;
    let block = Block::default()
        .title(" My Plan ")
        .title_style(
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    let lines = vec![
        Line::from(Span::styled(format!(" {}", plan.month), Style::default().fg(theme.text_muted))),
        Line::from(vec![
            Span::styled(" \u{26a1} ", Style::default().fg(theme.accent)),
            Span::styled(format!("{}  ", plan.week), Style::default().fg(theme.text_muted)),
            Span::styled(
                plan.title,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(format!("    {}", plan.progress), Style::default().fg(theme.text))),
        Line::from(vec![
            Span::styled(" \u{25b6} Next exercise ", Style::default().fg(theme.text_muted)),
            Span::styled(plan.next_exercise, Style::default().fg(theme.text)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
