use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::edit_session::{
    ActiveModal, PasswordDraft, PasswordFocus, ProfileDraft, ProfileFocus, GENDER_OPTIONS,
};
use crate::state::AppState;
use crate::theme::Theme;

use super::calendar::render_month_grid;
use super::dialog_area;
use super::text_input::{render_field, Visibility};

/// Render whichever edit modal is open, if any.
pub fn render_edit_modal(frame: &mut Frame, state: &AppState) {
    let Some(target) = state.modal.target() else {
        return;
    };
    let theme = &state.theme;

    let body_height: u16 = match &state.modal {
        ActiveModal::Birthday(_) => 9,
        ActiveModal::Gender(_) => GENDER_OPTIONS.len() as u16,
        ActiveModal::Password(_) | ActiveModal::Profile(_) => 3,
        _ => 1,
    };
    // body + blank + error + hints + borders
    let dialog = dialog_area(frame.area(), 50, body_height + 5);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(format!(" {} ", target.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(body_height),
            Constraint::Length(1), // blank
            Constraint::Length(1), // validation message
            Constraint::Length(1), // hints
        ])
        .split(inner);

    match &state.modal {
        ActiveModal::None => {}
        ActiveModal::Birthday(draft) => render_month_grid(frame, rows[0], draft.date, theme),
        ActiveModal::Gender(draft) => {
            let lines: Vec<Line> = GENDER_OPTIONS
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    if i == draft.selected {
                        Line::from(Span::styled(
                            format!(" \u{25b6} {option}"),
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        Line::from(Span::styled(format!("   {option}"), Style::default().fg(theme.text)))
                    }
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), rows[0]);
        }
        ActiveModal::Username(draft) => {
            render_field(frame, rows[0], "Username", &draft.input, Visibility::Plain, true, theme);
        }
        ActiveModal::Weight(draft) => {
            render_field(frame, rows[0], "Weight (lbs)", &draft.input, Visibility::Plain, true, theme);
        }
        ActiveModal::Password(draft) => render_password(frame, rows[0], draft, theme),
        ActiveModal::Profile(draft) => render_profile(frame, rows[0], draft, theme),
    }

    if let Some(error) = visible_error(&state.modal) {
        let msg = Line::from(Span::styled(format!(" {error}"), Style::default().fg(theme.error)));
        frame.render_widget(Paragraph::new(msg), rows[2]);
    }

    render_hints(frame, rows[3], state.modal.can_save(), &state.modal, theme);
}

/// Validation message to display. An untouched password draft shows
/// nothing; the disabled save hint is enough there.
fn visible_error(modal: &ActiveModal) -> Option<String> {
    if let ActiveModal::Password(draft) = modal {
        if draft.new_password.is_empty() && draft.confirm.is_empty() {
            return None;
        }
    }
    modal.validation_error().map(|e| e.to_string())
}

fn render_password(frame: &mut Frame, area: Rect, draft: &PasswordDraft, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let fields = [
        ("New password", &draft.new_password, draft.show_new, PasswordFocus::New),
        ("Confirm", &draft.confirm, draft.show_confirm, PasswordFocus::Confirm),
    ];
    for (row, (label, buf, shown, focus)) in [rows[0], rows[2]].into_iter().zip(fields) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(9)])
            .split(row);
        let visibility = if shown {
            Visibility::Plain
        } else {
            Visibility::Masked
        };
        render_field(frame, cols[0], label, buf, visibility, draft.focus == focus, theme);
        let eye = if shown { " [shown]" } else { " [hidden]" };
        frame.render_widget(
            Paragraph::new(Span::styled(eye, Style::default().fg(theme.text_muted))),
            cols[1],
        );
    }
}

fn render_profile(frame: &mut Frame, area: Rect, draft: &ProfileDraft, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    render_field(
        frame,
        rows[0],
        "Name",
        &draft.name,
        Visibility::Plain,
        draft.focus == ProfileFocus::Name,
        theme,
    );
    render_field(
        frame,
        rows[2],
        "Image",
        &draft.image_path,
        Visibility::Plain,
        draft.focus == ProfileFocus::Image,
        theme,
    );
}

fn render_hints(frame: &mut Frame, area: Rect, can_save: bool, modal: &ActiveModal, theme: &Theme) {
    let key = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(theme.text_muted);
    let save_style = if can_save {
        key
    } else {
        muted.add_modifier(Modifier::CROSSED_OUT)
    };

    let mut spans = vec![
        Span::styled(" [Enter]", save_style),
        Span::styled("save  ", if can_save { muted } else { save_style }),
        Span::styled("[Esc]", key),
        Span::styled("back  ", muted),
    ];
    match modal {
        ActiveModal::Password(_) => {
            spans.push(Span::styled("[Tab]", key));
            spans.push(Span::styled("field  ", muted));
            spans.push(Span::styled("[^R]", key));
            spans.push(Span::styled("show/hide", muted));
        }
        ActiveModal::Profile(_) => {
            spans.push(Span::styled("[Tab]", key));
            spans.push(Span::styled("field", muted));
        }
        ActiveModal::Birthday(_) => {
            spans.push(Span::styled("[hjkl [ ] { }]", key));
            spans.push(Span::styled("move", muted));
        }
        ActiveModal::Gender(_) => {
            spans.push(Span::styled("[j/k]", key));
            spans.push(Span::styled("choose", muted));
        }
        _ => {}
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
