use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::text_buffer::TextBuffer;
use crate::theme::Theme;

/// How a field's content is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Plain,
    Masked,
}

/// Single-line labelled input. Scrolls horizontally so the cursor stays
/// visible; the cursor block is drawn only when `focused`.
pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    buf: &TextBuffer,
    visibility: Visibility,
    focused: bool,
    theme: &Theme,
) {
    if area.width < 3 || area.height == 0 {
        return;
    }

    let shown = match visibility {
        Visibility::Plain => buf.text().to_string(),
        Visibility::Masked => buf.masked(),
    };
    let chars: Vec<char> = shown.chars().collect();
    let cursor = buf.cursor_char_index();

    let label_text = format!(" {label}: ");
    let label_width = label_text.chars().count();
    // 1 cell reserved for the cursor at end of line
    let avail = (area.width as usize).saturating_sub(label_width + 1).max(1);
    let start = (cursor + 1).saturating_sub(avail);
    let end = (start + avail).min(chars.len());

    let before: String = chars[start..cursor.min(end).max(start)].iter().collect();
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let text_style = Style::default().fg(theme.text);

    let mut spans = vec![Span::styled(label_text, label_style), Span::styled(before, text_style)];
    if focused {
        let under = chars.get(cursor).copied().unwrap_or(' ');
        spans.push(Span::styled(
            under.to_string(),
            Style::default().fg(theme.surface).bg(theme.text),
        ));
        if cursor + 1 < end {
            let after: String = chars[cursor + 1..end].iter().collect();
            spans.push(Span::styled(after, text_style));
        }
    } else if cursor < end {
        let after: String = chars[cursor..end].iter().collect();
        spans.push(Span::styled(after, text_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
