use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::state::calendar::DateStep;
use crate::state::edit_session::{EditTarget, ModalInput};
use crate::state::Screen;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReader {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let event_tx = tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                let event = match reader.next().await {
                    // Windows reports both press and release; act on press only.
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                        Event::Key(key)
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event stream failed");
                        break;
                    }
                    None => break,
                    _ => continue,
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        let tick_tx = tx;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking: returns a pending event if one is available, or None.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// All context needed to map a key event to an action.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext {
    pub screen: Screen,
    pub modal: Option<EditTarget>,
    pub calendar_open: bool,
}

/// Map a key event to an action based on current app context.
pub fn map_key_to_action(key: KeyEvent, ctx: &KeyContext) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Priority 0: Ctrl-C always quits, even inside modals
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Priority 1: the open edit modal owns the keyboard
    if let Some(target) = ctx.modal {
        return match key.code {
            KeyCode::Esc => Some(Action::CancelModal),
            KeyCode::Enter => Some(Action::SaveModal),
            _ => modal_input(target, key).map(Action::Modal),
        };
    }

    match ctx.screen {
        Screen::Launch => match key.code {
            KeyCode::Enter => Some(Action::StartSession),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        Screen::Home if ctx.calendar_open => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('c') => Some(Action::CloseCalendar),
            _ => date_step(key.code).map(Action::CalendarStep),
        },
        Screen::Home => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('c') => Some(Action::ToggleCalendar),
            KeyCode::Char('d') | KeyCode::Enter => Some(Action::ToggleDetails),
            KeyCode::Char('s') | KeyCode::Char('p') | KeyCode::Tab => Some(Action::ShowSettings),
            _ => None,
        },
        Screen::Settings => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::SettingsUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::SettingsDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ActivateRow),
            KeyCode::Char('L') => Some(Action::Logout),
            KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') | KeyCode::Tab => {
                Some(Action::ShowHome)
            }
            _ => None,
        },
    }
}

fn modal_input(target: EditTarget, key: KeyEvent) -> Option<ModalInput> {
    match target {
        EditTarget::Birthday => date_step(key.code).map(ModalInput::Date),
        EditTarget::Gender => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(ModalInput::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(ModalInput::Down),
            _ => None,
        },
        EditTarget::Username | EditTarget::Weight | EditTarget::Password | EditTarget::Profile => {
            text_input(key)
        }
    }
}

fn text_input(key: KeyEvent) -> Option<ModalInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') | KeyCode::Backspace => Some(ModalInput::DeleteWord),
            KeyCode::Char('r') => Some(ModalInput::ToggleVisibility),
            KeyCode::Char('a') => Some(ModalInput::Home),
            KeyCode::Char('e') => Some(ModalInput::End),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(c) => Some(ModalInput::Char(c)),
        KeyCode::Backspace => Some(ModalInput::Backspace),
        KeyCode::Left => Some(ModalInput::Left),
        KeyCode::Right => Some(ModalInput::Right),
        KeyCode::Home => Some(ModalInput::Home),
        KeyCode::End => Some(ModalInput::End),
        KeyCode::Tab | KeyCode::BackTab => Some(ModalInput::NextField),
        KeyCode::Up => Some(ModalInput::Up),
        KeyCode::Down => Some(ModalInput::Down),
        _ => None,
    }
}

fn date_step(code: KeyCode) -> Option<DateStep> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(DateStep::PrevDay),
        KeyCode::Right | KeyCode::Char('l') => Some(DateStep::NextDay),
        KeyCode::Up | KeyCode::Char('k') => Some(DateStep::PrevWeek),
        KeyCode::Down | KeyCode::Char('j') => Some(DateStep::NextWeek),
        KeyCode::PageUp | KeyCode::Char('[') => Some(DateStep::PrevMonth),
        KeyCode::PageDown | KeyCode::Char(']') => Some(DateStep::NextMonth),
        KeyCode::Char('{') => Some(DateStep::PrevYear),
        KeyCode::Char('}') => Some(DateStep::NextYear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn ctx(screen: Screen, modal: Option<EditTarget>) -> KeyContext {
        KeyContext {
            screen,
            modal,
            calendar_open: false,
        }
    }

    #[test]
    fn test_ctrl_c_quits_inside_modal() {
        let c = ctx(Screen::Settings, Some(EditTarget::Password));
        assert_eq!(map_key_to_action(ctrl('c'), &c), Some(Action::Quit));
    }

    #[test]
    fn test_modal_captures_quit_key_as_text() {
        let c = ctx(Screen::Settings, Some(EditTarget::Username));
        assert_eq!(
            map_key_to_action(key(KeyCode::Char('q')), &c),
            Some(Action::Modal(ModalInput::Char('q')))
        );
        assert_eq!(map_key_to_action(key(KeyCode::Enter), &c), Some(Action::SaveModal));
        assert_eq!(map_key_to_action(key(KeyCode::Esc), &c), Some(Action::CancelModal));
    }

    #[test]
    fn test_password_visibility_shortcut() {
        let c = ctx(Screen::Settings, Some(EditTarget::Password));
        assert_eq!(
            map_key_to_action(ctrl('r'), &c),
            Some(Action::Modal(ModalInput::ToggleVisibility))
        );
        assert_eq!(
            map_key_to_action(key(KeyCode::Tab), &c),
            Some(Action::Modal(ModalInput::NextField))
        );
    }

    #[test]
    fn test_birthday_keys_move_date() {
        let c = ctx(Screen::Settings, Some(EditTarget::Birthday));
        assert_eq!(
            map_key_to_action(key(KeyCode::Char('l')), &c),
            Some(Action::Modal(ModalInput::Date(DateStep::NextDay)))
        );
        assert_eq!(
            map_key_to_action(key(KeyCode::PageUp), &c),
            Some(Action::Modal(ModalInput::Date(DateStep::PrevMonth)))
        );
        assert_eq!(map_key_to_action(key(KeyCode::Char('x')), &c), None);
    }

    #[test]
    fn test_settings_navigation() {
        let c = ctx(Screen::Settings, None);
        assert_eq!(map_key_to_action(key(KeyCode::Char('j')), &c), Some(Action::SettingsDown));
        assert_eq!(map_key_to_action(key(KeyCode::Char(' ')), &c), Some(Action::ActivateRow));
        assert_eq!(map_key_to_action(key(KeyCode::Esc), &c), Some(Action::ShowHome));
        assert_eq!(map_key_to_action(key(KeyCode::Char('L')), &c), Some(Action::Logout));
    }

    #[test]
    fn test_home_calendar_overlay() {
        let mut c = ctx(Screen::Home, None);
        assert_eq!(map_key_to_action(key(KeyCode::Char('c')), &c), Some(Action::ToggleCalendar));
        c.calendar_open = true;
        assert_eq!(
            map_key_to_action(key(KeyCode::Down), &c),
            Some(Action::CalendarStep(DateStep::NextWeek))
        );
        assert_eq!(map_key_to_action(key(KeyCode::Enter), &c), Some(Action::CloseCalendar));
        assert_eq!(map_key_to_action(key(KeyCode::Char('q')), &c), None);
    }

    #[test]
    fn test_launch_screen() {
        let c = ctx(Screen::Launch, None);
        assert_eq!(map_key_to_action(key(KeyCode::Enter), &c), Some(Action::StartSession));
        assert_eq!(map_key_to_action(key(KeyCode::Char('s')), &c), None);
    }
}
