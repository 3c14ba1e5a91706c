use crate::state::calendar::DateStep;
use crate::state::edit_session::ModalInput;

/// Central action enum. All state mutations flow through `App::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,
    Resize,

    // Screens
    ShowHome,
    ShowSettings,
    StartSession,

    // Home dashboard
    ToggleCalendar,
    CloseCalendar,
    CalendarStep(DateStep),
    ToggleDetails,

    // Settings list
    SettingsUp,
    SettingsDown,
    ActivateRow,
    Logout,

    // Edit modal
    Modal(ModalInput),
    SaveModal,
    CancelModal,
}
