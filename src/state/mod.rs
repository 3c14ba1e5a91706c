pub mod app_state;
pub mod calendar;
pub mod dashboard;
pub mod edit_session;
pub mod profile;
pub mod settings_rows;
pub mod settings_store;
pub mod text_buffer;

pub use app_state::{AppState, Screen};
pub use settings_store::SettingsStore;
