use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::state::profile::{ImageRef, UserProfile};
use crate::state::settings_store::Settings;
use crate::theme::{apply_overrides, Theme, ThemeOverrides, THEME_NAMES};

const DEFAULT_NAME: &str = "Jane Doe";

#[derive(Debug, Clone)]
pub struct LiftLogConfig {
    pub path: PathBuf,
    pub theme: Theme,
    pub settings: Settings,
    pub profile: UserProfile,
}

impl LiftLogConfig {
    fn defaults(path: PathBuf) -> Self {
        Self {
            path,
            theme: Theme::from_name("ember"),
            settings: Settings::default(),
            profile: UserProfile::new(DEFAULT_NAME, None),
        }
    }

    /// Directory that relative image references resolve against.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.path.parent().map(Path::to_path_buf)
    }
}

/// `[settings]` table. The password is read if present but never written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SettingsTable {
    profile_public: bool,
    auto_share_workouts: bool,
    notifications: bool,
    rest_day_reminders: bool,
    water_intake_reminders: bool,
    workout_reminders: bool,
    weight: String,
    gender: String,
    birthday: String,
    username: String,
    #[serde(skip_serializing)]
    password: String,
}

impl From<SettingsTable> for Settings {
    fn from(t: SettingsTable) -> Self {
        Settings {
            profile_public: t.profile_public,
            auto_share_workouts: t.auto_share_workouts,
            notifications: t.notifications,
            rest_day_reminders: t.rest_day_reminders,
            water_intake_reminders: t.water_intake_reminders,
            workout_reminders: t.workout_reminders,
            weight: t.weight,
            gender: t.gender,
            birthday: t.birthday,
            username: t.username,
            password: t.password,
        }
    }
}

impl From<&Settings> for SettingsTable {
    fn from(s: &Settings) -> Self {
        SettingsTable {
            profile_public: s.profile_public,
            auto_share_workouts: s.auto_share_workouts,
            notifications: s.notifications,
            rest_day_reminders: s.rest_day_reminders,
            water_intake_reminders: s.water_intake_reminders,
            workout_reminders: s.workout_reminders,
            weight: s.weight.clone(),
            gender: s.gender.clone(),
            birthday: s.birthday.clone(),
            username: s.username.clone(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileTable {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    settings: Option<SettingsTable>,
    #[serde(default)]
    profile: Option<ProfileTable>,
}

/// `~/.config/liftlog/config.toml`.
pub fn default_config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("liftlog");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `path`, falling back to defaults if the file is missing
/// or unparseable.
pub fn load_config(path: &Path) -> LiftLogConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "no config file, using defaults");
            return LiftLogConfig::defaults(path.to_path_buf());
        }
    };

    let file: ConfigFile = match toml::from_str(&contents) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
            return LiftLogConfig::defaults(path.to_path_buf());
        }
    };

    let theme_name = file.theme.as_deref().unwrap_or("ember");
    if !THEME_NAMES.contains(&theme_name) {
        tracing::warn!(theme = theme_name, "unknown theme, falling back to ember");
    }
    let mut theme = Theme::from_name(theme_name);
    if let Some(ref overrides) = file.colors {
        apply_overrides(&mut theme, overrides);
    }

    let profile = file
        .profile
        .map(|p| UserProfile::new(p.name, p.image.as_deref().and_then(ImageRef::new)))
        .unwrap_or_else(|| UserProfile::new(DEFAULT_NAME, None));

    tracing::info!(path = %path.display(), theme = %theme.name, "config loaded");
    LiftLogConfig {
        path: path.to_path_buf(),
        theme,
        settings: file.settings.map(Settings::from).unwrap_or_default(),
        profile,
    }
}

/// Write the current settings and profile to `path`.
///
/// Known `settings` keys and the `profile` table are replaced; everything
/// else (theme, color overrides, a host-provided password) is preserved.
/// The in-memory password is never written.
pub fn save_state(path: &Path, settings: &Settings, profile: &UserProfile) -> Result<(), ConfigError> {
    let mut table = std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.parse::<toml::Table>().ok())
        .unwrap_or_default();

    // Merge into the existing table so host-provided keys such as the
    // password survive.
    let mut settings_table = match table.remove("settings") {
        Some(toml::Value::Table(existing)) => existing,
        _ => toml::Table::new(),
    };
    if let toml::Value::Table(fresh) = toml::Value::try_from(SettingsTable::from(settings))? {
        settings_table.extend(fresh);
    }
    table.insert("settings".to_string(), toml::Value::Table(settings_table));
    table.insert(
        "profile".to_string(),
        toml::Value::try_from(ProfileTable {
            name: profile.name.clone(),
            image: profile.image_ref().map(|r| r.as_str().to_string()),
        })?,
    );

    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let toml_string = toml::to_string_pretty(&table)?;
    std::fs::write(path, toml_string).map_err(write_err)?;
    tracing::info!(path = %path.display(), "settings saved");
    Ok(())
}
