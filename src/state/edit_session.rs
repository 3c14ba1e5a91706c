//! Edit modals for the settings screen.
//!
//! [`ActiveModal`] is the single slot holding whichever editor is open, so at
//! most one draft exists at a time. A draft is seeded from the store when the
//! modal opens, dropped on cancel, and written back only by a successful save.

use chrono::NaiveDate;

use super::calendar::{apply_step, format_birthday, parse_birthday, DateStep};
use super::profile::{ImageRef, UserProfile};
use super::settings_store::{SettingsStore, TextField};
use super::text_buffer::TextBuffer;
use crate::error::ValidationError;

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female", "Non-binary", "Prefer not to specify"];

/// Index into [`GENDER_OPTIONS`] used when the stored value is not an option.
pub const DEFAULT_GENDER: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Profile,
    Weight,
    Gender,
    Birthday,
    Username,
    Password,
}

impl EditTarget {
    pub fn title(self) -> &'static str {
        match self {
            EditTarget::Profile => "Edit Profile",
            EditTarget::Weight => "Edit Weight",
            EditTarget::Gender => "Edit Gender",
            EditTarget::Birthday => "Edit Birthday",
            EditTarget::Username => "Edit Username",
            EditTarget::Password => "Edit Password",
        }
    }
}

/// Editing input routed to the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalInput {
    Char(char),
    Backspace,
    DeleteWord,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    NextField,
    ToggleVisibility,
    Date(DateStep),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayDraft {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderDraft {
    pub selected: usize,
}

impl GenderDraft {
    fn seed(stored: &str) -> Self {
        let selected = GENDER_OPTIONS
            .iter()
            .position(|&option| option == stored)
            .unwrap_or(DEFAULT_GENDER);
        Self { selected }
    }

    pub fn value(&self) -> &'static str {
        GENDER_OPTIONS[self.selected]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernameDraft {
    pub input: TextBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordFocus {
    #[default]
    New,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordDraft {
    pub new_password: TextBuffer,
    pub confirm: TextBuffer,
    pub show_new: bool,
    pub show_confirm: bool,
    pub focus: PasswordFocus,
}

impl PasswordDraft {
    fn focused_mut(&mut self) -> &mut TextBuffer {
        match self.focus {
            PasswordFocus::New => &mut self.new_password,
            PasswordFocus::Confirm => &mut self.confirm,
        }
    }

    pub fn validate(&self) -> Result<&str, ValidationError> {
        if self.new_password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if self.new_password.text() != self.confirm.text() {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(self.new_password.text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightDraft {
    pub input: TextBuffer,
    /// Stored value at open. Saving it back is always allowed, even when
    /// the store holds something that is not a number.
    seed: String,
}

impl WeightDraft {
    fn seed(stored: &str) -> Self {
        Self {
            input: TextBuffer::from(stored),
            seed: stored.to_string(),
        }
    }

    pub fn validate(&self) -> Result<&str, ValidationError> {
        if self.input.text() == self.seed {
            return Ok(self.input.text());
        }
        let trimmed = self.input.text().trim();
        match trimmed.parse::<f64>() {
            Ok(w) if w.is_finite() && w > 0.0 => Ok(trimmed),
            _ => Err(ValidationError::InvalidWeight),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileFocus {
    #[default]
    Name,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: TextBuffer,
    pub image_path: TextBuffer,
    pub focus: ProfileFocus,
}

impl ProfileDraft {
    fn focused_mut(&mut self) -> &mut TextBuffer {
        match self.focus {
            ProfileFocus::Name => &mut self.name,
            ProfileFocus::Image => &mut self.image_path,
        }
    }

    pub fn validate(&self) -> Result<UserProfile, ValidationError> {
        let name = self.name.text().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(UserProfile::new(name, ImageRef::new(self.image_path.text())))
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub target: EditTarget,
    /// `false` when the saved value equalled the stored one.
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveModal {
    #[default]
    None,
    Profile(ProfileDraft),
    Weight(WeightDraft),
    Gender(GenderDraft),
    Birthday(BirthdayDraft),
    Username(UsernameDraft),
    Password(PasswordDraft),
}

impl ActiveModal {
    pub fn is_open(&self) -> bool {
        !matches!(self, ActiveModal::None)
    }

    pub fn target(&self) -> Option<EditTarget> {
        match self {
            ActiveModal::None => None,
            ActiveModal::Profile(_) => Some(EditTarget::Profile),
            ActiveModal::Weight(_) => Some(EditTarget::Weight),
            ActiveModal::Gender(_) => Some(EditTarget::Gender),
            ActiveModal::Birthday(_) => Some(EditTarget::Birthday),
            ActiveModal::Username(_) => Some(EditTarget::Username),
            ActiveModal::Password(_) => Some(EditTarget::Password),
        }
    }

    /// Open the editor for `target`, seeding its draft from the current values.
    /// Returns `false` and does nothing if another modal is already open.
    pub fn open(
        &mut self,
        target: EditTarget,
        store: &SettingsStore,
        profile: &UserProfile,
        today: NaiveDate,
    ) -> bool {
        if self.is_open() {
            tracing::debug!(?target, open = ?self.target(), "ignoring open while a modal is active");
            return false;
        }
        *self = match target {
            EditTarget::Profile => ActiveModal::Profile(ProfileDraft {
                name: TextBuffer::from(&profile.name),
                image_path: TextBuffer::from(profile.image_ref().map(ImageRef::as_str).unwrap_or("")),
                focus: ProfileFocus::Name,
            }),
            EditTarget::Weight => ActiveModal::Weight(WeightDraft::seed(store.text(TextField::Weight))),
            EditTarget::Gender => ActiveModal::Gender(GenderDraft::seed(store.text(TextField::Gender))),
            EditTarget::Birthday => ActiveModal::Birthday(BirthdayDraft {
                date: parse_birthday(store.text(TextField::Birthday)).unwrap_or(today),
            }),
            EditTarget::Username => ActiveModal::Username(UsernameDraft {
                input: TextBuffer::from(store.text(TextField::Username)),
            }),
            EditTarget::Password => ActiveModal::Password(PasswordDraft::default()),
        };
        tracing::info!(?target, "edit modal opened");
        true
    }

    /// Discard the draft. Returns the target that was open, if any.
    pub fn cancel(&mut self) -> Option<EditTarget> {
        let target = self.target();
        *self = ActiveModal::None;
        if let Some(target) = target {
            tracing::info!(?target, "edit modal cancelled");
        }
        target
    }

    pub fn handle_input(&mut self, input: ModalInput) {
        match self {
            ActiveModal::None => {}
            ActiveModal::Birthday(draft) => {
                if let ModalInput::Date(step) = input {
                    draft.date = apply_step(draft.date, step);
                }
            }
            ActiveModal::Gender(draft) => match input {
                ModalInput::Up => draft.selected = draft.selected.saturating_sub(1),
                ModalInput::Down => {
                    draft.selected = (draft.selected + 1).min(GENDER_OPTIONS.len() - 1);
                }
                _ => {}
            },
            ActiveModal::Username(draft) => edit_text(&mut draft.input, input),
            ActiveModal::Weight(draft) => match input {
                ModalInput::Char(c) if c.is_ascii_digit() || c == '.' => draft.input.insert_char(c),
                ModalInput::Char(_) => {}
                other => edit_text(&mut draft.input, other),
            },
            ActiveModal::Password(draft) => match input {
                ModalInput::NextField | ModalInput::Up | ModalInput::Down => {
                    draft.focus = match draft.focus {
                        PasswordFocus::New => PasswordFocus::Confirm,
                        PasswordFocus::Confirm => PasswordFocus::New,
                    };
                }
                ModalInput::ToggleVisibility => match draft.focus {
                    PasswordFocus::New => draft.show_new = !draft.show_new,
                    PasswordFocus::Confirm => draft.show_confirm = !draft.show_confirm,
                },
                other => edit_text(draft.focused_mut(), other),
            },
            ActiveModal::Profile(draft) => match input {
                ModalInput::NextField | ModalInput::Up | ModalInput::Down => {
                    draft.focus = match draft.focus {
                        ProfileFocus::Name => ProfileFocus::Image,
                        ProfileFocus::Image => ProfileFocus::Name,
                    };
                }
                other => edit_text(draft.focused_mut(), other),
            },
        }
    }

    /// Why the current draft cannot be saved, if it can't.
    pub fn validation_error(&self) -> Option<ValidationError> {
        match self {
            ActiveModal::Password(draft) => draft.validate().err(),
            ActiveModal::Weight(draft) => draft.validate().err(),
            ActiveModal::Profile(draft) => draft.validate().err(),
            _ => None,
        }
    }

    pub fn can_save(&self) -> bool {
        self.is_open() && self.validation_error().is_none()
    }

    /// Validate and commit the draft, then close the modal.
    ///
    /// On a validation error nothing is written and the modal stays open.
    /// Returns `Ok(None)` when no modal is open.
    pub fn save(
        &mut self,
        store: &mut SettingsStore,
        profile: &mut UserProfile,
    ) -> Result<Option<Commit>, ValidationError> {
        let Some(target) = self.target() else {
            return Ok(None);
        };
        let changed = match self {
            ActiveModal::None => false,
            ActiveModal::Birthday(draft) => {
                store.set_text(TextField::Birthday, format_birthday(draft.date))
            }
            ActiveModal::Gender(draft) => store.set_text(TextField::Gender, draft.value()),
            ActiveModal::Username(draft) => {
                store.set_text(TextField::Username, draft.input.text())
            }
            ActiveModal::Password(draft) => {
                let password = draft.validate().inspect_err(|e| reject(target, e))?;
                store.set_text(TextField::Password, password)
            }
            ActiveModal::Weight(draft) => {
                let weight = draft.validate().inspect_err(|e| reject(target, e))?;
                store.set_text(TextField::Weight, weight)
            }
            ActiveModal::Profile(draft) => {
                let updated = draft.validate().inspect_err(|e| reject(target, e))?;
                let changed = *profile != updated;
                *profile = updated;
                changed
            }
        };
        *self = ActiveModal::None;
        tracing::info!(?target, changed, "edit modal saved");
        Ok(Some(Commit { target, changed }))
    }
}

fn reject(target: EditTarget, error: &ValidationError) {
    tracing::info!(?target, %error, "save rejected");
}

fn edit_text(buf: &mut TextBuffer, input: ModalInput) {
    match input {
        ModalInput::Char(c) => buf.insert_char(c),
        ModalInput::Backspace => buf.delete_back(),
        ModalInput::DeleteWord => buf.delete_word_back(),
        ModalInput::Left => buf.move_left(),
        ModalInput::Right => buf.move_right(),
        ModalInput::Home => buf.move_home(),
        ModalInput::End => buf.move_end(),
        _ => {}
    }
}
