use std::fs;
use std::path::{Path, PathBuf};

/// Opaque reference to stored image data. For the filesystem loader this is a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    /// Returns `None` for a blank reference.
    pub fn new(reference: &str) -> Option<Self> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Capability for reading image bytes by reference.
pub trait ImageLoader {
    /// Returns `None` if the image cannot be read.
    fn load(&self, reference: &ImageRef) -> Option<Vec<u8>>;
}

/// Reads images from the local filesystem. Relative references resolve
/// against `base_dir`.
#[derive(Debug, Clone, Default)]
pub struct FsImageLoader {
    base_dir: Option<PathBuf>,
}

impl FsImageLoader {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    fn resolve(&self, reference: &ImageRef) -> PathBuf {
        let path = Path::new(reference.as_str());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&self, reference: &ImageRef) -> Option<Vec<u8>> {
        let path = self.resolve(reference);
        match fs::read(&path) {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "profile image unreadable");
                None
            }
        }
    }
}

/// What the profile header shows in place of a picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Image { size_bytes: usize },
    Placeholder { initials: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub image: Option<ImageRef>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, image: Option<ImageRef>) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }

    /// Current image reference, for external image storage.
    pub fn image_ref(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Resolve the avatar through `loader`; any failure yields the placeholder.
    pub fn avatar(&self, loader: &dyn ImageLoader) -> Avatar {
        match self.image.as_ref().and_then(|r| loader.load(r)) {
            Some(bytes) => Avatar::Image {
                size_bytes: bytes.len(),
            },
            None => Avatar::Placeholder {
                initials: initials(&self.name),
            },
        }
    }
}

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}
