//! Object keys for uploaded images

use std::fmt;

use uuid::Uuid;

/// Randomly generated key of an uploaded object
///
/// The UUID alone is handed back to the caller as the upload id; the stored
/// object's key is the UUID followed by the file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    id: Uuid,
    extension: &'static str,
}

impl ObjectKey {
    /// Generates a fresh key with a random v4 UUID
    #[must_use]
    pub fn generate(extension: &'static str) -> Self {
        Self {
            id: Uuid::new_v4(),
            extension,
        }
    }

    /// Upload id returned to the caller
    #[must_use]
    pub fn id(&self) -> String {
        self.id.to_string()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.id, self.extension)
    }
}
