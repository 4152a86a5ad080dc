use std::collections::BTreeMap;
use std::fmt;

/// Per-field validation messages, keyed by the field's stored name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Ok when no field failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize value for key {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored value for key {key} is unreadable, refusing to overwrite it: {source}")]
    Unreadable {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("data file {path} is corrupt, refusing to overwrite it: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid project: {0}")]
    Validation(FieldErrors),

    #[error("project not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("step is incomplete: {0}")]
    Validation(FieldErrors),

    #[error("cannot {action} from {step}")]
    InvalidTransition {
        action: &'static str,
        step: &'static str,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid password. Please try again.")]
    InvalidPassword,

    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    #[error("New password is required")]
    NewPasswordRequired,

    #[error("New password must be at least {0} characters")]
    NewPasswordTooShort(usize),

    #[error("New passwords do not match")]
    PasswordMismatch,

    #[error("New password must be different from current password")]
    PasswordUnchanged,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("inquiry not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_display_lists_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "Title is required");
        errors.insert("liveUrl", "Live URL is required");

        assert_eq!(
            errors.to_string(),
            "liveUrl: Live URL is required; title: Title is required"
        );
        assert!(errors.clone().into_result().is_err());
    }

    #[test]
    fn clearing_last_error_makes_result_ok() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");
        errors.clear("name");

        assert!(errors.into_result().is_ok());
    }
}
