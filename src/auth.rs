//! Admin password gate.
//!
//! This only decides which console screens open. The password sits in the
//! data file in plain text and the fallback is public, so it protects
//! nothing.

use rand::Rng;

use crate::error::AuthError;
use crate::store::{Storage, keys};

/// Used whenever no password has been stored. Publicly known.
pub const DEFAULT_PASSWORD: &str = "admin123";
pub const MIN_PASSWORD_LEN: usize = 6;

const GENERATED_LEN: usize = 12;
const GENERATED_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

pub struct SessionGate<S: Storage> {
    store: S,
}

impl<S: Storage> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn stored_password(&self) -> Result<String, AuthError> {
        Ok(self
            .store
            .get_item(keys::ADMIN_PASSWORD)?
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()))
    }

    pub fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.store.get_item(keys::ADMIN_AUTHENTICATED)?.as_deref() == Some("true"))
    }

    pub fn login(&self, password: &str) -> Result<(), AuthError> {
        if password != self.stored_password()? {
            tracing::warn!("admin login rejected");
            return Err(AuthError::InvalidPassword);
        }

        self.store.set_item(keys::ADMIN_AUTHENTICATED, "true")?;
        tracing::info!("admin logged in");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove_item(keys::ADMIN_AUTHENTICATED)?;
        tracing::info!("admin logged out");
        Ok(())
    }

    /// Checks run in order and the first failure wins. Length is counted in
    /// UTF-16 code units, so `"😀😀😀"` is six long and passes.
    pub fn change_password(&self, current: &str, new: &str, confirm: &str) -> Result<(), AuthError> {
        let stored = self.stored_password()?;
        if current != stored {
            return Err(AuthError::IncorrectCurrentPassword);
        }
        if new.is_empty() {
            return Err(AuthError::NewPasswordRequired);
        }
        if new.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::NewPasswordTooShort(MIN_PASSWORD_LEN));
        }
        if new != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if new == current {
            return Err(AuthError::PasswordUnchanged);
        }

        self.store.set_item(keys::ADMIN_PASSWORD, new)?;
        tracing::info!("admin password changed");
        Ok(())
    }

    pub fn reset_to_default(&self) -> Result<(), AuthError> {
        self.store.set_item(keys::ADMIN_PASSWORD, DEFAULT_PASSWORD)?;
        tracing::warn!("admin password reset to the default");
        Ok(())
    }
}

/// Random suggestion for the settings screen.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..GENERATED_LEN)
        .map(|_| GENERATED_CHARSET[rng.gen_range(0..GENERATED_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn fallback_password_logs_in() {
        let store = MemoryStore::new();
        let gate = SessionGate::new(&store);

        assert_matches!(gate.login("wrong"), Err(AuthError::InvalidPassword));
        assert!(!gate.is_authenticated().unwrap());

        gate.login(DEFAULT_PASSWORD).unwrap();
        assert!(gate.is_authenticated().unwrap());
        assert_eq!(store.get_item(keys::ADMIN_AUTHENTICATED).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn logout_removes_the_flag() {
        let store = MemoryStore::new();
        let gate = SessionGate::new(&store);
        gate.login(DEFAULT_PASSWORD).unwrap();

        gate.logout().unwrap();

        assert!(!gate.is_authenticated().unwrap());
        assert_eq!(store.get_item(keys::ADMIN_AUTHENTICATED).unwrap(), None);
    }

    #[test]
    fn change_password_checks_rules_in_order() {
        let store = MemoryStore::new();
        let gate = SessionGate::new(&store);

        assert_matches!(
            gate.change_password("nope", "abcdef", "abcdef"),
            Err(AuthError::IncorrectCurrentPassword)
        );
        assert_matches!(
            gate.change_password(DEFAULT_PASSWORD, "", ""),
            Err(AuthError::NewPasswordRequired)
        );
        assert_matches!(
            gate.change_password(DEFAULT_PASSWORD, "abc", "abc"),
            Err(AuthError::NewPasswordTooShort(6))
        );
        assert_matches!(
            gate.change_password(DEFAULT_PASSWORD, "abcdef", "abcdeg"),
            Err(AuthError::PasswordMismatch)
        );
        assert_matches!(
            gate.change_password(DEFAULT_PASSWORD, DEFAULT_PASSWORD, DEFAULT_PASSWORD),
            Err(AuthError::PasswordUnchanged)
        );
        assert_eq!(store.get_item(keys::ADMIN_PASSWORD).unwrap(), None);
    }

    #[test]
    fn changed_password_replaces_the_fallback() {
        let store = MemoryStore::new();
        let gate = SessionGate::new(&store);

        gate.change_password(DEFAULT_PASSWORD, "s3cret!", "s3cret!").unwrap();

        assert_matches!(gate.login(DEFAULT_PASSWORD), Err(AuthError::InvalidPassword));
        gate.login("s3cret!").unwrap();

        gate.reset_to_default().unwrap();
        gate.login(DEFAULT_PASSWORD).unwrap();
    }

    #[test]
    fn length_counts_utf16_units() {
        let store = MemoryStore::new();
        let gate = SessionGate::new(&store);

        assert_matches!(
            gate.change_password(DEFAULT_PASSWORD, "éàü", "éàü"),
            Err(AuthError::NewPasswordTooShort(6))
        );
        gate.change_password(DEFAULT_PASSWORD, "😀😀😀", "😀😀😀").unwrap();
        gate.login("😀😀😀").unwrap();
    }

    #[test]
    fn invalid_password_message_does_not_leak_the_secret() {
        let message = AuthError::InvalidPassword.to_string();
        assert_eq!(message, "Invalid password. Please try again.");
        assert!(!message.contains(DEFAULT_PASSWORD));
    }

    #[test]
    fn generated_passwords_use_the_charset() {
        let password = generate_password();
        assert_eq!(password.len(), GENERATED_LEN);
        assert!(password.bytes().all(|b| GENERATED_CHARSET.contains(&b)));
    }
}
