//! Navigation requests issued by the access layer.
//!
//! The layer never renders anything itself. When a session is rejected it
//! asks a [`Navigator`] to send the user to the login page and carries on
//! returning the original error; whoever owns the UI decides what
//! "navigating" means.

use std::sync::Mutex;

/// Login entry point the user is sent to when the session is rejected
pub const LOGIN_PATH: &str = "/login";

/// Receives navigation requests. Fire-and-forget: the caller does not wait
/// for navigation to complete.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Records the most recent navigation target so the owner can act on it
/// after the failed call returns.
#[derive(Debug, Default)]
pub struct NavigationSlot {
    target: Mutex<Option<String>>,
}

impl NavigationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pending target without clearing it
    pub fn pending(&self) -> Option<String> {
        self.target.lock().map(|t| t.clone()).unwrap_or(None)
    }

    /// Take the pending target, leaving the slot empty
    pub fn take(&self) -> Option<String> {
        self.target.lock().map(|mut t| t.take()).unwrap_or(None)
    }
}

impl Navigator for NavigationSlot {
    fn navigate(&self, target: &str) {
        if let Ok(mut slot) = self.target.lock() {
            *slot = Some(target.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_records_latest_target() {
        let slot = NavigationSlot::new();
        assert_eq!(slot.pending(), None);

        slot.navigate("/dashboard");
        slot.navigate(LOGIN_PATH);
        assert_eq!(slot.pending().as_deref(), Some("/login"));

        assert_eq!(slot.take().as_deref(), Some("/login"));
        assert_eq!(slot.take(), None);
    }
}
