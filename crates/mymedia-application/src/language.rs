//! UI language preference.

use std::sync::{PoisonError, RwLock};

pub const DEFAULT_LANGUAGE: &str = "en";

/// The language the view layer renders in.
///
/// Starts at [`DEFAULT_LANGUAGE`] and follows the user's profile after each
/// successful login. Logout leaves it as is.
#[derive(Debug)]
pub struct LanguageState {
    value: RwLock<String>,
}

impl LanguageState {
    pub fn new() -> Self {
        Self {
            value: RwLock::new(DEFAULT_LANGUAGE.to_string()),
        }
    }

    pub fn get(&self) -> String {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sets the language. Blank values are ignored.
    pub fn set(&self, language: &str) {
        let language = language.trim();
        if language.is_empty() {
            return;
        }
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = language.to_string();
    }
}

impl Default for LanguageState {
    fn default() -> Self {
        Self::new()
    }
}
