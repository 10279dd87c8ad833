//! Preferences and device context backed by process memory.

use std::sync::RwLock;

use lessonsync_core::prefs::{DeviceContext, Preferences};

/// Preferences held in memory. The language can change at runtime; readers
/// see the new value on their next call.
#[derive(Debug)]
pub struct MemoryPreferences {
    language_code: RwLock<String>,
}

impl MemoryPreferences {
    pub fn new(language_code: impl Into<String>) -> Self {
        Self {
            language_code: RwLock::new(language_code.into()),
        }
    }

    #[cfg(test)]
    pub fn set_language_code(&self, language_code: impl Into<String>) {
        match self.language_code.write() {
            Ok(mut current) => *current = language_code.into(),
            Err(poisoned) => *poisoned.into_inner() = language_code.into(),
        }
    }
}

impl Preferences for MemoryPreferences {
    fn language_code(&self) -> String {
        match self.language_code.read() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// A device with a fixed country.
#[derive(Debug, Clone)]
pub struct FixedDevice {
    country: String,
}

impl FixedDevice {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }
}

impl DeviceContext for FixedDevice {
    fn country(&self) -> String {
        self.country.clone()
    }
}
