//! Read access to user preferences and device context.

/// User preferences consulted by the repository.
pub trait Preferences: Send + Sync {
    /// The language code used when a caller does not pass one.
    fn language_code(&self) -> String;
}

/// Facts about the device the content is shown on.
pub trait DeviceContext: Send + Sync {
    /// Country code of the device, used to key publishing info.
    fn country(&self) -> String;
}
