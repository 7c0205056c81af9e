//! Live application windows.

/// A currently open instance of the application.
///
/// Transient: enumerated on demand from the registry, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientWindow {
    /// Registry-assigned identifier.
    pub id: String,
    /// The URL currently visible in the window.
    pub url: String,
    /// Whether the window currently holds focus.
    pub focused: bool,
    /// Whether this worker generation controls the window's transport.
    pub controlled: bool,
}
