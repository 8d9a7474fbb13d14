//! Error types for `dxsurf_core`.
//!
//! All failures are funnelled through [`SurfaceError`], which uses
//! `thiserror` for `Display` and `Error` derives.  Variants fall into two
//! tiers:
//!
//! - **Fatal**: the host environment is broken (no windowing subsystem, no
//!   graphics driver, bad configuration).  Startup should abort.
//! - **Recoverable**: an optional capability is missing.  Only the tearing
//!   query produces these; callers fall back to a non-tearing present.

use thiserror::Error;

/// Top-level error type for the `dxsurf_core` library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// `RegisterClassExW` failed.
    #[error("ClassRegistrationError: {0}")]
    ClassRegistration(String),

    /// `CreateWindowExW` failed.
    #[error("WindowCreationError: {0}")]
    WindowCreation(String),

    /// DXGI factory or swap-chain creation failed.
    #[error("SwapChainError: {0}")]
    SwapChain(String),

    /// The tearing capability query failed somewhere along the way.
    #[error("TearingQueryError: {0}")]
    TearingQuery(String),

    /// Invalid [`crate::config::SurfaceConfig`] or call arguments.
    #[error("ConfigError: {0}")]
    Config(String),

    /// Win32 / COM HRESULT failure without a more specific context.
    #[error("OsError: {0}")]
    Os(String),
}

impl SurfaceError {
    /// Whether this error should abort startup.
    ///
    /// Everything except a failed tearing query is fatal: there is no
    /// degraded mode without a window class, a window or a swap chain.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SurfaceError::TearingQuery(_))
    }
}

/// Convert a `windows::core::Error` (Win32 / HRESULT failure) into a
/// `SurfaceError::Os`.
#[cfg(windows)]
impl From<windows::core::Error> for SurfaceError {
    fn from(err: windows::core::Error) -> Self {
        SurfaceError::Os(format!("Windows error: {err}"))
    }
}
