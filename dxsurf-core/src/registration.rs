//! One-time window class registration.
//!
//! A window class must be registered before any window of that class is
//! created, and the OS releases it at process exit.  [`ClassRegistrar`]
//! wraps the registration in a `OnceLock` so repeated calls are harmless:
//! the first call runs the registration, every later call returns the
//! cached outcome without touching the OS.
//!
//! The Win32 backend keeps one registrar in a `static`; tests create their
//! own so they never share process-wide state.

use std::sync::OnceLock;

use crate::errors::SurfaceError;

/// Class name used for every surface window.
pub const WINDOW_CLASS_NAME: &str = "DX12RenderWindowClass";

/// Atom returned by a successful class registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassAtom(pub u16);

/// Guard that runs a class registration at most once.
#[derive(Debug, Default)]
pub struct ClassRegistrar {
    atom: OnceLock<Result<ClassAtom, SurfaceError>>,
}

impl ClassRegistrar {
    pub const fn new() -> Self {
        Self {
            atom: OnceLock::new(),
        }
    }

    /// Run `register` if no registration has happened yet.
    ///
    /// A failed first registration is cached too: the class is unusable
    /// and retrying would only hide the original error.
    pub fn register_with<F>(&self, register: F) -> Result<ClassAtom, SurfaceError>
    where
        F: FnOnce() -> Result<ClassAtom, SurfaceError>,
    {
        let mut ran = false;
        let outcome = self.atom.get_or_init(|| {
            ran = true;
            register()
        });
        if !ran {
            log::trace!("window class already registered: {outcome:?}");
        }
        outcome.clone()
    }

    /// Whether a registration has succeeded.
    pub fn is_registered(&self) -> bool {
        matches!(self.atom.get(), Some(Ok(_)))
    }
}
