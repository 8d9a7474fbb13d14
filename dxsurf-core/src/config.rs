//! Surface configuration.
//!
//! [`SurfaceConfig`] carries everything a host needs to bring up a surface:
//! window title, client size, back-buffer count and the initial full-screen
//! state.  It can be built in code, or loaded from a JSON file where any
//! omitted field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SurfaceError;
use crate::presentation::{MAX_BUFFER_COUNT, MIN_BUFFER_COUNT};

/// Default window title.
pub const DEFAULT_TITLE: &str = "DX12 Render Window";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub title: String,
    /// Requested client-area width in pixels.
    pub width: u32,
    /// Requested client-area height in pixels.
    pub height: u32,
    /// Swap-chain back buffers.
    pub buffer_count: u32,
    /// Enter borderless full-screen right after creation.
    pub fullscreen: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            width: 1280,
            height: 720,
            buffer_count: 3,
            fullscreen: false,
        }
    }
}

impl SurfaceConfig {
    /// Config with the given title and client size, defaults elsewhere.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, SurfaceError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SurfaceError::Config(format!("invalid surface config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SurfaceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SurfaceError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Check the client size and buffer count.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        validate_client_size(self.width, self.height)?;
        if !(MIN_BUFFER_COUNT..=MAX_BUFFER_COUNT).contains(&self.buffer_count) {
            return Err(SurfaceError::Config(format!(
                "buffer_count {} outside {MIN_BUFFER_COUNT}..={MAX_BUFFER_COUNT}",
                self.buffer_count
            )));
        }
        Ok(())
    }
}

/// Largest accepted client width or height.  Half of `i32::MAX` leaves
/// room for the frame that `AdjustWindowRect` adds around the client area.
pub const MAX_CLIENT_EXTENT: u32 = (i32::MAX / 2) as u32;

/// Client width and height must be positive and at most
/// [`MAX_CLIENT_EXTENT`].
pub(crate) fn validate_client_size(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::Config(format!(
            "client size must be non-zero, got {width}x{height}"
        )));
    }
    if width > MAX_CLIENT_EXTENT || height > MAX_CLIENT_EXTENT {
        return Err(SurfaceError::Config(format!(
            "client size {width}x{height} exceeds {MAX_CLIENT_EXTENT}"
        )));
    }
    Ok(())
}
