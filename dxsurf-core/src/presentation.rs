//! Portable description of the presentation swap chain.
//!
//! [`PresentationConfig`] records the swap-chain parameters the surface
//! always uses.  The Win32 backend converts it into a
//! `DXGI_SWAP_CHAIN_DESC1`; keeping the values here makes them checkable
//! without a GPU.
//!
//! # Swap effect
//!
//! Flip-discard: if the previously presented frame is still queued it is
//! dropped and the newest frame goes straight to the front.  Flip-sequential
//! would append to the queue instead, and `Present` blocks the submitting
//! thread when no back buffer is free.

use crate::errors::SurfaceError;

/// Flip-model swap chains need at least two buffers.
pub const MIN_BUFFER_COUNT: u32 = 2;

/// `DXGI_MAX_SWAP_CHAIN_BUFFERS`
pub const MAX_BUFFER_COUNT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// `DXGI_FORMAT_R8G8B8A8_UNORM`
    Rgba8Unorm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// `DXGI_SCALING_STRETCH`
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapEffect {
    /// `DXGI_SWAP_EFFECT_FLIP_DISCARD`
    FlipDiscard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationConfig {
    /// Back-buffer width; 0 lets DXGI take the window's client width.
    pub width: u32,
    /// Back-buffer height; 0 lets DXGI take the window's client height.
    pub height: u32,
    pub buffer_count: u32,
    pub format: PixelFormat,
    /// Multi-sampling `{Count, Quality}`; flip model requires `{1, 0}`.
    pub sample_count: u32,
    pub sample_quality: u32,
    pub scaling: Scaling,
    pub swap_effect: SwapEffect,
    /// Set `DXGI_SWAP_CHAIN_FLAG_ALLOW_TEARING`.
    pub allow_tearing: bool,
}

impl PresentationConfig {
    /// Validate `buffer_count` and build the fixed description.
    pub fn new(
        width: u32,
        height: u32,
        buffer_count: u32,
        allow_tearing: bool,
    ) -> Result<Self, SurfaceError> {
        if !(MIN_BUFFER_COUNT..=MAX_BUFFER_COUNT).contains(&buffer_count) {
            return Err(SurfaceError::SwapChain(format!(
                "buffer count {buffer_count} outside {MIN_BUFFER_COUNT}..={MAX_BUFFER_COUNT}"
            )));
        }
        Ok(Self {
            width,
            height,
            buffer_count,
            format: PixelFormat::Rgba8Unorm,
            sample_count: 1,
            sample_quality: 0,
            scaling: Scaling::Stretch,
            swap_effect: SwapEffect::FlipDiscard,
            allow_tearing,
        })
    }
}

/// Collapse a tearing capability query into a plain answer.
///
/// Tearing is an optimisation, so any failure reads as "unsupported".
pub fn resolve_tearing_support(query: Result<bool, SurfaceError>) -> bool {
    match query {
        Ok(supported) => supported,
        Err(e) => {
            log::debug!("tearing support unavailable: {e}");
            false
        }
    }
}
