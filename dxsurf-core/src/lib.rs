//! `dxsurf_core` -- Win32 window + DXGI swap chain wrapper.
//!
//! Registers a window class, creates a centred window with an exact client
//! size, queries tearing support, creates a flip-discard swap chain bound to
//! a caller's D3D12 command queue, and toggles borderless full-screen.
//! Rendering and GPU resource management belong to the caller.
//!
//! Consumed by:
//! - `dxsurf-cli` (demo host and capability dump)
//! - `dxsurf-ffi` (C ABI DLL for native renderers)
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`errors`] | `SurfaceError` enum via `thiserror`, fatal vs recoverable |
//! | [`geometry`] | `Rect` / `Size` / `Point` and window centring |
//! | [`style`] | `WindowStyle` bits, z-order and show commands |
//! | [`registration`] | `ClassRegistrar` once-per-process class registration |
//! | [`backend`] | `DisplayBackend` platform seam |
//! | [`surface`] | `DisplaySurface`: window ownership and full-screen toggling |
//! | [`presentation`] | Portable swap-chain description |
//! | [`config`] | `SurfaceConfig` with JSON loading via `serde` |
//! | `window` | `Win32Backend` (Windows only) |
//! | `swapchain` | DXGI swap chain and tearing query (Windows only) |

pub mod backend;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod presentation;
pub mod registration;
pub mod style;
pub mod surface;

#[cfg(windows)]
pub mod swapchain;
#[cfg(windows)]
pub mod window;
