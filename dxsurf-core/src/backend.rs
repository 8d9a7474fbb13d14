//! The display backend seam.
//!
//! [`DisplayBackend`] is the capability set the full-screen algorithm needs
//! from the platform: display and monitor geometry, window style get/set,
//! and window position/size/z-order.  [`crate::surface::DisplaySurface`]
//! only talks to the platform through this trait, so the transition logic
//! runs unchanged against the Win32 implementation and a fake in tests.
//!
//! Calls whose failure is tolerated return `bool` or
//! `Option` instead of `Result`; only class registration and window
//! creation can fail hard.

use std::fmt;

use crate::errors::SurfaceError;
use crate::geometry::{Rect, Size};
use crate::registration::ClassAtom;
use crate::style::{ShowCommand, WindowStyle, ZOrder};

pub trait DisplayBackend {
    /// Native window handle.
    type Window: Copy + fmt::Debug;

    /// Register the surface window class.  Must be idempotent.
    fn register_window_class(&mut self) -> Result<ClassAtom, SurfaceError>;

    /// Size of the primary display in pixels.
    fn primary_display_size(&self) -> Size;

    /// Outer window rectangle needed for `client` with the given style.
    fn adjust_window_rect(&self, client: Rect, style: WindowStyle) -> Rect;

    /// Create a window of the registered class at `frame`.
    fn create_window(
        &mut self,
        title: &str,
        style: WindowStyle,
        frame: Rect,
    ) -> Result<Self::Window, SurfaceError>;

    /// Current outer bounds, `None` if the query failed.
    fn window_rect(&self, window: Self::Window) -> Option<Rect>;

    /// Replace the window style.  Returns `false` if the OS rejected it.
    fn set_window_style(&mut self, window: Self::Window, style: WindowStyle) -> bool;

    /// Bounds of the monitor the window overlaps the most, or the nearest
    /// one.  `None` if the lookup failed.
    fn monitor_rect(&self, window: Self::Window) -> Option<Rect>;

    /// Move and resize the window and apply pending frame changes without
    /// activating it.  Returns `false` on failure.
    fn set_window_pos(&mut self, window: Self::Window, z_order: ZOrder, rect: Rect) -> bool;

    fn show_window(&mut self, window: Self::Window, command: ShowCommand);

    fn destroy_window(&mut self, window: Self::Window);
}
