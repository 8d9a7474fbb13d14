//! Window style bits and the command enums the surface hands to a backend.
//!
//! [`WindowStyle`] uses the numeric values of the Win32 `WS_*` constants so
//! the Win32 backend can pass [`WindowStyle::bits`] straight through.

use bitflags::bitflags;

bitflags! {
    /// Subset of the Win32 window styles the surface toggles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        const CAPTION = 0x00C0_0000;
        const SYSMENU = 0x0008_0000;
        const THICKFRAME = 0x0004_0000;
        const MINIMIZEBOX = 0x0002_0000;
        const MAXIMIZEBOX = 0x0001_0000;

        /// `WS_OVERLAPPEDWINDOW`: resizable, minimizable, maximizable, framed.
        const OVERLAPPED_WINDOW = Self::CAPTION.bits()
            | Self::SYSMENU.bits()
            | Self::THICKFRAME.bits()
            | Self::MINIMIZEBOX.bits()
            | Self::MAXIMIZEBOX.bits();
    }
}

impl WindowStyle {
    /// Decorations removed so the client area can cover a whole monitor.
    pub fn borderless() -> Self {
        Self::OVERLAPPED_WINDOW
            - (Self::CAPTION
                | Self::SYSMENU
                | Self::THICKFRAME
                | Self::MINIMIZEBOX
                | Self::MAXIMIZEBOX)
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::OVERLAPPED_WINDOW
    }
}

/// Where a repositioned window lands in the z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// `HWND_TOP`
    Top,
    /// `HWND_NOTOPMOST`: above normal windows, behind always-on-top ones.
    NoTopmost,
}

/// Show state passed to `ShowWindow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    Show,
    Normal,
    Maximize,
}
