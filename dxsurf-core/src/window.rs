//! Win32 implementation of [`DisplayBackend`].
//!
//! Wraps class registration, window creation, monitor lookup and window
//! positioning.  Also provides the default window procedure and a
//! `GetMessageW` pump for hosts that do not bring their own.
//!
//! [`Win32Backend`] holds a raw module handle and is `!Send`: windows must
//! be driven from the thread that created them.

use std::ffi::c_void;
use std::marker::PhantomData;

use windows::core::{Error as WindowsError, HSTRING, PCWSTR};
use windows::Win32::Foundation::{
    SetLastError, FALSE, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WIN32_ERROR, WPARAM,
};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromWindow, COLOR_WINDOW, HBRUSH, MONITORINFO,
    MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{VK_F11, VK_RETURN};
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRect, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GetMessageW, GetSystemMetrics, GetWindowRect, LoadCursorW, LoadIconW, PostQuitMessage,
    RegisterClassExW, SetWindowLongW, SetWindowPos, ShowWindow, TranslateMessage, CS_HREDRAW,
    CS_VREDRAW, GWL_STYLE, HWND_NOTOPMOST, HWND_TOP, IDC_ARROW, IDI_APPLICATION, MSG,
    SM_CXSCREEN, SM_CYSCREEN, SWP_FRAMECHANGED, SWP_NOACTIVATE, SW_MAXIMIZE, SW_NORMAL, SW_SHOW,
    WINDOW_EX_STYLE, WINDOW_STYLE, WM_DESTROY, WM_KEYDOWN, WM_SYSCHAR, WM_SYSKEYDOWN,
    WNDCLASSEXW, WNDPROC,
};

use crate::backend::DisplayBackend;
use crate::errors::SurfaceError;
use crate::geometry::{Rect, Size};
use crate::registration::{ClassAtom, ClassRegistrar, WINDOW_CLASS_NAME};
use crate::style::{ShowCommand, WindowStyle, ZOrder};

// ---------------------------------------------------------------------------
// Process-wide class registration
// ---------------------------------------------------------------------------

static WINDOW_CLASS: ClassRegistrar = ClassRegistrar::new();

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<RECT> for Rect {
    fn from(r: RECT) -> Self {
        Rect::new(r.left, r.top, r.right, r.bottom)
    }
}

impl From<Rect> for RECT {
    fn from(r: Rect) -> Self {
        RECT {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}

fn win32_style(style: WindowStyle) -> WINDOW_STYLE {
    WINDOW_STYLE(style.bits())
}

// ---------------------------------------------------------------------------
// Window procedure and message pump
// ---------------------------------------------------------------------------

/// Window procedure used when the host does not supply its own.
///
/// Posts `WM_QUIT` when the window is destroyed and swallows `WM_SYSCHAR`
/// so Alt+Enter does not beep.
pub unsafe extern "system" fn default_window_proc(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match message {
        WM_DESTROY => {
            unsafe { PostQuitMessage(0) };
            LRESULT(0)
        }
        WM_SYSCHAR => LRESULT(0),
        _ => unsafe { DefWindowProcW(hwnd, message, wparam, lparam) },
    }
}

/// Pump the calling thread's message queue until `WM_QUIT`.
///
/// `pre_dispatch` sees every message first; returning `true` marks it as
/// handled and skips translation and dispatch.  Returns the exit code
/// carried by `WM_QUIT`.
pub fn run_message_loop<F>(mut pre_dispatch: F) -> Result<i32, SurfaceError>
where
    F: FnMut(&MSG) -> bool,
{
    let mut msg = MSG::default();
    loop {
        let status = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match status.0 {
            0 => return Ok(msg.wParam.0 as i32),
            -1 => {
                return Err(SurfaceError::Os(format!(
                    "GetMessageW failed: {}",
                    WindowsError::from_win32()
                )))
            }
            _ => {}
        }

        if pre_dispatch(&msg) {
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// F11, or Alt+Enter.  Auto-repeat is ignored so holding the key does
/// not flicker between states.
pub fn is_fullscreen_hotkey(msg: &MSG) -> bool {
    let key = msg.wParam.0 as u16;
    let lparam = msg.lParam.0;
    let repeat = (lparam >> 30) & 1 == 1;
    if repeat {
        return false;
    }

    match msg.message {
        WM_KEYDOWN => key == VK_F11.0,
        WM_SYSKEYDOWN => {
            let alt_down = (lparam >> 29) & 1 == 1;
            key == VK_F11.0 || (alt_down && key == VK_RETURN.0)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

fn register_class(instance: HINSTANCE, window_proc: WNDPROC) -> Result<ClassAtom, SurfaceError> {
    let class_name = HSTRING::from(WINDOW_CLASS_NAME);

    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(|e| {
        SurfaceError::ClassRegistration(format!("LoadCursorW(IDC_ARROW) failed: {e}"))
    })?;
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }.unwrap_or_default();

    let class = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: window_proc,
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: instance,
        hIcon: icon,
        hCursor: cursor,
        // System colour brushes are passed as (index + 1).
        hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as isize as *mut c_void),
        lpszMenuName: PCWSTR::null(),
        lpszClassName: PCWSTR(class_name.as_ptr()),
        hIconSm: icon,
    };

    let atom = unsafe { RegisterClassExW(&class) };
    if atom == 0 {
        return Err(SurfaceError::ClassRegistration(format!(
            "RegisterClassExW({WINDOW_CLASS_NAME}) failed: {}",
            WindowsError::from_win32()
        )));
    }

    log::debug!("registered window class {WINDOW_CLASS_NAME} (atom 0x{atom:04X})");
    Ok(ClassAtom(atom))
}

/// [`DisplayBackend`] over the real Win32 API.
#[derive(Debug)]
pub struct Win32Backend {
    instance: HINSTANCE,
    window_proc: WNDPROC,
    _not_send: PhantomData<*const ()>,
}

impl Win32Backend {
    pub fn new(instance: HINSTANCE) -> Self {
        Self {
            instance,
            window_proc: Some(default_window_proc),
            _not_send: PhantomData,
        }
    }

    /// Backend for the executable module of the current process.
    pub fn current_module() -> Result<Self, SurfaceError> {
        let module = unsafe { GetModuleHandleW(None) }?;
        Ok(Self::new(module.into()))
    }

    /// Use `window_proc` for the window class.
    ///
    /// Only takes effect if this backend performs the process's first
    /// registration.
    pub fn with_window_proc(mut self, window_proc: WNDPROC) -> Self {
        self.window_proc = window_proc;
        self
    }

    pub fn instance(&self) -> HINSTANCE {
        self.instance
    }
}

impl DisplayBackend for Win32Backend {
    type Window = HWND;

    fn register_window_class(&mut self) -> Result<ClassAtom, SurfaceError> {
        let (instance, window_proc) = (self.instance, self.window_proc);
        WINDOW_CLASS.register_with(|| register_class(instance, window_proc))
    }

    fn primary_display_size(&self) -> Size {
        unsafe { Size::new(GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
    }

    fn adjust_window_rect(&self, client: Rect, style: WindowStyle) -> Rect {
        let mut rect: RECT = client.into();
        match unsafe { AdjustWindowRect(&mut rect, win32_style(style), FALSE) } {
            Ok(()) => rect.into(),
            Err(e) => {
                log::warn!("AdjustWindowRect failed ({e}); using client rect {client:?}");
                client
            }
        }
    }

    fn create_window(
        &mut self,
        title: &str,
        style: WindowStyle,
        frame: Rect,
    ) -> Result<HWND, SurfaceError> {
        let class_name = HSTRING::from(WINDOW_CLASS_NAME);
        let title = HSTRING::from(title);

        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                &class_name,
                &title,
                win32_style(style),
                frame.left,
                frame.top,
                frame.width(),
                frame.height(),
                None,
                None,
                self.instance,
                None,
            )
        }
        .map_err(|e| SurfaceError::WindowCreation(format!("CreateWindowExW failed: {e}")))?;

        Ok(hwnd)
    }

    fn window_rect(&self, window: HWND) -> Option<Rect> {
        let mut rect = RECT::default();
        match unsafe { GetWindowRect(window, &mut rect) } {
            Ok(()) => Some(rect.into()),
            Err(e) => {
                log::debug!("GetWindowRect({window:?}) failed: {e}");
                None
            }
        }
    }

    fn set_window_style(&mut self, window: HWND, style: WindowStyle) -> bool {
        // SetWindowLongW returns the previous value, which may legitimately
        // be 0; only the thread's last error tells a failure apart.
        unsafe { SetLastError(WIN32_ERROR(0)) };
        let previous = unsafe { SetWindowLongW(window, GWL_STYLE, style.bits() as i32) };
        if previous == 0 {
            let err = WindowsError::from_win32();
            if err.code().is_err() {
                log::debug!("SetWindowLongW(GWL_STYLE) failed: {err}");
                return false;
            }
        }
        true
    }

    fn monitor_rect(&self, window: HWND) -> Option<Rect> {
        let monitor = unsafe { MonitorFromWindow(window, MONITOR_DEFAULTTONEAREST) };
        if monitor.is_invalid() {
            return None;
        }

        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        unsafe { GetMonitorInfoW(monitor, &mut info) }
            .as_bool()
            .then(|| info.rcMonitor.into())
    }

    fn set_window_pos(&mut self, window: HWND, z_order: ZOrder, rect: Rect) -> bool {
        let insert_after = match z_order {
            ZOrder::Top => HWND_TOP,
            ZOrder::NoTopmost => HWND_NOTOPMOST,
        };

        // SWP_FRAMECHANGED makes the style set just before take effect.
        let result = unsafe {
            SetWindowPos(
                window,
                insert_after,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                SWP_FRAMECHANGED | SWP_NOACTIVATE,
            )
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                log::debug!("SetWindowPos({window:?}) failed: {e}");
                false
            }
        }
    }

    fn show_window(&mut self, window: HWND, command: ShowCommand) {
        let cmd = match command {
            ShowCommand::Show => SW_SHOW,
            ShowCommand::Normal => SW_NORMAL,
            ShowCommand::Maximize => SW_MAXIMIZE,
        };
        // Returns the previous visibility, not an error.
        let _ = unsafe { ShowWindow(window, cmd) };
    }

    fn destroy_window(&mut self, window: HWND) {
        // Already gone if the user closed it.
        if let Err(e) = unsafe { DestroyWindow(window) } {
            log::debug!("DestroyWindow({window:?}): {e}");
        }
    }
}
