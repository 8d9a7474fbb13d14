//! Surface, full-screen and swap-chain entry points (Windows only).

use std::ffi::{c_char, c_void};
use std::ptr;

use dxsurf_core::surface::DisplaySurface;
use dxsurf_core::swapchain::check_tearing_support;
use dxsurf_core::window::Win32Backend;
use windows::core::Interface;
use windows::Win32::Foundation::HINSTANCE;
use windows::Win32::Graphics::Direct3D12::ID3D12CommandQueue;

use crate::{read_utf8, report, set_last_error, DXSURF_ERROR, DXSURF_OK};

/// Opaque surface handle handed to C callers.
pub struct DxsurfSurface(DisplaySurface<Win32Backend>);

fn backend_for(hinstance: *mut c_void) -> Result<Win32Backend, dxsurf_core::errors::SurfaceError> {
    if hinstance.is_null() {
        Win32Backend::current_module()
    } else {
        Ok(Win32Backend::new(HINSTANCE(hinstance)))
    }
}

/// Register the window class.  Safe to call more than once.
///
/// A null `hinstance` uses the executable's module handle.
#[no_mangle]
pub extern "C" fn dxsurf_register_window_class(hinstance: *mut c_void) -> i32 {
    let result = backend_for(hinstance)
        .and_then(|mut backend| DisplaySurface::register_window_class(&mut backend));
    match result {
        Ok(_) => DXSURF_OK,
        Err(e) => report(&e),
    }
}

/// Create a centred window with a `width` x `height` client area.
///
/// # Safety
///
/// `title` must be a valid null-terminated UTF-8 C string.
/// `out_surface` must be a valid pointer; on success it receives a surface
/// to be released with `dxsurf_surface_destroy()`.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_create(
    hinstance: *mut c_void,
    title: *const c_char,
    width: u32,
    height: u32,
    out_surface: *mut *mut DxsurfSurface,
) -> i32 {
    if out_surface.is_null() {
        set_last_error("out_surface is null");
        return DXSURF_ERROR;
    }

    let title = match unsafe { read_utf8(title, "title") } {
        Ok(t) => t,
        Err(msg) => {
            set_last_error(&msg);
            return DXSURF_ERROR;
        }
    };

    let result = backend_for(hinstance)
        .and_then(|backend| DisplaySurface::create(backend, title, width, height));
    match result {
        Ok(surface) => {
            unsafe { *out_surface = Box::into_raw(Box::new(DxsurfSurface(surface))) };
            DXSURF_OK
        }
        Err(e) => report(&e),
    }
}

/// Destroy the window and free the surface.
///
/// # Safety
///
/// `surface` must be null or a pointer from `dxsurf_surface_create()` that
/// has not been destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_destroy(surface: *mut DxsurfSurface) {
    if !surface.is_null() {
        drop(unsafe { Box::from_raw(surface) });
    }
}

/// Native `HWND` of the surface, or null for a null surface.
///
/// # Safety
///
/// `surface` must be null or a live surface pointer.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_hwnd(surface: *const DxsurfSurface) -> *mut c_void {
    match unsafe { surface.as_ref() } {
        Some(s) => s.0.hwnd().0,
        None => ptr::null_mut(),
    }
}

/// # Safety
///
/// `surface` must be null or a live surface pointer.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_show(surface: *mut DxsurfSurface) -> i32 {
    let Some(surface) = (unsafe { surface.as_mut() }) else {
        set_last_error("surface is null");
        return DXSURF_ERROR;
    };
    surface.0.show();
    DXSURF_OK
}

/// Enter (`fullscreen != 0`) or leave borderless full-screen.
///
/// # Safety
///
/// `surface` must be null or a live surface pointer.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_set_fullscreen(
    surface: *mut DxsurfSurface,
    fullscreen: i32,
) -> i32 {
    let Some(surface) = (unsafe { surface.as_mut() }) else {
        set_last_error("surface is null");
        return DXSURF_ERROR;
    };
    surface.0.set_fullscreen(fullscreen != 0);
    DXSURF_OK
}

/// # Safety
///
/// `surface` must be null or a live surface pointer.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_toggle_fullscreen(surface: *mut DxsurfSurface) -> i32 {
    let Some(surface) = (unsafe { surface.as_mut() }) else {
        set_last_error("surface is null");
        return DXSURF_ERROR;
    };
    surface.0.toggle_fullscreen();
    DXSURF_OK
}

/// Returns 1 when full-screen, 0 when windowed, `DXSURF_ERROR` for null.
///
/// # Safety
///
/// `surface` must be null or a live surface pointer.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_is_fullscreen(surface: *const DxsurfSurface) -> i32 {
    match unsafe { surface.as_ref() } {
        Some(s) => i32::from(s.0.is_fullscreen()),
        None => {
            set_last_error("surface is null");
            DXSURF_ERROR
        }
    }
}

/// Returns 1 if tearing is supported, 0 otherwise.  Never fails.
#[no_mangle]
pub extern "C" fn dxsurf_check_tearing_support() -> i32 {
    i32::from(check_tearing_support())
}

/// Create a swap chain for the surface's window.
///
/// # Safety
///
/// `surface` must be a live surface pointer.  `command_queue` must be a
/// valid `ID3D12CommandQueue*`; it is only borrowed for the call.
/// `out_swap_chain` must be a valid pointer; on success it receives an
/// owned `IDXGISwapChain4*` that the caller must `Release`.
#[no_mangle]
pub unsafe extern "C" fn dxsurf_surface_create_swap_chain(
    surface: *const DxsurfSurface,
    command_queue: *mut c_void,
    width: u32,
    height: u32,
    buffer_count: u32,
    out_swap_chain: *mut *mut c_void,
) -> i32 {
    if out_swap_chain.is_null() {
        set_last_error("out_swap_chain is null");
        return DXSURF_ERROR;
    }
    let Some(surface) = (unsafe { surface.as_ref() }) else {
        set_last_error("surface is null");
        return DXSURF_ERROR;
    };
    let Some(queue) = (unsafe { ID3D12CommandQueue::from_raw_borrowed(&command_queue) }) else {
        set_last_error("command_queue is null");
        return DXSURF_ERROR;
    };

    match surface
        .0
        .create_swap_chain(queue, width, height, buffer_count)
    {
        Ok(swap_chain) => {
            unsafe { *out_swap_chain = swap_chain.into_raw() };
            DXSURF_OK
        }
        Err(e) => report(&e),
    }
}
