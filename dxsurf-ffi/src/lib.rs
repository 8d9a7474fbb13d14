//! C ABI DLL for dxsurf -- lets a C/C++ renderer own the GPU side while
//! Rust owns the window, full-screen state and swap-chain creation.
//!
//! All exported functions follow the convention:
//! - Return `i32` status code: `DXSURF_OK=0`, `DXSURF_ERROR=-1`
//! - Surfaces are opaque pointers created by `dxsurf_surface_create()` and
//!   released by `dxsurf_surface_destroy()`
//! - Swap chains are returned as owned COM pointers; the caller `Release`s
//! - Last error retrievable via `dxsurf_last_error()`
//!
//! Every call must come from the thread that created the surface.

use std::cell::RefCell;
use std::ffi::{c_char, CStr, CString};
use std::ptr;

#[cfg(windows)]
pub mod surface;

pub const DXSURF_OK: i32 = 0;
pub const DXSURF_ERROR: i32 = -1;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Record `err` as the thread's last error and return `DXSURF_ERROR`.
#[cfg_attr(not(windows), allow(dead_code))]
fn report(err: &dxsurf_core::errors::SurfaceError) -> i32 {
    log::debug!("dxsurf ffi call failed: {err}");
    set_last_error(&err.to_string());
    DXSURF_ERROR
}

/// Borrow a null-terminated UTF-8 string.
///
/// # Safety
///
/// `ptr` must be null or a valid null-terminated C string that outlives
/// the returned reference.
#[cfg_attr(not(windows), allow(dead_code))]
unsafe fn read_utf8<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("{what} is null"));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|e| format!("{what}: invalid UTF-8: {e}"))
}

/// Retrieve the last error message (thread-local).
///
/// Successful calls do not clear the message: it stays in place until the
/// next failing dxsurf_* call on this thread replaces it, and the returned
/// pointer is valid until then.  Returns null if no call on this thread
/// has failed yet.
#[no_mangle]
pub extern "C" fn dxsurf_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}
