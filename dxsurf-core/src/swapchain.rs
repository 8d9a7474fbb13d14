//! DXGI swap-chain creation and the tearing capability query.
//!
//! # Tearing
//!
//! Variable refresh rate displays (G-Sync, FreeSync) need tearing allowed
//! on the swap chain.  The query goes through a DXGI 1.4 factory and asks
//! for the 1.5 interface rather than creating 1.5 directly, which keeps
//! graphics debugging tools that predate 1.5 working.
//!
//! # Swap chain
//!
//! The chain is created windowed for the surface's `HWND` and bound to a
//! borrowed D3D12 direct command queue.  DXGI's built-in Alt+Enter handler
//! is disabled: full-screen transitions belong to
//! [`DisplaySurface::set_fullscreen`].
//!
//! ```no_run
//! # fn demo(queue: &windows::Win32::Graphics::Direct3D12::ID3D12CommandQueue)
//! #     -> Result<(), dxsurf_core::errors::SurfaceError> {
//! use dxsurf_core::surface::DisplaySurface;
//! use dxsurf_core::window::Win32Backend;
//!
//! let backend = Win32Backend::current_module()?;
//! let mut surface = DisplaySurface::create(backend, "Demo", 1280, 720)?;
//! let swap_chain = surface.create_swap_chain(queue, 1280, 720, 3)?;
//! surface.show();
//! # drop(swap_chain);
//! # Ok(())
//! # }
//! ```

use std::ffi::c_void;

use windows::core::Interface;
use windows::Win32::Foundation::{BOOL, FALSE, HWND};
use windows::Win32::Graphics::Direct3D12::ID3D12CommandQueue;
use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_ALPHA_MODE_UNSPECIFIED, DXGI_FORMAT, DXGI_FORMAT_R8G8B8A8_UNORM, DXGI_SAMPLE_DESC,
};
use windows::Win32::Graphics::Dxgi::{
    CreateDXGIFactory1, CreateDXGIFactory2, IDXGIFactory4, IDXGIFactory5, IDXGISwapChain1,
    IDXGISwapChain4, DXGI_CREATE_FACTORY_DEBUG, DXGI_CREATE_FACTORY_FLAGS,
    DXGI_FEATURE_PRESENT_ALLOW_TEARING, DXGI_MWA_NO_ALT_ENTER, DXGI_SCALING,
    DXGI_SCALING_STRETCH, DXGI_SWAP_CHAIN_DESC1, DXGI_SWAP_CHAIN_FLAG_ALLOW_TEARING,
    DXGI_SWAP_EFFECT, DXGI_SWAP_EFFECT_FLIP_DISCARD, DXGI_USAGE_RENDER_TARGET_OUTPUT,
};

use crate::errors::SurfaceError;
use crate::presentation::{
    resolve_tearing_support, PixelFormat, PresentationConfig, Scaling, SwapEffect,
};
use crate::surface::DisplaySurface;
use crate::window::Win32Backend;

// ---------------------------------------------------------------------------
// Tearing support
// ---------------------------------------------------------------------------

fn query_tearing_support() -> Result<bool, SurfaceError> {
    let factory4: IDXGIFactory4 = unsafe { CreateDXGIFactory1() }.map_err(|e| {
        SurfaceError::TearingQuery(format!("CreateDXGIFactory1 failed: {e}"))
    })?;

    let factory5: IDXGIFactory5 = factory4.cast().map_err(|e| {
        SurfaceError::TearingQuery(format!("IDXGIFactory4 -> IDXGIFactory5 cast failed: {e}"))
    })?;

    let mut allow_tearing: BOOL = FALSE;
    unsafe {
        factory5
            .CheckFeatureSupport(
                DXGI_FEATURE_PRESENT_ALLOW_TEARING,
                &mut allow_tearing as *mut BOOL as *mut c_void,
                std::mem::size_of::<BOOL>() as u32,
            )
            .map_err(|e| {
                SurfaceError::TearingQuery(format!("CheckFeatureSupport failed: {e}"))
            })?;
    }

    Ok(allow_tearing.as_bool())
}

/// Whether the display stack supports presenting with tearing allowed.
///
/// Never fails: any error along the query reads as `false`.
pub fn check_tearing_support() -> bool {
    resolve_tearing_support(query_tearing_support())
}

// ---------------------------------------------------------------------------
// Swap chain
// ---------------------------------------------------------------------------

fn factory_flags() -> DXGI_CREATE_FACTORY_FLAGS {
    if cfg!(debug_assertions) {
        DXGI_CREATE_FACTORY_DEBUG
    } else {
        DXGI_CREATE_FACTORY_FLAGS(0)
    }
}

fn swap_chain_desc(config: &PresentationConfig) -> DXGI_SWAP_CHAIN_DESC1 {
    let format: DXGI_FORMAT = match config.format {
        PixelFormat::Rgba8Unorm => DXGI_FORMAT_R8G8B8A8_UNORM,
    };
    let scaling: DXGI_SCALING = match config.scaling {
        Scaling::Stretch => DXGI_SCALING_STRETCH,
    };
    let swap_effect: DXGI_SWAP_EFFECT = match config.swap_effect {
        SwapEffect::FlipDiscard => DXGI_SWAP_EFFECT_FLIP_DISCARD,
    };
    let flags = if config.allow_tearing {
        DXGI_SWAP_CHAIN_FLAG_ALLOW_TEARING.0 as u32
    } else {
        0
    };

    DXGI_SWAP_CHAIN_DESC1 {
        Width: config.width,
        Height: config.height,
        Format: format,
        Stereo: FALSE,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: config.sample_count,
            Quality: config.sample_quality,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: config.buffer_count,
        Scaling: scaling,
        SwapEffect: swap_effect,
        AlphaMode: DXGI_ALPHA_MODE_UNSPECIFIED,
        Flags: flags,
    }
}

/// Create a flip-discard swap chain for `hwnd`.
///
/// `command_queue` is only borrowed for the call.  Every failure is fatal
/// ([`SurfaceError::SwapChain`]).
pub fn create_swap_chain(
    command_queue: &ID3D12CommandQueue,
    hwnd: HWND,
    width: u32,
    height: u32,
    buffer_count: u32,
) -> Result<IDXGISwapChain4, SurfaceError> {
    let config = PresentationConfig::new(width, height, buffer_count, check_tearing_support())?;

    let factory: IDXGIFactory4 = unsafe { CreateDXGIFactory2(factory_flags()) }.map_err(|e| {
        SurfaceError::SwapChain(format!("CreateDXGIFactory2 failed: {e}"))
    })?;

    let desc = swap_chain_desc(&config);

    let swap_chain1: IDXGISwapChain1 = unsafe {
        factory
            .CreateSwapChainForHwnd(command_queue, hwnd, &desc, None, None)
            .map_err(|e| {
                SurfaceError::SwapChain(format!("CreateSwapChainForHwnd failed: {e}"))
            })?
    };

    unsafe {
        factory
            .MakeWindowAssociation(hwnd, DXGI_MWA_NO_ALT_ENTER)
            .map_err(|e| {
                SurfaceError::SwapChain(format!("MakeWindowAssociation failed: {e}"))
            })?;
    }

    let swap_chain4: IDXGISwapChain4 = swap_chain1.cast().map_err(|e| {
        SurfaceError::SwapChain(format!("IDXGISwapChain1 -> IDXGISwapChain4 cast failed: {e}"))
    })?;

    log::info!(
        "created swap chain {width}x{height}, {buffer_count} buffers, tearing {}",
        if config.allow_tearing { "on" } else { "off" }
    );
    Ok(swap_chain4)
}

impl DisplaySurface<Win32Backend> {
    pub fn hwnd(&self) -> HWND {
        self.window()
    }

    /// Create a swap chain presenting into this surface's window.
    pub fn create_swap_chain(
        &self,
        command_queue: &ID3D12CommandQueue,
        width: u32,
        height: u32,
        buffer_count: u32,
    ) -> Result<IDXGISwapChain4, SurfaceError> {
        create_swap_chain(command_queue, self.hwnd(), width, height, buffer_count)
    }
}
