//! Demo host: opens a surface, binds a swap chain to a fresh D3D12 direct
//! queue and runs the message loop.  F11 or Alt+Enter toggles borderless
//! full-screen.  Nothing is rendered.

use std::path::PathBuf;

use clap::Parser;
use dxsurf_core::config::SurfaceConfig;
use dxsurf_core::errors::SurfaceError;

#[derive(Parser)]
#[command(
    name = "dxsurf-window",
    about = "Open a DXGI-backed window; F11 or Alt+Enter toggles borderless full-screen"
)]
struct Args {
    /// JSON surface config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Client-area width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Client-area height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Swap-chain back buffers (2..=16)
    #[arg(long)]
    buffers: Option<u32>,

    /// Start in borderless full-screen
    #[arg(long)]
    fullscreen: bool,

    /// Skip D3D12 device and swap-chain creation
    #[arg(long)]
    no_swap_chain: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn surface_config(&self) -> Result<SurfaceConfig, SurfaceError> {
        let mut config = match &self.config {
            Some(path) => SurfaceConfig::from_path(path)?,
            None => SurfaceConfig::default(),
        };
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(buffers) = self.buffers {
            config.buffer_count = buffers;
        }
        if self.fullscreen {
            config.fullscreen = true;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(windows)]
mod host {
    use dxsurf_core::config::SurfaceConfig;
    use dxsurf_core::errors::SurfaceError;
    use dxsurf_core::surface::DisplaySurface;
    use dxsurf_core::window::{is_fullscreen_hotkey, run_message_loop, Win32Backend};
    use windows::Win32::Graphics::Direct3D::D3D_FEATURE_LEVEL_11_0;
    use windows::Win32::Graphics::Direct3D12::{
        D3D12CreateDevice, ID3D12CommandQueue, ID3D12Device, D3D12_COMMAND_LIST_TYPE_DIRECT,
        D3D12_COMMAND_QUEUE_DESC,
    };
    use windows::Win32::Graphics::Dxgi::{
        CreateDXGIFactory1, IDXGIAdapter1, IDXGIFactory4, IDXGISwapChain4,
    };

    /// GPU objects that must outlive the message loop.
    struct Presentation {
        _device: ID3D12Device,
        _queue: ID3D12CommandQueue,
        _swap_chain: IDXGISwapChain4,
    }

    fn create_queue() -> Result<(ID3D12Device, ID3D12CommandQueue), SurfaceError> {
        let factory: IDXGIFactory4 = unsafe { CreateDXGIFactory1() }?;
        let adapter: IDXGIAdapter1 = unsafe { factory.EnumAdapters1(0) }.map_err(|e| {
            SurfaceError::SwapChain(format!("no DXGI adapter available: {e}"))
        })?;

        let mut device: Option<ID3D12Device> = None;
        unsafe { D3D12CreateDevice(&adapter, D3D_FEATURE_LEVEL_11_0, &mut device) }.map_err(
            |e| SurfaceError::SwapChain(format!("D3D12CreateDevice failed: {e}")),
        )?;
        let device = device.ok_or_else(|| {
            SurfaceError::SwapChain("D3D12CreateDevice returned null device".into())
        })?;

        let queue: ID3D12CommandQueue = unsafe {
            device.CreateCommandQueue(&D3D12_COMMAND_QUEUE_DESC {
                Type: D3D12_COMMAND_LIST_TYPE_DIRECT,
                ..Default::default()
            })
        }
        .map_err(|e| SurfaceError::SwapChain(format!("CreateCommandQueue failed: {e}")))?;

        Ok((device, queue))
    }

    pub(crate) fn run(config: &SurfaceConfig, with_swap_chain: bool) -> Result<i32, SurfaceError> {
        let backend = Win32Backend::current_module()?;
        let mut surface = DisplaySurface::from_config(backend, config)?;

        let _presentation = if with_swap_chain {
            let (device, queue) = create_queue()?;
            let swap_chain = surface.create_swap_chain(
                &queue,
                config.width,
                config.height,
                config.buffer_count,
            )?;
            Some(Presentation {
                _device: device,
                _queue: queue,
                _swap_chain: swap_chain,
            })
        } else {
            None
        };

        surface.show();

        run_message_loop(|msg| {
            if is_fullscreen_hotkey(msg) {
                surface.toggle_fullscreen();
                return true;
            }
            false
        })
    }
}

#[cfg(windows)]
fn run(args: &Args) -> Result<i32, SurfaceError> {
    let config = args.surface_config()?;
    host::run(&config, !args.no_swap_chain)
}

#[cfg(not(windows))]
fn run(args: &Args) -> Result<i32, SurfaceError> {
    args.surface_config()?;
    Err(SurfaceError::Os(
        "dxsurf-window requires Windows (Win32 + DXGI)".into(),
    ))
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
