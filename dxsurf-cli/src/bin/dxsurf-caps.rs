//! Standalone CLI tool for dumping presentation capabilities as JSON.

use clap::Parser;
use dxsurf_core::geometry::Size;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "dxsurf-caps", about = "Report tearing support and display geometry as JSON")]
struct Args {
    /// Compact JSON output (no pretty-printing)
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Serialize)]
struct Capabilities {
    tearing_supported: bool,
    primary_display: Size,
}

#[cfg(windows)]
fn collect() -> Capabilities {
    use dxsurf_core::backend::DisplayBackend;
    use dxsurf_core::window::Win32Backend;
    use windows::Win32::Foundation::HINSTANCE;

    // Display metrics do not depend on the module handle.
    let backend = Win32Backend::new(HINSTANCE::default());
    Capabilities {
        tearing_supported: dxsurf_core::swapchain::check_tearing_support(),
        primary_display: backend.primary_display_size(),
    }
}

#[cfg(not(windows))]
fn collect() -> Capabilities {
    log::warn!("not running on Windows; reporting no capabilities");
    Capabilities {
        tearing_supported: false,
        primary_display: Size::default(),
    }
}

fn render(caps: &Capabilities, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(caps)
    } else {
        serde_json::to_string_pretty(caps)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match render(&collect(), args.compact) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("JSON serialization failed: {e}");
            std::process::exit(1);
        }
    }
}
