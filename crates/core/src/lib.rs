//! xmark-core
//!
//! Core library for the xmark watermark overlay.
//!
//! This crate holds everything that decides *what* happens when a hooked
//! windowing or rendering entry point is called: the registry of original
//! implementations, the set of currently mapped windows, the eligibility
//! filter for paint targets, and the tiling algorithm that draws the
//! watermark. It never links X11 or cairo; the native side is reached only
//! through the traits defined here ([`registry::SymbolResolver`],
//! [`watermark::Canvas`]), so all of it is testable without a display.
//!
//! The preloadable module (`xmark-preload`) and the launcher (`xmark`) are
//! thin frontends on top of this crate.

pub mod config;
pub mod engine;
pub mod hooks;
pub mod logging;
pub mod registry;
pub mod surface;
pub mod watermark;
pub mod windows;

pub use config::{ConfigError, WatermarkConfig};
pub use engine::{Engine, PaintOutcome, SkipReason};
pub use hooks::Hook;
pub use registry::{
    EntryPoint, FatalAction, FunctionBinding, Registry, RegistryError, SymbolResolver,
};
pub use surface::{is_eligible, DeviceType, SurfaceInfo};
pub use watermark::{Canvas, FontWeight, Operator, TextExtents, TileLayout, Watermark};
pub use windows::{WindowAttributes, WindowId, WindowTracker};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
