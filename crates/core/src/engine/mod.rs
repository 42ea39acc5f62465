//! Interception behaviors.
//!
//! [`Engine`] owns the process-wide state (registry of originals and the
//! mapped-window tracker) plus the configured watermark. Each hooked entry
//! point is a decorator: the native replacement passes the call to the
//! original as a closure, and the engine runs its extra behavior before or
//! after it. Results from the original are returned unchanged.

use crate::config::WatermarkConfig;
use crate::hooks::Hook;
use crate::registry::{EntryPoint, Registry, RegistryError, SymbolResolver};
use crate::surface::{is_eligible, SurfaceInfo};
use crate::watermark::{Canvas, TileLayout, Watermark};
use crate::windows::{WindowAttributes, WindowId, WindowTracker};

/// Why a paint call got no overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The paint target could not be inspected.
    NoSurface,
    /// Not a mapped, window-backed surface.
    NotEligible,
    /// At or below the minimum size.
    TooSmall,
    /// The configured text is empty.
    NoText,
}

/// What happened after the original paint returned.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOutcome {
    Skipped(SkipReason),
    Drawn(TileLayout),
}

impl PaintOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, PaintOutcome::Drawn(_))
    }
}

pub struct Engine<R> {
    registry: Registry<R>,
    tracker: WindowTracker,
    watermark: Watermark,
}

impl<R: SymbolResolver> Engine<R> {
    /// Engine with an empty registry; originals resolve lazily.
    pub fn new(resolver: R, config: WatermarkConfig) -> Self {
        Self {
            registry: Registry::new(resolver),
            tracker: WindowTracker::new(),
            watermark: Watermark::new(config),
        }
    }

    /// Engine with every replacement in `replacements` registered up front.
    pub fn initialize(
        resolver: R,
        config: WatermarkConfig,
        replacements: &[(Hook, EntryPoint)],
    ) -> Result<Self, RegistryError> {
        let engine = Self::new(resolver, config);
        for &(hook, replacement) in replacements {
            engine.registry.register(hook, replacement)?;
        }
        Ok(engine)
    }

    /// Original entry point behind `hook`.
    pub fn original(&self, hook: Hook, replacement: EntryPoint) -> Result<EntryPoint, RegistryError> {
        self.registry.resolve(hook, replacement)
    }

    pub fn registry(&self) -> &Registry<R> {
        &self.registry
    }

    pub fn tracker(&self) -> &WindowTracker {
        &self.tracker
    }

    pub fn watermark(&self) -> &Watermark {
        &self.watermark
    }

    /// Called with the surface returned by the original surface constructor.
    pub fn surface_created(&self, surface: &SurfaceInfo) {
        let drawable = surface.drawable.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        log::debug!(
            target: Hook::CairoXlibSurfaceCreate.name(),
            "Drawable wid={drawable} width={} height={}",
            surface.width,
            surface.height
        );
    }

    pub fn copy_area<T>(&self, src: WindowId, dest: WindowId, forward: impl FnOnce() -> T) -> T {
        log::debug!(target: Hook::XCopyArea.name(), "src={src} dest={dest}");
        forward()
    }

    /// Record `window` as mapped, then forward.
    pub fn map_window<T>(
        &self,
        window: WindowId,
        attrs: Option<WindowAttributes>,
        forward: impl FnOnce() -> T,
    ) -> T {
        match attrs {
            Some(a) => log::debug!(
                target: Hook::XMapWindow.name(),
                "Drawable dest = {window} size={}*{} border_width={}",
                a.width,
                a.height,
                a.border_width
            ),
            None => log::debug!(
                target: Hook::XMapWindow.name(),
                "Drawable dest = {window} (attributes unavailable)"
            ),
        }
        self.tracker.on_map(window);
        forward()
    }

    /// Forget every record of `window`, then forward.
    pub fn unmap_window<T>(&self, window: WindowId, forward: impl FnOnce() -> T) -> T {
        let removed = self.tracker.on_unmap(window);
        log::debug!(target: Hook::XUnmapWindow.name(), "window {window} removed {removed} record(s)");
        forward()
    }

    /// Forward the paint, then overlay the watermark if the target qualifies.
    ///
    /// `probe` is only called after the original paint returned.
    pub fn paint<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        probe: impl FnOnce() -> Option<SurfaceInfo>,
        forward: impl FnOnce(),
    ) -> PaintOutcome {
        forward();
        log::debug!(target: Hook::CairoPaint.name(), "cairo paint");

        let Some(surface) = probe() else {
            return PaintOutcome::Skipped(SkipReason::NoSurface);
        };
        if !is_eligible(&surface, &self.tracker) {
            return PaintOutcome::Skipped(SkipReason::NotEligible);
        }
        if self.watermark.too_small(surface.width, surface.height) {
            return PaintOutcome::Skipped(SkipReason::TooSmall);
        }
        match self.watermark.paint(canvas, surface.width, surface.height) {
            Some(layout) => {
                log::debug!(
                    target: Hook::CairoPaint.name(),
                    "watermarked {}x{} with {} tiles",
                    surface.width,
                    surface.height,
                    layout.tiles.len()
                );
                PaintOutcome::Drawn(layout)
            }
            None => PaintOutcome::Skipped(SkipReason::NoText),
        }
    }
}
