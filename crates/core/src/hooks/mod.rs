//! The fixed set of native entry points xmark replaces.
//!
//! The set is closed and known at build time, so every hook has a dense
//! slot index and the registry can be a plain array instead of a map keyed
//! by symbol name.

use std::ffi::CStr;
use std::fmt;

/// One hooked windowing/rendering entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `XCopyArea`: pixel copy between drawables.
    XCopyArea,
    /// `cairo_xlib_surface_create`: rendering surface for an X drawable.
    CairoXlibSurfaceCreate,
    /// `cairo_paint`: paint the current source everywhere.
    CairoPaint,
    /// `XMapWindow`: request a window be shown.
    XMapWindow,
    /// `XUnmapWindow`: request a window be hidden.
    XUnmapWindow,
}

impl Hook {
    /// Number of hooks; the size of every per-hook table.
    pub const COUNT: usize = 5;

    /// All hooks, in registration order.
    pub const ALL: [Hook; Hook::COUNT] = [
        Hook::XCopyArea,
        Hook::CairoXlibSurfaceCreate,
        Hook::CairoPaint,
        Hook::XMapWindow,
        Hook::XUnmapWindow,
    ];

    /// Dense slot index in `0..Hook::COUNT`.
    pub const fn index(self) -> usize {
        match self {
            Hook::XCopyArea => 0,
            Hook::CairoXlibSurfaceCreate => 1,
            Hook::CairoPaint => 2,
            Hook::XMapWindow => 3,
            Hook::XUnmapWindow => 4,
        }
    }

    /// Native symbol name, NUL-terminated for `dlsym`.
    pub fn symbol(self) -> &'static CStr {
        match self {
            Hook::XCopyArea => c"XCopyArea",
            Hook::CairoXlibSurfaceCreate => c"cairo_xlib_surface_create",
            Hook::CairoPaint => c"cairo_paint",
            Hook::XMapWindow => c"XMapWindow",
            Hook::XUnmapWindow => c"XUnmapWindow",
        }
    }

    /// Native symbol name without the terminator.
    pub fn name(self) -> &'static str {
        match self {
            Hook::XCopyArea => "XCopyArea",
            Hook::CairoXlibSurfaceCreate => "cairo_xlib_surface_create",
            Hook::CairoPaint => "cairo_paint",
            Hook::XMapWindow => "XMapWindow",
            Hook::XUnmapWindow => "XUnmapWindow",
        }
    }

    /// Reverse lookup by native symbol name.
    pub fn from_symbol(name: &str) -> Option<Hook> {
        Hook::ALL.into_iter().find(|hook| hook.name() == name)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
