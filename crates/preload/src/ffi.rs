//! The slice of the Xlib and cairo C ABI used by the hooks.
//!
//! Nothing here is linked at build time: every function is looked up in the
//! host process at runtime (see [`crate::native`]).

#![allow(non_camel_case_types)]

use std::os::raw::{c_int, c_long, c_uint, c_ulong, c_void};

use xmark_core::TextExtents;

pub type Display = c_void;
pub type Visual = c_void;
pub type Screen = c_void;
pub type GC = *mut c_void;
pub type Window = c_ulong;
pub type Drawable = c_ulong;
pub type Colormap = c_ulong;
pub type Bool = c_int;
pub type Status = c_int;

#[repr(C)]
pub struct cairo_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct cairo_surface_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct cairo_device_t {
    _private: [u8; 0],
}

pub const CAIRO_OPERATOR_OVER: c_int = 2;
pub const CAIRO_OPERATOR_ATOP: c_int = 5;
pub const CAIRO_FONT_SLANT_NORMAL: c_int = 0;
pub const CAIRO_FONT_WEIGHT_NORMAL: c_int = 0;
pub const CAIRO_FONT_WEIGHT_BOLD: c_int = 1;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct cairo_text_extents_t {
    pub x_bearing: f64,
    pub y_bearing: f64,
    pub width: f64,
    pub height: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

impl From<cairo_text_extents_t> for TextExtents {
    fn from(e: cairo_text_extents_t) -> Self {
        TextExtents {
            x_bearing: e.x_bearing,
            y_bearing: e.y_bearing,
            width: e.width,
            height: e.height,
            x_advance: e.x_advance,
            y_advance: e.y_advance,
        }
    }
}

/// `XWindowAttributes` from `<X11/Xlib.h>`.
#[repr(C)]
pub struct XWindowAttributes {
    pub x: c_int,
    pub y: c_int,
    pub width: c_int,
    pub height: c_int,
    pub border_width: c_int,
    pub depth: c_int,
    pub visual: *mut Visual,
    pub root: Window,
    pub class: c_int,
    pub bit_gravity: c_int,
    pub win_gravity: c_int,
    pub backing_store: c_int,
    pub backing_planes: c_ulong,
    pub backing_pixel: c_ulong,
    pub save_under: Bool,
    pub colormap: Colormap,
    pub map_installed: Bool,
    pub map_state: c_int,
    pub all_event_masks: c_long,
    pub your_event_mask: c_long,
    pub do_not_propagate_mask: c_long,
    pub override_redirect: Bool,
    pub screen: *mut Screen,
}

// Signatures of the hooked entry points.
pub type XCopyAreaFn = unsafe extern "C" fn(
    *mut Display,
    Drawable,
    Drawable,
    GC,
    c_int,
    c_int,
    c_uint,
    c_uint,
    c_int,
    c_int,
) -> c_int;
pub type XMapWindowFn = unsafe extern "C" fn(*mut Display, Window) -> c_int;
pub type XUnmapWindowFn = unsafe extern "C" fn(*mut Display, Window) -> c_int;
pub type CairoXlibSurfaceCreateFn = unsafe extern "C" fn(
    *mut Display,
    Drawable,
    *mut Visual,
    c_int,
    c_int,
) -> *mut cairo_surface_t;
pub type CairoPaintFn = unsafe extern "C" fn(*mut cairo_t);
