//! xmark-preload
//!
//! Loaded ahead of Xlib and cairo through `LD_PRELOAD`, this module defines
//! the five entry points xmark intercepts. Each replacement forwards to the
//! original found further down the library search order and lets the
//! [`xmark_core::Engine`] add its behavior around the call.
//!
//! The first call into any replacement initializes the process-wide engine:
//! logger, configuration from the environment, and eager registration of
//! every original. Registry failures terminate the process as described by
//! [`xmark_core::FatalAction`].

#![allow(non_snake_case)]

pub mod canvas;
pub mod ffi;
pub mod native;

use std::os::raw::{c_int, c_uint};

use once_cell::sync::OnceCell;
use xmark_core::{
    logging, Engine, EntryPoint, FatalAction, Hook, RegistryError, WatermarkConfig, WindowId,
};

use crate::canvas::CairoCanvas;
use crate::ffi::*;
use crate::native::DlsymResolver;

static ENGINE: OnceCell<Engine<DlsymResolver>> = OnceCell::new();

/// Process-wide engine, initialized by whichever thread gets here first.
/// Other threads wait for initialization to finish.
pub fn engine() -> &'static Engine<DlsymResolver> {
    ENGINE.get_or_init(|| {
        logging::init();
        let config = WatermarkConfig::from_env().unwrap_or_else(|err| {
            log::warn!(target: "xmark", "{err}; using default watermark");
            WatermarkConfig::default()
        });
        Engine::initialize(DlsymResolver, config, &replacements()).unwrap_or_else(|err| fatal(err))
    })
}

/// Addresses of this module's replacements, in registration order.
pub fn replacements() -> Vec<(Hook, EntryPoint)> {
    [
        (Hook::XCopyArea, XCopyArea as XCopyAreaFn as usize),
        (
            Hook::CairoXlibSurfaceCreate,
            cairo_xlib_surface_create as CairoXlibSurfaceCreateFn as usize,
        ),
        (Hook::CairoPaint, cairo_paint as CairoPaintFn as usize),
        (Hook::XMapWindow, XMapWindow as XMapWindowFn as usize),
        (Hook::XUnmapWindow, XUnmapWindow as XUnmapWindowFn as usize),
    ]
    .into_iter()
    .filter_map(|(hook, addr)| EntryPoint::new(addr).map(|entry| (hook, entry)))
    .collect()
}

fn fatal(err: RegistryError) -> ! {
    match err.fatal_action() {
        FatalAction::Exit(code) => std::process::exit(code),
        FatalAction::Abort => std::process::abort(),
    }
}

fn original_addr(hook: Hook, replacement: usize) -> usize {
    let Some(replacement) = EntryPoint::new(replacement) else {
        std::process::abort();
    };
    match engine().original(hook, replacement) {
        Ok(original) => original.addr(),
        Err(err) => fatal(err),
    }
}

/// Typed original of a hooked entry point: `original!(Hook::X, x as XFn)`.
macro_rules! original {
    ($hook:expr, $replacement:ident as $ty:ty) => {
        unsafe {
            std::mem::transmute::<usize, $ty>(original_addr($hook, $replacement as $ty as usize))
        }
    };
}

/// # Safety
/// Same contract as cairo's `cairo_xlib_surface_create`.
#[no_mangle]
pub unsafe extern "C" fn cairo_xlib_surface_create(
    dpy: *mut Display,
    drawable: Drawable,
    visual: *mut Visual,
    width: c_int,
    height: c_int,
) -> *mut cairo_surface_t {
    let original =
        original!(Hook::CairoXlibSurfaceCreate, cairo_xlib_surface_create as CairoXlibSurfaceCreateFn);
    let surface = original(dpy, drawable, visual, width, height);

    if let Some(info) = native::cairo().and_then(|api| unsafe { api.surface_info(surface) }) {
        engine().surface_created(&info);
    }
    surface
}

/// # Safety
/// Same contract as Xlib's `XCopyArea`.
#[no_mangle]
pub unsafe extern "C" fn XCopyArea(
    dpy: *mut Display,
    src: Drawable,
    dest: Drawable,
    gc: GC,
    src_x: c_int,
    src_y: c_int,
    width: c_uint,
    height: c_uint,
    dest_x: c_int,
    dest_y: c_int,
) -> c_int {
    let original = original!(Hook::XCopyArea, XCopyArea as XCopyAreaFn);
    engine().copy_area(WindowId(src as u64), WindowId(dest as u64), || unsafe {
        original(dpy, src, dest, gc, src_x, src_y, width, height, dest_x, dest_y)
    })
}

/// # Safety
/// Same contract as Xlib's `XMapWindow`.
#[no_mangle]
pub unsafe extern "C" fn XMapWindow(dpy: *mut Display, window: Window) -> c_int {
    let original = original!(Hook::XMapWindow, XMapWindow as XMapWindowFn);
    let attrs = native::xlib().and_then(|api| unsafe { api.window_attributes(dpy, window) });
    engine().map_window(WindowId(window as u64), attrs, || unsafe { original(dpy, window) })
}

/// # Safety
/// Same contract as Xlib's `XUnmapWindow`.
#[no_mangle]
pub unsafe extern "C" fn XUnmapWindow(dpy: *mut Display, window: Window) -> c_int {
    let original = original!(Hook::XUnmapWindow, XUnmapWindow as XUnmapWindowFn);
    engine().unmap_window(WindowId(window as u64), || unsafe { original(dpy, window) })
}

/// # Safety
/// Same contract as cairo's `cairo_paint`.
#[no_mangle]
pub unsafe extern "C" fn cairo_paint(cr: *mut cairo_t) {
    let original = original!(Hook::CairoPaint, cairo_paint as CairoPaintFn);
    let api = match native::cairo() {
        Some(api) if !cr.is_null() => api,
        _ => return original(cr),
    };

    let mut canvas = CairoCanvas::new(api, cr);
    engine().paint(
        &mut canvas,
        || unsafe { api.surface_info((api.cairo_get_target)(cr)) },
        || unsafe { original(cr) },
    );
}
