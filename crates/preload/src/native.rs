//! Runtime lookup of native functions.
//!
//! Originals of the hooked entry points come from `dlsym(RTLD_NEXT)`, which
//! skips this module. Helpers that are not hooked (drawing primitives,
//! surface introspection, window attributes) come from `dlsym(RTLD_DEFAULT)`
//! and are cached in typed tables the first time they are needed.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_void};

use once_cell::sync::OnceCell;
use xmark_core::{DeviceType, EntryPoint, SurfaceInfo, SymbolResolver, WindowAttributes, WindowId};

use crate::ffi::*;

/// Resolves originals with `dlsym(RTLD_NEXT, ..)`.
pub struct DlsymResolver;

impl SymbolResolver for DlsymResolver {
    fn lookup_next(&self, symbol: &CStr) -> Result<EntryPoint, String> {
        let addr = unsafe {
            libc::dlerror();
            libc::dlsym(libc::RTLD_NEXT, symbol.as_ptr())
        };
        EntryPoint::new(addr as usize).ok_or_else(last_dl_error)
    }
}

fn last_dl_error() -> String {
    let err = unsafe { libc::dlerror() };
    if err.is_null() {
        "symbol resolved to null".to_string()
    } else {
        unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned()
    }
}

/// Address of `symbol` in the global scope of the process, if defined.
pub fn lookup_default(symbol: &CStr) -> Option<*mut c_void> {
    let addr = unsafe { libc::dlsym(libc::RTLD_DEFAULT, symbol.as_ptr()) };
    if addr.is_null() {
        log::warn!(target: "xmark", "helper '{}' not found: {}", symbol.to_string_lossy(), last_dl_error());
        None
    } else {
        Some(addr)
    }
}

/// Declares a table of native functions loaded as a unit: either every
/// symbol resolves or the table is unavailable.
macro_rules! native_table {
    (
        $(#[$meta:meta])*
        pub struct $table:ident {
            $( $field:ident : fn($($arg:ty),*) $(-> $ret:ty)? ; )*
        }
    ) => {
        $(#[$meta])*
        pub struct $table {
            $( pub $field: unsafe extern "C" fn($($arg),*) $(-> $ret)?, )*
        }

        impl $table {
            pub fn load() -> Option<Self> {
                Some(Self {
                    $( $field: {
                        let addr = lookup_default(
                            CStr::from_bytes_with_nul(concat!(stringify!($field), "\0").as_bytes()).ok()?,
                        )?;
                        unsafe {
                            std::mem::transmute::<*mut c_void, unsafe extern "C" fn($($arg),*) $(-> $ret)?>(addr)
                        }
                    }, )*
                })
            }
        }
    };
}

native_table! {
    /// cairo drawing and introspection primitives.
    pub struct CairoApi {
        cairo_get_target: fn(*mut cairo_t) -> *mut cairo_surface_t;
        cairo_surface_get_device: fn(*mut cairo_surface_t) -> *mut cairo_device_t;
        cairo_device_get_type: fn(*mut cairo_device_t) -> c_int;
        cairo_xlib_surface_get_drawable: fn(*mut cairo_surface_t) -> Drawable;
        cairo_xlib_surface_get_width: fn(*mut cairo_surface_t) -> c_int;
        cairo_xlib_surface_get_height: fn(*mut cairo_surface_t) -> c_int;
        cairo_save: fn(*mut cairo_t);
        cairo_restore: fn(*mut cairo_t);
        cairo_set_operator: fn(*mut cairo_t, c_int);
        cairo_move_to: fn(*mut cairo_t, f64, f64);
        cairo_set_source_rgba: fn(*mut cairo_t, f64, f64, f64, f64);
        cairo_select_font_face: fn(*mut cairo_t, *const c_char, c_int, c_int);
        cairo_set_font_size: fn(*mut cairo_t, f64);
        cairo_rotate: fn(*mut cairo_t, f64);
        cairo_text_extents: fn(*mut cairo_t, *const c_char, *mut cairo_text_extents_t);
        cairo_show_text: fn(*mut cairo_t, *const c_char);
    }
}

native_table! {
    /// Xlib queries used for diagnostics.
    #[allow(non_snake_case)]
    pub struct XlibApi {
        XGetWindowAttributes: fn(*mut Display, Window, *mut XWindowAttributes) -> Status;
    }
}

static CAIRO: OnceCell<Option<CairoApi>> = OnceCell::new();
static XLIB: OnceCell<Option<XlibApi>> = OnceCell::new();

pub fn cairo() -> Option<&'static CairoApi> {
    CAIRO.get_or_init(CairoApi::load).as_ref()
}

pub fn xlib() -> Option<&'static XlibApi> {
    XLIB.get_or_init(XlibApi::load).as_ref()
}

impl CairoApi {
    /// Inspect `surface`. The drawable and size are only read for
    /// Xlib-backed surfaces; the Xlib getters are invalid on anything else.
    ///
    /// # Safety
    /// `surface` must be null or a live cairo surface.
    pub unsafe fn surface_info(&self, surface: *mut cairo_surface_t) -> Option<SurfaceInfo> {
        if surface.is_null() {
            return None;
        }
        let device = (self.cairo_surface_get_device)(surface);
        let device = if device.is_null() {
            None
        } else {
            Some(DeviceType::from_raw((self.cairo_device_get_type)(device)))
        };
        if device != Some(DeviceType::Xlib) {
            return Some(SurfaceInfo { device, drawable: None, width: 0, height: 0 });
        }
        Some(SurfaceInfo {
            device,
            drawable: Some(WindowId((self.cairo_xlib_surface_get_drawable)(surface) as u64)),
            width: (self.cairo_xlib_surface_get_width)(surface),
            height: (self.cairo_xlib_surface_get_height)(surface),
        })
    }
}

impl XlibApi {
    /// # Safety
    /// `display` must be an open display connection.
    pub unsafe fn window_attributes(
        &self,
        display: *mut Display,
        window: Window,
    ) -> Option<WindowAttributes> {
        if display.is_null() {
            return None;
        }
        let mut attrs: XWindowAttributes = std::mem::zeroed();
        if (self.XGetWindowAttributes)(display, window, &mut attrs) == 0 {
            return None;
        }
        Some(WindowAttributes {
            width: attrs.width,
            height: attrs.height,
            border_width: attrs.border_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_next_definition_of_libc_symbol() {
        let addr = DlsymResolver.lookup_next(c"getpid").expect("getpid");
        assert_ne!(addr.addr(), 0);
    }

    #[test]
    fn missing_symbol_reports_loader_error() {
        let err = DlsymResolver.lookup_next(c"xmark_no_such_symbol_anywhere").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn default_scope_lookup_finds_libc() {
        assert!(lookup_default(c"getpid").is_some());
        assert!(lookup_default(c"xmark_no_such_symbol_anywhere").is_none());
    }
}
