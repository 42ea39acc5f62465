//! Rendering surface description and the overlay eligibility filter.

use crate::windows::{WindowId, WindowTracker};

/// What backs a rendering surface, mirroring cairo's device types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Drm,
    Gl,
    Script,
    Xcb,
    Xlib,
    Xml,
    Cogl,
    Win32,
    Invalid,
    Unknown(i32),
}

impl DeviceType {
    /// Convert a raw `cairo_device_type_t` value.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => DeviceType::Drm,
            1 => DeviceType::Gl,
            2 => DeviceType::Script,
            3 => DeviceType::Xcb,
            4 => DeviceType::Xlib,
            5 => DeviceType::Xml,
            6 => DeviceType::Cogl,
            7 => DeviceType::Win32,
            -1 => DeviceType::Invalid,
            other => DeviceType::Unknown(other),
        }
    }

    /// True for surfaces drawn directly into an X window through Xlib.
    pub fn is_windowing(self) -> bool {
        self == DeviceType::Xlib
    }
}

/// Snapshot of the properties of a paint target the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    /// `None` when the surface has no device at all (e.g. an image surface).
    pub device: Option<DeviceType>,
    /// Backing drawable; only meaningful for windowing-backed surfaces.
    pub drawable: Option<WindowId>,
    pub width: i32,
    pub height: i32,
}

impl SurfaceInfo {
    /// A surface backed by the X window `id`.
    pub fn window(id: WindowId, width: i32, height: i32) -> Self {
        Self { device: Some(DeviceType::Xlib), drawable: Some(id), width, height }
    }

    /// An in-memory surface with no device.
    pub fn offscreen(width: i32, height: i32) -> Self {
        Self { device: None, drawable: None, width, height }
    }
}

/// Decide whether the watermark should be drawn onto `surface`.
///
/// Only surfaces backed directly by an on-screen window qualify, and only
/// while that window is mapped.
pub fn is_eligible(surface: &SurfaceInfo, tracker: &WindowTracker) -> bool {
    let device = match surface.device {
        Some(device) => device,
        None => {
            log::debug!(target: "cairo_paint", "surface has no device");
            return false;
        }
    };
    if !device.is_windowing() {
        log::debug!(target: "cairo_paint", "device type {device:?} is not xlib");
        return false;
    }
    let Some(drawable) = surface.drawable else {
        log::debug!(target: "cairo_paint", "xlib surface without drawable");
        return false;
    };

    let mapped = tracker.is_mapped(drawable);
    log::debug!(target: "cairo_paint", "drawable {drawable} mapped={mapped}");
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_device_types_map_to_variants() {
        assert_eq!(DeviceType::from_raw(4), DeviceType::Xlib);
        assert_eq!(DeviceType::from_raw(3), DeviceType::Xcb);
        assert_eq!(DeviceType::from_raw(-1), DeviceType::Invalid);
        assert_eq!(DeviceType::from_raw(42), DeviceType::Unknown(42));
        assert!(!DeviceType::Xcb.is_windowing());
    }
}
