//! [`Canvas`] over a raw cairo context.

use std::ffi::CString;

use xmark_core::{Canvas, FontWeight, Operator, TextExtents};

use crate::ffi::*;
use crate::native::CairoApi;

pub struct CairoCanvas<'a> {
    api: &'a CairoApi,
    cr: *mut cairo_t,
}

impl<'a> CairoCanvas<'a> {
    /// # Safety
    /// `cr` must be a live, non-null cairo context for as long as the canvas
    /// is used.
    pub unsafe fn new(api: &'a CairoApi, cr: *mut cairo_t) -> Self {
        Self { api, cr }
    }
}

fn operator_raw(op: Operator) -> i32 {
    match op {
        Operator::Over => CAIRO_OPERATOR_OVER,
        Operator::Atop => CAIRO_OPERATOR_ATOP,
    }
}

fn weight_raw(weight: FontWeight) -> i32 {
    match weight {
        FontWeight::Normal => CAIRO_FONT_WEIGHT_NORMAL,
        FontWeight::Bold => CAIRO_FONT_WEIGHT_BOLD,
    }
}

impl Canvas for CairoCanvas<'_> {
    fn save(&mut self) {
        unsafe { (self.api.cairo_save)(self.cr) }
    }

    fn restore(&mut self) {
        unsafe { (self.api.cairo_restore)(self.cr) }
    }

    fn set_operator(&mut self, op: Operator) {
        unsafe { (self.api.cairo_set_operator)(self.cr, operator_raw(op)) }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        unsafe { (self.api.cairo_move_to)(self.cr, x, y) }
    }

    fn set_source_rgba(&mut self, red: f64, green: f64, blue: f64, alpha: f64) {
        unsafe { (self.api.cairo_set_source_rgba)(self.cr, red, green, blue, alpha) }
    }

    fn select_font_face(&mut self, family: &str, weight: FontWeight) {
        let Ok(family) = CString::new(family) else { return };
        unsafe {
            (self.api.cairo_select_font_face)(
                self.cr,
                family.as_ptr(),
                CAIRO_FONT_SLANT_NORMAL,
                weight_raw(weight),
            )
        }
    }

    fn set_font_size(&mut self, size: f64) {
        unsafe { (self.api.cairo_set_font_size)(self.cr, size) }
    }

    fn rotate(&mut self, radians: f64) {
        unsafe { (self.api.cairo_rotate)(self.cr, radians) }
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        let Ok(text) = CString::new(text) else { return TextExtents::default() };
        let mut extents = cairo_text_extents_t::default();
        unsafe { (self.api.cairo_text_extents)(self.cr, text.as_ptr(), &mut extents) };
        extents.into()
    }

    fn show_text(&mut self, text: &str) {
        let Ok(text) = CString::new(text) else { return };
        unsafe { (self.api.cairo_show_text)(self.cr, text.as_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_map_to_cairo_values() {
        assert_eq!(operator_raw(Operator::Atop), 5);
        assert_eq!(operator_raw(Operator::Over), 2);
        assert_eq!(weight_raw(FontWeight::Bold), 1);
        assert_eq!(weight_raw(FontWeight::Normal), 0);
    }

    #[test]
    fn cairo_extents_convert_field_by_field() {
        let raw = cairo_text_extents_t {
            x_bearing: 1.5,
            y_bearing: -28.0,
            width: 310.0,
            height: 29.0,
            x_advance: 312.0,
            y_advance: 0.0,
        };
        let extents: TextExtents = raw.into();
        assert_eq!(extents.x_bearing, 1.5);
        assert_eq!(extents.y_bearing, -28.0);
        assert_eq!(extents.width, 310.0);
        assert_eq!(extents.height, 29.0);
        assert_eq!(extents.x_advance, 312.0);
    }
}
