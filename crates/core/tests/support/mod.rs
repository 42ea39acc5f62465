//! Shared fakes for the core integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::ffi::CStr;

use parking_lot::Mutex;
use xmark_core::{Canvas, EntryPoint, FontWeight, Operator, SymbolResolver, TextExtents};

/// Resolver backed by a fixed symbol table that counts every lookup.
#[derive(Default)]
pub struct FakeResolver {
    table: HashMap<String, usize>,
    lookups: Mutex<HashMap<String, usize>>,
}

impl FakeResolver {
    pub fn new(entries: &[(&str, usize)]) -> Self {
        Self {
            table: entries.iter().map(|(name, addr)| (name.to_string(), *addr)).collect(),
            lookups: Mutex::new(HashMap::new()),
        }
    }

    /// Every hook resolvable at `0x1000 + index * 0x10`.
    pub fn all_hooks() -> Self {
        let entries: Vec<(&str, usize)> = xmark_core::Hook::ALL
            .iter()
            .map(|hook| (hook.name(), 0x1000 + hook.index() * 0x10))
            .collect();
        Self::new(&entries)
    }

    pub fn lookups(&self, name: &str) -> usize {
        self.lookups.lock().get(name).copied().unwrap_or(0)
    }
}

impl SymbolResolver for FakeResolver {
    fn lookup_next(&self, symbol: &CStr) -> Result<EntryPoint, String> {
        let name = symbol.to_string_lossy().into_owned();
        *self.lookups.lock().entry(name.clone()).or_insert(0) += 1;
        self.table
            .get(&name)
            .and_then(|&addr| EntryPoint::new(addr))
            .ok_or_else(|| format!("undefined symbol: {name}"))
    }
}

/// Replacement addresses distinct from anything [`FakeResolver::all_hooks`] returns.
pub fn replacement(hook: xmark_core::Hook) -> EntryPoint {
    EntryPoint::new(0x9000 + hook.index() * 0x10).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Save,
    Restore,
    Operator(Operator),
    MoveTo(f64, f64),
    Source(f64, f64, f64, f64),
    Font(String, FontWeight),
    FontSize(f64),
    Rotate(f64),
    Extents(String),
    ShowText(String),
}

/// Canvas that records every call and reports fixed text extents.
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    pub extents: TextExtents,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::with_extents(TextExtents {
            x_bearing: 1.0,
            y_bearing: -30.0,
            width: 300.0,
            height: 30.0,
            x_advance: 302.0,
            y_advance: 0.0,
        })
    }

    pub fn with_extents(extents: TextExtents) -> Self {
        Self { ops: Vec::new(), extents }
    }

    pub fn shown(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::ShowText(_))).count()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn set_operator(&mut self, op: Operator) {
        self.ops.push(Op::Operator(op));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }

    fn set_source_rgba(&mut self, red: f64, green: f64, blue: f64, alpha: f64) {
        self.ops.push(Op::Source(red, green, blue, alpha));
    }

    fn select_font_face(&mut self, family: &str, weight: FontWeight) {
        self.ops.push(Op::Font(family.to_string(), weight));
    }

    fn set_font_size(&mut self, size: f64) {
        self.ops.push(Op::FontSize(size));
    }

    fn rotate(&mut self, radians: f64) {
        self.ops.push(Op::Rotate(radians));
    }

    fn text_extents(&mut self, text: &str) -> TextExtents {
        self.ops.push(Op::Extents(text.to_string()));
        self.extents
    }

    fn show_text(&mut self, text: &str) {
        self.ops.push(Op::ShowText(text.to_string()));
    }
}
