//! Registry of original (un-intercepted) entry points.
//!
//! Each [`Hook`] owns one slot. A slot is filled at most once, either eagerly
//! through [`Registry::register`] during process initialization or lazily on
//! the first [`Registry::resolve`]. After that the cached [`FunctionBinding`]
//! is returned without ever asking the [`SymbolResolver`] again.
//!
//! Failures are returned as [`RegistryError`]; what the process does about
//! them is described by [`RegistryError::fatal_action`] and carried out by
//! the caller at the FFI boundary.

use std::ffi::CStr;
use std::fmt;

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::hooks::Hook;

/// Address of a native function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryPoint(usize);

impl EntryPoint {
    /// Wrap a raw address. Returns `None` for null.
    pub fn new(addr: usize) -> Option<Self> {
        (addr != 0).then_some(Self(addr))
    }

    pub fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One hooked entry point and the original it forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionBinding {
    pub hook: Hook,
    pub original: EntryPoint,
}

/// Looks up the next definition of a symbol after the interposing module.
pub trait SymbolResolver: Send + Sync {
    /// Returns the address of `symbol` in the libraries searched after this
    /// one, or a human-readable reason when none exists.
    fn lookup_next(&self, symbol: &CStr) -> Result<EntryPoint, String>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No library after the interposer defines the symbol.
    #[error("Cannot load symbol '{symbol}' {reason}")]
    NotFound { symbol: &'static str, reason: String },

    /// The lookup found the replacement itself; forwarding would recurse.
    #[error("circular reference detected for '{symbol}' at {address}, aborting!")]
    SelfReference { symbol: &'static str, address: EntryPoint },

    /// The same hook was registered twice during setup.
    #[error("duplicate registration of '{symbol}'")]
    Duplicate { symbol: &'static str },
}

/// How the process must react to a registry failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalAction {
    /// Terminate normally with the given status.
    Exit(i32),
    /// Terminate abnormally, without unwinding or exit handlers.
    Abort,
}

impl RegistryError {
    pub fn fatal_action(&self) -> FatalAction {
        match self {
            RegistryError::NotFound { .. } => FatalAction::Exit(1),
            RegistryError::SelfReference { .. } => FatalAction::Abort,
            RegistryError::Duplicate { .. } => FatalAction::Exit(0),
        }
    }
}

/// Fixed table of resolved originals, one slot per [`Hook`].
pub struct Registry<R> {
    resolver: R,
    slots: [OnceCell<FunctionBinding>; Hook::COUNT],
}

impl<R: SymbolResolver> Registry<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver, slots: Default::default() }
    }

    /// Eagerly resolve `hook` and store its binding.
    ///
    /// Registering a hook that already has a binding is a setup defect and
    /// yields [`RegistryError::Duplicate`]; the existing binding is kept.
    pub fn register(
        &self,
        hook: Hook,
        replacement: EntryPoint,
    ) -> Result<FunctionBinding, RegistryError> {
        let slot = &self.slots[hook.index()];
        if slot.get().is_some() {
            return Err(duplicate(hook));
        }
        let binding = self.lookup(hook, replacement)?;
        slot.set(binding).map_err(|_| duplicate(hook))?;
        Ok(binding)
    }

    /// Return the original for `hook`, resolving and caching it on first use.
    pub fn resolve(&self, hook: Hook, replacement: EntryPoint) -> Result<EntryPoint, RegistryError> {
        self.slots[hook.index()]
            .get_or_try_init(|| self.lookup(hook, replacement))
            .map(|binding| binding.original)
    }

    /// Cached binding for `hook`, if any. Never performs a lookup.
    pub fn binding(&self, hook: Hook) -> Option<&FunctionBinding> {
        self.slots[hook.index()].get()
    }

    /// All cached bindings in hook order.
    pub fn bindings(&self) -> Vec<FunctionBinding> {
        self.slots.iter().filter_map(|slot| slot.get().copied()).collect()
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    fn lookup(&self, hook: Hook, replacement: EntryPoint) -> Result<FunctionBinding, RegistryError> {
        let symbol = hook.name();
        log::debug!(target: symbol, "resolving original (replacement at {replacement})");

        let original = self.resolver.lookup_next(hook.symbol()).map_err(|reason| {
            let err = RegistryError::NotFound { symbol, reason };
            log::error!(target: symbol, "{err}");
            err
        })?;
        log::info!(
            target: symbol,
            "loaded symbol '{symbol}' real addr {original}  wrapped addr {replacement}"
        );

        if original == replacement {
            let err = RegistryError::SelfReference { symbol, address: original };
            log::error!(target: symbol, "{err}");
            return Err(err);
        }

        Ok(FunctionBinding { hook, original })
    }
}

fn duplicate(hook: Hook) -> RegistryError {
    let err = RegistryError::Duplicate { symbol: hook.name() };
    log::error!(target: hook.name(), "{err}");
    err
}
