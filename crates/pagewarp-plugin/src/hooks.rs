//! Named hooks whose handlers can be replaced by plugins.
//!
//! The host router calls a hook with the visit, its arguments, and the
//! default handler it would run on its own. A plugin may register a
//! replacement; the replacement then runs instead and receives the default
//! as a continuation it is free to ignore.
//!
//! ```
//! use std::sync::Arc;
//! use pagewarp_animations::{BoxFuture, Visit};
//! use pagewarp_plugin::hooks::{DefaultHandler, HookArgs, HookName, Hooks};
//!
//! let hooks = Hooks::new();
//! hooks.replace(
//!     HookName::AnimationOutAwait,
//!     "noop",
//!     Arc::new(|_: &Visit, _: &HookArgs, _: Option<&DefaultHandler>| {
//!         Box::pin(async {}) as BoxFuture
//!     }),
//!     0,
//! );
//! assert_eq!(hooks.replacement_count(HookName::AnimationOutAwait), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use pagewarp_animations::{BoxFuture, Visit};
use serde::{Deserialize, Serialize};

/// The hooks pagewarp takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookName {
    /// Awaiting the exit animation of the current page.
    #[serde(rename = "animation:out:await")]
    AnimationOutAwait,
    /// Awaiting the entry animation of the next page.
    #[serde(rename = "animation:in:await")]
    AnimationInAwait,
}

impl HookName {
    /// Returns the hook's name as the host router spells it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnimationOutAwait => "animation:out:await",
            Self::AnimationInAwait => "animation:in:await",
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "animation:out:await" => Ok(Self::AnimationOutAwait),
            "animation:in:await" => Ok(Self::AnimationInAwait),
            other => Err(format!("Unknown hook: {other}")),
        }
    }
}

/// Arguments passed along with the visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookArgs {
    /// The host decided not to animate this phase.
    #[serde(default)]
    pub skip: bool,
}

/// The host's own implementation of a hook.
pub type DefaultHandler = Arc<dyn Fn(&Visit, &HookArgs) -> BoxFuture + Send + Sync>;

/// A replacement handler. It receives the default handler, if the caller
/// supplied one.
pub type HookHandler =
    Arc<dyn Fn(&Visit, &HookArgs, Option<&DefaultHandler>) -> BoxFuture + Send + Sync>;

struct Replacement {
    id: String,
    priority: i32,
    handler: HookHandler,
}

/// Registry of hook replacements.
///
/// Several replacements may be registered for one hook. The one with the
/// highest priority is used, and among equal priorities the most recently
/// registered.
#[derive(Default)]
pub struct Hooks {
    replacements: RwLock<HashMap<HookName, Vec<Replacement>>>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let replacements = self
            .replacements
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut map = f.debug_map();
        for (name, entries) in replacements.iter() {
            let ids: Vec<&str> = entries.iter().map(|r| r.id.as_str()).collect();
            map.entry(name, &ids);
        }
        map.finish()
    }
}

impl Hooks {
    /// Creates a registry with no replacements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a replacement for a hook under `id`.
    ///
    /// Registering the same id again for the same hook replaces the earlier
    /// entry.
    pub fn replace(
        &self,
        name: HookName,
        id: impl Into<String>,
        handler: HookHandler,
        priority: i32,
    ) {
        let id = id.into();
        tracing::debug!(hook = %name, %id, priority, "replacing hook handler");
        let mut replacements = self
            .replacements
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entries = replacements.entry(name).or_default();
        entries.retain(|r| r.id != id);
        entries.push(Replacement {
            id,
            priority,
            handler,
        });
    }

    /// Removes the replacement registered under `id`.
    ///
    /// Returns `true` if one was found and removed.
    pub fn restore(&self, name: HookName, id: &str) -> bool {
        let mut replacements = self
            .replacements
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(entries) = replacements.get_mut(&name) else {
            return false;
        };
        let len_before = entries.len();
        entries.retain(|r| r.id != id);
        let removed = entries.len() < len_before;
        if removed {
            tracing::debug!(hook = %name, id, "restored hook handler");
        }
        removed
    }

    /// Returns the number of replacements registered for a hook.
    pub fn replacement_count(&self, name: HookName) -> usize {
        self.replacements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name)
            .map_or(0, Vec::len)
    }

    /// Returns `true` if the hook has an active replacement.
    pub fn is_replaced(&self, name: HookName) -> bool {
        self.replacement_count(name) > 0
    }

    fn active(&self, name: HookName) -> Option<HookHandler> {
        let replacements = self
            .replacements
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut best: Option<&Replacement> = None;
        for entry in replacements.get(&name)? {
            if best.map_or(true, |b| entry.priority >= b.priority) {
                best = Some(entry);
            }
        }
        best.map(|r| Arc::clone(&r.handler))
    }

    /// Runs a hook.
    ///
    /// The active replacement runs if there is one, otherwise `default`.
    /// With neither, the returned future is already complete. Handlers are
    /// invoked before this returns; the future only tracks completion.
    pub fn call(
        &self,
        name: HookName,
        visit: &Visit,
        args: &HookArgs,
        default: Option<&DefaultHandler>,
    ) -> BoxFuture {
        if let Some(handler) = self.active(name) {
            tracing::trace!(hook = %name, "calling replacement handler");
            return handler(visit, args, default);
        }
        match default {
            Some(default) => default(visit, args),
            None => Box::pin(std::future::ready(())),
        }
    }
}
