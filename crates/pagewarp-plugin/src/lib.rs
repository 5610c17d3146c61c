//! # pagewarp-plugin
//!
//! Connects pagewarp animations to a host router. The router exposes named
//! hooks for awaiting the out and in animation of each visit; [`JsPlugin`]
//! replaces both with a lookup in its compiled animation list.
//!
//! ## Modules
//!
//! - [`options`] - Plugin options and accepted input shapes
//! - [`hooks`] - The hook registry shared with the host
//! - [`plugin`] - The plugin itself
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use pagewarp_animations::{handler::handler, Animation, Visit};
//! use pagewarp_plugin::{HookArgs, HookName, Hooks, JsPlugin};
//!
//! let plugin = Arc::new(
//!     JsPlugin::new(vec![Animation::new("/", "/about").on_out(handler(|done, _| done.call()))])
//!         .unwrap(),
//! );
//! let hooks = Hooks::new();
//! plugin.mount(&hooks);
//!
//! // Handlers run as soon as the hook is called; awaiting tracks completion.
//! let _finished = hooks.call(
//!     HookName::AnimationOutAwait,
//!     &Visit::new("/", "/about"),
//!     &HookArgs::default(),
//!     None,
//! );
//! plugin.unmount(&hooks);
//! ```

pub mod hooks;
pub mod options;
pub mod plugin;

pub use hooks::{DefaultHandler, HookArgs, HookHandler, HookName, Hooks};
pub use options::{InitOptions, Options};
pub use plugin::{JsPlugin, HOOK_PRIORITY};
