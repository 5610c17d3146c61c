//! Animation handlers and the completion callback.
//!
//! A handler is invoked with a [`Done`] callback and the [`AnimationData`]
//! for the phase. It signals completion by calling [`Done::call`], by
//! returning a future, or both; see [`run_animation`](crate::run_animation).

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::data::AnimationData;

/// A boxed, sendable future with no output.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// The type for animation handler functions.
///
/// Callback-style handlers return `None` and call [`Done`] when finished.
/// Future-style handlers return `Some(future)`. The handler is wrapped in an
/// `Arc` so compiled animations can share it without cloning the closure.
pub type AnimationHandler = Arc<dyn Fn(Done, &AnimationData) -> Option<BoxFuture> + Send + Sync>;

/// The phase of a navigation being animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The new page is entering.
    In,
    /// The current page is leaving.
    Out,
}

impl Direction {
    /// Returns `"in"` or `"out"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(format!("Unknown animation direction: {other}")),
        }
    }
}

/// Completion callback passed to every handler.
///
/// Cloning is cheap and every clone completes the same run. Only the first
/// call has an effect. Dropping all clones without calling does not complete
/// the run.
#[derive(Clone)]
pub struct Done {
    sender: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("called", &self.is_called())
            .finish()
    }
}

impl Done {
    /// Creates a callback and the receiver it resolves.
    pub(crate) fn channel() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Signals that the animation has finished.
    pub fn call(&self) {
        let sender = self.sender.lock().ok().and_then(|mut slot| slot.take());
        if let Some(tx) = sender {
            // The run may already have completed through the returned future.
            tx.send(()).ok();
        }
    }

    /// Returns `true` once any clone has been called.
    pub fn is_called(&self) -> bool {
        self.sender.lock().map_or(true, |slot| slot.is_none())
    }
}

/// Wraps a callback-style handler.
///
/// # Examples
///
/// ```
/// use pagewarp_animations::handler::handler;
///
/// let fade_out = handler(|done, data| {
///     tracing::info!(url = %data.from.url, "fading out");
///     done.call();
/// });
/// ```
pub fn handler<F>(f: F) -> AnimationHandler
where
    F: Fn(Done, &AnimationData) + Send + Sync + 'static,
{
    Arc::new(move |done: Done, data: &AnimationData| {
        f(done, data);
        None
    })
}

/// Wraps a future-style handler. The handler receives an owned copy of the
/// animation data so the future can outlive the call.
///
/// # Examples
///
/// ```
/// use pagewarp_animations::handler::async_handler;
///
/// let slide_in = async_handler(|data| async move {
///     tracing::info!(url = %data.to.url, "sliding in");
/// });
/// ```
pub fn async_handler<F, Fut>(f: F) -> AnimationHandler
where
    F: Fn(AnimationData) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |_done: Done, data: &AnimationData| {
        Some(Box::pin(f(data.clone())) as BoxFuture)
    })
}

/// A handler that completes immediately.
pub fn immediate() -> AnimationHandler {
    handler(|done, _| done.call())
}
