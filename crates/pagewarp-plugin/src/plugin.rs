//! The animation plugin.

use std::sync::Arc;

use pagewarp_animations::{
    assemble_animation_data, compile_animations, find_animation_for_visit, run_animation,
    Animation, BoxFuture, CompiledAnimation, Direction, Visit,
};
use pagewarp_core::logging::visit_span;
use pagewarp_core::PagewarpResult;
use tracing::Instrument;

use crate::hooks::{DefaultHandler, HookArgs, HookName, Hooks};
use crate::options::{InitOptions, Options};

/// Priority of the plugin's hook replacements. Negative so that any
/// replacement registered with the default priority takes precedence.
pub const HOOK_PRIORITY: i32 = -1;

/// Runs declared animations in place of the host's own animation hooks.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pagewarp_animations::{handler::handler, Animation};
/// use pagewarp_plugin::{Hooks, JsPlugin};
///
/// let plugin = JsPlugin::new(vec![
///     Animation::new("/", "/about").on_out(handler(|done, _| done.call())),
/// ])
/// .unwrap();
/// assert_eq!(plugin.animations().len(), 2);
///
/// let plugin = Arc::new(plugin);
/// let hooks = Hooks::new();
/// plugin.mount(&hooks);
/// ```
#[derive(Debug)]
pub struct JsPlugin {
    options: Options,
    animations: Arc<[CompiledAnimation]>,
}

impl JsPlugin {
    /// The plugin's name, used as its hook replacement id.
    pub const NAME: &'static str = "JsPlugin";

    /// Normalizes the options, appends the fallback animation and compiles
    /// every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PagewarpError::InvalidPattern`](pagewarp_core::PagewarpError::InvalidPattern)
    /// for the first pattern that fails to compile.
    pub fn new(init: impl Into<InitOptions>) -> PagewarpResult<Self> {
        let mut options = init.into().into_options();
        options.animations.push(Animation::fallback());
        let animations = compile_animations(&options.animations, &options.match_options)?;
        tracing::debug!(count = animations.len(), "plugin initialized");
        Ok(Self {
            options,
            animations: animations.into(),
        })
    }

    /// The plugin's name.
    pub const fn name(&self) -> &'static str {
        Self::NAME
    }

    /// The resolved options, including the appended fallback animation.
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The compiled animations, in declaration order.
    pub fn animations(&self) -> &[CompiledAnimation] {
        &self.animations
    }

    /// A shared handle to the compiled animations.
    pub fn shared_animations(&self) -> Arc<[CompiledAnimation]> {
        Arc::clone(&self.animations)
    }

    /// Takes over both animation await hooks.
    pub fn mount(self: &Arc<Self>, hooks: &Hooks) {
        let plugin = Arc::clone(self);
        hooks.replace(
            HookName::AnimationOutAwait,
            Self::NAME,
            Arc::new(
                move |visit: &Visit, args: &HookArgs, _: Option<&DefaultHandler>| {
                    plugin.await_out_animation(visit, args)
                },
            ),
            HOOK_PRIORITY,
        );

        let plugin = Arc::clone(self);
        hooks.replace(
            HookName::AnimationInAwait,
            Self::NAME,
            Arc::new(
                move |visit: &Visit, args: &HookArgs, _: Option<&DefaultHandler>| {
                    plugin.await_in_animation(visit, args)
                },
            ),
            HOOK_PRIORITY,
        );
    }

    /// Gives both hooks back to the host.
    pub fn unmount(&self, hooks: &Hooks) {
        hooks.restore(HookName::AnimationOutAwait, Self::NAME);
        hooks.restore(HookName::AnimationInAwait, Self::NAME);
    }

    /// Replacement for the out-animation hook.
    pub fn await_out_animation(&self, visit: &Visit, args: &HookArgs) -> BoxFuture {
        if args.skip {
            return Box::pin(std::future::ready(()));
        }
        self.find_and_run_animation(visit, Direction::Out)
    }

    /// Replacement for the in-animation hook.
    pub fn await_in_animation(&self, visit: &Visit, args: &HookArgs) -> BoxFuture {
        if args.skip {
            return Box::pin(std::future::ready(()));
        }
        self.find_and_run_animation(visit, Direction::In)
    }

    /// Finds the best animation for the visit and runs its handler for
    /// `direction`.
    ///
    /// Ranking happens on every call, so the out and in phases of a visit
    /// rank independently.
    pub fn find_and_run_animation(&self, visit: &Visit, direction: Direction) -> BoxFuture {
        run_best_animation(&self.animations, visit, direction)
    }
}

/// Ranks `animations` against the visit and runs the winner's handler.
///
/// A visit nothing matches is logged and completes without animating.
fn run_best_animation(
    animations: &[CompiledAnimation],
    visit: &Visit,
    direction: Direction,
) -> BoxFuture {
    let span = visit_span(&visit.from.url, &visit.to.url);
    let run = span.in_scope(|| {
        let Some(animation) = find_animation_for_visit(animations, visit) else {
            tracing::warn!(%direction, "No animation found for visit");
            return None;
        };
        let data = assemble_animation_data(animation, visit, direction);
        Some(run_animation(Some(animation), &data))
    });

    match run {
        Some(run) => Box::pin(run.instrument(span)),
        None => Box::pin(std::future::ready(())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewarp_animations::handler::handler;
    use pagewarp_core::MatchOptions;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn example() -> Animation {
        Animation::new("from", "to")
            .on_in(handler(|done, _| done.call()))
            .on_out(handler(|done, _| done.call()))
    }

    #[test]
    fn test_compiles_animations() {
        let plugin = JsPlugin::new(vec![example()]).unwrap();
        assert!(plugin.animations()[0].matches_from("from").is_some());
        assert!(plugin.animations()[0].matches_to("to").is_some());
    }

    #[test]
    fn test_adds_fallback_animation() {
        let plugin = JsPlugin::new(vec![example()]).unwrap();
        assert_eq!(plugin.animations().len(), 2);
        assert_eq!(plugin.animations()[1].from_pattern().as_template(), Some("(.*)"));
        assert_eq!(plugin.animations()[1].to_pattern().as_template(), Some("(.*)"));
        assert_eq!(plugin.options().animations.len(), 2);
        assert_eq!(plugin.shared_animations().len(), 2);
    }

    #[test]
    fn test_empty_list_keeps_fallback() {
        let plugin = JsPlugin::new(Vec::<Animation>::new()).unwrap();
        assert_eq!(plugin.animations().len(), 1);
    }

    #[test]
    fn test_structured_options() {
        let options = Options::new(vec![Animation::new("/A", "/B")]).with_match_options(
            MatchOptions {
                sensitive: true,
                ..MatchOptions::default()
            },
        );
        let plugin = JsPlugin::new(options).unwrap();
        assert!(plugin.animations()[0].matches_from("/a").is_none());
        assert!(plugin.animations()[0].matches_from("/A").is_some());
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        assert!(JsPlugin::new(vec![Animation::new("/:", "/")]).is_err());
    }

    #[test]
    fn test_name() {
        let plugin = JsPlugin::new(Vec::<Animation>::new()).unwrap();
        assert_eq!(plugin.name(), "JsPlugin");
    }

    #[tokio::test]
    async fn test_skip_does_not_run() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let plugin = JsPlugin::new(vec![Animation::new("(.*)", "(.*)").on_out(handler(
            move |done, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                done.call();
            },
        ))])
        .unwrap();

        let visit = Visit::new("/", "/a");
        plugin
            .await_out_animation(&visit, &HookArgs { skip: true })
            .await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        plugin
            .await_out_animation(&visit, &HookArgs { skip: false })
            .await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_and_run_uses_direction() {
        let ins = Arc::new(AtomicUsize::new(0));
        let in_counter = Arc::clone(&ins);
        let plugin = JsPlugin::new(vec![Animation::new("/", "/a").on_in(handler(
            move |done, data| {
                assert_eq!(data.direction, Direction::In);
                in_counter.fetch_add(1, Ordering::SeqCst);
                done.call();
            },
        ))])
        .unwrap();

        let visit = Visit::new("/", "/a");
        plugin.find_and_run_animation(&visit, Direction::Out).await;
        assert_eq!(ins.load(Ordering::SeqCst), 0);
        plugin.find_and_run_animation(&visit, Direction::In).await;
        assert_eq!(ins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unmatched_visit_warns_and_completes() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let run = tracing::subscriber::with_default(subscriber, || {
            run_best_animation(&[], &Visit::new("/", "/a"), Direction::Out)
        });
        tokio::time::timeout(std::time::Duration::from_secs(1), run)
            .await
            .unwrap();

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("No animation found for visit"));
    }
}
