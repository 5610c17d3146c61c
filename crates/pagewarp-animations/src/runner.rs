//! Running animation handlers to completion.

use crate::animation::CompiledAnimation;
use crate::data::AnimationData;
use crate::handler::{BoxFuture, Done};

/// Invokes the handler for `data.direction` and returns a future that
/// resolves once the animation is finished.
///
/// The handler is called right away, before the returned future is polled.
/// The run finishes when the handler calls its [`Done`] callback or when the
/// future it returned completes, whichever happens first.
///
/// A missing animation or a missing handler for the direction logs a warning
/// and finishes immediately. There is no timeout: a handler that never
/// signals keeps the returned future pending forever.
///
/// # Examples
///
/// ```
/// use pagewarp_animations::{
///     assemble_animation_data, compile_animation, handler::handler, run_animation,
///     Animation, Direction, Visit,
/// };
/// use pagewarp_core::MatchOptions;
///
/// # tokio_test_block_on(async {
/// let animation = Animation::new("(.*)", "(.*)").on_out(handler(|done, _| done.call()));
/// let compiled = compile_animation(&animation, &MatchOptions::default()).unwrap();
/// let data = assemble_animation_data(&compiled, &Visit::new("/", "/about"), Direction::Out);
/// run_animation(Some(&compiled), &data).await;
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub fn run_animation(animation: Option<&CompiledAnimation>, data: &AnimationData) -> BoxFuture {
    let direction = data.direction;
    let Some(handler) = animation.and_then(|a| a.handler(direction)) else {
        tracing::warn!(%direction, "Missing animation function for '{direction}' phase");
        return Box::pin(std::future::ready(()));
    };

    let (done, completion) = Done::channel();
    let returned = handler(done, data);

    Box::pin(async move {
        let signalled = async move {
            // All `Done` clones were dropped uncalled; only the returned
            // future can finish the run now.
            if completion.await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        match returned {
            Some(future) => {
                tokio::select! {
                    () = signalled => {}
                    () = future => {}
                }
            }
            None => signalled.await,
        }
        tracing::debug!(%direction, "animation finished");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{compile_animation, Animation};
    use crate::data::assemble_animation_data;
    use crate::handler::{async_handler, handler, AnimationHandler, Direction};
    use crate::visit::Visit;
    use pagewarp_core::MatchOptions;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn setup(animation: &Animation, direction: Direction) -> (CompiledAnimation, AnimationData) {
        let compiled = compile_animation(animation, &MatchOptions::default()).unwrap();
        let data = assemble_animation_data(&compiled, &Visit::new("/a", "/b"), direction);
        (compiled, data)
    }

    fn counting(count: &Arc<AtomicUsize>) -> AnimationHandler {
        let count = Arc::clone(count);
        handler(move |done, _| {
            count.fetch_add(1, Ordering::SeqCst);
            done.call();
        })
    }

    #[tokio::test]
    async fn test_sync_done_completes() {
        let count = Arc::new(AtomicUsize::new(0));
        let animation = Animation::new("(.*)", "(.*)").on_in(counting(&count));
        let (compiled, data) = setup(&animation, Direction::In);

        run_animation(Some(&compiled), &data).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_receives_exact_data() {
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = Arc::clone(&seen);
        let animation = Animation::new("(.*)", "(.*)").on_out(handler(move |done, data| {
            *seen_clone.lock().unwrap() = Some(data as *const AnimationData as usize);
            done.call();
        }));
        let (compiled, data) = setup(&animation, Direction::Out);

        run_animation(Some(&compiled), &data).await;
        assert_eq!(
            *seen.lock().unwrap(),
            Some(&data as *const AnimationData as usize)
        );
    }

    #[tokio::test]
    async fn test_handler_called_before_polling() {
        let count = Arc::new(AtomicUsize::new(0));
        let animation = Animation::new("(.*)", "(.*)").on_in(counting(&count));
        let (compiled, data) = setup(&animation, Direction::In);

        let pending = run_animation(Some(&compiled), &data);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        pending.await;
    }

    #[tokio::test]
    async fn test_only_selected_direction_runs() {
        let ins = Arc::new(AtomicUsize::new(0));
        let outs = Arc::new(AtomicUsize::new(0));
        let animation = Animation::new("(.*)", "(.*)")
            .on_in(counting(&ins))
            .on_out(counting(&outs));
        let (compiled, data) = setup(&animation, Direction::Out);

        run_animation(Some(&compiled), &data).await;
        assert_eq!(outs.load(Ordering::SeqCst), 1);
        assert_eq!(ins.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_handler_completes() {
        let count = Arc::new(AtomicUsize::new(0));
        let animation = Animation::new("(.*)", "(.*)").on_out(counting(&count));
        let (compiled, data) = setup(&animation, Direction::In);

        run_animation(Some(&compiled), &data).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_animation_completes() {
        let (_, data) = setup(&Animation::fallback(), Direction::In);
        run_animation(None, &data).await;
    }

    #[tokio::test]
    async fn test_returned_future_completes() {
        let animation = Animation::new("(.*)", "(.*)").on_in(async_handler(|_| async {
            tokio::task::yield_now().await;
        }));
        let (compiled, data) = setup(&animation, Direction::In);

        tokio::time::timeout(Duration::from_secs(1), run_animation(Some(&compiled), &data))
            .await
            .expect("future-style handler should finish the run");
    }

    #[tokio::test]
    async fn test_done_wins_over_pending_future() {
        let animation = Animation::new("(.*)", "(.*)").on_in(Arc::new(|done: Done, _: &AnimationData| {
            done.call();
            Some(Box::pin(std::future::pending::<()>()) as BoxFuture)
        }));
        let (compiled, data) = setup(&animation, Direction::In);

        tokio::time::timeout(Duration::from_secs(1), run_animation(Some(&compiled), &data))
            .await
            .expect("done() should finish the run");
    }

    #[tokio::test]
    async fn test_deferred_done_completes() {
        let animation = Animation::new("(.*)", "(.*)").on_out(handler(|done, _| {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                done.call();
            });
        }));
        let (compiled, data) = setup(&animation, Direction::Out);

        tokio::time::timeout(Duration::from_secs(1), run_animation(Some(&compiled), &data))
            .await
            .expect("deferred done() should finish the run");
    }

    #[tokio::test]
    async fn test_silent_handler_never_completes() {
        let animation = Animation::new("(.*)", "(.*)").on_in(handler(|_done, _| {}));
        let (compiled, data) = setup(&animation, Direction::In);

        let result =
            tokio::time::timeout(Duration::from_millis(50), run_animation(Some(&compiled), &data))
                .await;
        assert!(result.is_err());
    }
}
