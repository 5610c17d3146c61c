//! Animation ranking.
//!
//! Every compiled animation is scored against a visit and the best one is
//! selected. Ranking is a pure function of its inputs, so the out and in
//! phases of one visit always select the same animation.

use crate::animation::CompiledAnimation;
use crate::visit::Visit;

/// Highest score an animation can reach.
pub const MAX_RATING: u8 = 4;

/// Scores an animation against a navigation.
///
/// - 1 point if the `from` pattern matches `from`.
/// - 1 point if the `to` pattern matches `to`.
/// - 2 more if the `from` pattern matched and the raw `to` pattern text is
///   exactly `name`. This lets a named transition beat every pattern match.
pub fn rate_animation(
    animation: &CompiledAnimation,
    from: &str,
    to: &str,
    name: Option<&str>,
) -> u8 {
    let from_matched = animation.matches_from(from).is_some();
    let to_matched = animation.matches_to(to).is_some();

    let mut rating = u8::from(from_matched) + u8::from(to_matched);
    if from_matched && name.is_some_and(|name| animation.to_pattern().is_literally(name)) {
        rating += 2;
    }
    rating
}

/// Returns the index of the best-rated animation.
///
/// Candidates are visited last to first and a candidate replaces the current
/// best when its rating is greater than or equal to it, so among equal
/// ratings the earliest declared animation wins. Returns `None` only for an
/// empty slice.
pub fn find_animation_index(
    animations: &[CompiledAnimation],
    from: &str,
    to: &str,
    name: Option<&str>,
) -> Option<usize> {
    let mut top_rating = 0;
    let mut best = None;

    for (index, animation) in animations.iter().enumerate().rev() {
        let rating = rate_animation(animation, from, to, name);
        tracing::trace!(index, rating, "rated animation");
        if rating >= top_rating {
            top_rating = rating;
            best = Some(index);
        }
    }

    tracing::debug!(from, to, ?name, ?best, rating = top_rating, "selected animation");
    best
}

/// Finds the best matching animation for a navigation.
pub fn find_animation<'a>(
    animations: &'a [CompiledAnimation],
    from: &str,
    to: &str,
    name: Option<&str>,
) -> Option<&'a CompiledAnimation> {
    find_animation_index(animations, from, to, name).map(|i| &animations[i])
}

/// Finds the best matching animation for a visit.
pub fn find_animation_for_visit<'a>(
    animations: &'a [CompiledAnimation],
    visit: &Visit,
) -> Option<&'a CompiledAnimation> {
    find_animation(
        animations,
        &visit.from.url,
        &visit.to.url,
        visit.animation.name.as_deref(),
    )
}
