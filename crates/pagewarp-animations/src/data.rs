//! The payload handed to animation handlers.

use pagewarp_paths::{Params, PathPattern};

use crate::animation::CompiledAnimation;
use crate::handler::Direction;
use crate::visit::Visit;

/// One side of a visit as seen by the selected animation.
#[derive(Debug, Clone)]
pub struct RouteData {
    /// The URL.
    pub url: String,
    /// The animation's pattern for this side.
    pub pattern: PathPattern,
    /// Parameters extracted by the pattern, empty if it did not match.
    pub params: Params,
}

/// Everything a handler knows about the phase it animates.
#[derive(Debug, Clone)]
pub struct AnimationData {
    /// A snapshot of the visit taken when the data was assembled.
    ///
    /// Changes the host makes to its own visit afterwards are not reflected
    /// here, and changes made here do not reach the host.
    pub visit: Visit,
    /// Which phase is running.
    pub direction: Direction,
    /// The page being left.
    pub from: RouteData,
    /// The page being entered.
    pub to: RouteData,
}

/// Builds the handler payload for a selected animation.
///
/// Both matchers run again on the visit's URLs to extract parameters.
pub fn assemble_animation_data(
    animation: &CompiledAnimation,
    visit: &Visit,
    direction: Direction,
) -> AnimationData {
    let from_params = animation
        .matches_from(&visit.from.url)
        .map(|m| m.params)
        .unwrap_or_default();
    let to_params = animation
        .matches_to(&visit.to.url)
        .map(|m| m.params)
        .unwrap_or_default();

    AnimationData {
        visit: visit.clone(),
        direction,
        from: RouteData {
            url: visit.from.url.clone(),
            pattern: animation.from_pattern().clone(),
            params: from_params,
        },
        to: RouteData {
            url: visit.to.url.clone(),
            pattern: animation.to_pattern().clone(),
            params: to_params,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{compile_animation, Animation};
    use pagewarp_core::MatchOptions;

    fn compiled(from: &str, to: &str) -> CompiledAnimation {
        compile_animation(&Animation::new(from, to), &MatchOptions::default()).unwrap()
    }

    #[test]
    fn test_assemble_extracts_params() {
        let animation = compiled("/blog/:slug", "/authors/:name");
        let visit = Visit::new("/blog/hello", "/authors/ada");
        let data = assemble_animation_data(&animation, &visit, Direction::Out);

        assert_eq!(data.direction, Direction::Out);
        assert_eq!(data.visit, visit);
        assert_eq!(data.from.url, "/blog/hello");
        assert_eq!(data.from.pattern.as_template(), Some("/blog/:slug"));
        assert_eq!(data.from.params["slug"], "hello");
        assert_eq!(data.to.url, "/authors/ada");
        assert_eq!(data.to.params["name"], "ada");
    }

    #[test]
    fn test_assemble_empty_params_when_unmatched() {
        let animation = compiled("/blog/:slug", "/authors/:name");
        let visit = Visit::new("/", "/authors/ada");
        let data = assemble_animation_data(&animation, &visit, Direction::In);

        assert!(data.from.params.is_empty());
        assert_eq!(data.to.params.len(), 1);
    }

    #[test]
    fn test_assemble_fallback_has_index_param() {
        let animation = compile_animation(&Animation::fallback(), &MatchOptions::default()).unwrap();
        let data = assemble_animation_data(&animation, &Visit::new("/a", "/b"), Direction::In);
        assert_eq!(data.from.params["0"], "/a");
        assert_eq!(data.to.pattern.as_template(), Some("(.*)"));
    }

    #[test]
    fn test_visit_is_a_snapshot() {
        let animation = compiled("/blog/:slug", "/authors/:name");
        let mut visit = Visit::new("/blog/hello", "/authors/ada");
        let mut data = assemble_animation_data(&animation, &visit, Direction::Out);

        visit.to.url = "/elsewhere".to_string();
        assert_eq!(data.visit.to.url, "/authors/ada");

        data.visit.from.url = "/changed".to_string();
        assert_eq!(visit.from.url, "/blog/hello");
    }
}
