//! Ordered custom id route tables
//!
//! Each pattern handler owns one table. Routes are tried in declared order
//! and the first matcher that accepts the id wins, yielding the action and
//! the part of the id after the prefix (goal name, guild id, area id).

/// How a route recognises a custom id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact(&'static str),
    /// Prefix followed by a non-empty suffix
    Prefix(&'static str),
}

impl Matcher {
    /// The suffix captured from `custom_id`, or None if it does not match
    pub fn capture<'a>(&self, custom_id: &'a str) -> Option<&'a str> {
        match self {
            Matcher::Exact(expected) => (custom_id == *expected).then_some(""),
            Matcher::Prefix(prefix) => custom_id
                .strip_prefix(prefix)
                .filter(|suffix| !suffix.is_empty()),
        }
    }

    fn literal(&self) -> &'static str {
        match self {
            Matcher::Exact(literal) | Matcher::Prefix(literal) => literal,
        }
    }

    /// True when this matcher accepts every id `later` accepts
    fn covers(&self, later: &Matcher) -> bool {
        match (self, later) {
            (Matcher::Exact(a), Matcher::Exact(b)) => a == b,
            (Matcher::Exact(_), Matcher::Prefix(_)) => false,
            // A prefix covers a later route whose ids all start with it
            (Matcher::Prefix(prefix), _) => {
                let literal = later.literal();
                literal.starts_with(prefix)
                    && (literal.len() > prefix.len() || matches!(later, Matcher::Prefix(_)))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Route<A> {
    pub matcher: Matcher,
    pub action: A,
}

impl<A> Route<A> {
    pub const fn exact(id: &'static str, action: A) -> Self {
        Self {
            matcher: Matcher::Exact(id),
            action,
        }
    }

    pub const fn prefix(prefix: &'static str, action: A) -> Self {
        Self {
            matcher: Matcher::Prefix(prefix),
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch<'a, A> {
    Handled { action: A, suffix: &'a str },
    FallThrough,
}

/// First route in `routes` that accepts `custom_id`
pub fn resolve<'a, A: Copy>(routes: &[Route<A>], custom_id: &'a str) -> RouteMatch<'a, A> {
    routes
        .iter()
        .find_map(|route| {
            route.matcher.capture(custom_id).map(|suffix| RouteMatch::Handled {
                action: route.action,
                suffix,
            })
        })
        .unwrap_or(RouteMatch::FallThrough)
}

/// Pairs (earlier, later) where the earlier route makes the later unreachable
pub fn shadowed_routes<A>(routes: &[Route<A>]) -> Vec<(Matcher, Matcher)> {
    let mut shadowed = Vec::new();
    for (i, earlier) in routes.iter().enumerate() {
        for later in &routes[i + 1..] {
            if earlier.matcher.covers(&later.matcher) {
                shadowed.push((earlier.matcher, later.matcher));
            }
        }
    }
    shadowed
}
