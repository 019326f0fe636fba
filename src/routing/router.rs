//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the fixed, ordered route table
//! - Look up the target for a request path
//! - Return matched target or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan; table order is the precedence
//! - Explicit `None` rather than silent default

use serde::{Deserialize, Serialize};

use crate::routing::matcher::{ExactPathMatcher, Matcher, PathPrefixMatcher};

/// Downstream service family a request is forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerGroup {
    Public,
    Auth,
    Teams,
    Players,
    Classes,
    Championships,
    Matches,
    Reports,
}

impl HandlerGroup {
    /// All groups in dispatch precedence order.
    pub const ALL: [HandlerGroup; 8] = [
        HandlerGroup::Public,
        HandlerGroup::Auth,
        HandlerGroup::Teams,
        HandlerGroup::Players,
        HandlerGroup::Classes,
        HandlerGroup::Championships,
        HandlerGroup::Matches,
        HandlerGroup::Reports,
    ];

    /// Lowercase identifier used in config, logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            HandlerGroup::Public => "public",
            HandlerGroup::Auth => "auth",
            HandlerGroup::Teams => "teams",
            HandlerGroup::Players => "players",
            HandlerGroup::Classes => "classes",
            HandlerGroup::Championships => "championships",
            HandlerGroup::Matches => "matches",
            HandlerGroup::Reports => "reports",
        }
    }

    /// Path prefix the group is mounted on.
    pub fn mount_path(&self) -> &'static str {
        match self {
            HandlerGroup::Public => "/public",
            HandlerGroup::Auth => "/auth",
            HandlerGroup::Teams => "/teams",
            HandlerGroup::Players => "/players",
            HandlerGroup::Classes => "/classes",
            HandlerGroup::Championships => "/championships",
            HandlerGroup::Matches => "/matches",
            HandlerGroup::Reports => "/reports",
        }
    }
}

impl std::fmt::Display for HandlerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a matched request goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Forward to the group's upstream service.
    Upstream(HandlerGroup),
    /// Answer locally with the fixed liveness body.
    Liveness,
}

/// A single route table row.
#[derive(Debug)]
pub struct Route {
    matcher: Box<dyn Matcher>,
    target: Target,
}

impl Route {
    pub fn new(matcher: Box<dyn Matcher>, target: Target) -> Self {
        Self { matcher, target }
    }

    pub fn target(&self) -> Target {
        self.target
    }
}

/// Ordered route table; the first matching row wins.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The gateway's fixed table: every handler group in precedence
    /// order, then the exact-root liveness route.
    pub fn standard() -> Self {
        let mut routes: Vec<Route> = HandlerGroup::ALL
            .iter()
            .map(|group| {
                Route::new(
                    Box::new(PathPrefixMatcher::new(group.mount_path())),
                    Target::Upstream(*group),
                )
            })
            .collect();
        routes.push(Route::new(
            Box::new(ExactPathMatcher::new("/")),
            Target::Liveness,
        ));
        Self::new(routes)
    }

    /// Find the target for `path`. `None` means no route matched.
    pub fn dispatch(&self, path: &str) -> Option<Target> {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .map(Route::target)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}
