//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefixes on segment boundaries
//! - Match exact paths
//!
//! # Design Decisions
//! - Mount paths match with ASCII case ignored (`/Teams/5` is a teams path)
//! - `/teams` matches `/teams` and `/teams/5`, never `/teamsters`
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a mount path and everything below it.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    /// Trailing slashes on the prefix are ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        match path.split_at_checked(self.prefix.len()) {
            Some((head, rest)) => {
                head.eq_ignore_ascii_case(&self.prefix) && (rest.is_empty() || rest.starts_with('/'))
            }
            None => false,
        }
    }
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("/teams");

        assert!(matcher.matches("/teams"));
        assert!(matcher.matches("/teams/"));
        assert!(matcher.matches("/teams/5"));
        assert!(matcher.matches("/teams/5/players"));

        assert!(!matcher.matches("/teamsters"));
        assert!(!matcher.matches("/Teamsters"));
        assert!(!matcher.matches("/"));
        assert!(!matcher.matches("/players/teams"));
    }

    #[test]
    fn test_path_prefix_ignores_ascii_case() {
        let matcher = PathPrefixMatcher::new("/teams");

        assert!(matcher.matches("/Teams/5"));
        assert!(matcher.matches("/TEAMS"));
        assert!(matcher.matches("/tEaMs/5/Players"));
        assert!(!matcher.matches("/Teamsters"));
        assert!(!matcher.matches("/té"));
    }

    #[test]
    fn test_prefix_trailing_slash_normalized() {
        let matcher = PathPrefixMatcher::new("/auth/");
        assert_eq!(matcher.prefix(), "/auth");
        assert!(matcher.matches("/auth/login"));
    }

    #[test]
    fn test_exact_path_matcher() {
        let matcher = ExactPathMatcher::new("/");
        assert!(matcher.matches("/"));
        assert!(!matcher.matches(""));
        assert!(!matcher.matches("/teams"));
    }
}
