use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Closed set of pages the portfolio can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageId {
    Home,
    Projects,
    Skills,
    Contact,
}

impl PageId {
    pub const ALL: [PageId; 4] = [
        PageId::Home,
        PageId::Projects,
        PageId::Skills,
        PageId::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Projects => "projects",
            PageId::Skills => "skills",
            PageId::Contact => "contact",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(&'static str),
    Wildcard,
}

impl RoutePattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(pattern) => *pattern == path,
            RoutePattern::Wildcard => true,
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Exact(pattern) => f.write_str(pattern),
            RoutePattern::Wildcard => f.write_str("*"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub pattern: RoutePattern,
    pub page: PageId,
}

impl Route {
    pub const fn exact(path: &'static str, page: PageId) -> Self {
        Self {
            pattern: RoutePattern::Exact(path),
            page,
        }
    }

    pub const fn wildcard(page: PageId) -> Self {
        Self {
            pattern: RoutePattern::Wildcard,
            page,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route table is empty")]
    Empty,
    #[error("pattern `{0}` is declared twice")]
    DuplicatePattern(&'static str),
    #[error("route table has no wildcard route")]
    MissingWildcard,
    #[error("wildcard route must be declared last")]
    WildcardNotLast,
    #[error("route table has no `/` route")]
    MissingHome,
    #[error("wildcard resolves to `{wildcard}` but `/` resolves to `{home}`")]
    WildcardMismatch { wildcard: PageId, home: PageId },
}

/// Validated, ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Validate `routes` and build the table.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteError> {
        let (wildcard, exact) = routes.split_last().ok_or(RouteError::Empty)?;

        if exact
            .iter()
            .any(|route| route.pattern == RoutePattern::Wildcard)
        {
            return Err(RouteError::WildcardNotLast);
        }
        if wildcard.pattern != RoutePattern::Wildcard {
            return Err(RouteError::MissingWildcard);
        }

        let mut seen = HashSet::new();
        for route in exact {
            if let RoutePattern::Exact(pattern) = route.pattern {
                if !seen.insert(pattern) {
                    return Err(RouteError::DuplicatePattern(pattern));
                }
            }
        }

        let home = exact
            .iter()
            .find(|route| route.pattern == RoutePattern::Exact("/"))
            .ok_or(RouteError::MissingHome)?;
        if home.page != wildcard.page {
            return Err(RouteError::WildcardMismatch {
                wildcard: wildcard.page,
                home: home.page,
            });
        }

        Ok(Self { routes })
    }

    /// The portfolio's route table.
    pub fn portfolio() -> Self {
        Self {
            routes: vec![
                Route::exact("/", PageId::Home),
                Route::exact("/projects", PageId::Projects),
                Route::exact("/skills", PageId::Skills),
                Route::exact("/contact", PageId::Contact),
                Route::wildcard(PageId::Home),
            ],
        }
    }

    /// First route whose pattern matches `path`.
    pub fn route_for(&self, path: &str) -> &Route {
        // The constructor guarantees a trailing wildcard.
        self.routes
            .iter()
            .find(|route| route.pattern.matches(path))
            .unwrap_or_else(|| &self.routes[self.routes.len() - 1])
    }

    pub fn resolve(&self, path: &str) -> PageId {
        self.route_for(path).page
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Exact path declared for `page`, if any.
    pub fn path_of(&self, page: PageId) -> Option<&'static str> {
        self.routes.iter().find_map(|route| match route.pattern {
            RoutePattern::Exact(path) if route.page == page => Some(path),
            _ => None,
        })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::portfolio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn portfolio_table_is_valid() {
        let table = RouteTable::new(RouteTable::portfolio().routes().to_vec()).unwrap();
        assert_eq!(table.resolve("/"), PageId::Home);
        assert_eq!(table.resolve("/projects"), PageId::Projects);
        assert_eq!(table.resolve("/skills"), PageId::Skills);
        assert_eq!(table.resolve("/contact"), PageId::Contact);
    }

    #[test]
    fn unknown_and_empty_paths_fall_back_home() {
        let table = RouteTable::portfolio();
        assert_eq!(table.resolve(""), PageId::Home);
        assert_eq!(table.resolve("/blog"), PageId::Home);
        assert_eq!(table.resolve("/projects/"), PageId::Home);
        assert_eq!(table.route_for("/blog").pattern, RoutePattern::Wildcard);
    }

    #[test]
    fn rejects_wildcard_before_exact_routes() {
        let err = RouteTable::new(vec![
            Route::wildcard(PageId::Home),
            Route::exact("/", PageId::Home),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::WildcardNotLast);
    }

    #[test]
    fn rejects_duplicate_patterns() {
        let err = RouteTable::new(vec![
            Route::exact("/", PageId::Home),
            Route::exact("/skills", PageId::Skills),
            Route::exact("/skills", PageId::Projects),
            Route::wildcard(PageId::Home),
        ])
        .unwrap_err();
        assert_eq!(err, RouteError::DuplicatePattern("/skills"));
    }

    #[test]
    fn rejects_missing_wildcard_and_mismatch() {
        assert_eq!(
            RouteTable::new(vec![Route::exact("/", PageId::Home)]).unwrap_err(),
            RouteError::MissingWildcard
        );
        assert_eq!(
            RouteTable::new(vec![]).unwrap_err(),
            RouteError::Empty
        );
        assert_eq!(
            RouteTable::new(vec![
                Route::exact("/", PageId::Home),
                Route::wildcard(PageId::Contact),
            ])
            .unwrap_err(),
            RouteError::WildcardMismatch {
                wildcard: PageId::Contact,
                home: PageId::Home
            }
        );
    }

    #[test]
    fn path_of_reports_declared_path() {
        let table = RouteTable::portfolio();
        assert_eq!(table.path_of(PageId::Skills), Some("/skills"));
        assert_eq!(table.path_of(PageId::Home), Some("/"));
    }

    proptest! {
        #[test]
        fn undeclared_paths_resolve_home(path in "\\PC*") {
            let table = RouteTable::portfolio();
            let declared = table.routes().iter().any(|route| {
                matches!(route.pattern, RoutePattern::Exact(p) if p == path)
            });
            prop_assume!(!declared);
            prop_assert_eq!(table.resolve(&path), PageId::Home);
        }

        #[test]
        fn declared_paths_match_exactly_one_exact_route(idx in 0usize..4) {
            let table = RouteTable::portfolio();
            let route = table.routes()[idx];
            let RoutePattern::Exact(path) = route.pattern else {
                unreachable!("first four routes are exact");
            };
            let exact_matches = table
                .routes()
                .iter()
                .filter(|r| r.pattern != RoutePattern::Wildcard && r.pattern.matches(path))
                .count();
            prop_assert_eq!(exact_matches, 1);
            prop_assert_eq!(table.resolve(path), route.page);
        }
    }
}
