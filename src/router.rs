//! Path-based route table for the four learning screens.
//!
//! Matching ignores the query string and fragment, is case-insensitive, and
//! accepts a single trailing slash. Anything else lands on [`View::NotFound`].

use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Lesson,
    Practice,
    Review,
    NotFound,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Lesson => "lesson",
            View::Practice => "practice",
            View::Review => "review",
            View::NotFound => "not-found",
        }
    }

    pub fn is_not_found(self) -> bool {
        self == View::NotFound
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
}

/// Route order is significant: the first match wins.
pub static ROUTES: [RouteRecord; 4] = [
    RouteRecord {
        path: "/",
        name: "dashboard",
        view: View::Dashboard,
    },
    RouteRecord {
        path: "/lesson",
        name: "lesson",
        view: View::Lesson,
    },
    RouteRecord {
        path: "/practice",
        name: "practice",
        view: View::Practice,
    },
    RouteRecord {
        path: "/review",
        name: "review",
        view: View::Review,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    // Always starts with '/' and never ends with one; empty when mounted at root.
    base: String,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            base: String::new(),
        }
    }

    /// Mounts the table under `base`, e.g. `/app/` serves the lesson view at
    /// `/app/lesson`.
    pub fn with_base(base: &str) -> Self {
        let trimmed = base.trim().trim_matches('/');
        let base = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { base }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_base(&config.router_base)
    }

    pub fn base(&self) -> &str {
        if self.base.is_empty() {
            "/"
        } else {
            &self.base
        }
    }

    pub fn routes(&self) -> &'static [RouteRecord] {
        &ROUTES
    }

    pub fn resolve(&self, location: &str) -> View {
        self.find(location)
            .map(|record| record.view)
            .unwrap_or(View::NotFound)
    }

    pub fn find(&self, location: &str) -> Option<&'static RouteRecord> {
        let path = self.strip_base(route_path(location))?;
        let path = normalize(path);
        ROUTES
            .iter()
            .find(|record| record.path.eq_ignore_ascii_case(path))
    }

    pub fn by_name(&self, name: &str) -> Option<&'static RouteRecord> {
        ROUTES.iter().find(|record| record.name == name)
    }

    /// Browser path for `view`, including the base. `None` for `NotFound`.
    pub fn href(&self, view: View) -> Option<String> {
        let record = ROUTES.iter().find(|record| record.view == view)?;
        if self.base.is_empty() {
            return Some(record.path.to_string());
        }
        Some(match record.path {
            "/" => format!("{}/", self.base),
            path => format!("{}{path}", self.base),
        })
    }

    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base.is_empty() {
            return Some(path);
        }
        let prefix = path.get(..self.base.len())?;
        if !prefix.eq_ignore_ascii_case(&self.base) {
            return None;
        }
        let rest = &path[self.base.len()..];
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

/// Drops the fragment and the query string.
fn route_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}

fn normalize(path: &str) -> &str {
    if path.is_empty() || path == "/" {
        return "/";
    }
    path.strip_suffix('/').unwrap_or(path)
}
