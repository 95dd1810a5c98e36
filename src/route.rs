//! Navigation context shared by the search and detail screens

use std::fmt;

use crate::{BookFinderError, Result};

/// Where the user currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Search,
    Book { id: String },
}

impl Route {
    pub fn book(id: impl Into<String>) -> Self {
        Route::Book { id: id.into() }
    }

    /// Identifier the detail screen reads when it is entered
    pub fn book_id(&self) -> Option<&str> {
        match self {
            Route::Book { id } => Some(id.as_str()),
            Route::Search => None,
        }
    }

    /// Parse `/` or `/book/<id>`
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::Search);
        }

        match trimmed.strip_prefix("/book/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Ok(Route::book(id)),
            _ => Err(BookFinderError::InvalidRoute(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Search => write!(f, "/"),
            Route::Book { id } => write!(f, "/book/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        assert_eq!(Route::parse("/").unwrap(), Route::Search);
        assert_eq!(Route::parse("").unwrap(), Route::Search);
        assert_eq!(Route::parse("/book/zyTCAlFPjgYC").unwrap(), Route::book("zyTCAlFPjgYC"));
        assert_eq!(Route::book("abc").to_string(), "/book/abc");
    }

    #[test]
    fn malformed_paths_are_rejected() {
        assert!(Route::parse("/book/").is_err());
        assert!(Route::parse("/book/a/b").is_err());
        assert!(Route::parse("/author/x").is_err());
    }

    #[test]
    fn only_book_routes_carry_an_id() {
        assert_eq!(Route::Search.book_id(), None);
        assert_eq!(Route::book("X1").book_id(), Some("X1"));
    }
}
