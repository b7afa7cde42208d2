//! Locations handed over by the host environment.
//!
//! # Responsibilities
//! - Split a raw location into path and query parameters
//! - Read the path from the URL fragment (hash mode) or the URL path
//!   (history mode)
//!
//! # Design Decisions
//! - Query strings are decoded with `url::form_urlencoded`
//! - A path without a leading `/` is treated as absolute
//! - Path components stay percent-encoded; the matcher decodes them

use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

use crate::config::schema::HistoryMode;

/// Error reading a location.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A request path plus its decoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: BTreeMap<String, String>,
}

impl Location {
    /// Parse `/path?query#fragment`; the fragment is dropped.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };
        Self {
            path: absolute(path),
            query: query.map(decode_query).unwrap_or_default(),
        }
    }

    /// Parse a hash fragment such as `#/dashboard?tab=1`.
    pub fn from_hash(fragment: &str) -> Self {
        Self::parse(fragment.strip_prefix('#').unwrap_or(fragment))
    }

    /// Read the location out of a full URL according to `mode`.
    pub fn from_url(url: &str, mode: HistoryMode) -> Result<Self, LocationError> {
        let url = Url::parse(url)?;
        let location = match mode {
            HistoryMode::Hash => Self::from_hash(url.fragment().unwrap_or_default()),
            HistoryMode::History => Self {
                path: absolute(url.path()),
                query: url.query().map(decode_query).unwrap_or_default(),
            },
        };
        Ok(location)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }
}

fn absolute(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn decode_query(query: &str) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_and_query() {
        let location = Location::parse("/dashboard/projects?sort=name&q=a%20b#top");
        assert_eq!(location.path(), "/dashboard/projects");
        assert_eq!(location.query().get("sort").map(String::as_str), Some("name"));
        assert_eq!(location.query().get("q").map(String::as_str), Some("a b"));
    }

    #[test]
    fn test_relative_and_empty_paths() {
        assert_eq!(Location::parse("dashboard").path(), "/dashboard");
        assert_eq!(Location::parse("").path(), "/");
        assert!(Location::parse("/").query().is_empty());
    }

    #[test]
    fn test_from_hash() {
        let location = Location::from_hash("#/dashboard/projects/new?draft=1");
        assert_eq!(location.path(), "/dashboard/projects/new");
        assert_eq!(location.query().get("draft").map(String::as_str), Some("1"));
        assert_eq!(Location::from_hash("#").path(), "/");
    }

    #[test]
    fn test_from_url_modes() {
        let url = "https://console.example.com/app/?lang=en#/dashboard?tab=2";

        let hash = Location::from_url(url, HistoryMode::Hash).unwrap();
        assert_eq!(hash.path(), "/dashboard");
        assert_eq!(hash.query().get("tab").map(String::as_str), Some("2"));

        let history = Location::from_url(url, HistoryMode::History).unwrap();
        assert_eq!(history.path(), "/app/");
        assert_eq!(history.query().get("lang").map(String::as_str), Some("en"));

        assert!(Location::from_url("not a url", HistoryMode::Hash).is_err());
    }
}
