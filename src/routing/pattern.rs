//! Path pattern parsing.
//!
//! # Responsibilities
//! - Split request paths into components
//! - Parse declared route paths into literal / parameter components
//! - Match a pattern against a slice of request components
//!
//! # Design Decisions
//! - Empty components are dropped (`/a//b/` equals `/a/b`)
//! - Literals are case-sensitive
//! - No regex: a component is either exact text or a single-component parameter
//! - Request components are percent-decoded before comparison; paths keep
//!   their encoded form

use std::collections::HashMap;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::routing::error::StructuralError;

/// Bytes escaped when a value is placed into a path component.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One component of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Matches exactly this text.
    Literal(String),
    /// Matches any non-empty component and binds it under this name.
    Param(String),
}

/// Ordered components of one node's declared path.
///
/// An empty pattern is an index route: it consumes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    components: Vec<Component>,
}

/// Split a path into its non-empty components.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

/// Join components back into an absolute path.
pub fn join_path<S: AsRef<str>>(components: &[S]) -> String {
    let mut out = String::from("/");
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(c.as_ref());
    }
    out
}

/// Percent-encode a parameter value for use as one path component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-decode one request path component.
pub fn decode_component(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

impl Pattern {
    /// Parse a relative path such as `sentiment/:analysisId`.
    ///
    /// `route` is only used to label errors.
    pub fn parse(relative: &str, route: &str) -> Result<Self, StructuralError> {
        let components = split_path(relative)
            .into_iter()
            .map(|raw| parse_component(raw, route))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True for index routes.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Names of every parameter in this pattern, in order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.components.iter().filter_map(|c| match c {
            Component::Param(name) => Some(name.as_str()),
            Component::Literal(_) => None,
        })
    }

    /// Match against the head of `input`.
    ///
    /// On success binds decoded parameter values into `params` and returns the
    /// number of components consumed. Nothing is bound on failure.
    pub fn match_prefix(&self, input: &[&str], params: &mut Vec<(String, String)>) -> Option<usize> {
        if input.len() < self.components.len() {
            return None;
        }
        let decoded: Vec<String> = input[..self.components.len()]
            .iter()
            .map(|raw| decode_component(raw))
            .collect();
        let matched = self
            .components
            .iter()
            .zip(&decoded)
            .all(|(component, value)| match component {
                Component::Literal(text) => text == value,
                Component::Param(_) => !value.is_empty(),
            });
        if !matched {
            return None;
        }
        for (component, value) in self.components.iter().zip(decoded) {
            if let Component::Param(name) = component {
                params.push((name.clone(), value));
            }
        }
        Some(self.components.len())
    }

    /// Render this pattern with parameters substituted.
    ///
    /// Returns the name of the first parameter missing from `params`.
    pub fn substitute(&self, params: &HashMap<String, String>) -> Result<Vec<String>, String> {
        self.components
            .iter()
            .map(|c| match c {
                Component::Literal(text) => Ok(text.clone()),
                Component::Param(name) => params.get(name).cloned().ok_or_else(|| name.clone()),
            })
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match c {
                Component::Literal(text) => f.write_str(text)?,
                Component::Param(name) => write!(f, ":{}", name)?,
            }
        }
        Ok(())
    }
}

const RESERVED: &[char] = &[':', '*', '?', '#', '{', '}'];

pub(crate) fn parse_component(raw: &str, route: &str) -> Result<Component, StructuralError> {
    let invalid = |reason| StructuralError::InvalidSegment {
        path: route.to_string(),
        segment: raw.to_string(),
        reason,
    };

    if let Some(name) = raw.strip_prefix(':') {
        if name.is_empty() {
            return Err(invalid("parameter name is empty"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid("parameter names may only use letters, digits and `_`"));
        }
        return Ok(Component::Param(name.to_string()));
    }

    if raw.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c)) {
        return Err(invalid("literal contains a reserved character"));
    }
    Ok(Component::Literal(raw.to_string()))
}
