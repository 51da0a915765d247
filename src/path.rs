//! Paths addressing properties across nested configurations
//!
//! A path is an ordered sequence of property names. The empty path is the root and
//! denotes "this property" when handed to a property; each further segment descends
//! into the configuration held by a configurable value. Equality and ordering follow
//! the printable form `./seg1/seg2/`, so paths can key ordered maps directly. The same
//! form is the serialized one, which lets paths key JSON objects as well.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ConfigurationResult};

/// Path to a property, possibly through nested configurables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ConfigurationPropertyPath {
    segments: VecDeque<String>,
}

impl ConfigurationPropertyPath {
    /// The root path
    pub fn root() -> Self {
        Self::default()
    }

    /// A path with a single segment
    pub fn new(first: &str) -> ConfigurationResult<Self> {
        let mut path = Self::root();
        path.append(first)?;
        Ok(path)
    }

    /// Build a path from a sequence of segments
    pub fn from_segments<I, S>(segments: I) -> ConfigurationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = Self::root();
        for segment in segments {
            path.append(segment.as_ref())?;
        }
        Ok(path)
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Add a segment at the end
    pub fn append(&mut self, segment: &str) -> ConfigurationResult<&mut Self> {
        Self::check_segment(segment)?;
        self.segments.push_back(segment.to_string());
        Ok(self)
    }

    /// Add a segment at the beginning
    pub fn prepend(&mut self, segment: &str) -> ConfigurationResult<&mut Self> {
        Self::check_segment(segment)?;
        self.segments.push_front(segment.to_string());
        Ok(self)
    }

    /// Consuming variant of `append`, handy when building paths inline
    pub fn child(mut self, segment: &str) -> ConfigurationResult<Self> {
        self.append(segment)?;
        Ok(self)
    }

    /// The first segment; fails on the root
    pub fn first(&self) -> ConfigurationResult<&str> {
        self.segments.front().map(String::as_str).ok_or_else(|| {
            ConfigurationError::InvalidState("the root path has no first segment".to_string())
        })
    }

    /// The last segment; fails on the root
    pub fn last(&self) -> ConfigurationResult<&str> {
        self.segments.back().map(String::as_str).ok_or_else(|| {
            ConfigurationError::InvalidState("the root path has no last segment".to_string())
        })
    }

    /// Everything but the first segment; fails on the root
    pub fn subpath(&self) -> ConfigurationResult<Self> {
        if self.is_root() {
            return Err(ConfigurationError::InvalidState(
                "the root path has no subpath".to_string(),
            ));
        }
        let mut result = self.clone();
        result.segments.pop_front();
        Ok(result)
    }

    /// Split into the first segment and the remainder
    pub fn split_first(&self) -> ConfigurationResult<(&str, Self)> {
        Ok((self.first()?, self.subpath()?))
    }

    /// Printable representation, also the basis of equality and ordering
    pub fn repr(&self) -> String {
        self.to_string()
    }

    /// Parse the printable representation back into a path
    pub fn parse(repr: &str) -> ConfigurationResult<Self> {
        let malformed = || {
            ConfigurationError::InvalidArgument(format!("'{}' is not a path of the form ./a/b/", repr))
        };
        let inner = repr.strip_prefix("./").ok_or_else(malformed)?;
        if inner.is_empty() {
            return Ok(Self::root());
        }
        let inner = inner.strip_suffix('/').ok_or_else(malformed)?;
        Self::from_segments(inner.split('/'))
    }

    /// Prefix with a segment already validated as a property name
    pub(crate) fn prefixed(&self, segment: &str) -> Self {
        let mut result = self.clone();
        result.segments.push_front(segment.to_string());
        result
    }

    fn check_segment(segment: &str) -> ConfigurationResult<()> {
        if segment.is_empty() {
            return Err(ConfigurationError::InvalidArgument(
                "path segments must not be empty".to_string(),
            ));
        }
        if segment.contains('/') {
            return Err(ConfigurationError::InvalidArgument(format!(
                "the path segment '{}' contains a separator",
                segment
            )));
        }
        Ok(())
    }
}

impl From<&str> for ConfigurationPropertyPath {
    /// An empty string gives the root, anything else a single-segment path
    fn from(segment: &str) -> Self {
        let mut path = Self::root();
        if !segment.is_empty() {
            path.segments.push_back(segment.to_string());
        }
        path
    }
}

impl From<ConfigurationPropertyPath> for String {
    fn from(path: ConfigurationPropertyPath) -> Self {
        path.repr()
    }
}

impl TryFrom<String> for ConfigurationPropertyPath {
    type Error = ConfigurationError;

    fn try_from(repr: String) -> ConfigurationResult<Self> {
        Self::parse(&repr)
    }
}

impl From<&ConfigurationPropertyPath> for ConfigurationPropertyPath {
    fn from(path: &ConfigurationPropertyPath) -> Self {
        path.clone()
    }
}

impl fmt::Display for ConfigurationPropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "./")?;
        for segment in &self.segments {
            write!(f, "{}/", segment)?;
        }
        Ok(())
    }
}

impl PartialEq for ConfigurationPropertyPath {
    fn eq(&self, other: &Self) -> bool {
        self.repr() == other.repr()
    }
}

impl Eq for ConfigurationPropertyPath {}

impl PartialOrd for ConfigurationPropertyPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConfigurationPropertyPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.repr().cmp(&other.repr())
    }
}

impl Hash for ConfigurationPropertyPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.repr().hash(state);
    }
}
