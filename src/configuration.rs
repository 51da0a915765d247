//! # Searchable Configurations
//!
//! A `SearchableConfiguration` is the named collection of properties owned by a
//! consumer's configuration type. Properties keep their insertion order, which only
//! matters for printing; lookups are by name.
//!
//! Consumers wrap a `SearchableConfiguration` in their own type, register every
//! property in its constructor and expose typed accessors forwarding to `at::<P>()`:
//!
//! ```
//! use tunable::{BooleanConfigurationProperty, ConfigurationResult, ConfigurationType,
//!               SearchableConfiguration};
//!
//! #[derive(Clone)]
//! struct SolverConfiguration(SearchableConfiguration);
//!
//! impl SolverConfiguration {
//!     fn new() -> ConfigurationResult<Self> {
//!         let mut searchable = SearchableConfiguration::new();
//!         searchable.add_property("use_subdivisions", BooleanConfigurationProperty::with_value(false))?;
//!         Ok(Self(searchable))
//!     }
//!
//!     fn set_both_use_subdivisions(&mut self) -> ConfigurationResult<()> {
//!         self.0.at_mut::<BooleanConfigurationProperty>("use_subdivisions")?.set_both();
//!         Ok(())
//!     }
//! }
//!
//! impl std::fmt::Display for SolverConfiguration {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         std::fmt::Display::fmt(&self.0, f)
//!     }
//! }
//!
//! impl ConfigurationType for SolverConfiguration {
//!     fn searchable(&self) -> &SearchableConfiguration { &self.0 }
//!     fn searchable_mut(&mut self) -> &mut SearchableConfiguration { &mut self.0 }
//! }
//!
//! let mut configuration = SolverConfiguration::new().unwrap();
//! assert!(configuration.is_singleton());
//! configuration.set_both_use_subdivisions().unwrap();
//! assert_eq!(configuration.search_space().unwrap().total_points(), 2);
//! ```
//!
//! Composition replaces inheritance: a derived configuration embeds its base's
//! properties by registering them in the same `SearchableConfiguration`.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ConfigurationError, ConfigurationResult};
use crate::path::ConfigurationPropertyPath;
use crate::property::{ConfigurationProperty, PropertyType};
use crate::search::{ConfigurationSearchParameter, ConfigurationSearchSpace};

#[derive(Debug, Clone, Default)]
pub struct SearchableConfiguration {
    properties: Vec<(String, ConfigurationProperty)>,
}

impl SearchableConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property under a unique, non-empty name
    pub fn add_property(
        &mut self,
        name: &str,
        property: impl Into<ConfigurationProperty>,
    ) -> ConfigurationResult<()> {
        if name.is_empty() {
            return Err(ConfigurationError::InvalidArgument(
                "property names must not be empty".to_string(),
            ));
        }
        if self.properties.iter().any(|(existing, _)| existing == name) {
            return Err(ConfigurationError::InvalidArgument(format!(
                "a property named '{}' already exists",
                name
            )));
        }
        self.properties.push((name.to_string(), property.into()));
        Ok(())
    }

    /// Properties in insertion order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &ConfigurationProperty)> {
        self.properties.iter().map(|(name, property)| (name.as_str(), property))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn property(&self, name: &str) -> ConfigurationResult<&ConfigurationProperty> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, property)| property)
            .ok_or_else(|| property_not_found(name))
    }

    pub(crate) fn property_mut(&mut self, name: &str) -> ConfigurationResult<&mut ConfigurationProperty> {
        self.properties
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, property)| property)
            .ok_or_else(|| property_not_found(name))
    }

    /// True iff no property, nested ones included, has more than one admissible code
    pub fn is_singleton(&self) -> bool {
        self.properties.iter().all(|(_, property)| {
            property.integer_values().values().all(|codes| codes.len() <= 1)
        })
    }

    /// One parameter per open dimension, nested ones included
    pub fn search_space(&self) -> ConfigurationResult<ConfigurationSearchSpace> {
        let mut parameters = BTreeSet::new();
        for (name, property) in &self.properties {
            for (path, codes) in property.integer_values() {
                if codes.len() > 1 {
                    let is_metric = property.is_metric(&path)?;
                    parameters.insert(ConfigurationSearchParameter::new(
                        path.prefixed(name),
                        is_metric,
                        codes,
                    )?);
                }
            }
        }
        if parameters.is_empty() {
            return Err(ConfigurationError::DegenerateSpace(
                "the configuration has no open dimension to search".to_string(),
            ));
        }
        log::debug!("derived a search space of {} parameters", parameters.len());
        Ok(ConfigurationSearchSpace::new(parameters))
    }

    /// The property at `path` narrowed to `P`
    pub fn at<P: PropertyType>(&self, path: impl Into<ConfigurationPropertyPath>) -> ConfigurationResult<&P> {
        let path = path.into();
        let (first, rest) = path.split_first()?;
        self.property(first)?
            .at(&rest)?
            .as_type::<P>()
            .map_err(|_| type_mismatch::<P>(&path))
    }

    pub fn at_mut<P: PropertyType>(
        &mut self,
        path: impl Into<ConfigurationPropertyPath>,
    ) -> ConfigurationResult<&mut P> {
        let path = path.into();
        let (first, rest) = path.split_first()?;
        self.property_mut(first)?
            .at_mut(&rest)?
            .as_type_mut::<P>()
            .map_err(|_| type_mismatch::<P>(&path))
    }
}

fn property_not_found(name: &str) -> ConfigurationError {
    ConfigurationError::NotFound(format!("the property '{}' was not found in the configuration", name))
}

fn type_mismatch<P: PropertyType>(path: &ConfigurationPropertyPath) -> ConfigurationError {
    ConfigurationError::TypeMismatch { path: path.repr(), expected: P::KIND.name() }
}

impl fmt::Display for SearchableConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() {
            return write!(f, "()");
        }
        write!(f, "(")?;
        for (i, (name, property)) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "\n{} = {}", name, property)?;
        }
        write!(f, ")")
    }
}

/// A consumer configuration backed by a `SearchableConfiguration`
pub trait ConfigurationType: Clone + fmt::Display {
    fn searchable(&self) -> &SearchableConfiguration;

    fn searchable_mut(&mut self) -> &mut SearchableConfiguration;

    fn is_singleton(&self) -> bool {
        self.searchable().is_singleton()
    }

    fn search_space(&self) -> ConfigurationResult<ConfigurationSearchSpace> {
        self.searchable().search_space()
    }
}

impl ConfigurationType for SearchableConfiguration {
    fn searchable(&self) -> &SearchableConfiguration {
        self
    }

    fn searchable_mut(&mut self) -> &mut SearchableConfiguration {
        self
    }
}

/// A type governed by an attached configuration
pub trait HasConfiguration {
    type Configuration: ConfigurationType;

    fn configuration(&self) -> &Self::Configuration;
}
