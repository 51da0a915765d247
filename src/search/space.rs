//! The realised, indexed set of search parameters

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::point::ConfigurationSearchPoint;
use super::parameter::ConfigurationSearchParameter;
use crate::error::{ConfigurationError, ConfigurationResult};
use crate::path::ConfigurationPropertyPath;

/// Integer bindings of a point, keyed by parameter path
pub type ParameterBindings = BTreeMap<ConfigurationPropertyPath, i32>;

/// Parameters kept sorted by path, at most one per path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SpaceRecord")]
pub struct ConfigurationSearchSpace {
    parameters: Vec<ConfigurationSearchParameter>,
}

#[derive(Deserialize)]
struct SpaceRecord {
    parameters: Vec<ConfigurationSearchParameter>,
}

impl From<SpaceRecord> for ConfigurationSearchSpace {
    fn from(record: SpaceRecord) -> Self {
        Self::new(record.parameters)
    }
}

impl ConfigurationSearchSpace {
    pub fn new(parameters: impl IntoIterator<Item = ConfigurationSearchParameter>) -> Self {
        let parameters: BTreeSet<ConfigurationSearchParameter> = parameters.into_iter().collect();
        Self { parameters: parameters.into_iter().collect() }
    }

    pub fn parameters(&self) -> &[ConfigurationSearchParameter] {
        &self.parameters
    }

    pub fn dimension(&self) -> usize {
        self.parameters.len()
    }

    /// Product of the admissible value counts, saturating at `usize::MAX`
    pub fn total_points(&self) -> usize {
        self.parameters
            .iter()
            .try_fold(1usize, |acc, p| acc.checked_mul(p.values().len()))
            .unwrap_or(usize::MAX)
    }

    pub fn index(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<usize> {
        self.parameters
            .iter()
            .position(|p| p.path() == path)
            .ok_or_else(|| parameter_not_found(path))
    }

    pub fn index_of(&self, parameter: &ConfigurationSearchParameter) -> ConfigurationResult<usize> {
        self.index(parameter.path())
    }

    pub fn parameter(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<&ConfigurationSearchParameter> {
        self.parameters
            .iter()
            .find(|p| p.path() == path)
            .ok_or_else(|| parameter_not_found(path))
    }

    /// A point binding every parameter to its value in `bindings`.
    ///
    /// Values are taken as given; only the key set is checked against the space.
    pub fn make_point(&self, bindings: &ParameterBindings) -> ConfigurationResult<ConfigurationSearchPoint> {
        if bindings.len() != self.dimension() {
            return Err(ConfigurationError::Mismatch(format!(
                "{} bindings given for a space of dimension {}",
                bindings.len(),
                self.dimension()
            )));
        }
        let mut point_bindings = ParameterBindings::new();
        for p in &self.parameters {
            let value = bindings.get(p.path()).ok_or_else(|| parameter_not_found(p.path()))?;
            point_bindings.insert(p.path().clone(), *value);
        }
        Ok(ConfigurationSearchPoint::new(Arc::new(self.clone()), point_bindings))
    }

    /// A point with every parameter drawn uniformly from its admissible codes
    pub fn initial_point<R: Rng + ?Sized>(&self, rng: &mut R) -> ConfigurationSearchPoint {
        let bindings: ParameterBindings = self
            .parameters
            .iter()
            .map(|p| (p.path().clone(), p.random_value(rng)))
            .collect();
        log::debug!("drew initial point over {} parameters", bindings.len());
        ConfigurationSearchPoint::new(Arc::new(self.clone()), bindings)
    }
}

fn parameter_not_found(path: &ConfigurationPropertyPath) -> ConfigurationError {
    ConfigurationError::NotFound(format!("no parameter with path '{}' in the space", path))
}

impl fmt::Display for ConfigurationSearchSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}
