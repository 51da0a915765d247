//! # Search Points
//!
//! A point binds every parameter of its space to one admissible code. Points are plain
//! values: they compare, order and hash by their bindings alone, so they can be
//! collected in ordered sets where duplicates are absorbed.
//!
//! ## Perturbation
//!
//! The *shift breadth* of a parameter is the number of codes a single step can reach
//! from the current value:
//!
//! - categorical: every other code, `n - 1`
//! - metric at either end of its scale: `1`
//! - metric strictly inside its scale: `2`
//!
//! `make_adjacent_shifted` draws an offset in `[0, total breadth)` and shifts the
//! first parameter whose cumulative breadth exceeds it. This picks uniformly among all
//! single-step neighbours, so parameters with more reachable codes are shifted more
//! often.
//!
//! `make_random_shifted` grows a set by random walk: at every step the point to shift
//! from is drawn uniformly among all the points collected so far, which bounds the
//! correlation of the walk.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::parameter::ConfigurationSearchParameter;
use super::space::{ConfigurationSearchSpace, ParameterBindings};
use crate::configuration::ConfigurationType;
use crate::error::{ConfigurationError, ConfigurationResult};
use crate::path::ConfigurationPropertyPath;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PointRecord")]
pub struct ConfigurationSearchPoint {
    space: Arc<ConfigurationSearchSpace>,
    bindings: ParameterBindings,
    #[serde(skip)]
    shift_breadths: OnceCell<Vec<usize>>,
}

/// Serialized form; its bindings must cover exactly the parameters of its space
#[derive(Deserialize)]
struct PointRecord {
    space: ConfigurationSearchSpace,
    bindings: ParameterBindings,
}

impl TryFrom<PointRecord> for ConfigurationSearchPoint {
    type Error = ConfigurationError;

    fn try_from(record: PointRecord) -> ConfigurationResult<Self> {
        record.space.make_point(&record.bindings)
    }
}

impl ConfigurationSearchPoint {
    /// Callers guarantee that the keys of `bindings` are the parameter paths of `space`
    pub(crate) fn new(space: Arc<ConfigurationSearchSpace>, bindings: ParameterBindings) -> Self {
        Self { space, bindings, shift_breadths: OnceCell::new() }
    }

    pub fn space(&self) -> &ConfigurationSearchSpace {
        &self.space
    }

    pub fn bindings(&self) -> &ParameterBindings {
        &self.bindings
    }

    /// Bound values in the order of the space's parameters
    pub fn coordinates(&self) -> Vec<i32> {
        self.bindings.values().copied().collect()
    }

    pub fn value(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<i32> {
        self.bindings.get(path).copied().ok_or_else(|| {
            ConfigurationError::NotFound(format!("no binding for '{}' in the point", path))
        })
    }

    pub fn index(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<usize> {
        self.space.index(path)
    }

    pub fn parameter(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<&ConfigurationSearchParameter> {
        self.space.parameter(path)
    }

    fn parameters_with_values(&self) -> impl Iterator<Item = (&ConfigurationSearchParameter, i32)> {
        self.space.parameters().iter().zip(self.bindings.values().copied())
    }

    /// Number of codes reachable in one step, per parameter
    pub fn shift_breadths(&self) -> &[usize] {
        self.shift_breadths.get_or_init(|| {
            self.parameters_with_values()
                .map(|(parameter, value)| {
                    let values = parameter.values();
                    if !parameter.is_metric() {
                        values.len() - 1
                    } else if value == values[0] || value == values[values.len() - 1] {
                        1
                    } else {
                        2
                    }
                })
                .collect()
        })
    }

    /// A neighbour differing in exactly one parameter
    pub fn make_adjacent_shifted<R: Rng + ?Sized>(&self, rng: &mut R) -> ConfigurationResult<Self> {
        let breadths = self.shift_breadths();
        let total_breadth: usize = breadths.iter().sum();
        if total_breadth == 0 {
            return Err(ConfigurationError::DegenerateSpace(
                "the point has no neighbour to shift to".to_string(),
            ));
        }
        let offset = rng.gen_range(0..total_breadth);

        let mut cumulative = 0;
        let mut shifted = false;
        let mut bindings = ParameterBindings::new();
        for ((parameter, value), breadth) in self.parameters_with_values().zip(breadths) {
            cumulative += breadth;
            let mut value = value;
            if !shifted && cumulative > offset {
                value = parameter.shifted_value_from(value, rng);
                shifted = true;
                log::trace!("shifted {} to {}", parameter.path(), value);
            }
            bindings.insert(parameter.path().clone(), value);
        }
        Ok(Self::new(Arc::clone(&self.space), bindings))
    }

    /// A set of `amount` distinct points grown from this one by random walk.
    ///
    /// The amount is capped by the number of points of the space; the set always
    /// contains this point.
    pub fn make_random_shifted<R: Rng + ?Sized>(
        &self,
        amount: usize,
        rng: &mut R,
    ) -> ConfigurationResult<BTreeSet<Self>> {
        let target = amount.min(self.space.total_points());
        let mut result = BTreeSet::new();
        result.insert(self.clone());
        let mut current = self.clone();
        while result.len() < target {
            result.insert(current.make_adjacent_shifted(rng)?);
            let choice = rng.gen_range(0..result.len());
            if let Some(next) = result.iter().nth(choice) {
                current = next.clone();
            }
        }
        log::debug!("random walk produced {} points", result.len());
        Ok(result)
    }

    /// City-block distance over metric parameters, Hamming over categorical ones
    pub fn distance(&self, other: &Self) -> ConfigurationResult<usize> {
        if self.bindings.len() != other.bindings.len() {
            return Err(ConfigurationError::Mismatch(format!(
                "points of dimension {} and {} have no distance",
                self.bindings.len(),
                other.bindings.len()
            )));
        }
        let mut result = 0;
        for (parameter, v1) in self.parameters_with_values() {
            let v2 = other.bindings.get(parameter.path()).copied().ok_or_else(|| {
                ConfigurationError::Mismatch(format!(
                    "the other point has no binding for '{}'",
                    parameter.path()
                ))
            })?;
            result += if parameter.is_metric() {
                v1.abs_diff(v2) as usize
            } else {
                usize::from(v1 != v2)
            };
        }
        Ok(result)
    }
}

impl PartialEq for ConfigurationSearchPoint {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl Eq for ConfigurationSearchPoint {}

impl PartialOrd for ConfigurationSearchPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConfigurationSearchPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bindings.cmp(&other.bindings)
    }
}

impl Hash for ConfigurationSearchPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bindings.hash(state);
    }
}

impl fmt::Display for ConfigurationSearchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.bindings.values().map(i32::to_string).collect();
        write!(f, "[{}]", values.join(","))
    }
}

/// A copy of `configuration` with every open dimension resolved by `point`.
///
/// Fails with `Mismatch` when a parameter does not resolve to a property of the
/// configuration, or when the point leaves some dimension open.
pub fn make_singleton<C: ConfigurationType>(
    configuration: &C,
    point: &ConfigurationSearchPoint,
) -> ConfigurationResult<C> {
    let mut result = configuration.clone();
    for parameter in point.space().parameters() {
        let path = parameter.path();
        let (first, rest) = path.split_first()?;
        let value = point.value(path)?;
        let property = result.searchable_mut().property_mut(first).map_err(|_| {
            ConfigurationError::Mismatch(format!(
                "the point parameter '{}' is not in the configuration",
                path
            ))
        })?;
        property.set_single(&rest, value).map_err(|err| {
            log::debug!("binding {} to {} failed: {}", path, value, err.kind());
            ConfigurationError::Mismatch(format!("cannot bind '{}' to {}: {}", path, value, err))
        })?;
    }
    if !result.is_singleton() {
        return Err(ConfigurationError::Mismatch(
            "the point does not cover every open dimension of the configuration".to_string(),
        ));
    }
    log::debug!("made singleton configuration from point {}", point);
    Ok(result)
}
