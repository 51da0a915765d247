//! One dimension of a search space

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ConfigurationResult};
use crate::path::ConfigurationPropertyPath;

/// A path, a metric flag and the admissible integer codes of the dimension.
///
/// Two parameters with the same path are the same dimension, whatever their codes.
/// Metric parameters hold a contiguous run of codes, so that a step of one always
/// lands on an admissible code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ParameterRecord")]
pub struct ConfigurationSearchParameter {
    path: ConfigurationPropertyPath,
    is_metric: bool,
    values: Vec<i32>,
}

/// Unchecked serialized form, validated through `ConfigurationSearchParameter::new`
#[derive(Deserialize)]
struct ParameterRecord {
    path: ConfigurationPropertyPath,
    is_metric: bool,
    values: Vec<i32>,
}

impl TryFrom<ParameterRecord> for ConfigurationSearchParameter {
    type Error = ConfigurationError;

    fn try_from(record: ParameterRecord) -> ConfigurationResult<Self> {
        Self::new(record.path, record.is_metric, record.values)
    }
}

impl ConfigurationSearchParameter {
    pub fn new(path: ConfigurationPropertyPath, is_metric: bool, values: Vec<i32>) -> ConfigurationResult<Self> {
        if values.len() < 2 {
            return Err(ConfigurationError::InvalidArgument(format!(
                "the parameter {} needs at least two admissible values, got {}",
                path,
                values.len()
            )));
        }
        if is_metric && values.windows(2).any(|pair| i64::from(pair[1]) - i64::from(pair[0]) != 1) {
            return Err(ConfigurationError::InvalidArgument(format!(
                "the metric parameter {} needs increasing contiguous codes, got {:?}",
                path, values
            )));
        }
        Ok(Self { path, is_metric, values })
    }

    pub fn path(&self) -> &ConfigurationPropertyPath {
        &self.path
    }

    pub fn is_metric(&self) -> bool {
        self.is_metric
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// A uniformly drawn admissible code
    pub fn random_value<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        self.values[rng.gen_range(0..self.values.len())]
    }

    /// A neighbouring code of `value`.
    ///
    /// Metric parameters move by one step, away from the end they sit on or in a
    /// random direction when interior. Categorical parameters move to any other
    /// admissible code with uniform probability.
    pub fn shifted_value_from<R: Rng + ?Sized>(&self, value: i32, rng: &mut R) -> i32 {
        let last = self.values.len() - 1;
        if self.is_metric {
            if value == self.values[0] {
                return value + 1;
            }
            if value == self.values[last] {
                return value - 1;
            }
            if rng.gen_bool(0.5) {
                value + 1
            } else {
                value - 1
            }
        } else {
            let candidate = self.values[rng.gen_range(0..last)];
            if candidate == value {
                self.values[last]
            } else {
                candidate
            }
        }
    }
}

impl PartialEq for ConfigurationSearchParameter {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ConfigurationSearchParameter {}

impl PartialOrd for ConfigurationSearchParameter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConfigurationSearchParameter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl Hash for ConfigurationSearchParameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Display for ConfigurationSearchParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{'{}', is_metric={}, values=", self.path, self.is_metric)?;
        if self.is_metric {
            write!(f, "[{}:{}]", self.values[0], self.values[self.values.len() - 1])?;
        } else {
            let codes: Vec<String> = self.values.iter().map(i32::to_string).collect();
            write!(f, "[{}]", codes.join(","))?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn path(name: &str) -> ConfigurationPropertyPath {
        ConfigurationPropertyPath::new(name).unwrap()
    }

    #[test]
    fn test_construction() {
        let p = ConfigurationSearchParameter::new(path("use_subdivisions"), false, vec![0, 1]).unwrap();
        assert_eq!(p.path().repr(), "./use_subdivisions/");
        assert!(!p.is_metric());
        assert_eq!(p.values(), &[0, 1]);
        assert!(matches!(
            ConfigurationSearchParameter::new(path("x"), true, vec![3]),
            Err(ConfigurationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_metric_codes_must_be_contiguous() {
        for values in [vec![0, 5], vec![3, 5, 4], vec![1, 1]] {
            assert!(matches!(
                ConfigurationSearchParameter::new(path("a"), true, values),
                Err(ConfigurationError::InvalidArgument(_))
            ));
        }
        assert!(ConfigurationSearchParameter::new(path("a"), false, vec![0, 5]).is_ok());
        assert!(ConfigurationSearchParameter::new(path("a"), true, vec![-1, 0, 1]).is_ok());
    }

    #[test]
    fn test_deserialization_validates_codes() {
        let p = ConfigurationSearchParameter::new(path("a"), true, vec![3, 4, 5]).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"path":"./a/","is_metric":true,"values":[3,4,5]}"#);
        let q: ConfigurationSearchParameter = serde_json::from_str(&json).unwrap();
        assert_eq!(q.values(), p.values());

        let empty = r#"{"path":"./a/","is_metric":false,"values":[]}"#;
        let err = serde_json::from_str::<ConfigurationSearchParameter>(empty).unwrap_err();
        assert!(err.to_string().contains("at least two admissible values"), "got {}", err);
        let gapped = r#"{"path":"./a/","is_metric":true,"values":[0,5]}"#;
        assert!(serde_json::from_str::<ConfigurationSearchParameter>(gapped).is_err());
    }

    #[test]
    fn test_equality_is_by_path() {
        let p = ConfigurationSearchParameter::new(path("a"), false, vec![0, 1]).unwrap();
        let q = ConfigurationSearchParameter::new(path("a"), true, vec![3, 4, 5]).unwrap();
        let r = ConfigurationSearchParameter::new(path("b"), false, vec![0, 1]).unwrap();
        assert_eq!(p, q);
        assert_ne!(p, r);
        assert!(p < r);
    }

    #[test]
    fn test_random_value_is_admissible() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = ConfigurationSearchParameter::new(path("a"), true, vec![3, 4, 5]).unwrap();
        for _ in 0..50 {
            assert!(p.values().contains(&p.random_value(&mut rng)));
        }
    }

    #[test]
    fn test_metric_shift() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = ConfigurationSearchParameter::new(path("a"), true, vec![3, 4, 5]).unwrap();
        assert_eq!(p.shifted_value_from(3, &mut rng), 4);
        assert_eq!(p.shifted_value_from(5, &mut rng), 4);
        for _ in 0..50 {
            let shifted = p.shifted_value_from(4, &mut rng);
            assert!(shifted == 3 || shifted == 5);
        }
    }

    #[test]
    fn test_categorical_shift_never_returns_the_same_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let p = ConfigurationSearchParameter::new(path("a"), false, vec![0, 1, 2, 3]).unwrap();
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            let shifted = p.shifted_value_from(2, &mut rng);
            assert_ne!(shifted, 2);
            assert!(p.values().contains(&shifted));
            seen.insert(shifted);
        }
        assert_eq!(seen.len(), 3);

        let binary = ConfigurationSearchParameter::new(path("b"), false, vec![0, 1]).unwrap();
        assert_eq!(binary.shifted_value_from(0, &mut rng), 1);
        assert_eq!(binary.shifted_value_from(1, &mut rng), 0);
    }

    #[test]
    fn test_display() {
        let metric = ConfigurationSearchParameter::new(path("a"), true, vec![3, 4, 5]).unwrap();
        assert_eq!(metric.to_string(), "{'./a/', is_metric=true, values=[3:5]}");
        let categorical = ConfigurationSearchParameter::new(path("b"), false, vec![0, 1, 2]).unwrap();
        assert_eq!(categorical.to_string(), "{'./b/', is_metric=false, values=[0,1,2]}");
    }
}
