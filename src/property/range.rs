//! Range property: a closed interval of an ordered type, discretised by a converter
//!
//! The admissible codes are every integer between the codes of the two bounds. When a
//! code equal to a bound's code is chosen, the property snaps to the bound itself, so
//! that resolving `[0.001, 0.1]` at its ends never suffers from converter round-trip
//! error. Open ranges must be bounded: an infinite bound has no finite code
//! neighbourhood to search.

use std::any::Any;
use std::fmt;

use super::{write_values, ConfigurationProperty, ConfigurationPropertyInterface, PropertyKind, PropertyType};
use crate::converter::SearchSpaceConverter;
use crate::error::{ConfigurationError, ConfigurationResult};

pub struct RangeConfigurationProperty<T> {
    is_specified: bool,
    lower: Option<T>,
    upper: Option<T>,
    converter: Box<dyn SearchSpaceConverter<T>>,
}

impl<T> RangeConfigurationProperty<T>
where
    T: Clone + PartialOrd + fmt::Display + fmt::Debug + 'static,
{
    /// An unspecified property
    pub fn new(converter: impl SearchSpaceConverter<T> + 'static) -> Self {
        Self { is_specified: false, lower: None, upper: None, converter: Box::new(converter) }
    }

    pub fn with_value(value: T, converter: impl SearchSpaceConverter<T> + 'static) -> Self {
        let mut property = Self::new(converter);
        property.set(value);
        property
    }

    pub fn with_range(
        lower: T,
        upper: T,
        converter: impl SearchSpaceConverter<T> + 'static,
    ) -> ConfigurationResult<Self> {
        let mut property = Self::new(converter);
        property.set_range(lower, upper)?;
        Ok(property)
    }

    pub fn get(&self) -> ConfigurationResult<&T> {
        if !self.is_specified {
            return Err(ConfigurationError::InvalidState(
                "the range property is not specified".to_string(),
            ));
        }
        if !self.is_single() {
            return Err(ConfigurationError::InvalidState(
                "the range property should have a single value when actually used".to_string(),
            ));
        }
        self.upper.as_ref().ok_or_else(|| {
            ConfigurationError::InvalidState("the range property holds no value".to_string())
        })
    }

    pub fn set(&mut self, value: T) {
        self.is_specified = true;
        self.lower = Some(value.clone());
        self.upper = Some(value);
    }

    /// Open the property on `[lower, upper]`
    pub fn set_range(&mut self, lower: T, upper: T) -> ConfigurationResult<()> {
        if upper < lower {
            return Err(ConfigurationError::OutOfDomain(format!(
                "the upper bound {} is lower than the lower bound {}",
                upper, lower
            )));
        }
        if lower != upper {
            let lower_code = self.converter.to_int(&lower);
            let upper_code = self.converter.to_int(&upper);
            if upper_code == i32::MAX {
                return Err(ConfigurationError::OutOfDomain(format!(
                    "an upper bounded range is required, got [{}:{}]",
                    lower, upper
                )));
            }
            if lower_code == i32::MIN {
                return Err(ConfigurationError::OutOfDomain(format!(
                    "a lower bounded range is required, got [{}:{}]",
                    lower, upper
                )));
            }
            if lower_code == upper_code {
                return Err(ConfigurationError::OutOfDomain(format!(
                    "the bounds of [{}:{}] share the code {}",
                    lower, upper, lower_code
                )));
            }
        }
        self.is_specified = true;
        self.lower = Some(lower);
        self.upper = Some(upper);
        Ok(())
    }

    pub fn lower(&self) -> Option<&T> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&T> {
        self.upper.as_ref()
    }

    fn codes(&self) -> Option<(i32, i32)> {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) if self.is_specified => {
                Some((self.converter.to_int(lower), self.converter.to_int(upper)))
            }
            _ => None,
        }
    }
}

impl<T> Clone for RangeConfigurationProperty<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            is_specified: self.is_specified,
            lower: self.lower.clone(),
            upper: self.upper.clone(),
            converter: self.converter.clone_converter(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RangeConfigurationProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeConfigurationProperty")
            .field("is_specified", &self.is_specified)
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("converter", &self.converter)
            .finish()
    }
}

impl<T> ConfigurationPropertyInterface for RangeConfigurationProperty<T>
where
    T: Clone + PartialOrd + fmt::Display + fmt::Debug + 'static,
{
    fn is_specified(&self) -> bool {
        self.is_specified
    }

    fn is_single(&self) -> bool {
        self.is_specified && self.lower == self.upper
    }

    fn cardinality(&self) -> usize {
        if self.is_single() {
            return 1;
        }
        match self.codes() {
            Some((lower, upper)) => (i64::from(upper) - i64::from(lower) + 1) as usize,
            None => 0,
        }
    }

    fn local_integer_values(&self) -> Vec<i32> {
        match self.codes() {
            None => Vec::new(),
            Some((lower, upper)) if self.is_single() || lower == upper => vec![upper],
            Some((lower, upper)) => (lower..=upper).collect(),
        }
    }

    fn local_set_single(&mut self, code: i32) -> ConfigurationResult<()> {
        if self.is_single() {
            return Err(ConfigurationError::InvalidState(
                "the range property already has a single value".to_string(),
            ));
        }
        let (lower_code, upper_code) = self.codes().ok_or_else(|| {
            ConfigurationError::InvalidState("the range property is not specified".to_string())
        })?;
        if code < lower_code || code > upper_code {
            return Err(ConfigurationError::OutOfDomain(format!(
                "code {} is outside [{}:{}]",
                code, lower_code, upper_code
            )));
        }
        if code == lower_code {
            self.upper = self.lower.clone();
        } else if code == upper_code {
            self.lower = self.upper.clone();
        } else {
            let value = self.converter.from_int(code);
            self.lower = Some(value.clone());
            self.upper = Some(value);
        }
        Ok(())
    }

    fn is_locally_metric(&self) -> bool {
        true
    }

    fn clone_property(&self) -> Box<dyn ConfigurationPropertyInterface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T> PropertyType for RangeConfigurationProperty<T>
where
    T: Clone + PartialOrd + fmt::Display + fmt::Debug + 'static,
{
    const KIND: PropertyKind = PropertyKind::Range;
}

impl<T> fmt::Display for RangeConfigurationProperty<T>
where
    T: Clone + PartialOrd + fmt::Display + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_specified {
            return write_values::<T, _>(f, []);
        }
        if self.is_single() {
            return write_values(f, self.upper.iter());
        }
        write_values(f, self.lower.iter().chain(self.upper.iter()))
    }
}

impl<T> From<RangeConfigurationProperty<T>> for ConfigurationProperty
where
    T: Clone + PartialOrd + fmt::Display + fmt::Debug + 'static,
{
    fn from(property: RangeConfigurationProperty<T>) -> Self {
        ConfigurationProperty::Range(Box::new(property))
    }
}
