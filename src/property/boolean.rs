//! Boolean property: codes `0` for false and `1` for true

use std::any::Any;
use std::fmt;

use super::{ConfigurationPropertyInterface, PropertyKind, PropertyType, UNSPECIFIED};
use crate::error::{ConfigurationError, ConfigurationResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanConfigurationProperty {
    is_specified: bool,
    is_single: bool,
    value: bool,
}

impl BooleanConfigurationProperty {
    /// An unspecified property
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: bool) -> Self {
        Self { is_specified: true, is_single: true, value }
    }

    /// Open property admitting both values
    pub fn both() -> Self {
        Self { is_specified: true, is_single: false, value: false }
    }

    pub fn get(&self) -> ConfigurationResult<bool> {
        if !self.is_specified {
            return Err(ConfigurationError::InvalidState(
                "the boolean property is not specified".to_string(),
            ));
        }
        if !self.is_single {
            return Err(ConfigurationError::InvalidState(
                "the boolean property should have a single value when actually used".to_string(),
            ));
        }
        Ok(self.value)
    }

    pub fn set(&mut self, value: bool) {
        self.is_specified = true;
        self.is_single = true;
        self.value = value;
    }

    pub fn set_both(&mut self) {
        self.is_specified = true;
        self.is_single = false;
    }
}

impl ConfigurationPropertyInterface for BooleanConfigurationProperty {
    fn is_specified(&self) -> bool {
        self.is_specified
    }

    fn is_single(&self) -> bool {
        self.is_single
    }

    fn cardinality(&self) -> usize {
        match (self.is_specified, self.is_single) {
            (false, _) => 0,
            (true, true) => 1,
            (true, false) => 2,
        }
    }

    fn local_integer_values(&self) -> Vec<i32> {
        match (self.is_specified, self.is_single) {
            (false, _) => Vec::new(),
            (true, true) => vec![i32::from(self.value)],
            (true, false) => vec![0, 1],
        }
    }

    fn local_set_single(&mut self, code: i32) -> ConfigurationResult<()> {
        if !self.is_specified || self.is_single {
            return Err(ConfigurationError::InvalidState(format!(
                "cannot set code {} on a boolean property with cardinality {}",
                code,
                self.cardinality()
            )));
        }
        match code {
            0 | 1 => {
                self.set(code == 1);
                Ok(())
            }
            _ => Err(ConfigurationError::OutOfDomain(format!(
                "{} is not a boolean code",
                code
            ))),
        }
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

impl PropertyType for BooleanConfigurationProperty {
    const KIND: PropertyKind = PropertyKind::Boolean;
}

impl fmt::Display for BooleanConfigurationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_specified, self.is_single) {
            (false, _) => write!(f, "{}", UNSPECIFIED),
            (true, true) => write!(f, "{}", self.value),
            (true, false) => write!(f, "{{true,false}}"),
        }
    }
}
