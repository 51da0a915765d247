//! Enumeration property over a closed, declaration-ordered set of values

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;

use super::{write_values, ConfigurationProperty, ConfigurationPropertyInterface, PropertyKind, PropertyType};
use crate::error::{ConfigurationError, ConfigurationResult};

/// A finite set of values, totally ordered by declaration.
///
/// Deriving `Ord` on a fieldless enum gives the declaration order, which is the order
/// used to assign codes.
///
/// ```
/// use std::fmt;
/// use tunable::EnumerationValue;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// enum Level { Low, High }
///
/// impl fmt::Display for Level {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{:?}", self)
///     }
/// }
///
/// impl EnumerationValue for Level {
///     fn variants() -> &'static [Self] {
///         &[Level::Low, Level::High]
///     }
/// }
///
/// assert_eq!(Level::variants().len(), 2);
/// ```
pub trait EnumerationValue: Copy + Ord + fmt::Display + fmt::Debug + 'static {
    fn variants() -> &'static [Self];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumConfigurationProperty<T: EnumerationValue> {
    values: BTreeSet<T>,
}

impl<T: EnumerationValue> Default for EnumConfigurationProperty<T> {
    fn default() -> Self {
        Self { values: BTreeSet::new() }
    }
}

impl<T: EnumerationValue> EnumConfigurationProperty<T> {
    /// An unspecified property
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: T) -> Self {
        Self { values: BTreeSet::from([value]) }
    }

    pub fn with_values(values: impl IntoIterator<Item = T>) -> ConfigurationResult<Self> {
        let mut property = Self::new();
        property.set_values(values)?;
        Ok(property)
    }

    /// A property admitting every variant
    pub fn all() -> Self {
        let mut property = Self::new();
        property.set_all();
        property
    }

    pub fn get(&self) -> ConfigurationResult<&T> {
        match self.values.len() {
            0 => Err(ConfigurationError::InvalidState(
                "the enum property is not specified".to_string(),
            )),
            1 => self.values.iter().next().ok_or_else(|| {
                ConfigurationError::InvalidState("the enum property holds no value".to_string())
            }),
            _ => Err(ConfigurationError::InvalidState(
                "the enum property should have a single value when actually used".to_string(),
            )),
        }
    }

    pub fn set(&mut self, value: T) {
        self.values.clear();
        self.values.insert(value);
    }

    pub fn set_values(&mut self, values: impl IntoIterator<Item = T>) -> ConfigurationResult<()> {
        let values: BTreeSet<T> = values.into_iter().collect();
        if values.is_empty() {
            return Err(ConfigurationError::InvalidArgument(
                "an enum property needs at least one value".to_string(),
            ));
        }
        self.values = values;
        Ok(())
    }

    pub fn set_all(&mut self) {
        self.values = T::variants().iter().copied().collect();
    }

    /// Admissible values in code order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: EnumerationValue> ConfigurationPropertyInterface for EnumConfigurationProperty<T> {
    fn is_specified(&self) -> bool {
        !self.values.is_empty()
    }

    fn is_single(&self) -> bool {
        self.values.len() == 1
    }

    fn cardinality(&self) -> usize {
        self.values.len()
    }

    fn local_integer_values(&self) -> Vec<i32> {
        (0..self.values.len() as i32).collect()
    }

    fn local_set_single(&mut self, code: i32) -> ConfigurationResult<()> {
        if self.values.len() < 2 {
            return Err(ConfigurationError::InvalidState(format!(
                "cannot set code {} on an enum property with cardinality {}",
                code,
                self.values.len()
            )));
        }
        let value = usize::try_from(code)
            .ok()
            .and_then(|index| self.values.iter().nth(index).copied())
            .ok_or_else(|| {
                ConfigurationError::OutOfDomain(format!(
                    "code {} is not an index of {} values",
                    code,
                    self.values.len()
                ))
            })?;
        self.set(value);
        Ok(())
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

impl<T: EnumerationValue> PropertyType for EnumConfigurationProperty<T> {
    const KIND: PropertyKind = PropertyKind::Enum;
}

impl<T: EnumerationValue> fmt::Display for EnumConfigurationProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, &self.values)
    }
}

impl<T: EnumerationValue> From<EnumConfigurationProperty<T>> for ConfigurationProperty {
    fn from(property: EnumConfigurationProperty<T>) -> Self {
        ConfigurationProperty::Enum(Box::new(property))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Level {
        Low,
        Medium,
        High,
    }

    impl fmt::Display for Level {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let name = match self {
                Level::Low => "LOW",
                Level::Medium => "MEDIUM",
                Level::High => "HIGH",
            };
            write!(f, "{}", name)
        }
    }

    impl EnumerationValue for Level {
        fn variants() -> &'static [Self] {
            &[Level::Low, Level::Medium, Level::High]
        }
    }

    #[test]
    fn test_unspecified() {
        let p = EnumConfigurationProperty::<Level>::new();
        assert!(!p.is_specified());
        assert_eq!(p.cardinality(), 0);
        assert!(p.local_integer_values().is_empty());
        assert!(p.get().is_err());
        assert_eq!(p.to_string(), "<unspecified>");
    }

    #[test]
    fn test_single_value() {
        let p = EnumConfigurationProperty::with_value(Level::Medium);
        assert!(p.is_single());
        assert_eq!(p.local_integer_values(), vec![0]);
        assert_eq!(p.get(), Ok(&Level::Medium));
        assert_eq!(p.to_string(), "MEDIUM");
    }

    #[test]
    fn test_values_follow_declaration_order() {
        let p = EnumConfigurationProperty::with_values([Level::High, Level::Low]).unwrap();
        assert_eq!(p.cardinality(), 2);
        assert_eq!(p.local_integer_values(), vec![0, 1]);
        assert_eq!(p.to_string(), "{LOW,HIGH}");

        let mut q = p.clone();
        q.local_set_single(1).unwrap();
        assert_eq!(q.get(), Ok(&Level::High));
        assert_eq!(p.cardinality(), 2);
    }

    #[test]
    fn test_set_all() {
        let p = EnumConfigurationProperty::<Level>::all();
        assert_eq!(p.cardinality(), 3);
        assert_eq!(p.values().copied().collect::<Vec<_>>(), Level::variants());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            EnumConfigurationProperty::<Level>::with_values([]),
            Err(ConfigurationError::InvalidArgument(_))
        ));
        let mut p = EnumConfigurationProperty::<Level>::all();
        assert!(matches!(p.local_set_single(3), Err(ConfigurationError::OutOfDomain(_))));
        assert!(matches!(p.local_set_single(-1), Err(ConfigurationError::OutOfDomain(_))));
        p.local_set_single(0).unwrap();
        assert!(matches!(p.local_set_single(0), Err(ConfigurationError::InvalidState(_))));
    }
}
