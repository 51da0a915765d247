//! List properties: admissible values given explicitly, coded by their index
//!
//! `HandleListConfigurationProperty<T>` stores value types, while
//! `InterfaceListConfigurationProperty<I>` stores boxed trait objects. When a list is
//! down to a single value and that value is `Configurable`, its configuration is
//! reachable through the property, which is how configurations nest.

use std::any::Any;
use std::fmt;

use super::{
    write_values, Configurable, ConfigurationProperty, ConfigurationPropertyInterface, PropertyKind,
    PropertyType,
};
use crate::configuration::SearchableConfiguration;
use crate::error::{ConfigurationError, ConfigurationResult};

fn check_not_empty(len: usize) -> ConfigurationResult<()> {
    if len == 0 {
        return Err(ConfigurationError::InvalidArgument(
            "a list property needs at least one value".to_string(),
        ));
    }
    Ok(())
}

fn check_single(len: usize, kind: PropertyKind) -> ConfigurationResult<()> {
    match len {
        0 => Err(ConfigurationError::InvalidState(format!("the {} is not specified", kind.name()))),
        1 => Ok(()),
        _ => Err(ConfigurationError::InvalidState(format!(
            "the {} should have a single value when actually used",
            kind.name()
        ))),
    }
}

fn select_index(len: usize, code: i32, kind: PropertyKind) -> ConfigurationResult<usize> {
    if len < 2 {
        return Err(ConfigurationError::InvalidState(format!(
            "cannot set code {} on a {} with cardinality {}",
            code,
            kind.name(),
            len
        )));
    }
    usize::try_from(code)
        .ok()
        .filter(|index| *index < len)
        .ok_or_else(|| {
            ConfigurationError::OutOfDomain(format!("code {} is not an index of {} values", code, len))
        })
}

/// List of value-type objects
pub struct HandleListConfigurationProperty<T> {
    values: Vec<T>,
}

impl<T> HandleListConfigurationProperty<T>
where
    T: Clone + Configurable + fmt::Display + fmt::Debug + 'static,
{
    /// An unspecified property
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_value(value: T) -> Self {
        Self { values: vec![value] }
    }

    pub fn with_values(values: Vec<T>) -> ConfigurationResult<Self> {
        let mut property = Self::new();
        property.set_values(values)?;
        Ok(property)
    }

    pub fn get(&self) -> ConfigurationResult<&T> {
        check_single(self.values.len(), PropertyKind::HandleList)?;
        Ok(&self.values[0])
    }

    pub fn set(&mut self, value: T) {
        self.values = vec![value];
    }

    pub fn set_values(&mut self, values: Vec<T>) -> ConfigurationResult<()> {
        check_not_empty(values.len())?;
        self.values = values;
        Ok(())
    }

    /// Admissible values in code order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T> Default for HandleListConfigurationProperty<T>
where
    T: Clone + Configurable + fmt::Display + fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for HandleListConfigurationProperty<T> {
    fn clone(&self) -> Self {
        Self { values: self.values.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for HandleListConfigurationProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleListConfigurationProperty").field("values", &self.values).finish()
    }
}

impl<T> ConfigurationPropertyInterface for HandleListConfigurationProperty<T>
where
    T: Clone + Configurable + fmt::Display + fmt::Debug + 'static,
{
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
        let index = select_index(self.values.len(), code, PropertyKind::HandleList)?;
        let value = self.values.swap_remove(index);
        self.values = vec![value];
        Ok(())
    }

    fn nested(&self) -> Option<&SearchableConfiguration> {
        match self.values.as_slice() {
            [single] => single.searchable_configuration(),
            _ => None,
        }
    }

    fn nested_mut(&mut self) -> Option<&mut SearchableConfiguration> {
        match self.values.as_mut_slice() {
            [single] => single.searchable_configuration_mut(),
            _ => None,
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

impl<T> PropertyType for HandleListConfigurationProperty<T>
where
    T: Clone + Configurable + fmt::Display + fmt::Debug + 'static,
{
    const KIND: PropertyKind = PropertyKind::HandleList;
}

impl<T: fmt::Display> fmt::Display for HandleListConfigurationProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, &self.values)
    }
}

impl<T> From<HandleListConfigurationProperty<T>> for ConfigurationProperty
where
    T: Clone + Configurable + fmt::Display + fmt::Debug + 'static,
{
    fn from(property: HandleListConfigurationProperty<T>) -> Self {
        ConfigurationProperty::HandleList(Box::new(property))
    }
}

/// List of polymorphic objects behind a trait `I`.
///
/// `Box<I>` must be `Clone`; for a trait object this is usually provided with a
/// `clone_box` method on the trait and a forwarding `impl Clone for Box<dyn Trait>`.
pub struct InterfaceListConfigurationProperty<I: ?Sized> {
    values: Vec<Box<I>>,
}

impl<I> InterfaceListConfigurationProperty<I>
where
    I: ?Sized + Configurable + fmt::Display + fmt::Debug + 'static,
    Box<I>: Clone,
{
    /// An unspecified property
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with_value(value: Box<I>) -> Self {
        Self { values: vec![value] }
    }

    pub fn with_values(values: Vec<Box<I>>) -> ConfigurationResult<Self> {
        let mut property = Self::new();
        property.set_values(values)?;
        Ok(property)
    }

    pub fn get(&self) -> ConfigurationResult<&I> {
        check_single(self.values.len(), PropertyKind::InterfaceList)?;
        Ok(&*self.values[0])
    }

    pub fn set(&mut self, value: Box<I>) {
        self.values = vec![value];
    }

    pub fn set_values(&mut self, values: Vec<Box<I>>) -> ConfigurationResult<()> {
        check_not_empty(values.len())?;
        self.values = values;
        Ok(())
    }

    /// Admissible values in code order
    pub fn values(&self) -> impl Iterator<Item = &I> {
        self.values.iter().map(|value| &**value)
    }
}

impl<I> Default for InterfaceListConfigurationProperty<I>
where
    I: ?Sized + Configurable + fmt::Display + fmt::Debug + 'static,
    Box<I>: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> Clone for InterfaceListConfigurationProperty<I>
where
    Box<I>: Clone,
{
    fn clone(&self) -> Self {
        Self { values: self.values.clone() }
    }
}

impl<I: ?Sized + fmt::Debug> fmt::Debug for InterfaceListConfigurationProperty<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceListConfigurationProperty").field("values", &self.values).finish()
    }
}

impl<I> ConfigurationPropertyInterface for InterfaceListConfigurationProperty<I>
where
    I: ?Sized + Configurable + fmt::Display + fmt::Debug + 'static,
    Box<I>: Clone,
{
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
        let index = select_index(self.values.len(), code, PropertyKind::InterfaceList)?;
        let value = self.values.swap_remove(index);
        self.values = vec![value];
        Ok(())
    }

    fn nested(&self) -> Option<&SearchableConfiguration> {
        match self.values.as_slice() {
            [single] => single.searchable_configuration(),
            _ => None,
        }
    }

    fn nested_mut(&mut self) -> Option<&mut SearchableConfiguration> {
        match self.values.as_mut_slice() {
            [single] => single.searchable_configuration_mut(),
            _ => None,
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

impl<I> PropertyType for InterfaceListConfigurationProperty<I>
where
    I: ?Sized + Configurable + fmt::Display + fmt::Debug + 'static,
    Box<I>: Clone,
{
    const KIND: PropertyKind = PropertyKind::InterfaceList;
}

impl<I: ?Sized + fmt::Display> fmt::Display for InterfaceListConfigurationProperty<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, self.values.iter().map(|value| &**value))
    }
}

impl<I> From<InterfaceListConfigurationProperty<I>> for ConfigurationProperty
where
    I: ?Sized + Configurable + fmt::Display + fmt::Debug + 'static,
    Box<I>: Clone,
{
    fn from(property: InterfaceListConfigurationProperty<I>) -> Self {
        ConfigurationProperty::InterfaceList(Box::new(property))
    }
}
