//! # Configuration Properties
//!
//! A property is a named slot of a configuration holding zero, one or many admissible
//! values:
//!
//! - `cardinality() == 0`: unspecified
//! - `cardinality() == 1`: single, the value is resolved
//! - `cardinality() > 1`: open for search
//!
//! Every property flattens itself into a list of integer codes. Boolean properties use
//! `0`/`1`, range properties the codes produced by their converter, enumerations and
//! lists the index of each admissible value.
//!
//! ## Variants
//!
//! `ConfigurationProperty` is the closed set of property kinds. The typed value of a
//! range, enumeration or list property is erased behind `ConfigurationPropertyInterface`
//! and recovered with `as_type::<P>()`, which checks the variant tag before
//! downcasting and reports a `TypeMismatch` instead of probing blindly.
//!
//! ## Nesting
//!
//! A list property whose single value is itself `Configurable` exposes that value's
//! configuration below its own path. The recursive operations (`integer_values`,
//! `is_metric`, `set_single`, `at`) are implemented once on `ConfigurationProperty`
//! and descend through `nested()` / `nested_mut()`.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use crate::configuration::SearchableConfiguration;
use crate::error::{ConfigurationError, ConfigurationResult};
use crate::path::ConfigurationPropertyPath;

pub mod boolean;
pub mod enumeration;
pub mod list;
pub mod range;

pub use boolean::BooleanConfigurationProperty;
pub use enumeration::{EnumConfigurationProperty, EnumerationValue};
pub use list::{HandleListConfigurationProperty, InterfaceListConfigurationProperty};
pub use range::RangeConfigurationProperty;

/// Text printed for a property that holds no value yet
pub(crate) const UNSPECIFIED: &str = "<unspecified>";

/// Write values as `<unspecified>`, `v` or `{v1,v2,...}`
pub(crate) fn write_values<'a, V, I>(f: &mut fmt::Formatter<'_>, values: I) -> fmt::Result
where
    V: fmt::Display + ?Sized + 'a,
    I: IntoIterator<Item = &'a V>,
{
    let values: Vec<&V> = values.into_iter().collect();
    match values.as_slice() {
        [] => write!(f, "{}", UNSPECIFIED),
        [single] => write!(f, "{}", single),
        many => {
            write!(f, "{{")?;
            for (i, value) in many.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "}}")
        }
    }
}

/// Capability of a value to expose a configuration of its own.
///
/// Values held by list properties must implement this trait. The default methods
/// report "not configurable", so plain value types need only an empty impl.
pub trait Configurable {
    fn searchable_configuration(&self) -> Option<&SearchableConfiguration> {
        None
    }

    fn searchable_configuration_mut(&mut self) -> Option<&mut SearchableConfiguration> {
        None
    }
}

macro_rules! impl_not_configurable {
    ($($t:ty),* $(,)?) => {
        $(impl Configurable for $t {})*
    };
}

impl_not_configurable!(bool, i32, i64, u32, u64, usize, f32, f64, String, &'static str);

/// The behaviour every concrete property provides about itself, ignoring nesting
pub trait ConfigurationPropertyInterface: fmt::Display + fmt::Debug + Any {
    /// False until the first value is set
    fn is_specified(&self) -> bool;

    /// True iff exactly one admissible value remains
    fn is_single(&self) -> bool;

    fn cardinality(&self) -> usize;

    /// Integer codes of this property alone
    fn local_integer_values(&self) -> Vec<i32>;

    /// Resolve to the value whose code is `code`
    fn local_set_single(&mut self, code: i32) -> ConfigurationResult<()>;

    /// Whether the codes of this property form an ordered scale
    fn is_locally_metric(&self) -> bool {
        false
    }

    /// Configuration of the single held value, if it is configurable
    fn nested(&self) -> Option<&SearchableConfiguration> {
        None
    }

    fn nested_mut(&mut self) -> Option<&mut SearchableConfiguration> {
        None
    }

    fn clone_property(&self) -> Box<dyn ConfigurationPropertyInterface>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn ConfigurationPropertyInterface> {
    fn clone(&self) -> Self {
        self.clone_property()
    }
}

/// Tag of a property variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Boolean,
    Range,
    Enum,
    HandleList,
    InterfaceList,
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Boolean => "boolean property",
            PropertyKind::Range => "range property",
            PropertyKind::Enum => "enum property",
            PropertyKind::HandleList => "handle list property",
            PropertyKind::InterfaceList => "interface list property",
        }
    }
}

/// A concrete property type that can be recovered from `ConfigurationProperty`
pub trait PropertyType: ConfigurationPropertyInterface + Sized {
    const KIND: PropertyKind;
}

/// Closed variant over every property kind
#[derive(Debug, Clone)]
pub enum ConfigurationProperty {
    Boolean(BooleanConfigurationProperty),
    Range(Box<dyn ConfigurationPropertyInterface>),
    Enum(Box<dyn ConfigurationPropertyInterface>),
    HandleList(Box<dyn ConfigurationPropertyInterface>),
    InterfaceList(Box<dyn ConfigurationPropertyInterface>),
}

impl ConfigurationProperty {
    pub fn kind(&self) -> PropertyKind {
        match self {
            ConfigurationProperty::Boolean(_) => PropertyKind::Boolean,
            ConfigurationProperty::Range(_) => PropertyKind::Range,
            ConfigurationProperty::Enum(_) => PropertyKind::Enum,
            ConfigurationProperty::HandleList(_) => PropertyKind::HandleList,
            ConfigurationProperty::InterfaceList(_) => PropertyKind::InterfaceList,
        }
    }

    fn inner(&self) -> &dyn ConfigurationPropertyInterface {
        match self {
            ConfigurationProperty::Boolean(p) => p,
            ConfigurationProperty::Range(p)
            | ConfigurationProperty::Enum(p)
            | ConfigurationProperty::HandleList(p)
            | ConfigurationProperty::InterfaceList(p) => &**p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ConfigurationPropertyInterface {
        match self {
            ConfigurationProperty::Boolean(p) => p,
            ConfigurationProperty::Range(p)
            | ConfigurationProperty::Enum(p)
            | ConfigurationProperty::HandleList(p)
            | ConfigurationProperty::InterfaceList(p) => &mut **p,
        }
    }

    /// Narrow to a concrete property type
    pub fn as_type<P: PropertyType>(&self) -> ConfigurationResult<&P> {
        let mismatch = || ConfigurationError::TypeMismatch {
            path: ConfigurationPropertyPath::root().repr(),
            expected: P::KIND.name(),
        };
        if self.kind() != P::KIND {
            return Err(mismatch());
        }
        self.inner().as_any().downcast_ref::<P>().ok_or_else(mismatch)
    }

    pub fn as_type_mut<P: PropertyType>(&mut self) -> ConfigurationResult<&mut P> {
        let mismatch = || ConfigurationError::TypeMismatch {
            path: ConfigurationPropertyPath::root().repr(),
            expected: P::KIND.name(),
        };
        if self.kind() != P::KIND {
            return Err(mismatch());
        }
        self.inner_mut().as_any_mut().downcast_mut::<P>().ok_or_else(mismatch)
    }

    pub fn is_specified(&self) -> bool {
        self.inner().is_specified()
    }

    pub fn is_single(&self) -> bool {
        self.inner().is_single()
    }

    pub fn cardinality(&self) -> usize {
        self.inner().cardinality()
    }

    pub fn local_integer_values(&self) -> Vec<i32> {
        self.inner().local_integer_values()
    }

    /// Codes of this property under the root path, plus those of the nested
    /// configuration (when single and configurable) under prefixed paths
    pub fn integer_values(&self) -> BTreeMap<ConfigurationPropertyPath, Vec<i32>> {
        let inner = self.inner();
        let mut result = BTreeMap::new();
        result.insert(ConfigurationPropertyPath::root(), inner.local_integer_values());
        if inner.is_single() {
            if let Some(nested) = inner.nested() {
                for (name, property) in nested.properties() {
                    for (path, codes) in property.integer_values() {
                        result.insert(path.prefixed(name), codes);
                    }
                }
            }
        }
        result
    }

    /// Whether the single held value exposes a configuration of its own
    pub fn is_configurable(&self) -> ConfigurationResult<bool> {
        let inner = self.inner();
        if !inner.is_specified() {
            return Err(ConfigurationError::InvalidState(
                "cannot check if configurable when the property is not specified".to_string(),
            ));
        }
        if !inner.is_single() {
            return Err(ConfigurationError::InvalidState(
                "cannot check if configurable when the property has multiple values".to_string(),
            ));
        }
        Ok(inner.nested().is_some())
    }

    pub fn is_metric(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<bool> {
        if path.is_root() {
            return Ok(self.inner().is_locally_metric());
        }
        let (first, rest) = path.split_first()?;
        self.nested_configuration(path)?.property(first)?.is_metric(&rest)
    }

    /// Resolve the property at `path` to the value whose code is `code`
    pub fn set_single(&mut self, path: &ConfigurationPropertyPath, code: i32) -> ConfigurationResult<()> {
        if path.is_root() {
            log::trace!("setting {} property to code {}", self.kind().name(), code);
            return self.inner_mut().local_set_single(code);
        }
        self.nested_configuration(path)?;
        let (first, rest) = path.split_first()?;
        self.inner_mut()
            .nested_mut()
            .ok_or_else(|| not_configurable(path))?
            .property_mut(first)?
            .set_single(&rest, code)
    }

    /// The property at `path` below this one; the root path gives `self`
    pub fn at(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<&ConfigurationProperty> {
        if path.is_root() {
            return Ok(self);
        }
        let (first, rest) = path.split_first()?;
        self.nested_configuration(path)?.property(first)?.at(&rest)
    }

    pub fn at_mut(&mut self, path: &ConfigurationPropertyPath) -> ConfigurationResult<&mut ConfigurationProperty> {
        if path.is_root() {
            return Ok(self);
        }
        self.nested_configuration(path)?;
        let (first, rest) = path.split_first()?;
        self.inner_mut()
            .nested_mut()
            .ok_or_else(|| not_configurable(path))?
            .property_mut(first)?
            .at_mut(&rest)
    }

    /// The nested configuration used to resolve the non-root `path`
    fn nested_configuration(&self, path: &ConfigurationPropertyPath) -> ConfigurationResult<&SearchableConfiguration> {
        match self.kind() {
            PropertyKind::Boolean | PropertyKind::Range | PropertyKind::Enum => {
                Err(ConfigurationError::NotFound(format!(
                    "the path {} is not a root but a {} has no properties below",
                    path,
                    self.kind().name()
                )))
            }
            PropertyKind::HandleList | PropertyKind::InterfaceList => {
                if !self.is_configurable()? {
                    return Err(not_configurable(path));
                }
                self.inner().nested().ok_or_else(|| not_configurable(path))
            }
        }
    }
}

fn not_configurable(path: &ConfigurationPropertyPath) -> ConfigurationError {
    ConfigurationError::NotFound(format!(
        "the object held is not configurable, a property for {} could not be found",
        path
    ))
}

impl fmt::Display for ConfigurationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl From<BooleanConfigurationProperty> for ConfigurationProperty {
    fn from(property: BooleanConfigurationProperty) -> Self {
        ConfigurationProperty::Boolean(property)
    }
}
