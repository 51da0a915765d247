//! # Tunable
//!
//! Searchable configurations for tunable components.
//!
//! A component exposes a configuration: a named set of properties, each admitting one
//! or several values. Properties still holding several values are the open dimensions
//! of an integer search space, derived automatically and recursively through nested
//! configurable values. Points of that space can be drawn, perturbed and finally
//! collapsed back into a singleton configuration, where every property holds exactly
//! one value.
//!
//! ```text
//! SearchableConfiguration ──search_space()──▶ ConfigurationSearchSpace
//!          ▲                                            │
//!          │                                 initial_point(rng)
//!   make_singleton(cfg, point)                          ▼
//!          └───────────────────────────────── ConfigurationSearchPoint ◀─┐
//!                                                       │                │
//!                                                       └─ shifting ─────┘
//! ```
//!
//! Randomness is always passed in explicitly; `SearchSession` owns a seeded generator
//! for callers that want one per session.

pub mod configuration;
pub mod converter;
pub mod error;
pub mod path;
pub mod property;
pub mod search;
pub mod session;

pub use configuration::{ConfigurationType, HasConfiguration, SearchableConfiguration};
pub use converter::{LinearConverter, Log10Converter, Log2Converter, SearchSpaceConverter};
pub use error::{ConfigurationError, ConfigurationResult};
pub use path::ConfigurationPropertyPath;
pub use property::{
    BooleanConfigurationProperty, Configurable, ConfigurationProperty, ConfigurationPropertyInterface,
    EnumConfigurationProperty, EnumerationValue, HandleListConfigurationProperty,
    InterfaceListConfigurationProperty, PropertyKind, PropertyType, RangeConfigurationProperty,
};
pub use search::{
    make_extended_set_by_shifting, make_singleton, ConfigurationSearchParameter, ConfigurationSearchPoint,
    ConfigurationSearchSpace, ParameterBindings,
};
pub use session::{SearchSession, SessionConfig};
