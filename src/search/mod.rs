//! Search spaces derived from configurations, and the points within them

pub mod parameter;
pub mod point;
pub mod shifting;
pub mod space;

pub use parameter::ConfigurationSearchParameter;
pub use point::{make_singleton, ConfigurationSearchPoint};
pub use shifting::make_extended_set_by_shifting;
pub use space::{ConfigurationSearchSpace, ParameterBindings};
