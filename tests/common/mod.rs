//! Consumer types shared by the integration tests.
//!
//! `Top` owns a configuration with one property of every kind, including a nested
//! `TestConfigurable` whose configuration extends `TestConfigurableBase`'s by
//! composition.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fmt;

use tunable::{
    BooleanConfigurationProperty, Configurable, ConfigurationPropertyPath, ConfigurationResult,
    ConfigurationSearchPoint, ConfigurationSearchSpace, ConfigurationType, EnumConfigurationProperty,
    EnumerationValue, HandleListConfigurationProperty, HasConfiguration, InterfaceListConfigurationProperty,
    LinearConverter, Log2Converter, ParameterBindings, RangeConfigurationProperty, SearchableConfiguration,
};

pub type DoubleConfigurationProperty = RangeConfigurationProperty<f64>;
pub type IntegerConfigurationProperty = RangeConfigurationProperty<i32>;
pub type LevelOptionsConfigurationProperty = EnumConfigurationProperty<LevelOptions>;
pub type TestInterfaceConfigurationProperty = InterfaceListConfigurationProperty<dyn TestInterface>;
pub type TestHandleConfigurationProperty = HandleListConfigurationProperty<TestHandle>;
pub type TestConfigurableConfigurationProperty = InterfaceListConfigurationProperty<dyn TestConfigurableInterface>;

pub fn path(segments: &[&str]) -> ConfigurationPropertyPath {
    ConfigurationPropertyPath::from_segments(segments).unwrap()
}

/// Every point of a space, by enumerating the product of the admissible codes
pub fn all_points(space: &ConfigurationSearchSpace) -> BTreeSet<ConfigurationSearchPoint> {
    let mut combinations: Vec<ParameterBindings> = vec![ParameterBindings::new()];
    for parameter in space.parameters() {
        combinations = combinations
            .into_iter()
            .flat_map(|bindings| {
                parameter.values().iter().map(move |value| {
                    let mut extended = bindings.clone();
                    extended.insert(parameter.path().clone(), *value);
                    extended
                })
            })
            .collect();
    }
    combinations.iter().map(|bindings| space.make_point(bindings).unwrap()).collect()
}

// === ENUMERATION ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LevelOptions {
    Low,
    Medium,
    High,
}

impl fmt::Display for LevelOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelOptions::Low => write!(f, "LOW"),
            LevelOptions::Medium => write!(f, "MEDIUM"),
            LevelOptions::High => write!(f, "HIGH"),
        }
    }
}

impl EnumerationValue for LevelOptions {
    fn variants() -> &'static [Self] {
        &[LevelOptions::Low, LevelOptions::Medium, LevelOptions::High]
    }
}

// === POLYMORPHIC VALUES ===

pub trait TestInterface: Configurable + fmt::Display + fmt::Debug {
    fn clone_box(&self) -> Box<dyn TestInterface>;
}

impl Clone for Box<dyn TestInterface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone)]
pub struct ATest;

#[derive(Debug, Clone)]
pub struct BTest;

impl Configurable for ATest {}
impl Configurable for BTest {}

impl fmt::Display for ATest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A")
    }
}

impl fmt::Display for BTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")
    }
}

impl TestInterface for ATest {
    fn clone_box(&self) -> Box<dyn TestInterface> {
        Box::new(self.clone())
    }
}

impl TestInterface for BTest {
    fn clone_box(&self) -> Box<dyn TestInterface> {
        Box::new(self.clone())
    }
}

pub fn both_interfaces() -> Vec<Box<dyn TestInterface>> {
    vec![Box::new(ATest), Box::new(BTest)]
}

/// Value-type wrapper around a polymorphic object
#[derive(Debug, Clone)]
pub struct TestHandle(Box<dyn TestInterface>);

impl TestHandle {
    pub fn new(value: impl TestInterface + 'static) -> Self {
        Self(Box::new(value))
    }
}

impl Configurable for TestHandle {}

impl fmt::Display for TestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub fn both_handles() -> Vec<TestHandle> {
    vec![TestHandle::new(ATest), TestHandle::new(BTest)]
}

// === NESTED CONFIGURABLE ===

pub trait TestConfigurableInterface: Configurable + fmt::Display + fmt::Debug {
    fn clone_box(&self) -> Box<dyn TestConfigurableInterface>;
}

impl Clone for Box<dyn TestConfigurableInterface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[derive(Debug, Clone)]
pub struct TestConfigurableBaseConfiguration {
    searchable: SearchableConfiguration,
}

impl TestConfigurableBaseConfiguration {
    pub fn new() -> Self {
        let mut searchable = SearchableConfiguration::new();
        searchable
            .add_property("_use_reconditioning", BooleanConfigurationProperty::with_value(false))
            .unwrap();
        Self { searchable }
    }

    pub fn use_reconditioning(&self) -> ConfigurationResult<bool> {
        self.searchable.at::<BooleanConfigurationProperty>("_use_reconditioning")?.get()
    }

    pub fn set_both_use_reconditioning(&mut self) -> ConfigurationResult<()> {
        self.searchable
            .at_mut::<BooleanConfigurationProperty>("_use_reconditioning")?
            .set_both();
        Ok(())
    }

    pub fn set_use_reconditioning(&mut self, value: bool) -> ConfigurationResult<()> {
        self.searchable.at_mut::<BooleanConfigurationProperty>("_use_reconditioning")?.set(value);
        Ok(())
    }
}

impl fmt::Display for TestConfigurableBaseConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.searchable, f)
    }
}

impl ConfigurationType for TestConfigurableBaseConfiguration {
    fn searchable(&self) -> &SearchableConfiguration {
        &self.searchable
    }

    fn searchable_mut(&mut self) -> &mut SearchableConfiguration {
        &mut self.searchable
    }
}

/// Extends the base configuration with one property of every kind
#[derive(Debug, Clone)]
pub struct TestConfigurableConfiguration {
    base: TestConfigurableBaseConfiguration,
}

impl TestConfigurableConfiguration {
    pub fn new() -> Self {
        let mut base = TestConfigurableBaseConfiguration::new();
        let searchable = base.searchable_mut();
        searchable
            .add_property("_maximum_order", IntegerConfigurationProperty::with_value(5, LinearConverter))
            .unwrap();
        searchable
            .add_property(
                "_maximum_step_size",
                DoubleConfigurationProperty::with_value(f64::INFINITY, Log2Converter),
            )
            .unwrap();
        searchable
            .add_property("_level", LevelOptionsConfigurationProperty::with_value(LevelOptions::Low))
            .unwrap();
        searchable
            .add_property(
                "_test_interface",
                TestInterfaceConfigurationProperty::with_value(Box::new(ATest)),
            )
            .unwrap();
        searchable
            .add_property("_test_handle", TestHandleConfigurationProperty::with_value(TestHandle::new(ATest)))
            .unwrap();
        Self { base }
    }

    pub fn use_reconditioning(&self) -> ConfigurationResult<bool> {
        self.base.use_reconditioning()
    }

    pub fn set_both_use_reconditioning(&mut self) -> ConfigurationResult<()> {
        self.base.set_both_use_reconditioning()
    }

    pub fn level(&self) -> ConfigurationResult<LevelOptions> {
        self.searchable().at::<LevelOptionsConfigurationProperty>("_level")?.get().copied()
    }

    pub fn set_maximum_order_range(&mut self, lower: i32, upper: i32) -> ConfigurationResult<()> {
        self.searchable_mut()
            .at_mut::<IntegerConfigurationProperty>("_maximum_order")?
            .set_range(lower, upper)
    }

    pub fn set_test_interfaces(&mut self, values: Vec<Box<dyn TestInterface>>) -> ConfigurationResult<()> {
        self.searchable_mut()
            .at_mut::<TestInterfaceConfigurationProperty>("_test_interface")?
            .set_values(values)
    }

    pub fn set_test_handles(&mut self, values: Vec<TestHandle>) -> ConfigurationResult<()> {
        self.searchable_mut()
            .at_mut::<TestHandleConfigurationProperty>("_test_handle")?
            .set_values(values)
    }
}

impl fmt::Display for TestConfigurableConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

impl ConfigurationType for TestConfigurableConfiguration {
    fn searchable(&self) -> &SearchableConfiguration {
        self.base.searchable()
    }

    fn searchable_mut(&mut self) -> &mut SearchableConfiguration {
        self.base.searchable_mut()
    }
}

#[derive(Debug, Clone)]
pub struct TestConfigurable {
    configuration: TestConfigurableConfiguration,
}

impl TestConfigurable {
    pub fn new(configuration: TestConfigurableConfiguration) -> Self {
        Self { configuration }
    }
}

impl Default for TestConfigurable {
    fn default() -> Self {
        Self::new(TestConfigurableConfiguration::new())
    }
}

impl HasConfiguration for TestConfigurable {
    type Configuration = TestConfigurableConfiguration;

    fn configuration(&self) -> &TestConfigurableConfiguration {
        &self.configuration
    }
}

impl Configurable for TestConfigurable {
    fn searchable_configuration(&self) -> Option<&SearchableConfiguration> {
        Some(self.configuration.searchable())
    }

    fn searchable_configuration_mut(&mut self) -> Option<&mut SearchableConfiguration> {
        Some(self.configuration.searchable_mut())
    }
}

impl fmt::Display for TestConfigurable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestConfigurable({})", self.configuration)
    }
}

impl TestConfigurableInterface for TestConfigurable {
    fn clone_box(&self) -> Box<dyn TestConfigurableInterface> {
        Box::new(self.clone())
    }
}

// === TOP LEVEL CONSUMER ===

#[derive(Debug, Clone)]
pub struct TopConfiguration {
    searchable: SearchableConfiguration,
}

impl TopConfiguration {
    pub fn new() -> Self {
        let mut searchable = SearchableConfiguration::new();
        searchable
            .add_property("use_reconditioning", BooleanConfigurationProperty::with_value(false))
            .unwrap();
        searchable
            .add_property("maximum_order", IntegerConfigurationProperty::with_value(5, LinearConverter))
            .unwrap();
        searchable
            .add_property(
                "maximum_step_size",
                DoubleConfigurationProperty::with_value(f64::INFINITY, Log2Converter),
            )
            .unwrap();
        searchable
            .add_property("level", LevelOptionsConfigurationProperty::with_value(LevelOptions::Low))
            .unwrap();
        searchable
            .add_property(
                "test_interface",
                TestInterfaceConfigurationProperty::with_value(Box::new(ATest)),
            )
            .unwrap();
        searchable
            .add_property("test_handle", TestHandleConfigurationProperty::with_value(TestHandle::new(ATest)))
            .unwrap();
        searchable
            .add_property(
                "test_configurable",
                TestConfigurableConfigurationProperty::with_value(Box::new(TestConfigurable::default())),
            )
            .unwrap();
        Self { searchable }
    }

    pub fn use_reconditioning(&self) -> ConfigurationResult<bool> {
        self.searchable.at::<BooleanConfigurationProperty>("use_reconditioning")?.get()
    }

    pub fn set_both_use_reconditioning(&mut self) -> ConfigurationResult<()> {
        self.searchable.at_mut::<BooleanConfigurationProperty>("use_reconditioning")?.set_both();
        Ok(())
    }

    pub fn set_use_reconditioning(&mut self, value: bool) -> ConfigurationResult<()> {
        self.searchable.at_mut::<BooleanConfigurationProperty>("use_reconditioning")?.set(value);
        Ok(())
    }

    pub fn maximum_order(&self) -> ConfigurationResult<i32> {
        self.searchable.at::<IntegerConfigurationProperty>("maximum_order")?.get().copied()
    }

    pub fn set_maximum_order(&mut self, value: i32) -> ConfigurationResult<()> {
        self.searchable.at_mut::<IntegerConfigurationProperty>("maximum_order")?.set(value);
        Ok(())
    }

    pub fn set_maximum_order_range(&mut self, lower: i32, upper: i32) -> ConfigurationResult<()> {
        self.searchable
            .at_mut::<IntegerConfigurationProperty>("maximum_order")?
            .set_range(lower, upper)
    }

    pub fn maximum_step_size(&self) -> ConfigurationResult<f64> {
        self.searchable.at::<DoubleConfigurationProperty>("maximum_step_size")?.get().copied()
    }

    pub fn set_maximum_step_size_range(&mut self, lower: f64, upper: f64) -> ConfigurationResult<()> {
        self.searchable
            .at_mut::<DoubleConfigurationProperty>("maximum_step_size")?
            .set_range(lower, upper)
    }

    pub fn level(&self) -> ConfigurationResult<LevelOptions> {
        self.searchable.at::<LevelOptionsConfigurationProperty>("level")?.get().copied()
    }

    pub fn set_level(&mut self, value: LevelOptions) -> ConfigurationResult<()> {
        self.searchable.at_mut::<LevelOptionsConfigurationProperty>("level")?.set(value);
        Ok(())
    }

    pub fn set_levels(&mut self, values: Vec<LevelOptions>) -> ConfigurationResult<()> {
        self.searchable
            .at_mut::<LevelOptionsConfigurationProperty>("level")?
            .set_values(values)
    }

    pub fn test_interface(&self) -> ConfigurationResult<String> {
        Ok(self.searchable.at::<TestInterfaceConfigurationProperty>("test_interface")?.get()?.to_string())
    }

    pub fn set_test_interfaces(&mut self, values: Vec<Box<dyn TestInterface>>) -> ConfigurationResult<()> {
        self.searchable
            .at_mut::<TestInterfaceConfigurationProperty>("test_interface")?
            .set_values(values)
    }

    pub fn set_test_handles(&mut self, values: Vec<TestHandle>) -> ConfigurationResult<()> {
        self.searchable
            .at_mut::<TestHandleConfigurationProperty>("test_handle")?
            .set_values(values)
    }

    pub fn set_test_configurable(&mut self, value: TestConfigurable) -> ConfigurationResult<()> {
        self.searchable
            .at_mut::<TestConfigurableConfigurationProperty>("test_configurable")?
            .set(Box::new(value));
        Ok(())
    }
}

impl fmt::Display for TopConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.searchable, f)
    }
}

impl ConfigurationType for TopConfiguration {
    fn searchable(&self) -> &SearchableConfiguration {
        &self.searchable
    }

    fn searchable_mut(&mut self) -> &mut SearchableConfiguration {
        &mut self.searchable
    }
}

pub struct Top {
    configuration: TopConfiguration,
}

impl Top {
    pub fn new(configuration: TopConfiguration) -> Self {
        Self { configuration }
    }
}

impl HasConfiguration for Top {
    type Configuration = TopConfiguration;

    fn configuration(&self) -> &TopConfiguration {
        &self.configuration
    }
}
