//! # Search Space Converters
//!
//! A converter maps the native value of a range property onto the integer lattice of
//! the search space and back. Three scalings are provided:
//!
//! - **Linear**: `round(x)`, for `f64`, `i32`, `i64` and `usize`
//! - **Log2**: `round(log2(x))`, for `f64`
//! - **Log10**: `round(log10(x))`, for `f64`
//!
//! Floating converters reserve `i32::MAX` for `+∞` and `i32::MIN` for `-∞`, in both
//! directions, so that a property holding an unbounded single value still has a code.
//!
//! ```text
//! Log10Converter.to_int(&0.001)  == -3
//! Log10Converter.from_int(-3)    == 0.001
//! LinearConverter.to_int(&3.5)   == 4
//! Log2Converter.to_int(&f64::INFINITY) == i32::MAX
//! ```
//!
//! Converters are strategies chosen per range property. Properties own a boxed
//! converter, hence `clone_converter`.

use std::fmt;

/// Bidirectional mapping between a value type and integer search coordinates
pub trait SearchSpaceConverter<T>: fmt::Debug + Send + Sync {
    /// Convert the value into an integer coordinate
    fn to_int(&self, value: &T) -> i32;

    /// Convert the value into the real-valued coordinate before rounding
    fn to_double(&self, value: &T) -> f64;

    /// Convert a real-valued coordinate back into a value
    fn from_double(&self, value: f64) -> T;

    /// Convert an integer coordinate back into a value
    fn from_int(&self, i: i32) -> T {
        self.from_double(f64::from(i))
    }

    fn clone_converter(&self) -> Box<dyn SearchSpaceConverter<T>>;
}

impl<T> Clone for Box<dyn SearchSpaceConverter<T>> {
    fn clone(&self) -> Self {
        self.clone_converter()
    }
}

/// Identity scaling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearConverter;

/// Base-2 logarithmic scaling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Log2Converter;

/// Base-10 logarithmic scaling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Log10Converter;

/// Round a finite coordinate into the `i32` lattice, saturating at the sentinels
fn round_to_int(x: f64) -> i32 {
    if x.is_nan() {
        return 0;
    }
    let rounded = x.round();
    if rounded >= f64::from(i32::MAX) {
        i32::MAX
    } else if rounded <= f64::from(i32::MIN) {
        i32::MIN
    } else {
        rounded as i32
    }
}

fn sentinel_to_int(value: f64) -> Option<i32> {
    if value == f64::INFINITY {
        Some(i32::MAX)
    } else if value == f64::NEG_INFINITY {
        Some(i32::MIN)
    } else {
        None
    }
}

fn sentinel_from_int(i: i32) -> Option<f64> {
    match i {
        i32::MAX => Some(f64::INFINITY),
        i32::MIN => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

impl SearchSpaceConverter<f64> for LinearConverter {
    fn to_int(&self, value: &f64) -> i32 {
        sentinel_to_int(*value).unwrap_or_else(|| round_to_int(*value))
    }

    fn to_double(&self, value: &f64) -> f64 {
        *value
    }

    fn from_double(&self, value: f64) -> f64 {
        value
    }

    fn from_int(&self, i: i32) -> f64 {
        sentinel_from_int(i).unwrap_or_else(|| f64::from(i))
    }

    fn clone_converter(&self) -> Box<dyn SearchSpaceConverter<f64>> {
        Box::new(*self)
    }
}

impl SearchSpaceConverter<i32> for LinearConverter {
    fn to_int(&self, value: &i32) -> i32 {
        *value
    }

    fn to_double(&self, value: &i32) -> f64 {
        f64::from(*value)
    }

    fn from_double(&self, value: f64) -> i32 {
        round_to_int(value)
    }

    fn from_int(&self, i: i32) -> i32 {
        i
    }

    fn clone_converter(&self) -> Box<dyn SearchSpaceConverter<i32>> {
        Box::new(*self)
    }
}

impl SearchSpaceConverter<i64> for LinearConverter {
    fn to_int(&self, value: &i64) -> i32 {
        i32::try_from(*value).unwrap_or(if *value < 0 { i32::MIN } else { i32::MAX })
    }

    fn to_double(&self, value: &i64) -> f64 {
        *value as f64
    }

    fn from_double(&self, value: f64) -> i64 {
        value.round() as i64
    }

    fn from_int(&self, i: i32) -> i64 {
        i64::from(i)
    }

    fn clone_converter(&self) -> Box<dyn SearchSpaceConverter<i64>> {
        Box::new(*self)
    }
}

impl SearchSpaceConverter<usize> for LinearConverter {
    fn to_int(&self, value: &usize) -> i32 {
        i32::try_from(*value).unwrap_or(i32::MAX)
    }

    fn to_double(&self, value: &usize) -> f64 {
        *value as f64
    }

    fn from_double(&self, value: f64) -> usize {
        if value <= 0.0 {
            0
        } else {
            value.round() as usize
        }
    }

    fn from_int(&self, i: i32) -> usize {
        usize::try_from(i).unwrap_or(0)
    }

    fn clone_converter(&self) -> Box<dyn SearchSpaceConverter<usize>> {
        Box::new(*self)
    }
}

impl SearchSpaceConverter<f64> for Log2Converter {
    fn to_int(&self, value: &f64) -> i32 {
        sentinel_to_int(*value).unwrap_or_else(|| round_to_int(value.log2()))
    }

    fn to_double(&self, value: &f64) -> f64 {
        if value.is_infinite() {
            return if *value > 0.0 { f64::MAX } else { f64::MIN };
        }
        value.log2()
    }

    fn from_double(&self, value: f64) -> f64 {
        value.exp2()
    }

    fn from_int(&self, i: i32) -> f64 {
        sentinel_from_int(i).unwrap_or_else(|| 2f64.powi(i))
    }

    fn clone_converter(&self) -> Box<dyn SearchSpaceConverter<f64>> {
        Box::new(*self)
    }
}

impl SearchSpaceConverter<f64> for Log10Converter {
    fn to_int(&self, value: &f64) -> i32 {
        sentinel_to_int(*value).unwrap_or_else(|| round_to_int(value.log10()))
    }

    fn to_double(&self, value: &f64) -> f64 {
        if value.is_infinite() {
            return if *value > 0.0 { f64::MAX } else { f64::MIN };
        }
        value.log10()
    }

    fn from_double(&self, value: f64) -> f64 {
        10f64.powf(value)
    }

    fn from_int(&self, i: i32) -> f64 {
        sentinel_from_int(i).unwrap_or_else(|| 10f64.powi(i))
    }

    fn clone_converter(&self) -> Box<dyn SearchSpaceConverter<f64>> {
        Box::new(*self)
    }
}
