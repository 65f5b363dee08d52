//! Unit tags and conversions to canonical metric units.
//!
//! Weight is normalized to kilograms and height to meters before any
//! metric is computed. The conversion functions themselves do no
//! validation; callers check the sign of the result.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KG_PER_POUND: f64 = 0.45359237;
const METERS_PER_INCH: f64 = 0.0254;
const CM_PER_METER: f64 = 100.0;

// ============================================================================
// Conversion functions
// ============================================================================

pub fn pounds_to_kilograms(lb: f64) -> f64 {
    lb * KG_PER_POUND
}

pub fn kilograms_to_pounds(kg: f64) -> f64 {
    kg / KG_PER_POUND
}

pub fn inches_to_meters(inches: f64) -> f64 {
    inches * METERS_PER_INCH
}

pub fn feet_inches_to_meters(feet: f64, inches: f64) -> f64 {
    (feet * 12.0 + inches) * METERS_PER_INCH
}

pub fn centimeters_to_meters(cm: f64) -> f64 {
    cm / CM_PER_METER
}

pub fn meters_to_centimeters(m: f64) -> f64 {
    m * CM_PER_METER
}

// ============================================================================
// Unit tags
// ============================================================================

/// Unit a raw weight is expressed in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeightUnit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "lb")]
    Pound,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "kg",
            WeightUnit::Pound => "lb",
        }
    }

    pub fn to_kilograms(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kilogram => value,
            WeightUnit::Pound => pounds_to_kilograms(value),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kg" => Ok(WeightUnit::Kilogram),
            "lb" => Ok(WeightUnit::Pound),
            other => Err(Error::UnsupportedUnit {
                field: "weight",
                unit: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit a raw height is expressed in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HeightUnit {
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "ft_in")]
    FeetInches,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::Meter => "m",
            HeightUnit::Centimeter => "cm",
            HeightUnit::Inch => "in",
            HeightUnit::FeetInches => "ft_in",
        }
    }

    /// Convert a raw height to meters.
    ///
    /// Fails with `MalformedHeight` when the input shape does not match
    /// the unit, and with `InvalidMeasurement` when the inches component
    /// of a feet/inches pair is outside `[0, 12)`. The sign of scalar
    /// heights is left to `calculate_bmi`.
    pub fn to_meters(&self, height: &HeightInput) -> Result<f64> {
        match (self, height) {
            (HeightUnit::FeetInches, HeightInput::FeetInches(feet, inches)) => {
                if !(0.0..12.0).contains(inches) {
                    return Err(Error::invalid(
                        "height",
                        format!("inches must be in [0, 12), got {}", inches),
                    ));
                }
                Ok(feet_inches_to_meters(f64::from(*feet), *inches))
            }
            (HeightUnit::FeetInches, HeightInput::Scalar(value)) => Err(Error::MalformedHeight(
                format!("unit 'ft_in' needs a (feet, inches) pair, got {}", value),
            )),
            (unit, HeightInput::FeetInches(..)) => Err(Error::MalformedHeight(format!(
                "unit '{}' needs a single value, got a (feet, inches) pair",
                unit
            ))),
            (HeightUnit::Meter, HeightInput::Scalar(m)) => Ok(*m),
            (HeightUnit::Centimeter, HeightInput::Scalar(cm)) => Ok(centimeters_to_meters(*cm)),
            (HeightUnit::Inch, HeightInput::Scalar(inches)) => Ok(inches_to_meters(*inches)),
        }
    }
}

impl FromStr for HeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "m" => Ok(HeightUnit::Meter),
            "cm" => Ok(HeightUnit::Centimeter),
            "in" => Ok(HeightUnit::Inch),
            "ft_in" => Ok(HeightUnit::FeetInches),
            other => Err(Error::UnsupportedUnit {
                field: "height",
                unit: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Height input
// ============================================================================

/// A raw height value: one number, or a (feet, inches) pair.
///
/// Serialized untagged, so JSON carries either `1.75` or `[5, 9.5]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum HeightInput {
    Scalar(f64),
    FeetInches(u32, f64),
}

impl FromStr for HeightInput {
    type Err = Error;

    /// Parses `"1.75"` as a scalar and `"5,9.5"` as feet and inches.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::MalformedHeight(format!("cannot parse height {:?}", s));

        match s.split_once(',') {
            Some((feet, inches)) => {
                let feet = feet.trim().parse::<u32>().map_err(|_| malformed())?;
                let inches = inches.trim().parse::<f64>().map_err(|_| malformed())?;
                Ok(HeightInput::FeetInches(feet, inches))
            }
            None => s
                .trim()
                .parse::<f64>()
                .map(HeightInput::Scalar)
                .map_err(|_| malformed()),
        }
    }
}

impl fmt::Display for HeightInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightInput::Scalar(value) => write!(f, "{}", value),
            HeightInput::FeetInches(feet, inches) => write!(f, "{}'{}\"", feet, inches),
        }
    }
}
