//! BMI, WHO category classification and derived health metrics.
//!
//! All functions are pure. Only the derived metrics round their result;
//! `calculate_bmi` returns full precision so classification is not
//! shifted by display rounding.
//!
//! # References
//!
//! - WHO. Body mass index (BMI) classification for adults.
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower BMI bound of the healthy band (inclusive)
pub const HEALTHY_BMI_LOWER: f64 = 18.5;

/// Upper BMI bound of the healthy band (exclusive)
pub const HEALTHY_BMI_UPPER: f64 = 25.0;

const WATER_LITERS_PER_KG: f64 = 0.033;

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    if value <= 0.0 {
        return Err(Error::invalid(
            field,
            format!("must be positive and non-zero, got {}", value),
        ));
    }
    Ok(())
}

// ============================================================================
// BMI and category
// ============================================================================

/// Compute BMI as `weight_kg / height_m²`, unrounded.
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> Result<f64> {
    require_positive("height", height_m)?;
    require_positive("weight", weight_kg)?;
    Ok(weight_kg / (height_m * height_m))
}

/// WHO adult BMI category, in ascending order
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity class I")]
    ObesityClassI,
    #[serde(rename = "Obesity class II")]
    ObesityClassII,
    #[serde(rename = "Obesity class III")]
    ObesityClassIII,
}

/// Exclusive upper bounds, first match wins
const THRESHOLDS: [(f64, BmiCategory); 6] = [
    (18.5, BmiCategory::Underweight),
    (25.0, BmiCategory::NormalWeight),
    (30.0, BmiCategory::Overweight),
    (35.0, BmiCategory::ObesityClassI),
    (40.0, BmiCategory::ObesityClassII),
    (f64::INFINITY, BmiCategory::ObesityClassIII),
];

impl BmiCategory {
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::ObesityClassI,
        BmiCategory::ObesityClassII,
        BmiCategory::ObesityClassIII,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityClassI => "Obesity class I",
            BmiCategory::ObesityClassII => "Obesity class II",
            BmiCategory::ObesityClassIII => "Obesity class III",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Below healthy range; consider nutritional guidance.",
            BmiCategory::NormalWeight => "Healthy range",
            BmiCategory::Overweight => "Above healthy range; lifestyle adjustments may help.",
            BmiCategory::ObesityClassI => "Moderately high; medical advice is recommended.",
            BmiCategory::ObesityClassII => "High; increased health risks.",
            BmiCategory::ObesityClassIII => "Very high; medical guidance is important.",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a BMI value. A value on a boundary belongs to the higher category.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    THRESHOLDS
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, category)| *category)
        .unwrap_or(BmiCategory::ObesityClassIII)
}

/// Classify and return the `(label, description)` pair
pub fn classify_bmi_with_description(bmi: f64) -> (&'static str, &'static str) {
    let category = classify_bmi(bmi);
    (category.label(), category.description())
}

// ============================================================================
// BMR
// ============================================================================

/// Biological sex for the BMR equation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    fn msj_constant(&self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim();
        if normalized.eq_ignore_ascii_case("male") {
            Ok(Sex::Male)
        } else if normalized.eq_ignore_ascii_case("female") {
            Ok(Sex::Female)
        } else {
            Err(Error::InvalidSex(s.to_string()))
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor), rounded to 2 decimals
pub fn bmr_mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    round2(base + sex.msj_constant())
}

/// String-typed form of [`bmr_mifflin_st_jeor`]; fails with `InvalidSex`
pub fn bmr_for_sex_str(weight_kg: f64, height_cm: f64, age: u32, sex: &str) -> Result<f64> {
    let sex = sex.parse::<Sex>()?;
    Ok(bmr_mifflin_st_jeor(weight_kg, height_cm, age, sex))
}

// ============================================================================
// Healthy range, hydration, deltas
// ============================================================================

/// Weight interval `(min_kg, max_kg)` whose BMI lies between the given bounds
pub fn healthy_weight_range(height_m: f64, lower_bmi: f64, upper_bmi: f64) -> Result<(f64, f64)> {
    require_positive("height", height_m)?;
    let h2 = height_m * height_m;
    Ok((round2(lower_bmi * h2), round2(upper_bmi * h2)))
}

/// Healthy range for the WHO normal band (18.5 to 25.0)
pub fn healthy_weight_range_default(height_m: f64) -> Result<(f64, f64)> {
    healthy_weight_range(height_m, HEALTHY_BMI_LOWER, HEALTHY_BMI_UPPER)
}

/// Recommended daily water intake in liters
pub fn water_intake_liters(weight_kg: f64) -> Result<f64> {
    require_positive("weight", weight_kg)?;
    Ok(round2(weight_kg * WATER_LITERS_PER_KG))
}

/// Kilograms to gain and to lose to enter `[min_kg, max_kg]`
pub fn weight_delta_to_healthy(weight_kg: f64, min_kg: f64, max_kg: f64) -> (f64, f64) {
    let gain = (min_kg - weight_kg).max(0.0);
    let lose = (weight_kg - max_kg).max(0.0);
    (round2(gain), round2(lose))
}
