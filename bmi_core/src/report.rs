//! BMI report assembly.
//!
//! `build_report` is the single entry point from raw user input to a
//! complete `BmiReport`. A report is all-or-nothing: any invalid unit,
//! height shape or measurement returns an error before a report exists.

use crate::metrics::{
    bmr_mifflin_st_jeor, calculate_bmi, classify_bmi, healthy_weight_range_default, round2,
    water_intake_liters, weight_delta_to_healthy, BmiCategory, Sex,
};
use crate::units::{meters_to_centimeters, HeightInput, HeightUnit, WeightUnit};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Everything computed for one weight/height/age/sex measurement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BmiReport {
    pub bmi: f64,
    pub category: BmiCategory,
    pub description: String,
    pub bmr: f64,
    pub healthy_range: (f64, f64),
    pub water_intake: f64,
    pub kg_to_gain: f64,
    pub kg_to_lose: f64,
}

/// Raw, untyped engine input as supplied by a form or a JSON request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportInput {
    pub weight: f64,
    pub height: HeightInput,
    pub age: u32,
    pub sex: String,
    pub weight_unit: String,
    pub height_unit: String,
}

impl ReportInput {
    pub fn build_report(&self) -> Result<BmiReport> {
        build_report(
            self.weight,
            &self.height,
            self.age,
            &self.sex,
            &self.weight_unit,
            &self.height_unit,
        )
    }
}

/// Build a report from raw values and unit tags.
///
/// Units are validated before anything is converted. Classification uses
/// the unrounded BMI; only the reported `bmi` field is rounded.
pub fn build_report(
    weight: f64,
    height: &HeightInput,
    age: u32,
    sex: &str,
    weight_unit: &str,
    height_unit: &str,
) -> Result<BmiReport> {
    let weight_unit: WeightUnit = weight_unit.parse()?;
    let height_unit: HeightUnit = height_unit.parse()?;

    let weight_kg = weight_unit.to_kilograms(weight);
    let height_m = height_unit.to_meters(height)?;

    let bmi = calculate_bmi(weight_kg, height_m)?;
    let sex: Sex = sex.parse()?;

    tracing::debug!(
        weight_kg,
        height_m,
        bmi,
        "Converted {} {} / {} {}",
        weight,
        weight_unit,
        height,
        height_unit
    );

    assemble(weight_kg, height_m, bmi, age, sex)
}

/// Build a report from values already in kilograms and meters
pub fn build_report_typed(weight_kg: f64, height_m: f64, age: u32, sex: Sex) -> Result<BmiReport> {
    let bmi = calculate_bmi(weight_kg, height_m)?;
    assemble(weight_kg, height_m, bmi, age, sex)
}

fn assemble(weight_kg: f64, height_m: f64, bmi: f64, age: u32, sex: Sex) -> Result<BmiReport> {
    let category = classify_bmi(bmi);
    let bmr = bmr_mifflin_st_jeor(weight_kg, meters_to_centimeters(height_m), age, sex);
    let healthy_range = healthy_weight_range_default(height_m)?;
    let water_intake = water_intake_liters(weight_kg)?;
    let (kg_to_gain, kg_to_lose) =
        weight_delta_to_healthy(weight_kg, healthy_range.0, healthy_range.1);

    Ok(BmiReport {
        bmi: round2(bmi),
        category,
        description: category.description().to_string(),
        bmr,
        healthy_range,
        water_intake,
        kg_to_gain,
        kg_to_lose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn report(
        weight: f64,
        height: HeightInput,
        weight_unit: &str,
        height_unit: &str,
    ) -> Result<BmiReport> {
        build_report(weight, &height, 25, "male", weight_unit, height_unit)
    }

    #[test]
    fn test_metric_report() {
        let r = report(70.0, HeightInput::Scalar(1.75), "kg", "m").unwrap();
        assert_eq!(r.bmi, 22.86);
        assert_eq!(r.category, BmiCategory::NormalWeight);
        assert_eq!(r.description, "Healthy range");
        assert_eq!(r.bmr, 1673.75);
        assert_eq!(r.healthy_range, (56.66, 76.56));
        assert_eq!(r.water_intake, 2.31);
        assert_eq!((r.kg_to_gain, r.kg_to_lose), (0.0, 0.0));
    }

    #[test]
    fn test_pound_weight_is_converted() {
        let r = report(154.0, HeightInput::Scalar(1.75), "lb", "m").unwrap();
        assert!((r.bmi - 22.86).abs() < 0.1, "bmi was {}", r.bmi);
        assert_eq!(r.bmi, 22.81);
    }

    #[test]
    fn test_centimeter_and_inch_heights() {
        let cm = report(70.0, HeightInput::Scalar(175.0), "kg", "cm").unwrap();
        assert_eq!(cm.bmi, 22.86);

        let inches = report(70.0, HeightInput::Scalar(68.9), "kg", "in").unwrap();
        assert!((inches.bmi - 22.86).abs() < 0.05);
    }

    #[test]
    fn test_feet_inches_height() {
        let r = report(160.0, HeightInput::FeetInches(5, 9.0), "lb", "ft_in").unwrap();
        // 72.57 kg over 1.7526 m
        assert_eq!(r.bmi, 23.63);
        assert_eq!(r.category, BmiCategory::NormalWeight);
    }

    #[test]
    fn test_unsupported_units() {
        assert!(matches!(
            report(70.0, HeightInput::Scalar(1.75), "stone", "m"),
            Err(Error::UnsupportedUnit { field: "weight", .. })
        ));
        assert!(matches!(
            report(70.0, HeightInput::Scalar(1.75), "kg", "furlong"),
            Err(Error::UnsupportedUnit { field: "height", .. })
        ));
        // Unit errors win over measurement errors: nothing is computed first
        assert!(matches!(
            report(-70.0, HeightInput::Scalar(0.0), "stone", "m"),
            Err(Error::UnsupportedUnit { .. })
        ));
    }

    #[test]
    fn test_malformed_height() {
        assert!(matches!(
            report(70.0, HeightInput::Scalar(69.0), "kg", "ft_in"),
            Err(Error::MalformedHeight(_))
        ));
        assert!(matches!(
            report(70.0, HeightInput::FeetInches(5, 9.0), "kg", "cm"),
            Err(Error::MalformedHeight(_))
        ));
    }

    #[test]
    fn test_invalid_measurements() {
        assert!(matches!(
            report(0.0, HeightInput::Scalar(1.75), "kg", "m"),
            Err(Error::InvalidMeasurement { field: "weight", .. })
        ));
        assert!(matches!(
            report(70.0, HeightInput::Scalar(-175.0), "kg", "cm"),
            Err(Error::InvalidMeasurement { field: "height", .. })
        ));
        assert!(matches!(
            report(70.0, HeightInput::FeetInches(0, 0.0), "kg", "ft_in"),
            Err(Error::InvalidMeasurement { field: "height", .. })
        ));
    }

    #[test]
    fn test_invalid_sex() {
        let result = build_report(70.0, &HeightInput::Scalar(1.75), 25, "unknown", "kg", "m");
        assert!(matches!(result, Err(Error::InvalidSex(_))));
    }

    #[test]
    fn test_classifies_unrounded_bmi() {
        // 24.996 displays as 25.0 but stays in the normal band
        let r = build_report_typed(24.996, 1.0, 30, Sex::Female).unwrap();
        assert_eq!(r.bmi, 25.0);
        assert_eq!(r.category, BmiCategory::NormalWeight);

        // 18.497 displays as 18.5 but is still underweight
        let r = build_report_typed(18.497, 1.0, 30, Sex::Female).unwrap();
        assert_eq!(r.bmi, 18.5);
        assert_eq!(r.category, BmiCategory::Underweight);

        // 29.995 rounds up to 30.0 but is overweight, not obese
        let r = build_report_typed(29.995, 1.0, 30, Sex::Male).unwrap();
        assert_eq!(r.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_gain_and_lose_deltas() {
        let under = build_report_typed(50.0, 1.75, 25, Sex::Male).unwrap();
        assert_eq!(under.kg_to_gain, 6.66);
        assert_eq!(under.kg_to_lose, 0.0);

        let over = build_report_typed(90.0, 1.75, 25, Sex::Male).unwrap();
        assert_eq!(over.kg_to_gain, 0.0);
        assert_eq!(over.kg_to_lose, 13.44);
    }

    #[test]
    fn test_report_input_from_json() {
        let json = r#"{
            "weight": 160,
            "height": [5, 9],
            "age": 40,
            "sex": "female",
            "weight_unit": "lb",
            "height_unit": "ft_in"
        }"#;
        let input: ReportInput = serde_json::from_str(json).unwrap();
        let r = input.build_report().unwrap();
        assert_eq!(r.bmi, 23.63);
    }

    #[test]
    fn test_report_serializes_category_label() {
        let r = build_report_typed(70.0, 1.75, 25, Sex::Male).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["category"], "Normal weight");
        assert_eq!(json["healthy_range"][0], 56.66);
    }
}
