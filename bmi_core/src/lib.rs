#![forbid(unsafe_code)]

//! Core computation and persistence for the BMI health analyzer.
//!
//! This crate provides:
//! - Unit conversion to kilograms and meters
//! - BMI, WHO category, BMR, healthy range, hydration and weight deltas
//! - Report assembly from raw user input
//! - Rule-based suggestions and FAQ
//! - Profile history (JSONL) and CSV export

pub mod error;
pub mod units;
pub mod metrics;
pub mod report;
pub mod suggestions;
pub mod faq;
pub mod history;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use units::{
    centimeters_to_meters, feet_inches_to_meters, inches_to_meters, kilograms_to_pounds,
    meters_to_centimeters, pounds_to_kilograms, HeightInput, HeightUnit, WeightUnit,
};
pub use metrics::{
    bmr_for_sex_str, bmr_mifflin_st_jeor, calculate_bmi, classify_bmi,
    classify_bmi_with_description, healthy_weight_range, healthy_weight_range_default, round2,
    water_intake_liters, weight_delta_to_healthy, BmiCategory, Sex,
};
pub use report::{build_report, build_report_typed, BmiReport, ReportInput};
pub use suggestions::{health_fact_of_the_day, StaticSuggestions, SuggestionProvider, Suggestions};
pub use faq::{FaqProvider, PremadeFaq};
pub use history::{read_profiles, recent_profiles, JsonlHistory, ProfileRecord, ProfileSink};
pub use export::history_to_csv;
pub use config::Config;
