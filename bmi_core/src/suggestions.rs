//! Rule-based health suggestions keyed on BMI category.
//!
//! The report engine never calls into this module. Front ends pick a
//! `SuggestionProvider` and feed it the BMI and category of a report.

use crate::metrics::{BmiCategory, Sex};
use crate::Result;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Diet tips at or below this length are dropped as too terse
const MIN_DIET_TIP_LEN: usize = 20;

/// Suggestions for one BMI result
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Suggestions {
    pub health_facts: Vec<String>,
    pub exercise_plan: Vec<String>,
    pub diet: Vec<String>,
    pub warnings: Vec<String>,
}

/// Source of suggestions for a BMI result
pub trait SuggestionProvider {
    fn suggest(
        &self,
        bmi: f64,
        category: BmiCategory,
        age: Option<u32>,
        sex: Option<Sex>,
    ) -> Result<Suggestions>;
}

struct CategoryAdvice {
    facts: &'static [&'static str],
    exercises: &'static [&'static str],
    diet: &'static [&'static str],
    warnings: &'static [&'static str],
}

static ADVICE: Lazy<HashMap<BmiCategory, CategoryAdvice>> = Lazy::new(build_advice_table);

fn build_advice_table() -> HashMap<BmiCategory, CategoryAdvice> {
    let mut table = HashMap::new();

    table.insert(
        BmiCategory::Underweight,
        CategoryAdvice {
            facts: &[
                "Low BMI is linked with lower muscle mass and potential nutrient deficiencies.",
                "Being underweight can weaken the immune system and reduce energy levels.",
                "Inadequate body weight may affect bone density and increase fracture risk.",
                "Low BMI can impact hormonal balance and reproductive health.",
                "Underweight individuals may experience difficulty maintaining body temperature.",
            ],
            exercises: &[
                "light strength training to build muscle mass.",
                "yoga or pilates for posture and flexibility.",
                "resistance band exercises 3 times per week.",
                "progressive weight training with proper nutrition support.",
                "balance and stability exercises like tai chi.",
            ],
            diet: &[
                "Add calorie-dense foods like nuts, peanut butter, and dairy.",
                "Increase protein intake to help muscle growth.",
                "Eat more frequent, smaller meals throughout the day.",
                "Include healthy fats from avocados, olive oil, and fatty fish.",
                "Add protein shakes or smoothies with fruits and nut butters.",
                "Choose nutrient-dense carbohydrates like sweet potatoes and oats.",
            ],
            warnings: &[
                "Severely low BMI may indicate nutritional deficiency.",
                "Consider consulting a doctor if fatigue or weakness persists.",
                "Prolonged underweight status can affect bone health.",
                "May indicate underlying medical conditions requiring evaluation.",
            ],
        },
    );

    table.insert(
        BmiCategory::NormalWeight,
        CategoryAdvice {
            facts: &[
                "A healthy BMI correlates with lower risk of diabetes and heart disease.",
                "Maintaining this range is associated with better mobility and metabolism.",
                "Normal weight range supports optimal hormone production and balance.",
                "People in this range typically have better sleep quality and energy levels.",
                "This BMI range is associated with improved longevity and quality of life.",
            ],
            exercises: &[
                "30 minutes of brisk walking or jogging.",
                "body-weight training 3-4 times per week.",
                "mix of cardio and strength training for overall fitness.",
                "try sports activities like tennis, basketball, or swimming.",
                "high-intensity interval training (HIIT) 2-3 times weekly.",
                "incorporate flexibility exercises and stretching routines.",
            ],
            diet: &[
                "Balanced meals with vegetables, fruits, grains, and lean proteins.",
                "Keep hydrated and avoid excessive processed foods.",
                "Practice portion control to maintain current weight.",
                "Include variety in your diet for all essential nutrients.",
                "Limit alcohol and sugary beverages.",
                "Plan meals ahead to avoid unhealthy impulse choices.",
            ],
            warnings: &[],
        },
    );

    table.insert(
        BmiCategory::Overweight,
        CategoryAdvice {
            facts: &[
                "Moderately high BMI increases the chance of developing hypertension.",
                "Extra body weight can gradually strain joints, especially knees.",
                "Overweight status may lead to sleep apnea and breathing difficulties.",
                "Even modest weight loss can significantly improve cholesterol levels.",
                "Carrying extra weight can increase inflammation throughout the body.",
            ],
            exercises: &[
                "low-impact cardio like cycling or swimming.",
                "strength training with light weights to build metabolism.",
                "brisk walking for 30-45 minutes daily.",
                "water aerobics to reduce joint stress.",
                "elliptical training for cardiovascular fitness.",
                "gradual progression to include light jogging intervals.",
            ],
            diet: &[
                "Reduce sugary drinks and replace with water.",
                "Increase fiber intake using vegetables and whole grains.",
                "Control portion sizes using smaller plates.",
                "Eat more vegetables and fruits, aim for 5-7 servings daily.",
                "Choose lean proteins like chicken, fish, and legumes.",
                "Reduce consumption of fried and high-fat foods.",
                "Keep healthy snacks available to avoid junk food.",
            ],
            warnings: &[
                "Monitor blood pressure and cholesterol levels regularly.",
                "Early intervention can prevent progression to obesity.",
            ],
        },
    );

    table.insert(
        BmiCategory::ObesityClassI,
        CategoryAdvice {
            facts: &[
                "Higher BMI is linked with elevated blood pressure and cholesterol.",
                "Weight loss of even 5-10% significantly reduces long-term risks.",
                "This BMI range increases risk of developing fatty liver disease.",
                "Joint problems and arthritis become more common at this weight range.",
                "Risk of certain cancers increases with higher BMI levels.",
            ],
            exercises: &[
                "walking 20-30 minutes daily at a comfortable pace.",
                "chair exercises or light resistance band workouts.",
                "swimming or pool exercises for full-body workout.",
                "stationary cycling starting with short sessions.",
                "gentle stretching and range-of-motion exercises.",
                "seated strength training to build muscle safely.",
            ],
            diet: &[
                "Portion control and reducing high-fat snacks help greatly.",
                "Add lean proteins and vegetables while reducing fried foods.",
                "Track daily calorie intake to increase awareness.",
                "Eliminate sugary sodas and juice drinks.",
                "Increase water intake to 8-10 glasses daily.",
                "Plan meals with half the plate being vegetables.",
                "Reduce eating out and prepare more meals at home.",
            ],
            warnings: &[
                "Regular health screenings are recommended.",
                "Consider medical consultation for weight management strategies.",
            ],
        },
    );

    table.insert(
        BmiCategory::ObesityClassII,
        CategoryAdvice {
            facts: &[
                "This BMI range is strongly connected with type 2 diabetes risk.",
                "Cardiovascular strain increases significantly in this category.",
                "Breathing difficulties and reduced lung capacity are common concerns.",
                "Risk of stroke and heart attack is notably elevated.",
                "Mobility and physical function can be significantly impacted.",
            ],
            exercises: &[
                "short interval walks (5-10 minutes each).",
                "water-based exercises to reduce joint strain.",
                "chair yoga and seated exercises.",
                "arm exercises with very light weights or resistance bands.",
                "breathing exercises and gentle stretching.",
                "gradual increase in daily movement and activity.",
            ],
            diet: &[
                "Avoid high-calorie fast foods; choose home-cooked meals.",
                "Switch to whole grains instead of refined carbs.",
                "Work with a nutritionist for personalized meal planning.",
                "Focus on vegetables, lean proteins, and controlled portions.",
                "Eliminate late-night snacking and emotional eating.",
                "Keep a food diary to identify problem areas.",
                "Choose baked, grilled, or steamed foods over fried options.",
            ],
            warnings: &[
                "High risk of developing cardiac and metabolic issues.",
                "Medical supervision recommended for safe weight loss.",
                "Regular monitoring of blood sugar and blood pressure essential.",
            ],
        },
    );

    table.insert(
        BmiCategory::ObesityClassIII,
        CategoryAdvice {
            facts: &[
                "Very high BMI greatly elevates risk for heart disease and respiratory issues.",
                "Professional medical supervision is strongly recommended.",
                "This category carries highest risk for metabolic syndrome.",
                "Life expectancy can be significantly reduced without intervention.",
                "Multiple organ systems may be affected, requiring comprehensive care.",
            ],
            exercises: &[
                "supervised physiotherapy or guided low-impact routines.",
                "focus on mobility and breathing exercises.",
                "assisted standing and sitting exercises.",
                "pool therapy under professional guidance.",
                "gentle range-of-motion exercises to maintain flexibility.",
                "focus on building daily activity tolerance gradually.",
            ],
            diet: &[
                "Professional dietary planning is strongly recommended.",
                "Focus on slow, sustainable changes instead of crash diets.",
                "Work with medical team for structured weight loss program.",
                "Start with small achievable goals like reducing one unhealthy food.",
                "Consider medically supervised meal replacement programs.",
                "Address emotional eating with professional support.",
                "Focus on whole, unprocessed foods in controlled portions.",
            ],
            warnings: &[
                "Very high health risk. Medical guidance is important.",
                "Immediate medical consultation strongly advised.",
                "May require comprehensive medical evaluation and treatment plan.",
                "Consider discussing surgical weight loss options with physician.",
            ],
        },
    );

    table
}

fn capitalize_first(s: &str) -> String {
    let trimmed = s.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Built-in, offline suggestions
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSuggestions;

impl SuggestionProvider for StaticSuggestions {
    fn suggest(
        &self,
        bmi: f64,
        category: BmiCategory,
        _age: Option<u32>,
        _sex: Option<Sex>,
    ) -> Result<Suggestions> {
        let Some(advice) = ADVICE.get(&category) else {
            tracing::warn!("No static advice for category {}", category);
            return Ok(Suggestions::default());
        };

        let detailed_diet: Vec<String> = advice
            .diet
            .iter()
            .filter(|tip| tip.len() > MIN_DIET_TIP_LEN)
            .map(|tip| tip.to_string())
            .collect();

        let diet = if detailed_diet.is_empty() {
            advice.diet.iter().map(|tip| tip.to_string()).collect()
        } else {
            detailed_diet
        };

        tracing::debug!("Static suggestions for BMI {:.2} ({})", bmi, category);

        Ok(Suggestions {
            health_facts: advice.facts.iter().map(|f| f.to_string()).collect(),
            exercise_plan: advice.exercises.iter().map(|e| capitalize_first(e)).collect(),
            diet,
            warnings: advice.warnings.iter().map(|w| w.to_string()).collect(),
        })
    }
}

const DAILY_FACTS: &[&str] = &[
    "Drinking water can help improve your metabolism.",
    "Regular exercise can boost your mood and energy levels.",
    "Getting enough sleep is crucial for overall health.",
    "Eating a balanced diet can help maintain a healthy weight.",
    "Taking breaks during work can improve productivity and reduce stress.",
    "Include more fruits and vegetables for vitamins and fiber.",
    "Choose whole grains over refined grains to increase fiber intake.",
    "Limit added sugars and sugary drinks to reduce empty calories.",
    "Prefer lean proteins like fish, poultry, beans, and legumes.",
    "Watch portion sizes to avoid overeating.",
    "Include healthy fats such as avocados, nuts, and olive oil in moderation.",
    "Plan meals and prep healthy snacks to avoid processed food choices.",
    "Read nutrition labels to make informed food choices.",
    "Practice mindful eating: slow down and savor your food.",
    "Stay consistent with regular meal times to help regulate appetite.",
    "Favor whole-food snacks like nuts, seeds, and fresh fruit over packaged bars.",
    "Add legumes (lentils, chickpeas, black beans) to meals to boost protein and fiber.",
    "Try meatless meals a few times a week to diversify nutrients and reduce saturated fat.",
    "Choose healthy cooking oils (olive, avocado) and avoid trans fats.",
    "Include a variety of colorful vegetables to maximize vitamins and antioxidants.",
    "Consume fermented foods (yogurt, kefir, sauerkraut) to support gut health.",
    "Prioritize lean cuts of meat and remove visible fat when possible.",
    "Swap sugary dressings for vinegar-based or citrusy vinaigrettes.",
    "Replace sugary desserts with fresh fruit or yogurt parfaits.",
    "Limit high-sodium condiments and rinse canned foods to reduce salt intake.",
    "Use herbs and spices to enhance flavor instead of extra salt or sugar.",
    "Cook large batches and freeze portions to help maintain healthy choices on busy days.",
];

/// General health tip for a given day; stable for the whole day
pub fn health_fact_of_the_day(date: NaiveDate) -> &'static str {
    let index = date.ordinal0() as usize % DAILY_FACTS.len();
    DAILY_FACTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_advice() {
        for category in BmiCategory::ALL {
            let s = StaticSuggestions.suggest(22.0, category, None, None).unwrap();
            assert!(!s.health_facts.is_empty(), "{} has no facts", category);
            assert!(!s.exercise_plan.is_empty(), "{} has no exercises", category);
            assert!(!s.diet.is_empty(), "{} has no diet tips", category);
        }
    }

    #[test]
    fn test_exercises_are_capitalized() {
        let s = StaticSuggestions
            .suggest(27.0, BmiCategory::Overweight, Some(30), Some(Sex::Male))
            .unwrap();
        assert_eq!(s.exercise_plan[0], "Low-impact cardio like cycling or swimming.");
        assert!(s
            .exercise_plan
            .iter()
            .all(|e| e.chars().next().is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())));
    }

    #[test]
    fn test_short_diet_tips_are_filtered() {
        let s = StaticSuggestions
            .suggest(22.0, BmiCategory::NormalWeight, None, None)
            .unwrap();
        assert!(s.diet.iter().all(|tip| tip.len() > MIN_DIET_TIP_LEN));
    }

    #[test]
    fn test_normal_weight_has_no_warnings() {
        let s = StaticSuggestions
            .suggest(22.0, BmiCategory::NormalWeight, None, None)
            .unwrap();
        assert!(s.warnings.is_empty());

        let s = StaticSuggestions
            .suggest(42.0, BmiCategory::ObesityClassIII, None, None)
            .unwrap();
        assert_eq!(s.warnings.len(), 4);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("  walk daily."), "Walk daily.");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_fact_of_the_day_is_stable() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(health_fact_of_the_day(day), health_fact_of_the_day(day));

        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(health_fact_of_the_day(jan1), DAILY_FACTS[0]);

        let jan2 = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_ne!(health_fact_of_the_day(jan1), health_fact_of_the_day(jan2));
    }
}
