//! Frequently asked questions about BMI and related metrics.

/// Source of FAQ answers
pub trait FaqProvider {
    /// Numbered questions, starting at 1
    fn questions(&self) -> Vec<(usize, &str)>;

    /// Answer for a question number, if it exists
    fn answer(&self, number: usize) -> Option<&str>;
}

const PREMADE: &[(&str, &str)] = &[
    (
        "What is the difference between BMI and BMR?",
        "BMI (Body Mass Index) relates your weight to your height and places you in a \
         weight category. BMR (Basal Metabolic Rate) estimates the calories your body \
         burns at complete rest. BMI describes body size; BMR describes energy needs.",
    ),
    (
        "Is BMI accurate for athletes?",
        "Not always. BMI cannot tell muscle from fat, so muscular people can be \
         classified as overweight while carrying little body fat. Waist measurements \
         or body-fat estimates give a better picture for athletes.",
    ),
    (
        "How does age affect BMI?",
        "The adult BMI categories are the same at every age from 18 upwards, but body \
         composition changes with age: muscle mass tends to fall and fat mass to rise, \
         so the same BMI can mean more body fat in older adults. Children and teens \
         use age- and sex-specific percentiles instead.",
    ),
    (
        "What is a healthy weight range for my height?",
        "The healthy range is every weight that gives a BMI from 18.5 up to (but not \
         including) 25. For a height in meters it runs from 18.5 x height² to \
         25 x height² kilograms.",
    ),
    (
        "How much water should I drink per day?",
        "A common rule of thumb is about 33 ml per kilogram of body weight, so a 70 kg \
         adult would aim for roughly 2.3 liters. Needs rise with heat, exercise and \
         illness.",
    ),
    (
        "Why does my BMR change when I lose weight?",
        "BMR depends on body weight, height, age and sex. A lighter body needs less \
         energy at rest, so BMR falls as weight falls and calorie targets need to be \
         adjusted over time.",
    ),
];

/// Fixed question list shipped with the application
#[derive(Clone, Copy, Debug, Default)]
pub struct PremadeFaq;

impl FaqProvider for PremadeFaq {
    fn questions(&self) -> Vec<(usize, &str)> {
        PREMADE
            .iter()
            .enumerate()
            .map(|(idx, (question, _))| (idx + 1, *question))
            .collect()
    }

    fn answer(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| PREMADE.get(idx))
            .map(|(_, answer)| *answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_are_numbered_from_one() {
        let questions = PremadeFaq.questions();
        assert_eq!(questions.len(), PREMADE.len());
        assert_eq!(questions[0].0, 1);
        assert!(questions[0].1.contains("BMR"));
    }

    #[test]
    fn test_answer_lookup() {
        assert!(PremadeFaq.answer(2).unwrap().contains("muscle"));
        assert!(PremadeFaq.answer(0).is_none());
        assert!(PremadeFaq.answer(PREMADE.len() + 1).is_none());
    }
}
