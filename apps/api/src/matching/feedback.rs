use crate::matching::tokens::KeywordSet;

const AFFIRMATIVE: &str = "Great job! Your resume is well aligned with this role.";

const GENERIC_LOW_SCORE: &str = "Your resume shows low alignment with this role. \
Tailor your experience descriptions to the responsibilities and skills the job emphasizes, \
using the same wording where it honestly applies.";

/// Turns a score and the missing keywords into guidance text.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackGenerator {
    threshold: f64,
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self { threshold: 50.0 }
    }
}

impl FeedbackGenerator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Below the threshold: the missing keywords, one per line, plus advice. If none are
    /// missing, a generic tailoring message instead. At or above: one affirmative sentence.
    pub fn feedback(&self, score: f64, missing: &KeywordSet) -> String {
        if score >= self.threshold {
            return AFFIRMATIVE.to_string();
        }
        if missing.is_empty() {
            return GENERIC_LOW_SCORE.to_string();
        }

        let mut text = String::from("Your resume is missing these keywords from the job description:\n");
        for keyword in missing {
            text.push_str("- ");
            text.push_str(keyword);
            text.push('\n');
        }
        text.push_str(
            "\nWork the relevant ones into your skills and experience sections, \
and mirror the job description's phrasing so applicant tracking systems pick them up.",
        );
        text
    }
}
