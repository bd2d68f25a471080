use log::{debug, info};

use crate::models::rules::{AUTHENTICITY_KEYWORDS, DISQUALIFYING_KEYWORDS};
use crate::models::ValidationVerdict;
use crate::processing::patterns::{
    find_region, has_uid, DATE_PATTERN, GENDER_INDICATOR_PATTERN, GENDER_LABEL_PATTERN,
    POSTAL_CODE_PATTERN, YEAR_PATTERN,
};

const VALID_THRESHOLD: f32 = 50.0;
const KEYWORD_POINTS: f32 = 15.0;
const UID_POINTS: f32 = 25.0;
const GENDER_POINTS: f32 = 10.0;
const DATE_POINTS: f32 = 10.0;
const REGION_POINTS: f32 = 10.0;
const FOREIGN_DOCUMENT_PENALTY: f32 = 20.0;
const SHORT_TEXT_PENALTY: f32 = 15.0;
const FEW_WORDS_PENALTY: f32 = 10.0;
const MIN_TEXT_LENGTH: usize = 50;
const MIN_WORD_COUNT: usize = 10;

/// Scores a primary transcript for authenticity
pub struct DocumentValidator;

impl DocumentValidator {
    pub fn validate(text: &str) -> ValidationVerdict {
        let lower = text.to_lowercase();
        let mut score: f32 = 0.0;
        let mut issues = Vec::new();

        let keyword_hits = AUTHENTICITY_KEYWORDS
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .count();
        score += KEYWORD_POINTS * keyword_hits as f32;
        debug!("{} authenticity keywords matched", keyword_hits);

        if has_uid(text) {
            score += UID_POINTS;
        } else {
            issues.push("No 12-digit identity number found".to_string());
        }

        if GENDER_INDICATOR_PATTERN.is_match(text) || GENDER_LABEL_PATTERN.is_match(text) {
            score += GENDER_POINTS;
        } else {
            issues.push("No gender information found".to_string());
        }

        if DATE_PATTERN.is_match(text) || YEAR_PATTERN.is_match(text) {
            score += DATE_POINTS;
        } else {
            issues.push("No date of birth or year found".to_string());
        }

        if text.lines().any(|line| find_region(line).is_some()) || POSTAL_CODE_PATTERN.is_match(text) {
            score += REGION_POINTS;
        }

        let foreign: Vec<&str> = DISQUALIFYING_KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| lower.contains(keyword))
            .collect();
        if !foreign.is_empty() {
            score -= FOREIGN_DOCUMENT_PENALTY * foreign.len() as f32;
            issues.push(format!(
                "Document appears to be a different type: {}",
                foreign.join(", ")
            ));
        }

        let length = text.chars().count();
        if length < MIN_TEXT_LENGTH {
            score -= SHORT_TEXT_PENALTY;
            issues.push(format!("Text too short ({} characters)", length));
        }

        let words = text.split_whitespace().count();
        if words < MIN_WORD_COUNT {
            score -= FEW_WORDS_PENALTY;
            issues.push(format!("Too few words ({})", words));
        }

        let score = score.clamp(0.0, 100.0);
        let is_valid = score >= VALID_THRESHOLD;
        let message = if is_valid {
            format!("Document verified as genuine (confidence {:.0}%)", score)
        } else {
            format!(
                "Document rejected (score {:.0}): {}",
                score,
                issues.iter().take(2).cloned().collect::<Vec<_>>().join("; ")
            )
        };

        info!(
            "Document validation score {:.1}, valid={}, {} issues",
            score,
            is_valid,
            issues.len()
        );

        ValidationVerdict {
            is_valid,
            score,
            issues,
            message,
        }
    }
}
