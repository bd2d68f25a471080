use crate::models::rules::TRANSLITERATED_VOCABULARY;
use crate::models::{LanguageTag, ScriptClassification, TaggedLine, Transcript};
use crate::processing::patterns::TRANSLITERATION_ARTIFACT_PATTERNS;

const DOMINANT_RATIO: f32 = 0.7;
const MIXED_RATIO: f32 = 0.3;
const ARTIFACT_THRESHOLD: f32 = 0.5;

const VOCABULARY_EVIDENCE: f32 = 0.4;
const CLUSTER_EVIDENCE: f32 = 0.3;
const CONSONANT_EVIDENCE: f32 = 0.3;
const SHORT_WORD_EVIDENCE: f32 = 0.2;

/// Tags lines by writing system. Diagnostic only; never gates extraction.
pub struct ScriptClassifier;

impl ScriptClassifier {
    pub fn classify(line: &str) -> ScriptClassification {
        let mut primary = 0usize;
        let mut secondary = 0usize;
        let mut digits = 0usize;

        for c in line.chars() {
            if is_secondary_script(c) {
                secondary += 1;
            } else if is_primary_letter(c) {
                primary += 1;
            } else if c.is_ascii_digit() {
                digits += 1;
            }
        }

        if secondary == 0 {
            let artifact_score = Self::artifact_score(line);
            if artifact_score > ARTIFACT_THRESHOLD {
                return ScriptClassification {
                    tag: LanguageTag::SecondaryScript,
                    confidence: artifact_score,
                    synthetic: true,
                };
            }
        }

        let total = (primary + secondary + digits) as f32;
        let (primary_ratio, secondary_ratio) = if total > 0.0 {
            (primary as f32 / total, secondary as f32 / total)
        } else {
            (0.0, 0.0)
        };

        let (tag, confidence) = if primary_ratio > DOMINANT_RATIO {
            (LanguageTag::PrimaryScript, primary_ratio)
        } else if secondary_ratio > DOMINANT_RATIO {
            (LanguageTag::SecondaryScript, secondary_ratio)
        } else if primary_ratio > MIXED_RATIO && secondary_ratio > MIXED_RATIO {
            (LanguageTag::Mixed, 1.0 - (primary_ratio - secondary_ratio).abs())
        } else if primary_ratio > secondary_ratio {
            (LanguageTag::PrimaryScript, primary_ratio)
        } else if secondary_ratio > primary_ratio {
            (LanguageTag::SecondaryScript, secondary_ratio)
        } else {
            (LanguageTag::Unknown, 0.5)
        };

        ScriptClassification {
            tag,
            confidence,
            synthetic: false,
        }
    }

    /// Likelihood that a Latin-only line is secondary-script text the recognizer garbled
    pub fn artifact_score(line: &str) -> f32 {
        let lower = line.to_lowercase();
        let mut score: f32 = 0.0;

        if TRANSLITERATED_VOCABULARY.iter().any(|word| lower.contains(word)) {
            score += VOCABULARY_EVIDENCE;
        }

        if TRANSLITERATION_ARTIFACT_PATTERNS
            .iter()
            .any(|pattern| pattern.is_match(line))
        {
            score += CLUSTER_EVIDENCE;
        }

        let letters: Vec<char> = lower.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        if letters.len() >= 4 {
            let consonants = letters.iter().filter(|c| !is_vowel(**c)).count();
            if consonants as f32 / letters.len() as f32 > 0.7 {
                score += CONSONANT_EVIDENCE;
            }
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() >= 3 {
            let short = words.iter().filter(|w| w.chars().count() <= 2).count();
            if short as f32 / words.len() as f32 > 0.5 {
                score += SHORT_WORD_EVIDENCE;
            }
        }

        score.min(1.0)
    }

    pub fn tag_transcript(transcript: &Transcript) -> Vec<TaggedLine> {
        transcript
            .lines()
            .iter()
            .map(|line| {
                let classification = Self::classify(line);
                TaggedLine {
                    text: line.clone(),
                    tag: classification.tag,
                    confidence: classification.confidence,
                    synthetic: classification.synthetic,
                }
            })
            .collect()
    }
}

fn is_secondary_script(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

fn is_primary_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (('\u{00C0}'..='\u{024F}').contains(&c) && c.is_alphabetic())
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_line_is_primary() {
        let result = ScriptClassifier::classify("Rohit Kumar Sharma");
        assert_eq!(result.tag, LanguageTag::PrimaryScript);
        assert!(result.confidence > 0.9);
        assert!(!result.synthetic);
    }

    #[test]
    fn test_devanagari_line_is_secondary() {
        let result = ScriptClassifier::classify("भारत सरकार");
        assert_eq!(result.tag, LanguageTag::SecondaryScript);
        assert!(result.confidence > 0.9);
    }

    #[test]
    fn test_mixed_line() {
        let result = ScriptClassifier::classify("पुरुष / MALE");
        assert_eq!(result.tag, LanguageTag::Mixed);
    }

    #[test]
    fn test_digits_only_is_unknown() {
        let result = ScriptClassifier::classify("1234 5678 9012");
        assert_eq!(result.tag, LanguageTag::Unknown);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_garbled_transliteration_is_synthetic_secondary() {
        // vocabulary + consonant cluster + consonant-heavy letters
        let result = ScriptClassifier::classify("bharat srkr");
        assert_eq!(result.tag, LanguageTag::SecondaryScript);
        assert!(result.synthetic);
        assert!(result.confidence > 0.5 && result.confidence <= 1.0);
    }

    #[test]
    fn test_artifact_score_is_capped() {
        let score = ScriptClassifier::artifact_score("bharat srkrt xq zz pp hh");
        assert!(score <= 1.0);
    }
}
