use crate::models::rules::{KNOWN_VOCABULARY, REGION_NAMES, TRANSLITERATED_VOCABULARY};
use crate::processing::patterns::{GARBLED_CLUSTER_PATTERNS, SYMBOL_RUN_PATTERN};

/// Which characters survive cleaning, chosen by the call site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// ASCII letters and spaces (names)
    Letters,
    /// ASCII letters, digits, spaces and `, - / # .` (addresses)
    Address,
    /// Everything printable (whitespace collapse only)
    Any,
}

/// Strips OCR artifacts and filters garbage lines
pub struct LineSanitizer;

impl LineSanitizer {
    /// Clean a line for the given alphabet, or `None` when the line is garbage
    pub fn sanitize(line: &str, alphabet: Alphabet) -> Option<String> {
        if Self::is_garbage(line) {
            return None;
        }
        let cleaned = Self::clean(line, alphabet);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    /// Character filtering and whitespace collapse, without the garbage check
    pub fn clean(line: &str, alphabet: Alphabet) -> String {
        let filtered: String = line
            .chars()
            .map(|c| {
                let keep = match alphabet {
                    Alphabet::Letters => c.is_ascii_alphabetic(),
                    Alphabet::Address => {
                        c.is_ascii_alphanumeric() || matches!(c, ',' | '-' | '/' | '#' | '.')
                    }
                    Alphabet::Any => !c.is_control(),
                };
                if keep {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        collapse_whitespace(&filtered)
    }

    pub fn is_garbage(line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return true;
        }

        // Gender markers survive even though they are a single character
        if trimmed.eq_ignore_ascii_case("m") || trimmed.eq_ignore_ascii_case("f") {
            return false;
        }

        if has_repeated_run(trimmed, 4) {
            return true;
        }

        if SYMBOL_RUN_PATTERN.is_match(trimmed) {
            return true;
        }

        if GARBLED_CLUSTER_PATTERNS
            .iter()
            .any(|pattern| pattern.is_match(trimmed))
        {
            return true;
        }

        !has_meaningful_content(trimmed)
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Runs of one repeated letter or symbol; digits and spaces are exempt
fn has_repeated_run(line: &str, min_run: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0;
    for c in line.chars() {
        if c.is_ascii_digit() || c.is_whitespace() {
            previous = None;
            run = 0;
            continue;
        }
        let c = c.to_ascii_lowercase();
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= min_run {
            return true;
        }
    }
    false
}

fn has_meaningful_content(line: &str) -> bool {
    if line.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }

    let lower = line.to_lowercase();
    if KNOWN_VOCABULARY
        .iter()
        .chain(TRANSLITERATED_VOCABULARY.iter())
        .chain(REGION_NAMES.iter())
        .any(|word| lower.contains(word))
    {
        return true;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().all(|c| c.is_alphabetic()) && w.chars().count() <= 15)
    {
        return true;
    }

    let letters: Vec<char> = lower.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if !letters.is_empty() {
        let vowels = letters
            .iter()
            .filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
            .count();
        let ratio = vowels as f32 / letters.len() as f32;
        if (0.15..=0.75).contains(&ratio) {
            return true;
        }
    }

    line.chars().count() >= 6
}
