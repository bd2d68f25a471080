use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::rules::{REGION_NAMES, STREET_KEYWORDS};
use crate::processing::patterns::{
    contains_word, find_region, find_uid, DATE_PATTERN, GENDER_INDICATOR_PATTERN, GENDER_LABEL_PATTERN,
    HEADER_PATTERN, POSTAL_CODE_PATTERN, UID_PATTERN, YOB_LABEL_PATTERN,
};
use crate::processing::sanitizer::{collapse_whitespace, Alphabet, LineSanitizer};

/// Lines searched on either side of the region line for a postal code
const POSTAL_WINDOW: usize = 2;
/// Lines searched above the region line for a block start when no street line exists
const BLOCK_WINDOW: usize = 8;
/// Shortest line the gender-to-UID fallback keeps
const MIN_FALLBACK_LINE: usize = 4;

lazy_static! {
    static ref ADDRESS_LABEL: Regex = Regex::new(r"(?i)^\s*(?:address|addr|पता)\s*[:.-]?\s*").unwrap();

    static ref REGION_PATTERNS: Vec<(&'static str, Regex)> = REGION_NAMES
        .iter()
        .map(|region| {
            let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(region))).unwrap();
            (*region, pattern)
        })
        .collect();
}

/// Builds the address block from the lines of a transcript
pub struct AddressAssembler;

impl AddressAssembler {
    /// Region-anchored assembly: street line(s) down to the region line, then region and PIN
    pub fn assemble_from_region(lines: &[String]) -> Option<String> {
        for (idx, line) in lines.iter().enumerate() {
            let Some(region) = find_region(line) else {
                continue;
            };
            let Some(postal) = Self::postal_near(lines, idx) else {
                continue;
            };

            let start = Self::block_start(lines, idx);
            debug!(
                "Address block spans lines {}..={} (region '{}', postal {})",
                start, idx, region, postal
            );

            let mut parts: Vec<String> = Vec::new();
            for (offset, raw) in lines[start..=idx].iter().enumerate() {
                let is_region_line = start + offset == idx;
                let stripped = ADDRESS_LABEL.replace(raw, "");
                if LineSanitizer::is_garbage(&stripped) || is_address_noise(&stripped) {
                    continue;
                }
                if !is_region_line && is_person_name_pattern(&stripped) {
                    continue;
                }
                let cleaned = strip_region_and_postal(
                    &LineSanitizer::clean(&stripped, Alphabet::Address),
                    region,
                );
                if cleaned.chars().count() >= 2 {
                    push_deduplicated(&mut parts, cleaned);
                }
            }

            parts.push(title_case(region));
            parts.push(postal);
            return Some(parts.join(", "));
        }
        None
    }

    /// Fallback: the lines between a `Gender:` label and the first UID after it
    pub fn assemble_between_gender_and_uid(text: &str) -> Option<String> {
        let label = GENDER_LABEL_PATTERN.find(text)?;
        let after_label = &text[label.end()..];
        // The remainder of the label line is the gender value itself
        let body_start = after_label.find('\n').map(|i| i + 1)?;
        let body = &after_label[body_start..];
        let uid = find_uid(body)?;
        let span = &body[..uid.start()];

        let parts: Vec<String> = span
            .lines()
            .map(|line| ADDRESS_LABEL.replace(line.trim(), "").to_string())
            .filter(|line| line.chars().count() >= MIN_FALLBACK_LINE)
            .filter(|line| !LineSanitizer::is_garbage(line) && !is_address_noise(line))
            .map(|line| LineSanitizer::clean(&line, Alphabet::Address))
            .map(|line| line.trim_matches(|c: char| c == ',' || c == '-' || c.is_whitespace()).to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    fn postal_near(lines: &[String], idx: usize) -> Option<String> {
        let mut order = vec![idx];
        for distance in 1..=POSTAL_WINDOW {
            if idx >= distance {
                order.push(idx - distance);
            }
            if idx + distance < lines.len() {
                order.push(idx + distance);
            }
        }
        order.into_iter().find_map(|i| {
            POSTAL_CODE_PATTERN
                .find(&lines[i])
                .map(|m| m.as_str().to_string())
        })
    }

    fn block_start(lines: &[String], idx: usize) -> usize {
        // Nearest street-looking line above the region line
        if let Some(street) = (0..idx).rev().find(|&i| looks_like_street(&lines[i])) {
            return street;
        }

        (idx.saturating_sub(BLOCK_WINDOW)..idx)
            .find(|&i| {
                let line = ADDRESS_LABEL.replace(&lines[i], "");
                !LineSanitizer::is_garbage(&line)
                    && !is_address_noise(&line)
                    && !is_person_name_pattern(&line)
            })
            .unwrap_or(idx)
    }
}

pub fn looks_like_street(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit()) && STREET_KEYWORDS.iter().any(|k| contains_word(line, k))
}

// Lines that belong to other fields or to the card furniture
fn is_address_noise(line: &str) -> bool {
    UID_PATTERN.is_match(line)
        || DATE_PATTERN.is_match(line)
        || GENDER_INDICATOR_PATTERN.is_match(line)
        || YOB_LABEL_PATTERN.is_match(line)
        || HEADER_PATTERN.is_match(line)
}

// Two or three bare words: most likely a second name rather than a locality
fn is_person_name_pattern(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=3).contains(&words.len())
        && words.iter().all(|w| w.chars().all(|c| c.is_alphabetic()))
        && !STREET_KEYWORDS.iter().any(|k| contains_word(line, k))
        && find_region(line).is_none()
}

fn strip_region_and_postal(line: &str, region: &str) -> String {
    let without_postal = POSTAL_CODE_PATTERN.replace_all(line, " ");
    let without_region = match REGION_PATTERNS.iter().find(|(name, _)| *name == region) {
        Some((_, pattern)) => pattern.replace_all(&without_postal, " ").to_string(),
        None => without_postal.to_string(),
    };
    collapse_whitespace(&without_region)
        .trim_matches(|c: char| c == ',' || c == '-' || c.is_whitespace())
        .to_string()
}

// Short digit-free lines where one contains the other are the same locality
fn push_deduplicated(parts: &mut Vec<String>, candidate: String) {
    if is_city_like(&candidate) {
        let lower = candidate.to_lowercase();
        for existing in parts.iter_mut() {
            if !is_city_like(existing) {
                continue;
            }
            let existing_lower = existing.to_lowercase();
            if existing_lower.contains(&lower) || lower.contains(&existing_lower) {
                if candidate.len() > existing.len() {
                    *existing = candidate;
                }
                return;
            }
        }
    }
    parts.push(candidate);
}

fn is_city_like(part: &str) -> bool {
    !part.chars().any(|c| c.is_ascii_digit()) && part.split_whitespace().count() <= 3
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            if word == "and" {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
