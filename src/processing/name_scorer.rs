use crate::models::rules::{INSTITUTIONAL_KEYWORDS, SURNAME_ROOTS};
use crate::models::FieldCandidate;

/// Heuristic score of how much a cleaned line looks like a person's name
pub struct NameScorer;

impl NameScorer {
    pub fn score(text: &str) -> f32 {
        let words: Vec<&str> = text.split_whitespace().collect();
        let length = text.trim().chars().count();
        let lower = text.to_lowercase();
        let mut score: f32 = 0.0;

        // Three-word names are the most common layout
        score += match words.len() {
            3 => 50.0,
            4 => 45.0,
            2 => 40.0,
            1 => 10.0,
            _ => 20.0,
        };

        score += if (8..=30).contains(&length) {
            30.0
        } else if (6..=40).contains(&length) {
            20.0
        } else if (4..=50).contains(&length) {
            10.0
        } else {
            0.0
        };

        if INSTITUTIONAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            score -= 30.0;
        }

        let has_surname = words.iter().any(|word| {
            let word = word.to_lowercase();
            SURNAME_ROOTS.iter().any(|root| word.starts_with(root))
        });
        if has_surname {
            score += 15.0;
        }

        if !words.is_empty()
            && words
                .iter()
                .all(|w| (2..=15).contains(&w.chars().count()))
        {
            score += 10.0;
        } else {
            score -= 10.0;
        }

        if words.iter().any(|w| w.chars().count() == 1) {
            score -= 20.0;
        }

        score.max(0.0)
    }

    /// Highest-scoring candidate; ties keep the earlier one
    pub fn best(candidates: &[String]) -> Option<FieldCandidate> {
        let mut best: Option<FieldCandidate> = None;
        for text in candidates {
            let score = Self::score(text);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(FieldCandidate {
                    text: text.clone(),
                    score,
                });
            }
        }
        best
    }
}
