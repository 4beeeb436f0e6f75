//! Person-name shape classification.
//!
//! The content-based name-column fallback needs to decide whether a cell
//! value reads like a person's name. The detection technique sits behind a
//! trait so resolution can be exercised with a stub in tests and the
//! heuristic swapped without touching the engine.

use regex::Regex;

pub trait PersonNameClassifier {
    fn is_person_name(&self, value: &str) -> bool;
}

/// Lowercase particles that may appear uncapitalized inside a full name.
const CONNECTIVES: [&str; 6] = ["de", "da", "do", "das", "dos", "e"];

/// Shape-based classifier tuned for Brazilian roster exports.
///
/// A value qualifies when it splits into two or more words of Latin
/// letters (accented forms included), each capitalized, fully uppercase,
/// or a lowercase connective, with no digits or symbols anywhere.
pub struct HeuristicNameClassifier {
    word: Regex,
    reject: Regex,
}

impl HeuristicNameClassifier {
    pub fn new() -> Self {
        Self {
            word: Regex::new(r"^[A-ZÀ-ÖØ-Þ][A-Za-zÀ-ÖØ-Þà-öø-ÿ'\-]*\.?$").unwrap(),
            reject: Regex::new(r"[0-9,;:@#$%&*()\[\]{}<>+=|~^_/\\]").unwrap(),
        }
    }
}

impl Default for HeuristicNameClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonNameClassifier for HeuristicNameClassifier {
    fn is_person_name(&self, value: &str) -> bool {
        let value = value.trim();
        if value.len() < 5 || value.len() > 120 {
            return false;
        }
        if self.reject.is_match(value) {
            return false;
        }

        let words: Vec<&str> = value.split_whitespace().collect();
        if words.len() < 2 {
            return false;
        }

        let mut name_words = 0;
        for word in &words {
            if CONNECTIVES.contains(&word.to_lowercase().as_str()) {
                continue;
            }
            if !self.word.is_match(word) {
                return false;
            }
            name_words += 1;
        }
        name_words >= 2
    }
}
