use regex::Regex;
use std::collections::HashMap;

/// Polarity scorer for review text. Scores fall in [-1.0, 1.0].
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Word-list scorer: the polarity is the mean of the scored words, where an
/// intensifier scales the following word and a negation within the two
/// preceding words multiplies it by -0.5.
pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: &'static [&'static str],
    word_pattern: Regex,
}

const LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("cheap", 0.4),
    ("comfortable", 0.4),
    ("durable", 0.4),
    ("easy", 0.43),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.4),
    ("love", 0.5),
    ("loved", 0.7),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleased", 0.5),
    ("quality", 0.2),
    ("recommend", 0.3),
    ("reliable", 0.5),
    ("satisfied", 0.5),
    ("solid", 0.2),
    ("sturdy", 0.4),
    ("superb", 1.0),
    ("well", 0.3),
    ("wonderful", 1.0),
    ("worth", 0.3),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broke", -0.5),
    ("broken", -0.4),
    ("cheaply", -0.4),
    ("defective", -0.7),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("fake", -0.5),
    ("flimsy", -0.5),
    ("garbage", -0.8),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("junk", -0.7),
    ("poor", -0.4),
    ("refund", -0.2),
    ("return", -0.1),
    ("returned", -0.3),
    ("scam", -0.9),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("useless", -0.5),
    ("waste", -0.6),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("super", 1.3),
    ("so", 1.2),
    ("totally", 1.3),
    ("quite", 1.1),
    ("slightly", 0.7),
    ("somewhat", 0.8),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "dont", "don't", "isnt", "isn't", "wasnt", "wasn't", "didnt", "didn't"];

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS,
            word_pattern: Regex::new(r"[a-z']+").expect("word pattern is valid"),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = self
            .word_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let mut scores = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&base) = self.lexicon.get(*word) else {
                continue;
            };

            let mut score = base;
            if let Some(&factor) = i.checked_sub(1).and_then(|p| self.intensifiers.get(words[p])) {
                score *= factor;
            }
            let window = &words[i.saturating_sub(2)..i];
            if window.iter().any(|w| self.negations.iter().any(|n| n == w)) {
                score *= -0.5;
            }
            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}
