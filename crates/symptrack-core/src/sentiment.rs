//! Lexicon-based polarity scoring for free-text reports.
//!
//! Each token found in the lexicon contributes its polarity. An intensifier
//! directly before a polar word scales it ("very bad"), and a negator up to
//! three tokens earlier flips and dampens it ("not feeling good"). The text's
//! polarity is the mean contribution, clamped to `[-1, 1]`, or `0.0` when no
//! polar word is present.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::Sentiment;

/// Multiplier applied to a polar word inside a negation window.
const NEGATION_FACTOR: f64 = -0.5;

/// Tokens after a negator in which a polar word is still negated.
const NEGATION_WINDOW: usize = 3;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nor", "neither", "cannot", "without",
];

const POLAR_WORDS: &[(&str, f64)] = &[
    // favourable
    ("good", 0.7),
    ("great", 0.8),
    ("better", 0.5),
    ("best", 1.0),
    ("fine", 0.42),
    ("excellent", 1.0),
    ("wonderful", 1.0),
    ("perfect", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("nice", 0.6),
    ("happy", 0.8),
    ("glad", 0.5),
    ("grateful", 0.6),
    ("thankful", 0.5),
    ("hopeful", 0.5),
    ("relieved", 0.4),
    ("improving", 0.5),
    ("improved", 0.5),
    ("recovered", 0.5),
    ("recovering", 0.4),
    ("healthy", 0.5),
    ("comfortable", 0.4),
    ("energetic", 0.5),
    ("strong", 0.43),
    ("stable", 0.3),
    ("calm", 0.3),
    ("okay", 0.5),
    ("ok", 0.5),
    ("easy", 0.43),
    ("love", 0.5),
    ("enjoy", 0.4),
    ("positive", 0.23),
    ("normal", 0.15),
    ("mild", 0.1),
    // unfavourable
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("miserable", -1.0),
    ("unbearable", -0.8),
    ("severe", -0.6),
    ("sick", -0.71),
    ("ill", -0.5),
    ("unwell", -0.6),
    ("painful", -0.7),
    ("pain", -0.5),
    ("hurt", -0.5),
    ("hurts", -0.5),
    ("aching", -0.4),
    ("sore", -0.4),
    ("tired", -0.4),
    ("exhausted", -0.4),
    ("weak", -0.375),
    ("dizzy", -0.3),
    ("nauseous", -0.5),
    ("poor", -0.4),
    ("scared", -0.5),
    ("worried", -0.4),
    ("anxious", -0.4),
    ("sad", -0.5),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("uncomfortable", -0.5),
    ("struggling", -0.4),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("super", 1.3),
    ("totally", 1.2),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("mildly", 0.6),
    ("barely", 0.4),
];

static DEFAULT_SCORER: LazyLock<PolarityScorer> = LazyLock::new(PolarityScorer::new);

/// Word-level polarity source.
pub trait SentimentLexicon {
    /// Polarity of a lower-cased word in `[-1, 1]`, if it carries one.
    fn polarity(&self, word: &str) -> Option<f64>;

    /// Multiplier applied to the next polar word, if `word` is an intensifier.
    fn intensity(&self, word: &str) -> Option<f64>;

    /// Whether `word` negates the polar words that follow it.
    fn is_negation(&self, word: &str) -> bool {
        NEGATORS.contains(&word) || word.ends_with("n't")
    }
}

/// Default lexicon tuned for short patient-written health reports.
#[derive(Debug, Clone)]
pub struct HealthLexicon {
    words: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl HealthLexicon {
    pub fn new() -> Self {
        Self {
            words: POLAR_WORDS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Add or override a word's polarity.
    pub fn with_word(mut self, word: &'static str, polarity: f64) -> Self {
        self.words.insert(word, polarity.clamp(-1.0, 1.0));
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for HealthLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon for HealthLexicon {
    fn polarity(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    fn intensity(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }
}

/// Scores text polarity against a [`SentimentLexicon`].
#[derive(Debug, Clone)]
pub struct PolarityScorer<L = HealthLexicon> {
    lexicon: L,
}

impl PolarityScorer<HealthLexicon> {
    pub fn new() -> Self {
        Self {
            lexicon: HealthLexicon::new(),
        }
    }
}

impl Default for PolarityScorer<HealthLexicon> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SentimentLexicon> PolarityScorer<L> {
    pub fn with_lexicon(lexicon: L) -> Self {
        Self { lexicon }
    }

    /// Polarity of `text` in `[-1, 1]`.
    pub fn polarity(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut polar_words = 0usize;
        let mut pending_intensity: Option<f64> = None;
        let mut negation_left = 0usize;

        for token in tokenize(text) {
            if self.lexicon.is_negation(&token) {
                negation_left = NEGATION_WINDOW;
                pending_intensity = None;
                continue;
            }

            if let Some(factor) = self.lexicon.intensity(&token) {
                pending_intensity = Some(factor);
                continue;
            }

            match self.lexicon.polarity(&token) {
                Some(base) => {
                    let mut score = base * pending_intensity.take().unwrap_or(1.0);
                    if negation_left > 0 {
                        score *= NEGATION_FACTOR;
                        negation_left = 0;
                    }
                    total += score;
                    polar_words += 1;
                }
                None => {
                    pending_intensity = None;
                    negation_left = negation_left.saturating_sub(1);
                }
            }
        }

        if polar_words == 0 {
            return 0.0;
        }
        (total / polar_words as f64).clamp(-1.0, 1.0)
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        Sentiment::from_polarity(self.polarity(text))
    }
}

/// Polarity of `text` using the default [`HealthLexicon`].
pub fn polarity(text: &str) -> f64 {
    DEFAULT_SCORER.polarity(text)
}

/// Sentiment label of `text` using the default [`HealthLexicon`].
pub fn classify_sentiment(text: &str) -> Sentiment {
    DEFAULT_SCORER.classify(text)
}

/// Lower-cased word tokens. Apostrophes stay inside tokens so contractions
/// like "don't" survive as a single negator.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase().replace('\u{2019}', "'"))
}
