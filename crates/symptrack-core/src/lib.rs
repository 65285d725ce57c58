pub mod labels;
pub mod risk;
pub mod schema;
pub mod sentiment;
pub mod symptom;

pub use labels::{ParseLabelError, RiskTier, Sentiment, SymptomCategory};
pub use risk::{parse_severity, risk_tier};
pub use schema::columns;
pub use sentiment::{HealthLexicon, PolarityScorer, SentimentLexicon, classify_sentiment, polarity, tokenize};
pub use symptom::{OTHER_CATEGORY, symptom_category, tag_symptoms};
