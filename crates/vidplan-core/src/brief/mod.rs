//! Brief model: the validated input to plan generation.
//!
//! A [`Brief`] can only be obtained through validation ([`Brief::new`] or
//! [`BriefInput::validate`]), so the generator never sees an empty topic or an
//! out-of-set tone or duration.

pub mod parser;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use parser::{
    BriefParseError, BriefToml, DurationValue, KeywordsValue, parse_brief_toml, parse_brief_toml_raw,
};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Stylistic mode that governs phrasing across the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Informative,
    Inspirational,
    Entertaining,
    Sales,
}

impl Tone {
    /// Every supported tone, in display order.
    pub const ALL: [Tone; 4] = [
        Self::Informative,
        Self::Inspirational,
        Self::Entertaining,
        Self::Sales,
    ];

    /// Hindi label shown to creators.
    pub fn label_hindi(self) -> &'static str {
        match self {
            Self::Informative => "सूचनात्मक",
            Self::Inspirational => "प्रेरणादायक",
            Self::Entertaining => "मनोरंजक",
            Self::Sales => "प्रमोशनल",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Informative => "informative",
            Self::Inspirational => "inspirational",
            Self::Entertaining => "entertaining",
            Self::Sales => "sales",
        };
        f.write_str(s)
    }
}

impl FromStr for Tone {
    type Err = ToneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "informative" => Ok(Self::Informative),
            "inspirational" => Ok(Self::Inspirational),
            "entertaining" => Ok(Self::Entertaining),
            "sales" => Ok(Self::Sales),
            other => Err(ToneParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Tone`] string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported tone {0:?} (expected informative, inspirational, entertaining, or sales)")]
pub struct ToneParseError(pub String);

// ---------------------------------------------------------------------------

/// Target video length, as a discrete tier rather than an arbitrary number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DurationBucket {
    /// 30 seconds: reel or short.
    Short,
    /// 60 seconds: reel or feed video.
    Standard,
    /// 120 seconds: long form.
    Long,
}

impl DurationBucket {
    /// Every supported bucket, shortest first.
    pub const ALL: [DurationBucket; 3] = [Self::Short, Self::Standard, Self::Long];

    /// Length of the bucket in seconds.
    pub fn seconds(self) -> u32 {
        match self {
            Self::Short => 30,
            Self::Standard => 60,
            Self::Long => 120,
        }
    }

    /// Map a number of seconds onto a bucket. Only exact tier values match.
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        match seconds {
            30 => Some(Self::Short),
            60 => Some(Self::Standard),
            120 => Some(Self::Long),
            _ => None,
        }
    }

    /// Hindi format suggestion for the bucket.
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::Short => "30 सेकंड (रील या शॉर्ट)",
            Self::Standard => "60 सेकंड (रील/फ़ीड)",
            Self::Long => "120 सेकंड (लॉन्ग फ़ॉर्म)",
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.seconds())
    }
}

impl FromStr for DurationBucket {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_seconds)
            .ok_or_else(|| DurationParseError(s.to_owned()))
    }
}

/// Error returned when parsing an invalid [`DurationBucket`] string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported duration {0:?} (expected 30, 60, or 120)")]
pub struct DurationParseError(pub String);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a brief is rejected before any generation happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BriefError {
    #[error("{field} {reason}")]
    InvalidBrief { field: &'static str, reason: String },

    #[error(transparent)]
    UnsupportedTone(#[from] ToneParseError),

    #[error(transparent)]
    UnsupportedDuration(#[from] DurationParseError),
}

impl BriefError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidBrief {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending brief field, for field-level error display.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidBrief { field, .. } => field,
            Self::UnsupportedTone(_) => "tone",
            Self::UnsupportedDuration(_) => "duration",
        }
    }
}

// ---------------------------------------------------------------------------
// Brief
// ---------------------------------------------------------------------------

/// A validated video brief.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Brief {
    topic: String,
    target_persona: String,
    tone: Tone,
    duration: DurationBucket,
    call_to_action: String,
    keywords: Vec<String>,
}

impl Brief {
    /// Validate and build a brief.
    ///
    /// Free-form fields are trimmed. The topic must be non-empty and every
    /// keyword must contain something other than whitespace. Keywords keep
    /// their order and are not deduplicated.
    pub fn new(
        topic: impl Into<String>,
        target_persona: impl Into<String>,
        tone: Tone,
        duration: DurationBucket,
        call_to_action: impl Into<String>,
        keywords: Vec<String>,
    ) -> Result<Self, BriefError> {
        let topic = topic.into().trim().to_owned();
        if topic.is_empty() {
            return Err(BriefError::invalid("topic", "is required"));
        }

        let mut cleaned = Vec::with_capacity(keywords.len());
        for (i, keyword) in keywords.into_iter().enumerate() {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                return Err(BriefError::invalid(
                    "keywords",
                    format!("entry {} is blank", i + 1),
                ));
            }
            cleaned.push(keyword.to_owned());
        }

        Ok(Self {
            topic,
            target_persona: target_persona.into().trim().to_owned(),
            tone,
            duration,
            call_to_action: call_to_action.into().trim().to_owned(),
            keywords: cleaned,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Target audience; may be empty.
    pub fn target_persona(&self) -> &str {
        &self.target_persona
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn duration(&self) -> DurationBucket {
        self.duration
    }

    /// Desired viewer action; may be empty.
    pub fn call_to_action(&self) -> &str {
        &self.call_to_action
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Unvalidated brief fields as collected from a form, file, or CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefInput {
    pub topic: String,
    pub target_persona: String,
    pub tone: String,
    pub duration: String,
    pub call_to_action: String,
    pub keywords: Vec<String>,
}

impl BriefInput {
    /// An input with no free-form content, using the default tone and duration.
    pub fn blank() -> Self {
        Self {
            topic: String::new(),
            target_persona: String::new(),
            tone: Tone::Informative.to_string(),
            duration: DurationBucket::Standard.to_string(),
            call_to_action: String::new(),
            keywords: Vec::new(),
        }
    }

    /// Validate the raw fields into a [`Brief`].
    ///
    /// Checks run in field order (topic, tone, duration, keywords) and the
    /// first failure is returned.
    pub fn validate(&self) -> Result<Brief, BriefError> {
        if self.topic.trim().is_empty() {
            return Err(BriefError::invalid("topic", "is required"));
        }
        let tone: Tone = self.tone.trim().parse()?;
        let duration: DurationBucket = self.duration.parse()?;
        Brief::new(
            self.topic.clone(),
            self.target_persona.clone(),
            tone,
            duration,
            self.call_to_action.clone(),
            self.keywords.clone(),
        )
    }
}

impl Default for BriefInput {
    /// The sample brief offered to new users.
    fn default() -> Self {
        Self {
            topic: "AI टूल से क्रिएटिव वीडियो कैसे बनाएं".to_owned(),
            target_persona: "भारतीय छोटे व्यवसाय के मालिक".to_owned(),
            tone: Tone::Informative.to_string(),
            duration: DurationBucket::Standard.to_string(),
            call_to_action: "अभी हमारी मुफ्त AI वीडियो वर्कशॉप के लिए रजिस्टर करें".to_owned(),
            keywords: vec![
                "AI Video".to_owned(),
                "Hindi Content".to_owned(),
                "Facebook Growth".to_owned(),
            ],
        }
    }
}

/// Split a comma-separated keyword draft into trimmed, non-empty keywords.
pub fn parse_keywords(draft: &str) -> Vec<String> {
    draft
        .split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_display_roundtrip() {
        for tone in Tone::ALL {
            let parsed: Tone = tone.to_string().parse().unwrap();
            assert_eq!(parsed, tone);
        }
    }

    #[test]
    fn tone_rejects_unknown() {
        let err = "unknown".parse::<Tone>().unwrap_err();
        assert_eq!(err, ToneParseError("unknown".to_owned()));
    }

    #[test]
    fn tone_is_case_sensitive() {
        assert!("Sales".parse::<Tone>().is_err());
    }

    #[test]
    fn tone_labels_are_distinct() {
        let mut labels: Vec<&str> = Tone::ALL.iter().map(|t| t.label_hindi()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Tone::ALL.len());
    }

    #[test]
    fn duration_parses_tier_values() {
        assert_eq!("30".parse::<DurationBucket>().unwrap(), DurationBucket::Short);
        assert_eq!("60".parse::<DurationBucket>().unwrap(), DurationBucket::Standard);
        assert_eq!(" 120 ".parse::<DurationBucket>().unwrap(), DurationBucket::Long);
    }

    #[test]
    fn duration_rejects_off_tier_values() {
        for bad in ["45", "0", "-30", "sixty", ""] {
            assert!(
                bad.parse::<DurationBucket>().is_err(),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn duration_display_is_seconds() {
        assert_eq!(DurationBucket::Long.to_string(), "120");
        assert_eq!(DurationBucket::from_seconds(60), Some(DurationBucket::Standard));
        assert_eq!(DurationBucket::from_seconds(90), None);
    }

    #[test]
    fn brief_new_trims_fields() {
        let brief = Brief::new(
            "  Topic  ",
            " persona ",
            Tone::Sales,
            DurationBucket::Short,
            " buy now ",
            vec![" AI ".to_owned()],
        )
        .unwrap();
        assert_eq!(brief.topic(), "Topic");
        assert_eq!(brief.target_persona(), "persona");
        assert_eq!(brief.call_to_action(), "buy now");
        assert_eq!(brief.keywords(), ["AI"]);
    }

    #[test]
    fn brief_new_rejects_empty_topic() {
        let err = Brief::new("   ", "", Tone::Sales, DurationBucket::Short, "", vec![]).unwrap_err();
        assert_eq!(err.field(), "topic");
        assert_eq!(err.to_string(), "topic is required");
    }

    #[test]
    fn brief_new_rejects_blank_keyword() {
        let err = Brief::new(
            "Topic",
            "",
            Tone::Sales,
            DurationBucket::Short,
            "",
            vec!["ok".to_owned(), "  ".to_owned()],
        )
        .unwrap_err();
        assert_eq!(err.field(), "keywords");
        assert!(err.to_string().contains("entry 2"));
    }

    #[test]
    fn brief_keeps_duplicate_keywords() {
        let brief = Brief::new(
            "Topic",
            "",
            Tone::Informative,
            DurationBucket::Standard,
            "",
            vec!["AI".to_owned(), "AI".to_owned()],
        )
        .unwrap();
        assert_eq!(brief.keywords().len(), 2);
    }

    #[test]
    fn input_default_validates() {
        let brief = BriefInput::default().validate().unwrap();
        assert_eq!(brief.tone(), Tone::Informative);
        assert_eq!(brief.duration(), DurationBucket::Standard);
        assert_eq!(brief.keywords().len(), 3);
    }

    #[test]
    fn input_reports_unsupported_tone() {
        let input = BriefInput {
            tone: "unknown".to_owned(),
            ..BriefInput::default()
        };
        let err = input.validate().unwrap_err();
        assert!(matches!(err, BriefError::UnsupportedTone(_)));
        assert_eq!(err.field(), "tone");
    }

    #[test]
    fn input_reports_unsupported_duration() {
        let input = BriefInput {
            duration: "90".to_owned(),
            ..BriefInput::default()
        };
        let err = input.validate().unwrap_err();
        assert!(matches!(err, BriefError::UnsupportedDuration(_)));
    }

    #[test]
    fn input_checks_topic_before_tone() {
        let input = BriefInput {
            topic: String::new(),
            tone: "unknown".to_owned(),
            ..BriefInput::default()
        };
        assert_eq!(input.validate().unwrap_err().field(), "topic");
    }

    #[test]
    fn blank_input_fails_on_topic() {
        let err = BriefInput::blank().validate().unwrap_err();
        assert!(matches!(err, BriefError::InvalidBrief { field: "topic", .. }));
    }

    #[test]
    fn parse_keywords_splits_and_trims() {
        let keywords = parse_keywords(" AI Video, , Hindi Content ,Facebook Growth,");
        assert_eq!(keywords, ["AI Video", "Hindi Content", "Facebook Growth"]);
    }

    #[test]
    fn parse_keywords_empty_draft() {
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , ,").is_empty());
    }
}
