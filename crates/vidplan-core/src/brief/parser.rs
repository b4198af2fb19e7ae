//! Brief TOML format and parser.
//!
//! A brief file holds the same fields as the input form. Every field is
//! optional at the TOML level so files can be layered over defaults; missing
//! fields fall back to [`BriefInput::blank`] when parsed standalone. Both
//! snake_case and camelCase keys are accepted.
//!
//! ```toml
//! topic = "AI टूल से क्रिएटिव वीडियो कैसे बनाएं"
//! target_persona = "भारतीय छोटे व्यवसाय के मालिक"
//! tone = "informative"
//! duration = 60
//! call_to_action = "अभी रजिस्टर करें"
//! keywords = ["AI Video", "Hindi Content"]
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Brief, BriefError, BriefInput, parse_keywords};

/// Errors that can occur while reading a brief file.
#[derive(Debug, Error)]
pub enum BriefParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid brief: {0}")]
    Invalid(#[from] BriefError),
}

/// Duration as written in a brief file: `60` or `"60"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(i64),
    Text(String),
}

impl DurationValue {
    fn into_text(self) -> String {
        match self {
            Self::Seconds(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Keywords as written in a brief file: a list, or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordsValue {
    List(Vec<String>),
    Draft(String),
}

impl KeywordsValue {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(list) => list,
            Self::Draft(draft) => parse_keywords(&draft),
        }
    }
}

/// On-disk representation of a brief.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BriefToml {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(
        default,
        alias = "targetPersona",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationValue>,
    #[serde(
        default,
        alias = "callToAction",
        skip_serializing_if = "Option::is_none"
    )]
    pub call_to_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordsValue>,
}

impl BriefToml {
    /// Capture every field of `input`, e.g. to write out a starter file.
    pub fn from_input(input: &BriefInput) -> Self {
        let duration = match input.duration.trim().parse::<i64>() {
            Ok(n) => DurationValue::Seconds(n),
            Err(_) => DurationValue::Text(input.duration.clone()),
        };
        Self {
            topic: Some(input.topic.clone()),
            target_persona: Some(input.target_persona.clone()),
            tone: Some(input.tone.clone()),
            duration: Some(duration),
            call_to_action: Some(input.call_to_action.clone()),
            keywords: Some(KeywordsValue::List(input.keywords.clone())),
        }
    }

    /// Overlay the fields present in this file onto `base`.
    pub fn overlay(self, mut base: BriefInput) -> BriefInput {
        if let Some(topic) = self.topic {
            base.topic = topic;
        }
        if let Some(persona) = self.target_persona {
            base.target_persona = persona;
        }
        if let Some(tone) = self.tone {
            base.tone = tone;
        }
        if let Some(duration) = self.duration {
            base.duration = duration.into_text();
        }
        if let Some(cta) = self.call_to_action {
            base.call_to_action = cta;
        }
        if let Some(keywords) = self.keywords {
            base.keywords = keywords.into_list();
        }
        base
    }
}

/// Parse a brief TOML string without validating it.
pub fn parse_brief_toml_raw(content: &str) -> Result<BriefToml, BriefParseError> {
    Ok(toml::from_str(content)?)
}

/// Parse and validate a standalone brief TOML string.
pub fn parse_brief_toml(content: &str) -> Result<Brief, BriefParseError> {
    let raw = parse_brief_toml_raw(content)?;
    let brief = raw.overlay(BriefInput::blank()).validate()?;
    Ok(brief)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
