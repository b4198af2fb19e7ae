//! Embedded template library and placeholder substitution.
//!
//! All phrasing used by the generator lives in `templates.toml`, embedded in
//! the binary at compile time. The file is parsed and validated once, on
//! first use, into a [`TemplateLibrary`] that is shared read-only for the
//! life of the process. [`TemplateLibrary::params`] is the `(tone, duration)`
//! lookup the generator runs against.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::brief::{DurationBucket, Tone};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Phrasing for one tone.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToneProfile {
    pub tone: Tone,
    pub title: String,
    pub hook: String,
    /// One body per script heading, in heading order.
    pub script: Vec<String>,
    pub caption: String,
    /// Short on-screen overlay line.
    pub punchline: String,
    /// Hindi lead-in placed before the call-to-action.
    pub cta_lead: String,
    pub default_cta_hindi: String,
    pub default_cta_english: String,
    pub english_note: String,
}

/// One visual beat of a duration tier.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShotTemplate {
    pub name: String,
    /// Seconds.
    pub length: u32,
    pub detail: String,
    pub voice_over: String,
}

/// Shot partition for one duration bucket.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DurationTier {
    pub seconds: u32,
    pub shots: Vec<ShotTemplate>,
}

/// A production checklist item with optional per-tone tips.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleTemplate {
    pub label: String,
    pub tip: String,
    /// Keyed by tone name (e.g. `sales`).
    #[serde(default)]
    pub tone_tips: BTreeMap<String, String>,
}

impl ScheduleTemplate {
    /// The tip for `tone`, falling back to the shared tip.
    pub fn tip_for(&self, tone: Tone) -> &str {
        self.tone_tips
            .get(&tone.to_string())
            .map(String::as_str)
            .unwrap_or(&self.tip)
    }
}

/// A recognizable call-to-action and its phrasing in both languages.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtaIntent {
    pub markers: Vec<String>,
    pub hindi: String,
    pub english: String,
}

impl CtaIntent {
    /// Byte offset of the earliest marker occurrence in the lowercased `cta`.
    ///
    /// Markers match whole words only, Latin ones case-insensitively.
    pub fn position(&self, cta: &str) -> Option<usize> {
        let lowered = cta.to_lowercase();
        self.markers
            .iter()
            .filter_map(|marker| marker_position(&lowered, &marker.to_lowercase()))
            .min()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptSection {
    headings: Vec<String>,
}

/// Container for deserializing the embedded TOML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LibraryToml {
    persona_fallback: String,
    fallback_cta_english: String,
    fixed_hashtags: Vec<String>,
    upload_steps: Vec<String>,
    script: ScriptSection,
    tones: Vec<ToneProfile>,
    durations: Vec<DurationTier>,
    schedule: Vec<ScheduleTemplate>,
    cta_intents: Vec<CtaIntent>,
}

/// The validated template library.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    /// Substituted for `{persona}` when the brief has no target persona.
    pub persona_fallback: String,
    /// English call-to-action for a Hindi one no intent recognizes.
    pub fallback_cta_english: String,
    /// Tags appended after the keyword-derived hashtags.
    pub fixed_hashtags: Vec<String>,
    pub upload_steps: Vec<String>,
    pub script_headings: Vec<String>,
    pub schedule: Vec<ScheduleTemplate>,
    pub cta_intents: Vec<CtaIntent>,
    tones: BTreeMap<Tone, ToneProfile>,
    durations: BTreeMap<DurationBucket, DurationTier>,
}

/// Everything the generator needs for one `(tone, duration)` pair.
#[derive(Debug, Clone, Copy)]
pub struct TemplateParams<'a> {
    pub library: &'a TemplateLibrary,
    pub tone: &'a ToneProfile,
    pub tier: &'a DurationTier,
}

/// Errors found while loading a template library.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("tone {0} is defined more than once")]
    DuplicateTone(Tone),

    #[error("tone {0} has no templates")]
    MissingTone(Tone),

    #[error("duration tier {0}s is not a supported bucket (expected 30, 60, or 120)")]
    UnknownDuration(u32),

    #[error("duration tier {0}s is defined more than once")]
    DuplicateDuration(u32),

    #[error("duration tier {0}s has no shots")]
    MissingDuration(DurationBucket),

    #[error("shots for the {seconds}s tier sum to {total}s")]
    ShotSumMismatch { seconds: u32, total: u32 },

    #[error("tone {tone} has {found} script bodies but there are {expected} headings")]
    ScriptLengthMismatch {
        tone: Tone,
        expected: usize,
        found: usize,
    },

    #[error("schedule item {label:?} overrides unknown tone {key:?}")]
    UnknownToneOverride { label: String, key: String },

    #[error("fixed hashtag {0:?} must be '#' followed by letters, digits or Devanagari marks")]
    InvalidFixedHashtag(String),

    #[error("unknown placeholder {{{name}}} in {location}")]
    UnknownPlaceholder { location: String, name: String },

    #[error("section {0} must not be empty")]
    EmptySection(&'static str),
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// The embedded template TOML.
static TEMPLATES_TOML: &str = include_str!("templates.toml");

static LIBRARY: OnceLock<TemplateLibrary> = OnceLock::new();

/// The process-wide template library, loaded on first use.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed or fails validation. This is a
/// build-time invariant covered by this module's tests.
pub fn library() -> &'static TemplateLibrary {
    LIBRARY.get_or_init(|| {
        parse_library(TEMPLATES_TOML).expect("embedded templates.toml is invalid")
    })
}

/// Parse and validate a template library from TOML.
pub fn parse_library(content: &str) -> Result<TemplateLibrary, TemplateError> {
    let raw: LibraryToml = toml::from_str(content)?;

    if raw.script.headings.is_empty() {
        return Err(TemplateError::EmptySection("script.headings"));
    }
    if raw.fallback_cta_english.trim().is_empty() {
        return Err(TemplateError::EmptySection("fallback_cta_english"));
    }
    if raw.fixed_hashtags.is_empty() {
        return Err(TemplateError::EmptySection("fixed_hashtags"));
    }
    if raw.upload_steps.is_empty() {
        return Err(TemplateError::EmptySection("upload_steps"));
    }
    if raw.schedule.is_empty() {
        return Err(TemplateError::EmptySection("schedule"));
    }

    for tag in &raw.fixed_hashtags {
        let valid = tag
            .strip_prefix('#')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(is_word_char));
        if !valid {
            return Err(TemplateError::InvalidFixedHashtag(tag.clone()));
        }
    }

    let mut tones = BTreeMap::new();
    for profile in raw.tones {
        if profile.script.len() != raw.script.headings.len() {
            return Err(TemplateError::ScriptLengthMismatch {
                tone: profile.tone,
                expected: raw.script.headings.len(),
                found: profile.script.len(),
            });
        }
        check_tone_placeholders(&profile)?;
        let tone = profile.tone;
        if tones.insert(tone, profile).is_some() {
            return Err(TemplateError::DuplicateTone(tone));
        }
    }
    for tone in Tone::ALL {
        if !tones.contains_key(&tone) {
            return Err(TemplateError::MissingTone(tone));
        }
    }

    let mut durations = BTreeMap::new();
    for tier in raw.durations {
        let bucket = DurationBucket::from_seconds(tier.seconds)
            .ok_or(TemplateError::UnknownDuration(tier.seconds))?;
        let total: u32 = tier.shots.iter().map(|s| s.length).sum();
        if tier.shots.is_empty() || total != tier.seconds {
            return Err(TemplateError::ShotSumMismatch {
                seconds: tier.seconds,
                total,
            });
        }
        for shot in &tier.shots {
            let location = format!("{}s shot {:?}", tier.seconds, shot.name);
            check_placeholders(&location, &shot.detail)?;
            check_placeholders(&location, &shot.voice_over)?;
        }
        let seconds = tier.seconds;
        if durations.insert(bucket, tier).is_some() {
            return Err(TemplateError::DuplicateDuration(seconds));
        }
    }
    for bucket in DurationBucket::ALL {
        if !durations.contains_key(&bucket) {
            return Err(TemplateError::MissingDuration(bucket));
        }
    }

    for item in &raw.schedule {
        let location = format!("schedule item {:?}", item.label);
        check_placeholders(&location, &item.tip)?;
        for (key, tip) in &item.tone_tips {
            if key.parse::<Tone>().is_err() {
                return Err(TemplateError::UnknownToneOverride {
                    label: item.label.clone(),
                    key: key.clone(),
                });
            }
            check_placeholders(&location, tip)?;
        }
    }
    for step in &raw.upload_steps {
        check_placeholders("upload_steps", step)?;
    }

    Ok(TemplateLibrary {
        persona_fallback: raw.persona_fallback,
        fallback_cta_english: raw.fallback_cta_english,
        fixed_hashtags: raw.fixed_hashtags,
        upload_steps: raw.upload_steps,
        script_headings: raw.script.headings,
        schedule: raw.schedule,
        cta_intents: raw.cta_intents,
        tones,
        durations,
    })
}

fn check_tone_placeholders(profile: &ToneProfile) -> Result<(), TemplateError> {
    let location = format!("tone {}", profile.tone);
    let fields = [
        &profile.title,
        &profile.hook,
        &profile.caption,
        &profile.punchline,
        &profile.cta_lead,
    ];
    for template in fields.into_iter().chain(profile.script.iter()) {
        check_placeholders(&location, template)?;
    }
    Ok(())
}

fn check_placeholders(location: &str, template: &str) -> Result<(), TemplateError> {
    for name in placeholders(template) {
        if !Slots::NAMES.contains(&name) {
            return Err(TemplateError::UnknownPlaceholder {
                location: location.to_owned(),
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

/// Names of all `{placeholder}` occurrences in `template`.
fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                names.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    names
}

impl TemplateLibrary {
    /// Look up the templates for a tone and duration bucket.
    ///
    /// Validation guarantees every tone and bucket is present.
    pub fn params(&self, tone: Tone, duration: DurationBucket) -> TemplateParams<'_> {
        TemplateParams {
            library: self,
            tone: &self.tones[&tone],
            tier: &self.durations[&duration],
        }
    }

    pub fn tone(&self, tone: Tone) -> &ToneProfile {
        &self.tones[&tone]
    }

    pub fn tier(&self, duration: DurationBucket) -> &DurationTier {
        &self.durations[&duration]
    }

    /// The intent whose marker occurs earliest in `cta`.
    ///
    /// Ties go to the intent listed first.
    pub fn match_cta_intent(&self, cta: &str) -> Option<&CtaIntent> {
        self.cta_intents
            .iter()
            .filter_map(|intent| intent.position(cta).map(|pos| (pos, intent)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, intent)| intent)
    }
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

/// Values substituted into template placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Slots<'a> {
    pub topic: &'a str,
    pub persona: &'a str,
    pub cta: &'a str,
    pub duration: u32,
    pub tone: Tone,
    pub shots: usize,
}

impl Slots<'_> {
    /// Placeholder names a template may use.
    pub const NAMES: [&'static str; 6] = ["topic", "persona", "cta", "duration", "tone", "shots"];

    /// Substitute every known placeholder in `template`.
    ///
    /// Substitution is a single left-to-right pass, so placeholder-like text
    /// inside substituted values is never expanded. Unknown placeholders are
    /// kept verbatim.
    pub fn fill(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + self.topic.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let name = &after[..close];
            match name {
                "topic" => out.push_str(self.topic),
                "persona" => out.push_str(self.persona),
                "cta" => out.push_str(self.cta),
                "duration" => out.push_str(&self.duration.to_string()),
                "tone" => out.push_str(&self.tone.to_string()),
                "shots" => out.push_str(&self.shots.to_string()),
                _ => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        out
    }
}

// ---------------------------------------------------------------------------
// Words
// ---------------------------------------------------------------------------

/// Devanagari combining marks: vowel signs, virama, nukta, anusvara and the like.
pub(crate) fn is_devanagari_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0900}'..='\u{0903}'
            | '\u{093A}'..='\u{093C}'
            | '\u{093E}'..='\u{094F}'
            | '\u{0951}'..='\u{0957}'
            | '\u{0962}'..='\u{0963}'
    )
}

/// Whether `c` belongs to a word. Hashtags keep exactly these characters.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_devanagari_mark(c)
}

/// First occurrence of `marker` in `haystack` that is not part of a longer word.
fn marker_position(haystack: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    haystack
        .match_indices(marker)
        .map(|(start, _)| start)
        .find(|&start| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[start + marker.len()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
