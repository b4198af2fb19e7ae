//! Plan generation: brief in, content plan out.
//!
//! Every section is derived by its own pure function over the brief and the
//! templates selected for its `(tone, duration)` pair. Nothing here reads a
//! clock, a random source, or the filesystem, so equal briefs always produce
//! equal plans.

use std::collections::HashSet;

use tracing::debug;

use crate::brief::Brief;
use crate::plan::{ContentPlan, ScheduleItem, ScriptSegment, Shot};
use crate::templates::{self, Slots, TemplateLibrary, TemplateParams, is_word_char};

/// Maximum length of an on-screen text line, in characters.
pub const ON_SCREEN_MAX_CHARS: usize = 42;

/// Keywords shown together on the keyword overlay line.
const OVERLAY_KEYWORDS: usize = 3;

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Generate a content plan using the embedded template library.
pub fn generate(brief: &Brief) -> ContentPlan {
    generate_with(templates::library(), brief)
}

/// Generate a content plan from an explicit template library.
pub fn generate_with(library: &TemplateLibrary, brief: &Brief) -> ContentPlan {
    let params = library.params(brief.tone(), brief.duration());
    let cta = resolve_cta(params, brief.call_to_action());

    let persona = match brief.target_persona() {
        "" => library.persona_fallback.as_str(),
        persona => persona,
    };
    let slots = Slots {
        topic: brief.topic(),
        persona,
        cta: &cta.core,
        duration: brief.duration().seconds(),
        tone: brief.tone(),
        shots: params.tier.shots.len(),
    };

    debug!(
        tone = %brief.tone(),
        duration = brief.duration().seconds(),
        shots = params.tier.shots.len(),
        keywords = brief.keywords().len(),
        "generating content plan"
    );

    ContentPlan {
        title: slots.fill(&params.tone.title),
        hook: slots.fill(&params.tone.hook),
        hindi_script: script(params, &slots),
        shot_plan: shot_plan(params, &slots),
        on_screen_text: on_screen_text(params, brief, &slots),
        captions: slots.fill(&params.tone.caption),
        hashtags: hashtags(library, brief.keywords()),
        call_to_action_hindi: cta.hindi,
        call_to_action_english: cta.english,
        production_schedule: production_schedule(params, &slots),
        facebook_upload_steps: upload_steps(library, &slots),
        english_support: english_support(params, brief),
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn script(params: TemplateParams<'_>, slots: &Slots<'_>) -> Vec<ScriptSegment> {
    params
        .library
        .script_headings
        .iter()
        .zip(&params.tone.script)
        .map(|(heading, body)| ScriptSegment {
            heading: heading.clone(),
            body: slots.fill(body),
        })
        .collect()
}

fn shot_plan(params: TemplateParams<'_>, slots: &Slots<'_>) -> Vec<Shot> {
    params
        .tier
        .shots
        .iter()
        .map(|shot| Shot {
            shot: shot.name.clone(),
            length: shot.length,
            detail: slots.fill(&shot.detail),
            voice_over: slots.fill(&shot.voice_over),
        })
        .collect()
}

/// Four overlay lines: topic, keywords, tone punchline, call-to-action.
fn on_screen_text(params: TemplateParams<'_>, brief: &Brief, slots: &Slots<'_>) -> Vec<String> {
    let keyword_line = if brief.keywords().is_empty() {
        format!("{} के लिए खास", slots.persona)
    } else {
        brief
            .keywords()
            .iter()
            .take(OVERLAY_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ")
    };

    [
        brief.topic().to_owned(),
        keyword_line,
        slots.fill(&params.tone.punchline),
        format!("👉 {}", slots.cta),
    ]
    .iter()
    .map(|line| clip(line, ON_SCREEN_MAX_CHARS))
    .collect()
}

/// Keyword tags in keyword order, then the fixed tags, without repeats.
fn hashtags(library: &TemplateLibrary, keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .filter_map(|k| normalize_hashtag(k))
        .chain(library.fixed_hashtags.iter().cloned())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect()
}

fn production_schedule(params: TemplateParams<'_>, slots: &Slots<'_>) -> Vec<ScheduleItem> {
    params
        .library
        .schedule
        .iter()
        .map(|item| ScheduleItem {
            label: item.label.clone(),
            tip: slots.fill(item.tip_for(slots.tone)),
        })
        .collect()
}

fn upload_steps(library: &TemplateLibrary, slots: &Slots<'_>) -> Vec<String> {
    library.upload_steps.iter().map(|s| slots.fill(s)).collect()
}

fn english_support(params: TemplateParams<'_>, brief: &Brief) -> Vec<String> {
    let shots = &params.tier.shots;
    let longest = shots.iter().map(|s| s.length).max().unwrap_or(0);

    let keyword_note = if brief.keywords().is_empty() {
        format!(
            "No keywords were supplied, so discovery relies on the fixed tags {}.",
            params.library.fixed_hashtags.join(" ")
        )
    } else {
        format!(
            "Work these keywords into the description and the spoken lines: {}.",
            brief.keywords().join(", ")
        )
    };

    vec![
        format!(
            "Runtime: {} seconds across {} shots. The longest shot runs {} seconds, so change the visual at least once inside it.",
            brief.duration().seconds(),
            shots.len(),
            longest
        ),
        params.tone.english_note.clone(),
        keyword_note,
        "Add English subtitles for viewers watching on mute and keep the Hindi on-screen text large and high-contrast.".to_owned(),
    ]
}

// ---------------------------------------------------------------------------
// Call-to-action
// ---------------------------------------------------------------------------

/// The call-to-action in both languages plus the Hindi core used in templates.
struct CtaPair {
    core: String,
    hindi: String,
    english: String,
}

fn resolve_cta(params: TemplateParams<'_>, raw: &str) -> CtaPair {
    let tone = params.tone;
    if raw.is_empty() {
        return CtaPair {
            core: tone.default_cta_hindi.clone(),
            hindi: format!("{} {}", tone.cta_lead, tone.default_cta_hindi),
            english: tone.default_cta_english.clone(),
        };
    }

    let intent = params.library.match_cta_intent(raw);
    if contains_devanagari(raw) {
        let english = intent
            .map(|i| i.english.clone())
            .unwrap_or_else(|| params.library.fallback_cta_english.clone());
        CtaPair {
            core: raw.to_owned(),
            hindi: format!("{} {raw}", tone.cta_lead),
            english,
        }
    } else {
        let core = intent
            .map(|i| i.hindi.clone())
            .unwrap_or_else(|| raw.to_owned());
        CtaPair {
            hindi: format!("{} {core}", tone.cta_lead),
            core,
            english: raw.to_owned(),
        }
    }
}

fn contains_devanagari(text: &str) -> bool {
    text.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Turn a keyword into a single-token hashtag.
///
/// Only letters, digits and Devanagari combining marks are kept; spaces,
/// punctuation, currency signs and emoji are dropped. Returns `None` when
/// nothing is left.
pub fn normalize_hashtag(keyword: &str) -> Option<String> {
    let token: String = keyword.chars().filter(|c| is_word_char(*c)).collect();
    if token.is_empty() {
        None
    } else {
        Some(format!("#{token}"))
    }
}

/// Shorten `line` to at most `max` characters, breaking on a word boundary
/// where possible and marking the cut with an ellipsis.
fn clip(line: &str, max: usize) -> String {
    if line.chars().count() <= max {
        return line.to_owned();
    }
    let room = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        let extra = if out.is_empty() { len } else { len + 1 };
        if used + extra > room {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        used += extra;
    }
    if out.is_empty() {
        out = line.chars().take(room).collect();
    }
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::{DurationBucket, Tone};

    fn brief(tone: Tone, duration: DurationBucket, cta: &str, keywords: &[&str]) -> Brief {
        Brief::new(
            "AI टूल से क्रिएटिव वीडियो कैसे बनाएं",
            "भारतीय छोटे व्यवसाय के मालिक",
            tone,
            duration,
            cta,
            keywords.iter().map(|k| k.to_string()).collect(),
        )
        .unwrap()
    }

    // -- hashtags --

    #[test]
    fn normalize_strips_spaces_and_punctuation() {
        assert_eq!(normalize_hashtag("AI Video"), Some("#AIVideo".to_owned()));
        assert_eq!(normalize_hashtag(" #Hindi-Content! "), Some("#HindiContent".to_owned()));
        assert_eq!(normalize_hashtag("हिन्दी दर्शक।"), Some("#हिन्दीदर्शक".to_owned()));
    }

    #[test]
    fn normalize_drops_symbols_and_emoji() {
        assert_eq!(normalize_hashtag("«AI Video»"), Some("#AIVideo".to_owned()));
        assert_eq!(normalize_hashtag("Growth🚀"), Some("#Growth".to_owned()));
        assert_eq!(normalize_hashtag("AI·Video"), Some("#AIVideo".to_owned()));
        assert_eq!(normalize_hashtag("Price₹99"), Some("#Price99".to_owned()));
        assert_eq!(normalize_hashtag("क्रिएटिव वीडियो"), Some("#क्रिएटिववीडियो".to_owned()));
    }

    #[test]
    fn normalize_rejects_punctuation_only() {
        assert_eq!(normalize_hashtag("!!! ---"), None);
    }

    #[test]
    fn hashtags_dedupe_case_insensitively() {
        let tags = hashtags(
            templates::library(),
            &["AI Video".to_owned(), "ai video".to_owned(), "hindi video".to_owned()],
        );
        assert_eq!(tags, ["#AIVideo", "#hindivideo", "#FacebookReels"]);
    }

    #[test]
    fn hashtags_skip_empty_tokens() {
        let tags = hashtags(templates::library(), &["...".to_owned()]);
        assert_eq!(tags, templates::library().fixed_hashtags);
    }

    // -- call-to-action --

    #[test]
    fn hindi_cta_is_echoed_and_translated() {
        let plan = generate(&brief(
            Tone::Informative,
            DurationBucket::Standard,
            "अभी रजिस्टर करें",
            &[],
        ));
        assert!(plan.call_to_action_hindi.ends_with("अभी रजिस्टर करें"));
        assert_eq!(plan.call_to_action_english, "Register now");
    }

    #[test]
    fn unrecognized_hindi_cta_uses_neutral_english() {
        let lib = templates::library();
        for tone in Tone::ALL {
            let plan = generate(&brief(tone, DurationBucket::Standard, "कुछ नया आज़माएं", &[]));
            assert_eq!(plan.call_to_action_english, lib.fallback_cta_english);
            assert_ne!(plan.call_to_action_english, lib.tone(tone).default_cta_english);
            assert!(plan.call_to_action_hindi.contains("कुछ नया आज़माएं"));
        }
    }

    #[test]
    fn hindi_cta_marker_inside_longer_word_is_ignored() {
        let plan = generate(&brief(
            Tone::Informative,
            DurationBucket::Standard,
            "कॉलेज स्टूडेंट्स आज ही कोर्स जॉइन करें",
            &[],
        ));
        assert_eq!(plan.call_to_action_english, "Join us today");
    }

    #[test]
    fn latin_cta_is_kept_in_english() {
        let plan = generate(&brief(
            Tone::Sales,
            DurationBucket::Short,
            "Download the app today",
            &[],
        ));
        assert_eq!(plan.call_to_action_english, "Download the app today");
        assert!(plan.call_to_action_hindi.contains("अभी डाउनलोड करें"));
    }

    #[test]
    fn empty_cta_uses_tone_defaults() {
        let plan = generate(&brief(Tone::Inspirational, DurationBucket::Short, "", &[]));
        let profile = templates::library().tone(Tone::Inspirational);
        assert!(plan.call_to_action_hindi.contains(&profile.default_cta_hindi));
        assert_eq!(plan.call_to_action_english, profile.default_cta_english);
        let last_shot = plan.shot_plan.last().unwrap();
        assert_eq!(last_shot.voice_over, profile.default_cta_hindi);
    }

    #[test]
    fn cta_is_echoed_in_an_upload_step() {
        let plan = generate(&brief(
            Tone::Informative,
            DurationBucket::Standard,
            "अभी रजिस्टर करें",
            &[],
        ));
        assert!(
            plan.facebook_upload_steps
                .iter()
                .any(|s| s.contains("\"अभी रजिस्टर करें\""))
        );
    }

    // -- on-screen text --

    #[test]
    fn clip_keeps_short_lines() {
        assert_eq!(clip("short line", 42), "short line");
    }

    #[test]
    fn clip_breaks_on_word_boundary() {
        let clipped = clip("one two three four five six seven eight nine ten", 20);
        assert_eq!(clipped, "one two three four…");
        assert!(clipped.chars().count() <= 20);
    }

    #[test]
    fn clip_cuts_single_long_word() {
        let clipped = clip(&"x".repeat(50), 10);
        assert_eq!(clipped, format!("{}…", "x".repeat(9)));
    }

    #[test]
    fn on_screen_lines_respect_limit() {
        let long_topic = "AI टूल से क्रिएटिव वीडियो कैसे बनाएं और अपने छोटे व्यवसाय को तेज़ी से आगे बढ़ाएं";
        let b = Brief::new(
            long_topic,
            "",
            Tone::Entertaining,
            DurationBucket::Long,
            "अभी हमारी मुफ्त AI वीडियो वर्कशॉप के लिए रजिस्टर करें",
            vec!["AI Video".into(), "Hindi Content".into(), "Facebook Growth".into()],
        )
        .unwrap();
        let plan = generate(&b);
        assert_eq!(plan.on_screen_text.len(), 4);
        for line in &plan.on_screen_text {
            assert!(
                line.chars().count() <= ON_SCREEN_MAX_CHARS,
                "line too long: {line:?}"
            );
        }
    }

    #[test]
    fn on_screen_keyword_line_falls_back_to_persona() {
        let plan = generate(&brief(Tone::Informative, DurationBucket::Short, "", &[]));
        assert!(plan.on_screen_text[1].contains("के लिए खास"));
    }

    // -- persona --

    #[test]
    fn empty_persona_uses_fallback() {
        let b = Brief::new(
            "Reels",
            "",
            Tone::Informative,
            DurationBucket::Short,
            "",
            vec![],
        )
        .unwrap();
        let plan = generate(&b);
        assert!(plan.hook.contains(&templates::library().persona_fallback));
    }

    // -- schedule and notes --

    #[test]
    fn schedule_labels_do_not_depend_on_tone() {
        let labels = |tone| {
            generate(&brief(tone, DurationBucket::Standard, "", &[]))
                .production_schedule
                .into_iter()
                .map(|i| i.label)
                .collect::<Vec<_>>()
        };
        let base = labels(Tone::Informative);
        for tone in Tone::ALL {
            assert_eq!(labels(tone), base);
        }
    }

    #[test]
    fn schedule_tips_follow_tone() {
        let info = generate(&brief(Tone::Informative, DurationBucket::Standard, "", &[]));
        let fun = generate(&brief(Tone::Entertaining, DurationBucket::Standard, "", &[]));
        assert_ne!(info.production_schedule, fun.production_schedule);
    }

    #[test]
    fn english_notes_mention_duration_and_keywords() {
        let plan = generate(&brief(
            Tone::Sales,
            DurationBucket::Long,
            "",
            &["AI Video", "Hindi Content"],
        ));
        assert!(plan.english_support[0].contains("120 seconds across 7 shots"));
        assert!(plan.english_support[1].starts_with("Sales tone"));
        assert!(plan.english_support[2].contains("AI Video, Hindi Content"));
    }

    #[test]
    fn no_placeholders_survive_generation() {
        for tone in Tone::ALL {
            for duration in DurationBucket::ALL {
                let plan = generate(&brief(tone, duration, "", &["AI"]));
                let json = serde_json::to_string(&plan).unwrap();
                for name in Slots::NAMES {
                    let placeholder = format!("{{{name}}}");
                    assert!(
                        !json.contains(&placeholder),
                        "{placeholder} left in {tone}/{duration} plan"
                    );
                }
            }
        }
    }
}
