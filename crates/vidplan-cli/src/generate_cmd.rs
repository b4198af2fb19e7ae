//! CLI handlers for `vidplan generate` and `vidplan brief`.
//!
//! A brief is assembled in layers, each overriding the one before it:
//! config defaults, then the `--brief` file, then individual flags.

use anyhow::{Context, Result};

use vidplan_core::brief::{BriefInput, BriefToml, parse_brief_toml_raw, parse_keywords};
use vidplan_core::plan::{ContentPlan, generate, render_text};

use crate::config::VidplanConfig;
use crate::{BriefFlags, OutputFormat};

// -----------------------------------------------------------------------
// Public entry points
// -----------------------------------------------------------------------

/// Resolve the brief, generate a plan, and print it in the configured format.
pub fn run_generate(
    config: &VidplanConfig,
    brief_path: Option<&str>,
    flags: &BriefFlags,
) -> Result<()> {
    let file_content = match brief_path {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read brief file: {path}"))?,
        ),
        None => None,
    };

    let input = build_input(config, file_content.as_deref(), flags)
        .with_context(|| format!("failed to parse brief file: {}", brief_path.unwrap_or("-")))?;
    let brief = match input.validate() {
        Ok(brief) => brief,
        Err(e) => {
            tracing::debug!(field = e.field(), "brief rejected");
            return Err(e.into());
        }
    };

    tracing::info!(
        tone = %brief.tone(),
        duration = brief.duration().seconds(),
        "generating content plan"
    );
    let plan = generate(&brief);

    print!("{}", format_plan(&plan, config.format)?);
    Ok(())
}

/// Print the sample brief as TOML.
pub fn run_print_brief() -> Result<()> {
    print!("{}", sample_brief_toml()?);
    Ok(())
}

// -----------------------------------------------------------------------
// Brief resolution
// -----------------------------------------------------------------------

/// Layer config defaults, an optional brief file, and flags into one input.
fn build_input(
    config: &VidplanConfig,
    file_content: Option<&str>,
    flags: &BriefFlags,
) -> Result<BriefInput> {
    let mut input = config.base_input();

    if let Some(content) = file_content {
        let raw = parse_brief_toml_raw(content)?;
        input = raw.overlay(input);
        tracing::debug!("applied brief file");
    }

    if let Some(topic) = &flags.topic {
        input.topic = topic.clone();
    }
    if let Some(persona) = &flags.persona {
        input.target_persona = persona.clone();
    }
    if let Some(tone) = &flags.tone {
        input.tone = tone.clone();
    }
    if let Some(duration) = &flags.duration {
        input.duration = duration.clone();
    }
    if let Some(cta) = &flags.cta {
        input.call_to_action = cta.clone();
    }
    if let Some(keywords) = &flags.keywords {
        input.keywords = parse_keywords(keywords);
    }

    Ok(input)
}

// -----------------------------------------------------------------------
// Output
// -----------------------------------------------------------------------

fn format_plan(plan: &ContentPlan, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Text => render_text(plan),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(plan).context("failed to serialize plan as JSON")?;
            json.push('\n');
            json
        }
        OutputFormat::Toml => {
            toml::to_string_pretty(plan).context("failed to serialize plan as TOML")?
        }
    };
    Ok(out)
}

fn sample_brief_toml() -> Result<String> {
    toml::to_string_pretty(&BriefToml::from_input(&BriefInput::default()))
        .context("failed to serialize sample brief")
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use vidplan_core::brief::{BriefError, parse_brief_toml};

    fn plain_config() -> VidplanConfig {
        VidplanConfig {
            tone: "informative".to_owned(),
            duration: "60".to_owned(),
            target_persona: Some("छात्र".to_owned()),
            call_to_action: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn flags_alone_build_a_valid_brief() {
        let flags = BriefFlags {
            topic: Some("घर पर योग".to_owned()),
            keywords: Some("Yoga, Health ,".to_owned()),
            ..BriefFlags::default()
        };
        let input = build_input(&plain_config(), None, &flags).unwrap();
        assert_eq!(input.target_persona, "छात्र");
        assert_eq!(input.keywords, ["Yoga", "Health"]);
        let brief = input.validate().unwrap();
        assert_eq!(brief.duration().seconds(), 60);
    }

    #[test]
    fn brief_file_overrides_config_defaults() {
        let file = r#"
topic = "बजट ट्रैवल टिप्स"
tone = "entertaining"
duration = 30
"#;
        let input = build_input(&plain_config(), Some(file), &BriefFlags::default()).unwrap();
        assert_eq!(input.topic, "बजट ट्रैवल टिप्स");
        assert_eq!(input.tone, "entertaining");
        assert_eq!(input.duration, "30");
        assert_eq!(input.target_persona, "छात्र");
    }

    #[test]
    fn flags_override_brief_file() {
        let file = r#"
topic = "बजट ट्रैवल टिप्स"
tone = "entertaining"
"#;
        let flags = BriefFlags {
            tone: Some("sales".to_owned()),
            duration: Some("120".to_owned()),
            ..BriefFlags::default()
        };
        let input = build_input(&plain_config(), Some(file), &flags).unwrap();
        assert_eq!(input.tone, "sales");
        assert_eq!(input.duration, "120");
        assert_eq!(input.topic, "बजट ट्रैवल टिप्स");
    }

    #[test]
    fn bad_brief_file_is_an_error() {
        let result = build_input(
            &plain_config(),
            Some("colour = \"red\""),
            &BriefFlags::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_topic_fails_validation_with_field_message() {
        let input = build_input(&plain_config(), None, &BriefFlags::default()).unwrap();
        let err = input.validate().unwrap_err();
        assert!(matches!(err, BriefError::InvalidBrief { field: "topic", .. }));
        assert_eq!(anyhow::Error::from(err).to_string(), "topic is required");
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" toml ".parse::<OutputFormat>().unwrap(), OutputFormat::Toml);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_output_uses_camel_case_keys() {
        let plan = generate(&BriefInput::default().validate().unwrap());
        let out = format_plan(&plan, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("hindiScript").is_some());
        assert!(value.get("facebookUploadSteps").is_some());
    }

    #[test]
    fn toml_output_roundtrips() {
        let plan = generate(&BriefInput::default().validate().unwrap());
        let out = format_plan(&plan, OutputFormat::Toml).unwrap();
        let back: ContentPlan = toml::from_str(&out).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn text_output_starts_with_title() {
        let plan = generate(&BriefInput::default().validate().unwrap());
        let out = format_plan(&plan, OutputFormat::Text).unwrap();
        assert!(out.starts_with(&plan.title));
    }

    #[test]
    fn sample_brief_parses_back_to_default() {
        let toml = sample_brief_toml().unwrap();
        let brief = parse_brief_toml(&toml).unwrap();
        let expected = BriefInput::default().validate().unwrap();
        assert_eq!(brief, expected);
    }
}
