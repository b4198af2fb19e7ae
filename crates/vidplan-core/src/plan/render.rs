//! Plain-text rendering of a content plan, with Hindi section headings.

use std::fmt;

use super::ContentPlan;

/// Render a plan as readable plain text.
pub fn render_text(plan: &ContentPlan) -> String {
    plan.to_string()
}

impl fmt::Display for ContentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.hook)?;

        section(f, "हिन्दी वीडियो स्क्रिप्ट")?;
        for segment in &self.hindi_script {
            writeln!(f, "[{}]\n{}\n", segment.heading, segment.body)?;
        }

        section(f, "शॉट एवं वॉइस-ओवर प्लान")?;
        for shot in &self.shot_plan {
            writeln!(f, "{} (लगभग {} सेकंड)", shot.shot, shot.length)?;
            writeln!(f, "  {}", shot.detail)?;
            writeln!(f, "  VO: {}\n", shot.voice_over)?;
        }

        section(f, "ऑन-स्क्रीन टेक्स्ट एवं कैप्शन")?;
        writeln!(f, "ऑन-स्क्रीन टेक्स्ट:")?;
        for line in &self.on_screen_text {
            writeln!(f, "  - {line}")?;
        }
        writeln!(f, "\nकैप्शन:")?;
        writeln!(f, "  {}", self.captions)?;
        writeln!(f, "  {}", self.hashtags.join(" "))?;
        writeln!(f, "\nCall-to-action:")?;
        writeln!(f, "  {}", self.call_to_action_hindi)?;
        writeln!(f, "  {}", self.call_to_action_english)?;

        section(f, "प्रोडक्शन चेकलिस्ट")?;
        for item in &self.production_schedule {
            writeln!(f, "- {}: {}", item.label, item.tip)?;
        }

        section(f, "Facebook अपलोड स्टेप्स")?;
        for (i, step) in self.facebook_upload_steps.iter().enumerate() {
            writeln!(f, "{}. {step}", i + 1)?;
        }

        section(f, "अंग्रेज़ी सपोर्ट नोट्स")?;
        for note in &self.english_support {
            writeln!(f, "- {note}")?;
        }
        Ok(())
    }
}

fn section(f: &mut fmt::Formatter<'_>, heading: &str) -> fmt::Result {
    write!(f, "\n== {heading} ==\n\n")
}
