//! # Prompt Templates
//!
//! Fixed instructions sent to the OCR and analysis providers. The frontmatter
//! layout requested here is what [`crate::frontmatter`] parses.

/// Instruction sent alongside the journal page image.
pub const TRANSCRIPTION_PROMPT: &str = r#"You are a journal transcription assistant. Analyze this handwritten journal page and:

1. **Transcribe** the handwritten text as accurately as possible
2. **Detect the date** if visible (from the writing or page context)
3. **Extract key themes** (2-5 themes mentioned)
4. **Note any mood indicators** (explicit or implicit)
5. **Identify any people, places, or specific items mentioned**

Output format (markdown):

---
date: [YYYY-MM-DD or "unknown"]
mood: [detected mood, or "neutral"]
themes: [comma-separated list]
people: [comma-separated list, or "none"]
places: [comma-separated list, or "none"]
confidence: [high/medium/low - your confidence in the transcription]
---

## Transcription

[The transcribed text, preserving paragraph breaks. Use [unclear] for illegible words.]

## Notes

[Any observations: corrections made, context inferred, patterns noticed]
"#;

/// System prompt for the analysis provider.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a thoughtful journaling companion. You read a person's journal entry and reflect it back with warmth and insight. You never invent events that are not in the entry. Answer in markdown only.";

/// User prompt for the analysis provider.
///
/// Placeholders: `{transcription}`
pub const ANALYSIS_USER_PROMPT: &str = r#"Here is a transcribed journal entry:

<entry>
{transcription}
</entry>

Write an analysis using exactly these markdown sections:

## Mood
[The overall emotional tone, with the phrases that signal it]

## Themes
[2-5 recurring themes as a bulleted list]

## People & Places
[Who and where is mentioned, and in what light; "None mentioned" if empty]

## Patterns
[Habits, tensions, or shifts worth noticing]

## Reflection Prompts
[3 open questions the writer could journal about next]
"#;

/// Fills the analysis template with the transcription text.
pub fn analysis_user_prompt(transcription: &str) -> String {
    ANALYSIS_USER_PROMPT.replace("{transcription}", transcription.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_embeds_text_and_sections() {
        let prompt = analysis_user_prompt("  Walked to the lake with Sam.\n");
        assert!(prompt.contains("<entry>\nWalked to the lake with Sam.\n</entry>"));
        for section in [
            "## Mood",
            "## Themes",
            "## People & Places",
            "## Patterns",
            "## Reflection Prompts",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
        assert!(!prompt.contains("{transcription}"));
    }

    #[test]
    fn transcription_prompt_requests_parsable_layout() {
        assert!(TRANSCRIPTION_PROMPT.contains("\n---\ndate:"));
        assert!(TRANSCRIPTION_PROMPT.contains("confidence:"));
        assert!(TRANSCRIPTION_PROMPT.contains("## Transcription"));
    }
}
