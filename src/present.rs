//! User-facing message rendering. All conversation copy lives here so the
//! transport layer only ever forwards strings.

use crate::languages;
use crate::ranking::RankedResult;
use crate::scoring::quality_marker;

pub const WELCOME: &str =
    "👋 Welcome to Lexibot!\nI can help you translate words.\n\nTap the button below to begin.";
pub const PROMPT_SOURCE: &str = "Please select source language:";
pub const PROMPT_TARGET: &str = "Now select target language:";
pub const PROMPT_WORD: &str = "✏️ Please enter a word to translate:";
pub const PROMPT_ANOTHER_WORD: &str = "✏️ Please enter another word.";
pub const TRANSLATION_FAILED: &str = "⚠️ Something went wrong while translating.";
pub const WHAT_NEXT: &str = "❓ What would you like to do?";
pub const UNKNOWN_LANGUAGE: &str = "❗ That language isn't on the list, please pick one of the options.";
pub const SAME_LANGUAGE: &str = "❗ Target must differ from the source language, please pick another.";

/// Render a ranked candidate list for display.
/// One line per candidate: `<marker> <text> (<percent>%)`.
pub fn render_result(result: &RankedResult, source_code: &str, target_code: &str) -> String {
    let header = format!(
        "📘 Translation ({} → {}):",
        languages::display_name(source_code),
        languages::display_name(target_code)
    );
    let lines: Vec<String> = result
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "{} {} ({}%)",
                quality_marker(entry.score),
                entry.candidate.translation,
                (entry.score * 100.0).round() as i64
            )
        })
        .collect();
    format!("{header}\n\n{}", lines.join("\n"))
}
