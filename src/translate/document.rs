use crate::error::Result;
use crate::subtitle::LineKind;
use super::{LanguagePair, TranslationBackend};

/// Translate the text lines of an SRT body.
///
/// Index, timing and blank lines are copied byte-for-byte and never reach
/// the backend. Text lines are trimmed before translation and keep their
/// original line terminator.
pub async fn translate_document(
    lines: &[&str],
    backend: &dyn TranslationBackend,
    pair: &LanguagePair,
) -> Result<String> {
    let mut translated = String::new();

    for line in lines {
        if !LineKind::classify(line).is_text() {
            translated.push_str(line);
            continue;
        }

        let text = backend.translate(pair, line.trim()).await?;
        translated.push_str(&text);
        translated.push_str(line_terminator(line));
    }

    Ok(translated)
}

fn line_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
