//! Payload isolation for raw completion text.
//!
//! Models wrap their JSON in markdown fences, prepend chatty prose, or get
//! cut off before the closing fence. [`sanitize`] strips all of that and
//! returns the `{ ... }` slice most likely to be the intended document.

use super::error::PlanError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";
const LANGUAGE_LABEL: &str = "json";

/// Isolate the candidate payload inside `raw`.
///
/// Returns a slice running from the first `{` to the last `}` (inclusive)
/// after fence and label stripping, or [`PlanError::NoPayloadFound`].
pub fn sanitize(raw: &str) -> Result<&str, PlanError> {
    let content = strip_label(strip_fences(raw.trim()).trim());

    let start = content.find('{').ok_or(PlanError::NoPayloadFound)?;
    let end = content
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or(PlanError::NoPayloadFound)?;

    Ok(&content[start..=end])
}

/// Drop everything outside the outermost fence pair.
///
/// A `json`-tagged fence wins over a bare one. A missing closing fence
/// (truncated output) keeps everything after the opening marker.
fn strip_fences(text: &str) -> &str {
    let opening = text
        .find(JSON_FENCE)
        .map(|pos| pos + JSON_FENCE.len())
        .or_else(|| text.find(FENCE).map(|pos| pos + FENCE.len()));

    match opening {
        Some(body_start) => {
            let body = &text[body_start..];
            match body.rfind(FENCE) {
                Some(end) => &body[..end],
                None => body,
            }
        }
        None => text,
    }
}

/// Trim a stray leading or trailing `json` label left by imperfect fencing.
fn strip_label(mut text: &str) -> &str {
    if text
        .get(..LANGUAGE_LABEL.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(LANGUAGE_LABEL))
    {
        text = text[LANGUAGE_LABEL.len()..].trim_start();
    }
    if let Some(split) = text.len().checked_sub(LANGUAGE_LABEL.len()) {
        if text
            .get(split..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(LANGUAGE_LABEL))
        {
            text = text[..split].trim_end();
        }
    }
    text
}
