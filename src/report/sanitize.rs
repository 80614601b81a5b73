//! Code-fence stripping for model output

/// Opening fence with the language tag the prompt asks for
const HTML_FENCE: &str = "```html";

/// Bare fence
const FENCE: &str = "```";

/// Remove every code-fence delimiter the model wrapped its HTML in
///
/// Tagged openers go first so their tag does not survive as text.
pub fn strip_code_fences(text: &str) -> String {
    text.replace(HTML_FENCE, "").replace(FENCE, "")
}
