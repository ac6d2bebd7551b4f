use crate::encode::jpeg::OUTPUT_EXTENSION;

/// Default output naming pattern.
pub const DEFAULT_PATTERN: &str = "{stem}_final";

const IDX_TOKEN: &str = "{idx}";
const STEM_TOKEN: &str = "{stem}";

/// Expand `pattern` for one batch item and append the output extension.
///
/// Every `{idx}` becomes the 1-based `index`, every `{stem}` becomes `stem`. Any other text,
/// unknown `{tokens}` included, is copied verbatim. Substituted values are never re-scanned, so a
/// stem that itself contains `{idx}` stays literal.
pub fn resolve(pattern: &str, index: usize, stem: &str) -> String {
    let idx = index.to_string();
    let mut out = String::with_capacity(pattern.len() + stem.len() + OUTPUT_EXTENSION.len() + 1);
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix(IDX_TOKEN) {
            out.push_str(&idx);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(STEM_TOKEN) {
            out.push_str(stem);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out.push('.');
    out.push_str(OUTPUT_EXTENSION);
    out
}
