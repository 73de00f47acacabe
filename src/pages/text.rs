//! Lyrics text normalization
//!
//! Lyrics bodies arrive as markup with inline annotation anchors and
//! bracketed section markers ("[Chorus]", "[Verse 1]"). Markup is removed
//! by walking the element's text nodes rather than pattern substitution;
//! brackets and whitespace are normalized here.

use scraper::ElementRef;

/// Converts a lyrics element into clean text.
///
/// Collects the element's text nodes, strips bracketed annotations,
/// collapses all whitespace runs to single spaces, and trims.
pub fn element_to_lyrics(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    normalize_lyrics(&raw)
}

/// Normalizes raw lyrics text: strips `[...]` annotations, collapses
/// whitespace, trims.
///
/// # Example
///
/// ```
/// use verse_miner::pages::normalize_lyrics;
///
/// assert_eq!(normalize_lyrics("Hello [Chorus] World"), "Hello World");
/// ```
pub fn normalize_lyrics(raw: &str) -> String {
    let stripped = strip_bracketed(raw);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes every `[...]` segment, including the brackets.
///
/// An unterminated opening bracket swallows the rest of the text, which is
/// how the reference data behaves (section markers are always on their own
/// line, so a dangling bracket is already garbage).
fn strip_bracketed(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}
