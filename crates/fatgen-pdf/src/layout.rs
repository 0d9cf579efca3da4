//! Page geometry and text measurement for the fixed FAT template.
//!
//! Measurement is approximate on purpose: Helvetica averages about half an em
//! per glyph, which is plenty for wrapping a test procedure. Nothing here
//! depends on exact glyph metrics.

/// A4 in points.
pub(crate) const PAGE_WIDTH: f32 = 595.0;
pub(crate) const PAGE_HEIGHT: f32 = 842.0;

pub(crate) const MARGIN: f32 = 50.0;
/// Bottom boundary for body content; the footer lives below this.
pub(crate) const FOOTER_ZONE: f32 = 60.0;

pub(crate) const TITLE_SIZE: f32 = 18.0;
pub(crate) const HEADING_SIZE: f32 = 11.0;
pub(crate) const BODY_SIZE: f32 = 10.0;
pub(crate) const FOOTER_SIZE: f32 = 8.0;

pub(crate) const LINE_HEIGHT: f32 = 14.0;

/// Indent of step text relative to the left margin; the step id sits in the
/// gutter to the left of it.
pub(crate) const STEP_TEXT_INDENT: f32 = 40.0;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// How many characters fit in `width` points at `size`.
pub(crate) fn chars_per_line(width: f32, size: f32) -> usize {
    (width / (size * AVG_GLYPH_EM)).max(1.0) as usize
}

/// Greedy word wrap. Words longer than the budget are hard-split so a single
/// unbroken token cannot push past the page edge.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            // Hard split: flush the current line, then emit full-width chunks.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encodes text for a WinAnsi-declared standard font: Latin-1 code points map
/// to their single byte, anything outside Latin-1 is replaced. Emitting UTF-8
/// multibyte sequences here would render as mojibake.
pub(crate) fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if cp < 256 {
                cp as u8
            } else {
                b'?'
            }
        })
        .collect()
}
