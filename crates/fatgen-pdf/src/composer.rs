//! Low-level page composition: turns text and rectangles into lopdf content
//! operations, breaking pages as the cursor runs out of room.

use lopdf::content::Operation;
use lopdf::Object;

use crate::layout::{
    encode_latin1, FOOTER_SIZE, FOOTER_ZONE, LINE_HEIGHT, MARGIN, PAGE_HEIGHT, PAGE_WIDTH,
};

/// Font resource names as registered in the page resources dictionary.
pub(crate) const FONT_REGULAR: &str = "F1";
pub(crate) const FONT_BOLD: &str = "F2";

/// Accumulates content operations for one page at a time. `cursor_y` is the
/// baseline of the next line to be written.
pub(crate) struct PageComposer {
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    cursor_y: f32,
}

impl PageComposer {
    pub(crate) fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Vec::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    pub(crate) fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Starts a new page unless `needed` points still fit above the footer.
    pub(crate) fn ensure_room(&mut self, needed: f32) {
        if self.cursor_y - needed < FOOTER_ZONE {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.cursor_y = PAGE_HEIGHT - MARGIN;
    }

    /// Moves the cursor down without emitting anything.
    pub(crate) fn advance(&mut self, dy: f32) {
        self.cursor_y -= dy;
    }

    /// Writes one line of text at the cursor and advances by LINE_HEIGHT.
    pub(crate) fn text_line(&mut self, font: &str, size: f32, x: f32, text: &str) {
        self.text_at(font, size, x, self.cursor_y, text);
        self.cursor_y -= LINE_HEIGHT;
    }

    /// Writes text at an absolute position. Does not move the cursor.
    pub(crate) fn text_at(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new("Tj", vec![Object::string_literal(encode_latin1(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Fills a rectangle with an RGB color, graphics state restored afterwards.
    pub(crate) fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rgb: (f32, f32, f32)) {
        self.current.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "rg",
                vec![Object::Real(rgb.0), Object::Real(rgb.1), Object::Real(rgb.2)],
            ),
            Operation::new(
                "re",
                vec![
                    Object::Real(x),
                    Object::Real(y),
                    Object::Real(w),
                    Object::Real(h),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// A thin horizontal rule across the content width.
    pub(crate) fn rule(&mut self, y: f32) {
        self.fill_rect(MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, 0.6, (0.6, 0.6, 0.6));
    }

    /// Closes the last page and stamps every page with a footer line.
    pub(crate) fn finish(mut self, footer_label: &str) -> Vec<Vec<Operation>> {
        self.finished.push(std::mem::take(&mut self.current));
        let total = self.finished.len();
        for (idx, page) in self.finished.iter_mut().enumerate() {
            let text = format!("{footer_label}  -  Page {} of {total}", idx + 1);
            page.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![FONT_REGULAR.into(), FOOTER_SIZE.into()]),
                Operation::new("Td", vec![Object::Real(MARGIN), Object::Real(30.0)]),
                Operation::new("Tj", vec![Object::string_literal(encode_latin1(&text))]),
                Operation::new("ET", vec![]),
            ]);
        }
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_page_when_room_runs_out() {
        let mut composer = PageComposer::new();
        // Burn through well over one page of lines.
        for i in 0..120 {
            composer.ensure_room(LINE_HEIGHT);
            composer.text_line(FONT_REGULAR, 10.0, MARGIN, &format!("line {i}"));
        }
        let pages = composer.finish("footer");
        assert!(pages.len() > 1, "expected pagination, got {} page(s)", pages.len());
    }

    #[test]
    fn footer_lands_on_every_page() {
        let composer = PageComposer::new();
        let pages = composer.finish("FAT_X-1");
        assert_eq!(pages.len(), 1);
        let has_footer = pages[0].iter().any(|op| {
            op.operator == "Tj"
                && matches!(&op.operands[0], Object::String(bytes, _)
                    if String::from_utf8_lossy(bytes).contains("Page 1 of 1"))
        });
        assert!(has_footer);
    }
}
