//! PDF rendering for FAT procedure documents.
//!
//! Fixed template, rendered fully in memory: a title block (device model,
//! project, standard reference, generation timestamp), one block per test step
//! with safety-critical rows visually distinguished, and a per-page footer.
//! No filesystem access and no state; every call builds a fresh document.
//!
//! The renderer sits behind [`ProcedureRenderer`] so the HTTP layer can inject
//! a failing fake in tests.

mod composer;
mod layout;

use chrono::{DateTime, Utc};
use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use fatgen_core::{FatProcedure, TestStep};

use composer::{PageComposer, FONT_BOLD, FONT_REGULAR};
use layout::{
    chars_per_line, wrap_text, BODY_SIZE, HEADING_SIZE, LINE_HEIGHT, MARGIN, PAGE_HEIGHT,
    PAGE_WIDTH, STEP_TEXT_INDENT, TITLE_SIZE,
};

/// Rendering failures. Surfaced to API callers behind a fixed message; the
/// variant detail is for logs only.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("pdf encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("pdf write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("template error: {0}")]
    Template(String),
}

/// Trait seam for the API layer: swap in a fake to exercise the failure path.
pub trait ProcedureRenderer: Send + Sync {
    fn render(
        &self,
        procedure: &FatProcedure,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, RenderError>;
}

/// The production lopdf-backed renderer.
#[derive(Debug, Default)]
pub struct PdfRenderer;

impl ProcedureRenderer for PdfRenderer {
    fn render(
        &self,
        procedure: &FatProcedure,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, RenderError> {
        render_fat_pdf(procedure, generated_at)
    }
}

/// Download filename for a rendered procedure. Anything outside
/// `[A-Za-z0-9._-]` is replaced so the value is safe inside a
/// Content-Disposition header.
pub fn pdf_filename(device_model: &str) -> String {
    let sanitized: String = device_model
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("FAT_{sanitized}.pdf")
}

/// Renders a procedure into PDF bytes. Stateless; the only input besides the
/// document itself is the generation timestamp stamped into the title block.
pub fn render_fat_pdf(
    procedure: &FatProcedure,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, RenderError> {
    let mut composer = PageComposer::new();
    compose_title_block(&mut composer, procedure, generated_at);
    for step in &procedure.steps {
        compose_step(&mut composer, step);
    }
    if procedure.steps.is_empty() {
        composer.text_line(FONT_REGULAR, BODY_SIZE, MARGIN, "No test steps extracted.");
    }

    let pages = composer.finish(&pdf_filename(&procedure.device_model));
    let bytes = assemble_document(pages)?;
    debug!(
        device_model = %procedure.device_model,
        steps = procedure.steps.len(),
        bytes = bytes.len(),
        "rendered procedure PDF"
    );
    Ok(bytes)
}

fn compose_title_block(
    composer: &mut PageComposer,
    procedure: &FatProcedure,
    generated_at: DateTime<Utc>,
) {
    composer.text_line(
        FONT_BOLD,
        TITLE_SIZE,
        MARGIN,
        "Factory Acceptance Test Procedure",
    );
    composer.advance(6.0);

    let standard = procedure.standard_reference.as_deref().unwrap_or("-");
    for (label, value) in [
        ("Device model:", procedure.device_model.as_str()),
        ("Project:", procedure.project_name.as_str()),
        ("Standard reference:", standard),
    ] {
        composer.text_at(FONT_BOLD, HEADING_SIZE, MARGIN, composer.cursor_y(), label);
        composer.text_line(FONT_REGULAR, HEADING_SIZE, MARGIN + 110.0, value);
    }
    composer.text_line(
        FONT_REGULAR,
        BODY_SIZE,
        MARGIN,
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
    );
    composer.advance(4.0);
    composer.rule(composer.cursor_y() + 8.0);
    composer.advance(8.0);
}

fn compose_step(composer: &mut PageComposer, step: &TestStep) {
    let text_width = PAGE_WIDTH - MARGIN - STEP_TEXT_INDENT - MARGIN;
    let budget = chars_per_line(text_width, BODY_SIZE);

    let mut rows: Vec<(&str, String)> = Vec::new();
    if step.safety_critical {
        rows.push((FONT_BOLD, "[SAFETY CRITICAL]".to_string()));
    }
    for line in wrap_text(&step.instruction, budget) {
        rows.push((FONT_REGULAR, line));
    }
    for line in wrap_text(&format!("Expected: {}", step.expected_result), budget) {
        rows.push((FONT_REGULAR, line));
    }
    if rows.is_empty() {
        // Degenerate input; still reserve a baseline for the step id.
        rows.push((FONT_REGULAR, String::new()));
    }

    // Short blocks stay together on one page. Taller ones flow: room is
    // re-checked for every row below, so a block spans pages rather than
    // writing into the footer zone.
    let block_height = rows.len() as f32 * LINE_HEIGHT + 8.0;
    composer.ensure_room(block_height.min(PAGE_HEIGHT / 2.0));

    let mut id_pending = true;
    for (font, text) in &rows {
        composer.ensure_room(LINE_HEIGHT);
        if step.safety_critical {
            // Tint the row band; adjacent bands tile into one solid bar, and
            // a block that breaks across pages keeps its tint on both.
            composer.fill_rect(
                MARGIN - 4.0,
                composer.cursor_y() - 4.0,
                PAGE_WIDTH - 2.0 * MARGIN + 8.0,
                LINE_HEIGHT,
                (1.0, 0.88, 0.88),
            );
        }
        if id_pending {
            composer.text_at(
                FONT_BOLD,
                BODY_SIZE,
                MARGIN,
                composer.cursor_y(),
                &step.step_id,
            );
            id_pending = false;
        }
        composer.text_line(font, BODY_SIZE, MARGIN + STEP_TEXT_INDENT, text);
    }
    composer.advance(8.0);
}

/// Assembles composed page operations into a complete single-catalog PDF.
fn assemble_document(
    pages: Vec<Vec<lopdf::content::Operation>>,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    // WinAnsiEncoding so the Latin-1 bytes the composer emits map to the
    // expected glyphs.
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
