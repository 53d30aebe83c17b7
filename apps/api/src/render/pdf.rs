use lopdf::Document;

use crate::render::RenderError;

/// Number of pages in the PDF's page tree.
pub fn count_pdf_pages(pdf: &[u8]) -> Result<usize, RenderError> {
    let document = Document::load_mem(pdf)?;
    Ok(document.get_pages().len())
}
