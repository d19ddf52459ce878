//! Template extraction: style blocks in, extraction records out.

use crate::document::find_style_blocks;
use crate::error::ParseError;
use crate::indent::normalize;
use crate::models::ExtractionRecord;
use crate::offset::line_offset;

/// Extract every supported style block from a component document.
///
/// The line offset is computed from the raw block text before indent
/// normalization, since stripping changes the text being searched for.
pub fn extract_templates(
    source: &str,
    base_indent: Option<usize>,
) -> Result<Vec<ExtractionRecord>, ParseError> {
    let blocks = find_style_blocks(source)?;
    let records = blocks
        .into_iter()
        .map(|block| ExtractionRecord {
            line_offset: line_offset(block.content, source),
            content: normalize(block.content, base_indent).into_owned(),
            dialect: block.dialect,
        })
        .collect::<Vec<_>>();
    tracing::debug!(count = records.len(), "extracted style blocks");
    Ok(records)
}
