//! Block segmentation.
//!
//! A sheet is folded row by row into brand-scoped blocks. Separator rows
//! close the open block; on the catch-all sheet, brand-header rows close it
//! and switch the brand for the blocks that follow.

use faixa_catalog::{Block, HeaderRules, RawRow, RowKind, classify};

use crate::sheet::Sheet;

/// Brand implied by a sheet name.
pub fn sheet_brand(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Fold state: the brand in effect and the rows of the open block.
struct Segmenter {
    brand: String,
    open: Vec<RawRow>,
    blocks: Vec<Block>,
    brand_headers: usize,
}

impl Segmenter {
    fn new(brand: String) -> Self {
        Self {
            brand,
            open: Vec::new(),
            blocks: Vec::new(),
            brand_headers: 0,
        }
    }

    fn close(&mut self) {
        if !self.open.is_empty() {
            self.blocks.push(Block {
                brand: self.brand.clone(),
                rows: std::mem::take(&mut self.open),
            });
        }
    }

    fn push(&mut self, row: &RawRow, kind: RowKind) {
        match kind {
            RowKind::Data => self.open.push(row.clone()),
            RowKind::Separator => self.close(),
            RowKind::BrandHeader => {
                self.close();
                self.brand = row.model.trim().to_uppercase();
                self.brand_headers += 1;
            }
        }
    }

    fn finish(mut self) -> (Vec<Block>, usize) {
        self.close();
        (self.blocks, self.brand_headers)
    }
}

/// Split a sheet into blocks.
///
/// Returns the blocks in sheet order and the number of brand-header rows
/// seen. Every data row lands in exactly one block.
pub fn segment_sheet(sheet: &Sheet, catch_all: bool, rules: &HeaderRules) -> (Vec<Block>, usize) {
    let mut segmenter = Segmenter::new(sheet_brand(&sheet.name));
    for row in &sheet.rows {
        segmenter.push(row, classify(row, catch_all, rules));
    }
    segmenter.finish()
}
