#![no_main]

use hayro_cff::cff::{Table, cff2};
use hayro_cff::{GlyphId, OutlineBuilder};
use libfuzzer_sys::fuzz_target;

/// An outline builder that simply discards all segments.
struct Sink;

impl OutlineBuilder for Sink {
    fn move_to(&mut self, _x: f32, _y: f32) {}
    fn line_to(&mut self, _x: f32, _y: f32) {}
    fn curve_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x: f32, _y: f32) {}
    fn close(&mut self) {}
}

// The first byte selects between CFF and CFF2, the rest is the table.
fuzz_target!(|data: &[u8]| {
    let Some((&kind, data)) = data.split_first() else {
        return;
    };

    let mut sink = Sink;

    if kind % 2 == 0 {
        let Ok(table) = Table::parse_with_upem(data, 2048) else {
            return;
        };

        for id in 0..table.number_of_glyphs() {
            let glyph_id = GlyphId(id);
            let _ = table.outline(glyph_id, &mut sink);
            let _ = table.glyph_width(glyph_id);
            let _ = table.glyph_name(glyph_id);
            let _ = table.glyph_cid(glyph_id);
        }

        for code in 0..=u8::MAX {
            let _ = table.glyph_index(code);
        }
    } else {
        let Ok(table) = cff2::Table::parse(data) else {
            return;
        };

        for id in 0..table.number_of_glyphs() {
            let _ = table.outline(GlyphId(id), &mut sink);
        }
    }
});
