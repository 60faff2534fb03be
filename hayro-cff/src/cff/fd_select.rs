use super::parser::{LazyArray16, Stream};
use crate::GlyphId;

/// Maps glyphs onto Font DICTs of a CID-keyed or CFF2 font.
#[derive(Clone, Copy, Debug)]
pub(crate) enum FDSelect<'a> {
    Format0(LazyArray16<'a, u8>),
    // Ranges are sorted by glyph ID and scanned in place.
    Format3(&'a [u8]),
    Format4(&'a [u8]),
}

impl Default for FDSelect<'_> {
    fn default() -> Self {
        FDSelect::Format0(LazyArray16::default())
    }
}

impl FDSelect<'_> {
    pub(crate) fn font_dict_index(&self, glyph_id: GlyphId) -> Option<u16> {
        match self {
            FDSelect::Format0(array) => array.get(glyph_id.0).map(u16::from),
            FDSelect::Format3(data) => {
                let mut s = Stream::new(data);
                let number_of_ranges = s.read::<u16>()?;
                if number_of_ranges == 0 {
                    return None;
                }

                // A sentinel glyph ID closes the last range.
                let mut first = s.read::<GlyphId>()?;
                let mut index = s.read::<u8>()?;
                for _ in 0..number_of_ranges {
                    let next = s.read::<GlyphId>()?;
                    if (first..next).contains(&glyph_id) {
                        return Some(u16::from(index));
                    }

                    index = s.read::<u8>()?;
                    first = next;
                }

                None
            }
            FDSelect::Format4(data) => {
                let mut s = Stream::new(data);
                let number_of_ranges = s.read::<u32>()?;
                if number_of_ranges == 0 {
                    return None;
                }

                let glyph_id = u32::from(glyph_id.0);
                let mut first = s.read::<u32>()?;
                let mut index = s.read::<u16>()?;
                for _ in 0..number_of_ranges {
                    let next = s.read::<u32>()?;
                    if (first..next).contains(&glyph_id) {
                        return Some(index);
                    }

                    index = s.read::<u16>()?;
                    first = next;
                }

                None
            }
        }
    }
}

pub(crate) fn parse_fd_select<'a>(number_of_glyphs: u16, s: &mut Stream<'a>) -> Option<FDSelect<'a>> {
    let format = s.read::<u8>()?;
    match format {
        0 => Some(FDSelect::Format0(s.read_array16::<u8>(number_of_glyphs)?)),
        3 => Some(FDSelect::Format3(s.tail()?)),
        4 => Some(FDSelect::Format4(s.tail()?)),
        _ => None,
    }
}
