use super::parser::{FromData, LazyArray16, Stream};
use super::StringId;
use crate::GlyphId;

/// The Expert charset as defined in the Adobe Technical Note #5176 Appendix C.
#[rustfmt::skip]
const EXPERT_CHARSET: &[u16] = &[
      0,   1, 229, 230, 231, 232, 233, 234, 235, 236, 237, 238,
     13,  14,  15,  99, 239, 240, 241, 242, 243, 244, 245, 246,
    247, 248,  27,  28, 249, 250, 251, 252, 253, 254, 255, 256,
    257, 258, 259, 260, 261, 262, 263, 264, 265, 266, 109, 110,
    267, 268, 269, 270, 271, 272, 273, 274, 275, 276, 277, 278,
    279, 280, 281, 282, 283, 284, 285, 286, 287, 288, 289, 290,
    291, 292, 293, 294, 295, 296, 297, 298, 299, 300, 301, 302,
    303, 304, 305, 306, 307, 308, 309, 310, 311, 312, 313, 314,
    315, 316, 317, 318, 158, 155, 163, 319, 320, 321, 322, 323,
    324, 325, 326, 150, 164, 169, 327, 328, 329, 330, 331, 332,
    333, 334, 335, 336, 337, 338, 339, 340, 341, 342, 343, 344,
    345, 346, 347, 348, 349, 350, 351, 352, 353, 354, 355, 356,
    357, 358, 359, 360, 361, 362, 363, 364, 365, 366, 367, 368,
    369, 370, 371, 372, 373, 374, 375, 376, 377, 378,
];

/// The Expert Subset charset as defined in the Adobe Technical Note #5176 Appendix C.
#[rustfmt::skip]
const EXPERT_SUBSET_CHARSET: &[u16] = &[
      0,   1, 231, 232, 235, 236, 237, 238,  13,  14,  15,  99,
    239, 240, 241, 242, 243, 244, 245, 246, 247, 248,  27,  28,
    249, 250, 251, 253, 254, 255, 256, 257, 258, 259, 260, 261,
    262, 263, 264, 265, 266, 109, 110, 267, 268, 269, 270, 272,
    300, 301, 302, 305, 314, 315, 158, 155, 163, 320, 321, 322,
    323, 324, 325, 326, 150, 164, 169, 327, 328, 329, 330, 331,
    332, 333, 334, 335, 336, 337, 338, 339, 340, 341, 342, 343,
    344, 345, 346,
];

/// The last SID covered by the ISOAdobe charset.
const ISO_ADOBE_LAST_SID: u16 = 228;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Format1Range {
    first: StringId,
    left: u8,
}

impl FromData for Format1Range {
    const SIZE: usize = 3;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(Format1Range {
            first: s.read::<StringId>()?,
            left: s.read::<u8>()?,
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Format2Range {
    first: StringId,
    left: u16,
}

impl FromData for Format2Range {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(Format2Range {
            first: s.read::<StringId>()?,
            left: s.read::<u16>()?,
        })
    }
}

/// A run of consecutive SIDs, covering `left + 1` glyphs.
trait CharsetRange {
    fn first(&self) -> u16;
    fn left(&self) -> u16;
}

impl CharsetRange for Format1Range {
    #[inline]
    fn first(&self) -> u16 {
        self.first.0
    }

    #[inline]
    fn left(&self) -> u16 {
        u16::from(self.left)
    }
}

impl CharsetRange for Format2Range {
    #[inline]
    fn first(&self) -> u16 {
        self.first.0
    }

    #[inline]
    fn left(&self) -> u16 {
        self.left
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Charset<'a> {
    ISOAdobe,
    Expert,
    ExpertSubset,
    Format0(LazyArray16<'a, StringId>),
    Format1(LazyArray16<'a, Format1Range>),
    Format2(LazyArray16<'a, Format2Range>),
}

impl Charset<'_> {
    pub(crate) fn sid_to_gid(&self, sid: StringId) -> Option<GlyphId> {
        if sid.0 == 0 {
            return Some(GlyphId(0));
        }

        match self {
            Charset::ISOAdobe => {
                if sid.0 <= ISO_ADOBE_LAST_SID {
                    Some(GlyphId(sid.0))
                } else {
                    None
                }
            }
            Charset::Expert => predefined_sid_to_gid(EXPERT_CHARSET, sid),
            Charset::ExpertSubset => predefined_sid_to_gid(EXPERT_SUBSET_CHARSET, sid),
            Charset::Format0(array) => {
                // First glyph is omitted, so we have to add 1.
                array
                    .into_iter()
                    .position(|n| n == sid)
                    .and_then(|n| u16::try_from(n + 1).ok())
                    .map(GlyphId)
            }
            Charset::Format1(array) => ranges_sid_to_gid(*array, sid),
            Charset::Format2(array) => ranges_sid_to_gid(*array, sid),
        }
    }

    pub(crate) fn gid_to_sid(&self, gid: GlyphId) -> Option<StringId> {
        match self {
            Charset::ISOAdobe => {
                if gid.0 <= ISO_ADOBE_LAST_SID {
                    Some(StringId(gid.0))
                } else {
                    None
                }
            }
            Charset::Expert => EXPERT_CHARSET
                .get(usize::from(gid.0))
                .copied()
                .map(StringId),
            Charset::ExpertSubset => EXPERT_SUBSET_CHARSET
                .get(usize::from(gid.0))
                .copied()
                .map(StringId),
            Charset::Format0(array) => {
                if gid.0 == 0 {
                    Some(StringId(0))
                } else {
                    array.get(gid.0 - 1)
                }
            }
            Charset::Format1(array) => ranges_gid_to_sid(*array, gid),
            Charset::Format2(array) => ranges_gid_to_sid(*array, gid),
        }
    }

    pub(crate) fn is_predefined(&self) -> bool {
        matches!(
            self,
            Charset::ISOAdobe | Charset::Expert | Charset::ExpertSubset
        )
    }
}

fn predefined_sid_to_gid(table: &[u16], sid: StringId) -> Option<GlyphId> {
    table
        .iter()
        .position(|n| *n == sid.0)
        .and_then(|n| u16::try_from(n).ok())
        .map(GlyphId)
}

fn ranges_sid_to_gid<T: FromData + CharsetRange>(
    array: LazyArray16<'_, T>,
    sid: StringId,
) -> Option<GlyphId> {
    let mut glyph_id: u16 = 1;
    for range in array {
        let last = u32::from(range.first()) + u32::from(range.left());
        if range.first() <= sid.0 && u32::from(sid.0) <= last {
            glyph_id = glyph_id.checked_add(sid.0 - range.first())?;
            return Some(GlyphId(glyph_id));
        }

        glyph_id = glyph_id.checked_add(range.left())?.checked_add(1)?;
    }

    None
}

fn ranges_gid_to_sid<T: FromData + CharsetRange>(
    array: LazyArray16<'_, T>,
    gid: GlyphId,
) -> Option<StringId> {
    if gid.0 == 0 {
        return Some(StringId(0));
    }

    let mut sid = gid.0 - 1;
    for range in array {
        if sid <= range.left() {
            sid = sid.checked_add(range.first())?;
            return Some(StringId(sid));
        }

        sid = sid.checked_sub(range.left())?.checked_sub(1)?;
    }

    None
}

pub(crate) fn parse_charset<'a>(number_of_glyphs: u16, s: &mut Stream<'a>) -> Option<Charset<'a>> {
    if number_of_glyphs == 0 {
        return None;
    }

    // -1 everywhere, since `.notdef` is omitted.
    let format = s.read::<u8>()?;
    match format {
        0 => Some(Charset::Format0(
            s.read_array16::<StringId>(number_of_glyphs - 1)?,
        )),
        1 => {
            let count = count_ranges::<Format1Range>(number_of_glyphs - 1, s.clone())?;
            s.read_array16::<Format1Range>(count).map(Charset::Format1)
        }
        2 => {
            let count = count_ranges::<Format2Range>(number_of_glyphs - 1, s.clone())?;
            s.read_array16::<Format2Range>(count).map(Charset::Format2)
        }
        _ => None,
    }
}

// The number of ranges is not stored, so we have to read until no glyphs are left.
fn count_ranges<T: FromData + CharsetRange>(mut total_left: u16, mut s: Stream<'_>) -> Option<u16> {
    let mut count: u16 = 0;
    while total_left > 0 {
        let range = s.read::<T>()?;
        let covered = u32::from(range.left()) + 1;
        total_left = u16::try_from(u32::from(total_left).checked_sub(covered)?).ok()?;
        count = count.checked_add(1)?;
    }

    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{TtfType::*, convert};

    fn check_round_trip(charset: &Charset<'_>, number_of_glyphs: u16) {
        for gid in 0..number_of_glyphs {
            let sid = charset.gid_to_sid(GlyphId(gid)).unwrap();
            assert_eq!(charset.sid_to_gid(sid), Some(GlyphId(gid)));
        }

        assert_eq!(charset.gid_to_sid(GlyphId(0)), Some(StringId(0)));
        assert_eq!(charset.sid_to_gid(StringId(0)), Some(GlyphId(0)));
    }

    #[test]
    fn iso_adobe() {
        let charset = Charset::ISOAdobe;
        check_round_trip(&charset, 229);
        assert_eq!(charset.gid_to_sid(GlyphId(229)), None);
        assert_eq!(charset.sid_to_gid(StringId(229)), None);
    }

    #[test]
    fn expert() {
        check_round_trip(&Charset::Expert, 166);
        assert_eq!(Charset::Expert.gid_to_sid(GlyphId(2)), Some(StringId(229)));
        assert_eq!(Charset::Expert.gid_to_sid(GlyphId(166)), None);
    }

    #[test]
    fn expert_subset() {
        check_round_trip(&Charset::ExpertSubset, 87);
        assert_eq!(
            Charset::ExpertSubset.sid_to_gid(StringId(231)),
            Some(GlyphId(2))
        );
        assert_eq!(Charset::ExpertSubset.sid_to_gid(StringId(229)), None);
    }

    #[test]
    fn format0() {
        let data = convert(&[UInt8(0), UInt16(400), UInt16(34), UInt16(35)]);
        let charset = parse_charset(4, &mut Stream::new(&data)).unwrap();
        check_round_trip(&charset, 4);
        assert_eq!(charset.gid_to_sid(GlyphId(1)), Some(StringId(400)));
        assert_eq!(charset.gid_to_sid(GlyphId(4)), None);
        assert_eq!(charset.sid_to_gid(StringId(36)), None);
    }

    #[test]
    fn format0_truncated() {
        let data = convert(&[UInt8(0), UInt16(400)]);
        assert!(parse_charset(4, &mut Stream::new(&data)).is_none());
    }

    #[test]
    fn single_glyph() {
        let data = convert(&[UInt8(0)]);
        let charset = parse_charset(1, &mut Stream::new(&data)).unwrap();
        check_round_trip(&charset, 1);
    }

    #[test]
    fn format1() {
        // Glyphs 1..=3 are SIDs 100..=102, glyphs 4..=5 are SIDs 10..=11.
        let data = convert(&[
            UInt8(1),
            UInt16(100),
            UInt8(2),
            UInt16(10),
            UInt8(1),
            UInt16(0xFFFF), // trailing data
        ]);

        let mut s = Stream::new(&data);
        let charset = parse_charset(6, &mut s).unwrap();
        check_round_trip(&charset, 6);
        assert_eq!(charset.gid_to_sid(GlyphId(3)), Some(StringId(102)));
        assert_eq!(charset.gid_to_sid(GlyphId(4)), Some(StringId(10)));
        assert_eq!(charset.gid_to_sid(GlyphId(6)), None);
        assert_eq!(charset.sid_to_gid(StringId(103)), None);
        assert_eq!(s.offset(), 7);
    }

    #[test]
    fn format1_overlong_range() {
        let data = convert(&[UInt8(1), UInt16(100), UInt8(10)]);
        assert!(parse_charset(6, &mut Stream::new(&data)).is_none());
    }

    #[test]
    fn format2() {
        let data = convert(&[UInt8(2), UInt16(500), UInt16(299)]);
        let charset = parse_charset(301, &mut Stream::new(&data)).unwrap();
        check_round_trip(&charset, 301);
        assert_eq!(charset.gid_to_sid(GlyphId(300)), Some(StringId(799)));
        assert_eq!(charset.sid_to_gid(StringId(800)), None);
    }

    #[test]
    fn format2_max_range() {
        let data = convert(&[UInt8(2), UInt16(1), UInt16(0xFFFF)]);
        assert!(parse_charset(10, &mut Stream::new(&data)).is_none());
    }

    #[test]
    fn unknown_format() {
        let data = convert(&[UInt8(3), UInt16(1)]);
        assert!(parse_charset(2, &mut Stream::new(&data)).is_none());
    }
}
