// Useful links:
// http://wwwimages.adobe.com/content/dam/Adobe/en/devnet/font/pdfs/5176.CFF.pdf
// http://wwwimages.adobe.com/content/dam/Adobe/en/devnet/font/pdfs/5177.Type2.pdf
// https://github.com/opentypejs/opentype.js/blob/master/src/tables/cff.js

use core::ops::Range;

use super::charset::{Charset, parse_charset};
use super::charstring::{CharStringParser, operator};
use super::dict::{DictionaryParser, MAX_OPERANDS_LEN};
use super::encoding::{Encoding, STANDARD_ENCODING, parse_encoding};
use super::fd_select::{FDSelect, parse_fd_select};
use super::index::{Index, parse_index, skip_index};
use super::parser::{NumFrom, Stream};
use super::std_names::{self, STANDARD_NAMES_LEN};
use super::{IsEven, StringId, calc_subroutine_bias, conv_subroutine_index};
use crate::argstack::ArgumentsStack;
use crate::util::TryNumFrom;
use crate::{
    Builder, DummyOutline, GlyphId, Matrix, OutlineBuilder, OutlineError, ParseError, Rect,
    Transform,
};

// Limits according to the Adobe Technical Note #5177 Appendix B.
const STACK_LIMIT: u8 = 10;
const MAX_ARGUMENTS_STACK_LEN: usize = 48;

// Adobe Technical Note #5176, Table 9 Top DICT Operator Entries
mod top_dict_operator {
    pub(crate) const CHARSET_OFFSET: u16 = 15;
    pub(crate) const ENCODING_OFFSET: u16 = 16;
    pub(crate) const CHAR_STRINGS_OFFSET: u16 = 17;
    pub(crate) const PRIVATE_DICT_SIZE_AND_OFFSET: u16 = 18;
    pub(crate) const FONT_MATRIX: u16 = 1207;
    pub(crate) const ROS: u16 = 1230;
    pub(crate) const FD_ARRAY: u16 = 1236;
    pub(crate) const FD_SELECT: u16 = 1237;
}

// Adobe Technical Note #5176, Table 23 Private DICT Operators
mod private_dict_operator {
    pub(crate) const LOCAL_SUBROUTINES_OFFSET: u16 = 19;
    pub(crate) const DEFAULT_WIDTH: u16 = 20;
    pub(crate) const NOMINAL_WIDTH: u16 = 21;
}

// Adobe Technical Note #5176, Table 22 Charset ID
mod charset_id {
    pub(crate) const ISO_ADOBE: usize = 0;
    pub(crate) const EXPERT: usize = 1;
    pub(crate) const EXPERT_SUBSET: usize = 2;
}

// Adobe Technical Note #5176, Table 16 Encoding ID
mod encoding_id {
    pub(crate) const STANDARD: usize = 0;
    pub(crate) const EXPERT: usize = 1;
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum FontKind<'a> {
    SID(SIDMetadata<'a>),
    CID(CIDMetadata<'a>),
}

#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct SIDMetadata<'a> {
    local_subrs: Index<'a>,
    /// Can be zero.
    default_width: f32,
    /// Can be zero.
    nominal_width: f32,
    encoding: Encoding<'a>,
}

#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct CIDMetadata<'a> {
    fd_array: Index<'a>,
    fd_select: FDSelect<'a>,
}

/// A [Compact Font Format Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/cff).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    // The whole CFF table.
    // Used to resolve a local subroutine in a CID font.
    table_data: &'a [u8],

    strings: Index<'a>,
    global_subrs: Index<'a>,
    charset: Charset<'a>,
    number_of_glyphs: u16,
    matrix: Matrix,
    transform: Option<Transform>,
    char_strings: Index<'a>,
    kind: FontKind<'a>,
}

impl<'a> Table<'a> {
    /// Parses a table from raw data.
    ///
    /// Outlines are returned in the font's own units. Use
    /// [`Table::parse_with_upem`] to apply the font matrix.
    pub fn parse(data: &'a [u8]) -> Result<Self, ParseError> {
        Self::parse_impl(data, None)
    }

    /// Parses a table from raw data.
    ///
    /// Outlines are transformed by the font matrix and scaled to `units_per_em`.
    /// A font with the default matrix and 1000 units per em is left untouched.
    pub fn parse_with_upem(data: &'a [u8], units_per_em: u16) -> Result<Self, ParseError> {
        Self::parse_impl(data, Some(units_per_em))
    }

    fn parse_impl(data: &'a [u8], units_per_em: Option<u16>) -> Result<Self, ParseError> {
        let table = parse_table(data, units_per_em);

        match &table {
            Ok(table) => {
                ldebug!(
                    "parsed a {} font with {} glyphs",
                    if table.is_cid() { "CID-keyed" } else { "SID-keyed" },
                    table.number_of_glyphs
                );
            }
            Err(e) => {
                lwarn!("failed to parse a CFF table: {}", e);
            }
        }

        table
    }

    /// Returns a total number of glyphs in the font.
    ///
    /// Never zero.
    #[inline]
    pub fn number_of_glyphs(&self) -> u16 {
        self.number_of_glyphs
    }

    /// Returns the font matrix from the Top DICT.
    #[inline]
    pub fn matrix(&self) -> Matrix {
        self.matrix
    }

    /// Checks that the font is CID-keyed.
    #[inline]
    pub fn is_cid(&self) -> bool {
        matches!(self.kind, FontKind::CID(_))
    }

    /// Outlines a glyph and returns its tight bounding box.
    pub fn outline(
        &self,
        glyph_id: GlyphId,
        builder: &mut dyn OutlineBuilder,
    ) -> Result<Rect, OutlineError> {
        let data = self
            .char_strings
            .get(u32::from(glyph_id.0))
            .ok_or(OutlineError::NoGlyph)?;

        let mut builder = Builder::new(builder, self.transform);
        parse_char_string(data, self, glyph_id, false, &mut builder)?;
        builder.finish()
    }

    /// Returns the advance width of a glyph in font units.
    ///
    /// Only SID-keyed fonts store widths in a Private DICT, so CID-keyed fonts return `None`.
    pub fn glyph_width(&self, glyph_id: GlyphId) -> Option<f32> {
        match self.kind {
            FontKind::SID(ref sid) => {
                let data = self.char_strings.get(u32::from(glyph_id.0))?;
                let mut sink = DummyOutline;
                let mut builder = Builder::new(&mut sink, None);
                let width = parse_char_string(data, self, glyph_id, true, &mut builder).ok()?;
                let width = width
                    .map(|w| sid.nominal_width + w)
                    .unwrap_or(sid.default_width);
                Some(width)
            }
            FontKind::CID(_) => None,
        }
    }

    /// Resolves a character code to a glyph ID using the font's encoding.
    ///
    /// Codes missing from a custom encoding fall back to the Standard encoding.
    /// Always `None` for CID-keyed fonts.
    pub fn glyph_index(&self, code_point: u8) -> Option<GlyphId> {
        match self.kind {
            FontKind::SID(ref sid_meta) => {
                match sid_meta.encoding.code_to_gid(&self.charset, code_point) {
                    Some(id) => Some(id),
                    None => Encoding::new_standard().code_to_gid(&self.charset, code_point),
                }
            }
            FontKind::CID(_) => None,
        }
    }

    /// Returns a glyph ID by a name.
    pub fn glyph_index_by_name(&self, name: &str) -> Option<GlyphId> {
        if self.is_cid() {
            return None;
        }

        let sid = match std_names::get_inverse(name) {
            Some(sid) => StringId(sid),
            None => {
                let index = self
                    .strings
                    .into_iter()
                    .position(|n| n == name.as_bytes())?;
                let index = u16::try_from(index).ok()?;
                StringId(STANDARD_NAMES_LEN.checked_add(index)?)
            }
        };

        self.charset
            .sid_to_gid(sid)
            .filter(|gid| gid.0 < self.number_of_glyphs)
    }

    /// Returns a glyph name.
    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<&'a str> {
        if self.is_cid() || glyph_id.0 >= self.number_of_glyphs {
            return None;
        }

        let sid = self.charset.gid_to_sid(glyph_id)?;
        match std_names::get(sid.0) {
            Some(name) => Some(name),
            None => {
                let index = u32::from(sid.0 - STANDARD_NAMES_LEN);
                let name = self.strings.get(index)?;
                core::str::from_utf8(name).ok()
            }
        }
    }

    /// Returns the CID of a glyph in a CID-keyed font.
    pub fn glyph_cid(&self, glyph_id: GlyphId) -> Option<u16> {
        if !self.is_cid() || glyph_id.0 >= self.number_of_glyphs {
            return None;
        }

        self.charset.gid_to_sid(glyph_id).map(|sid| sid.0)
    }

    /// Returns a glyph ID by a CID in a CID-keyed font.
    pub fn glyph_index_by_cid(&self, cid: u16) -> Option<GlyphId> {
        if !self.is_cid() {
            return None;
        }

        self.charset
            .sid_to_gid(StringId(cid))
            .filter(|gid| gid.0 < self.number_of_glyphs)
    }
}

fn parse_table(data: &[u8], units_per_em: Option<u16>) -> Result<Table<'_>, ParseError> {
    let mut s = Stream::new(data);

    // Parse Header.
    let major = s.read::<u8>().ok_or(ParseError::ReadOutOfBounds)?;
    s.skip::<u8>(); // minor
    let header_size = s.read::<u8>().ok_or(ParseError::ReadOutOfBounds)?;
    s.skip::<u8>(); // Absolute offset

    if major != 1 {
        return Err(ParseError::UnsupportedVersion);
    }

    // Jump to Name INDEX. It's not necessarily right after the header.
    if header_size > 4 {
        s.advance(usize::from(header_size) - 4);
    }

    // Skip Name INDEX.
    skip_index::<u16>(&mut s).ok_or(ParseError::MalformedIndex)?;

    let top_dict = parse_top_dict(&mut s).ok_or(ParseError::MalformedTopDict)?;

    // Must be set, otherwise there are nothing to parse.
    let char_strings_offset = top_dict
        .char_strings_offset
        .filter(|offset| *offset != 0)
        .ok_or(ParseError::MissingCharStrings)?;

    // String INDEX.
    let strings = parse_index::<u16>(&mut s).ok_or(ParseError::MalformedIndex)?;

    // Parse Global Subroutines INDEX.
    let global_subrs = parse_index::<u16>(&mut s).ok_or(ParseError::MalformedIndex)?;

    let char_strings = Stream::new_at(data, char_strings_offset)
        .and_then(|mut s| parse_index::<u16>(&mut s))
        .ok_or(ParseError::MalformedIndex)?;

    // 'The number of glyphs is the value of the count field in the CharStrings INDEX.'
    let number_of_glyphs =
        u16::try_from(char_strings.len()).map_err(|_| ParseError::TooManyGlyphs)?;
    if number_of_glyphs == 0 {
        return Err(ParseError::NoGlyphs);
    }

    let charset = match top_dict.charset_offset {
        Some(charset_id::ISO_ADOBE) | None => Charset::ISOAdobe,
        Some(charset_id::EXPERT) => Charset::Expert,
        Some(charset_id::EXPERT_SUBSET) => Charset::ExpertSubset,
        Some(offset) => Stream::new_at(data, offset)
            .and_then(|mut s| parse_charset(number_of_glyphs, &mut s))
            .ok_or(ParseError::MalformedCharset)?,
    };

    let kind = if top_dict.has_ros {
        // CIDs are stored in a custom charset.
        if charset.is_predefined() {
            return Err(ParseError::PredefinedCidCharset);
        }

        parse_cid_metadata(data, &top_dict, number_of_glyphs)?
    } else {
        // Only SID fonts are allowed to have an Encoding.
        let encoding = match top_dict.encoding_offset {
            Some(encoding_id::STANDARD) | None => Encoding::new_standard(),
            Some(encoding_id::EXPERT) => Encoding::new_expert(),
            Some(offset) => Stream::new_at(data, offset)
                .and_then(|mut s| parse_encoding(&mut s))
                .ok_or(ParseError::MalformedEncoding)?,
        };

        parse_sid_metadata(data, &top_dict, encoding).ok_or(ParseError::MalformedPrivateDict)?
    };

    Ok(Table {
        table_data: data,
        strings,
        global_subrs,
        charset,
        number_of_glyphs,
        matrix: top_dict.matrix,
        transform: Transform::new(top_dict.matrix, units_per_em),
        char_strings,
        kind,
    })
}

#[derive(Default, Debug)]
struct TopDict {
    charset_offset: Option<usize>,
    encoding_offset: Option<usize>,
    char_strings_offset: Option<usize>,
    private_dict_range: Option<Range<usize>>,
    matrix: Matrix,
    has_ros: bool,
    fd_array_offset: Option<usize>,
    fd_select_offset: Option<usize>,
}

fn parse_top_dict(s: &mut Stream<'_>) -> Option<TopDict> {
    let mut top_dict = TopDict::default();

    let index = parse_index::<u16>(s)?;

    // The Top DICT INDEX should have only one dictionary.
    let data = index.get(0)?;

    let mut operands_buffer = [0.0; MAX_OPERANDS_LEN];
    let mut dict_parser = DictionaryParser::new(data, &mut operands_buffer);
    while let Some(operator) = dict_parser.parse_next() {
        match operator.get() {
            top_dict_operator::CHARSET_OFFSET => {
                top_dict.charset_offset = dict_parser.parse_offset();
            }
            top_dict_operator::ENCODING_OFFSET => {
                top_dict.encoding_offset = dict_parser.parse_offset();
            }
            top_dict_operator::CHAR_STRINGS_OFFSET => {
                top_dict.char_strings_offset = Some(dict_parser.parse_offset()?);
            }
            top_dict_operator::PRIVATE_DICT_SIZE_AND_OFFSET => {
                top_dict.private_dict_range = dict_parser.parse_range();
            }
            top_dict_operator::FONT_MATRIX => {
                dict_parser.parse_operands()?;
                if let [sx, ky, kx, sy, tx, ty] = *dict_parser.operands() {
                    top_dict.matrix = Matrix {
                        sx: sx as f32,
                        ky: ky as f32,
                        kx: kx as f32,
                        sy: sy as f32,
                        tx: tx as f32,
                        ty: ty as f32,
                    };
                }
            }
            top_dict_operator::ROS => {
                top_dict.has_ros = true;
            }
            top_dict_operator::FD_ARRAY => {
                top_dict.fd_array_offset = dict_parser.parse_offset();
            }
            top_dict_operator::FD_SELECT => {
                top_dict.fd_select_offset = dict_parser.parse_offset();
            }
            _ => {}
        }
    }

    Some(top_dict)
}

#[derive(Default, Debug)]
struct PrivateDict {
    local_subroutines_offset: Option<usize>,
    default_width: Option<f32>,
    nominal_width: Option<f32>,
}

fn parse_private_dict(data: &[u8]) -> PrivateDict {
    let mut dict = PrivateDict::default();
    let mut operands_buffer = [0.0; MAX_OPERANDS_LEN];
    let mut dict_parser = DictionaryParser::new(data, &mut operands_buffer);
    while let Some(operator) = dict_parser.parse_next() {
        match operator.get() {
            private_dict_operator::LOCAL_SUBROUTINES_OFFSET => {
                dict.local_subroutines_offset = dict_parser.parse_offset();
            }
            private_dict_operator::DEFAULT_WIDTH => {
                dict.default_width = dict_parser.parse_number().map(|n| n as f32);
            }
            private_dict_operator::NOMINAL_WIDTH => {
                dict.nominal_width = dict_parser.parse_number().map(|n| n as f32);
            }
            _ => {}
        }
    }

    dict
}

fn parse_font_dict(data: &[u8]) -> Option<Range<usize>> {
    let mut operands_buffer = [0.0; MAX_OPERANDS_LEN];
    let mut dict_parser = DictionaryParser::new(data, &mut operands_buffer);
    while let Some(operator) = dict_parser.parse_next() {
        if operator.get() == top_dict_operator::PRIVATE_DICT_SIZE_AND_OFFSET {
            return dict_parser.parse_range();
        }
    }

    None
}

fn parse_local_subrs<'a>(
    data: &'a [u8],
    private_dict_range: &Range<usize>,
    subroutines_offset: usize,
) -> Option<Index<'a>> {
    // 'The local subroutines offset is relative to the beginning
    // of the Private DICT data.'
    let start = private_dict_range.start.checked_add(subroutines_offset)?;
    let data = data.get(start..)?;
    let mut s = Stream::new(data);
    parse_index::<u16>(&mut s)
}

fn parse_sid_metadata<'a>(
    data: &'a [u8],
    top_dict: &TopDict,
    encoding: Encoding<'a>,
) -> Option<FontKind<'a>> {
    let mut metadata = SIDMetadata {
        encoding,
        ..SIDMetadata::default()
    };

    let Some(private_dict_range) = top_dict.private_dict_range.clone() else {
        return Some(FontKind::SID(metadata));
    };

    let private_dict = parse_private_dict(data.get(private_dict_range.clone())?);
    metadata.default_width = private_dict.default_width.unwrap_or(0.0);
    metadata.nominal_width = private_dict.nominal_width.unwrap_or(0.0);

    if let Some(subroutines_offset) = private_dict.local_subroutines_offset {
        metadata.local_subrs = parse_local_subrs(data, &private_dict_range, subroutines_offset)?;
    }

    Some(FontKind::SID(metadata))
}

fn parse_cid_metadata<'a>(
    data: &'a [u8],
    top_dict: &TopDict,
    number_of_glyphs: u16,
) -> Result<FontKind<'a>, ParseError> {
    let (Some(fd_array_offset), Some(fd_select_offset)) =
        (top_dict.fd_array_offset, top_dict.fd_select_offset)
    else {
        return Err(ParseError::MalformedCidData);
    };

    let fd_array = Stream::new_at(data, fd_array_offset)
        .and_then(|mut s| parse_index::<u16>(&mut s))
        .ok_or(ParseError::MalformedCidData)?;

    let fd_select = Stream::new_at(data, fd_select_offset)
        .and_then(|mut s| parse_fd_select(number_of_glyphs, &mut s))
        .ok_or(ParseError::MalformedCidData)?;

    Ok(FontKind::CID(CIDMetadata {
        fd_array,
        fd_select,
    }))
}

fn parse_cid_local_subrs<'a>(
    data: &'a [u8],
    glyph_id: GlyphId,
    cid: &CIDMetadata<'_>,
) -> Option<Index<'a>> {
    let font_dict_index = cid.fd_select.font_dict_index(glyph_id)?;
    let font_dict_data = cid.fd_array.get(u32::from(font_dict_index))?;
    let private_dict_range = parse_font_dict(font_dict_data)?;
    let private_dict_data = data.get(private_dict_range.clone())?;
    let private_dict = parse_private_dict(private_dict_data);
    let subroutines_offset = private_dict.local_subroutines_offset?;
    parse_local_subrs(data, &private_dict_range, subroutines_offset)
}

struct CharStringParserContext<'a> {
    metadata: &'a Table<'a>,
    width: Option<f32>,
    stems_len: u32,
    has_endchar: bool,
    has_seac: bool,
    glyph_id: GlyphId,
    local_subrs: Option<Index<'a>>,
}

// Returns the glyph width, when the charstring has one.
fn parse_char_string(
    data: &[u8],
    metadata: &Table<'_>,
    glyph_id: GlyphId,
    width_only: bool,
    builder: &mut Builder<'_>,
) -> Result<Option<f32>, OutlineError> {
    let local_subrs = match metadata.kind {
        FontKind::SID(ref sid) => Some(sid.local_subrs),
        // Resolved on the first `callsubr`.
        FontKind::CID(_) => None,
    };

    let mut ctx = CharStringParserContext {
        metadata,
        width: None,
        stems_len: 0,
        has_endchar: false,
        has_seac: false,
        glyph_id,
        local_subrs,
    };

    let mut parser = CharStringParser {
        stack: ArgumentsStack {
            data: &mut [0.0; MAX_ARGUMENTS_STACK_LEN],
            len: 0,
            max_len: MAX_ARGUMENTS_STACK_LEN,
        },
        builder,
        x: 0.0,
        y: 0.0,
        has_move_to: false,
        is_first_move_to: true,
        width_only,
    };
    _parse_char_string(&mut ctx, data, 0, &mut parser)?;

    if width_only {
        return Ok(ctx.width);
    }

    if !ctx.has_endchar {
        return Err(OutlineError::MissingEndChar);
    }

    Ok(ctx.width)
}

fn _parse_char_string(
    ctx: &mut CharStringParserContext<'_>,
    char_string: &[u8],
    depth: u8,
    p: &mut CharStringParser<'_, '_>,
) -> Result<(), OutlineError> {
    let mut s = Stream::new(char_string);
    while !s.at_end() {
        let op = s.read::<u8>().ok_or(OutlineError::ReadOutOfBounds)?;
        match op {
            0 | 2 | 9 | 13 | 15 | 16 | 17 => {
                // Reserved.
                lwarn!("reserved charstring operator {}", op);
                return Err(OutlineError::InvalidOperator);
            }
            operator::HORIZONTAL_STEM
            | operator::VERTICAL_STEM
            | operator::HORIZONTAL_STEM_HINT_MASK
            | operator::VERTICAL_STEM_HINT_MASK => {
                // y dy {dya dyb}* hstem
                // x dx {dxa dxb}* vstem
                // y dy {dya dyb}* hstemhm
                // x dx {dxa dxb}* vstemhm
                trace_op!("stem", p);

                // If the stack length is uneven, than the first value is a `width`.
                let len = if p.stack.len().is_odd() && ctx.width.is_none() {
                    ctx.width = Some(p.stack.at(0));
                    p.stack.len() - 1
                } else {
                    p.stack.len()
                };

                ctx.stems_len = ctx.stems_len.saturating_add(len as u32 >> 1);

                // We are ignoring the hint operators.
                p.stack.clear();
            }
            operator::VERTICAL_MOVE_TO => {
                trace_op!("vmoveto", p);

                let mut i = 0;
                if p.stack.len() == 2 && ctx.width.is_none() {
                    i += 1;
                    ctx.width = Some(p.stack.at(0));
                }

                p.parse_vertical_move_to(i)?;
            }
            operator::LINE_TO => {
                trace_op!("rlineto", p);
                p.parse_line_to()?;
            }
            operator::HORIZONTAL_LINE_TO => {
                trace_op!("hlineto", p);
                p.parse_horizontal_line_to()?;
            }
            operator::VERTICAL_LINE_TO => {
                trace_op!("vlineto", p);
                p.parse_vertical_line_to()?;
            }
            operator::CURVE_TO => {
                trace_op!("rrcurveto", p);
                p.parse_curve_to()?;
            }
            operator::CALL_LOCAL_SUBROUTINE => {
                trace_op!("callsubr", p);

                if p.stack.is_empty() {
                    return Err(OutlineError::InvalidArgumentsStackLength);
                }

                if depth == STACK_LIMIT {
                    return Err(OutlineError::NestingLimitReached);
                }

                // Parse and remember the local subroutine for the current glyph.
                // Since it's a pretty complex task, we're doing it only when
                // a local subroutine is actually requested by the glyphs charstring.
                if ctx.local_subrs.is_none() {
                    if let FontKind::CID(ref cid) = ctx.metadata.kind {
                        ctx.local_subrs =
                            parse_cid_local_subrs(ctx.metadata.table_data, ctx.glyph_id, cid);
                    }
                }

                let Some(local_subrs) = ctx.local_subrs else {
                    return Err(OutlineError::NoLocalSubroutines);
                };

                let subroutine_bias = calc_subroutine_bias(local_subrs.len());
                let index = conv_subroutine_index(p.stack.pop(), subroutine_bias)?;
                let char_string = local_subrs
                    .get(index)
                    .ok_or(OutlineError::InvalidSubroutineIndex)?;
                _parse_char_string(ctx, char_string, depth + 1, p)?;

                if ctx.has_endchar && !ctx.has_seac {
                    if !s.at_end() {
                        return Err(OutlineError::DataAfterEndChar);
                    }

                    break;
                }
            }
            operator::RETURN => {
                trace_op!("return", p);
                break;
            }
            operator::TWO_BYTE_OPERATOR_MARK => {
                // flex
                let op2 = s.read::<u8>().ok_or(OutlineError::ReadOutOfBounds)?;
                match op2 {
                    operator::HFLEX => {
                        trace_op!("hflex", p);
                        p.parse_hflex()?
                    }
                    operator::FLEX => {
                        trace_op!("flex", p);
                        p.parse_flex()?
                    }
                    operator::HFLEX1 => {
                        trace_op!("hflex1", p);
                        p.parse_hflex1()?
                    }
                    operator::FLEX1 => {
                        trace_op!("flex1", p);
                        p.parse_flex1()?
                    }
                    _ => {
                        lwarn!("unsupported charstring operator 12 {}", op2);
                        return Err(OutlineError::UnsupportedOperator);
                    }
                }
            }
            operator::ENDCHAR => {
                trace_op!("endchar", p);

                if p.stack.len() == 4 || (ctx.width.is_none() && p.stack.len() == 5) {
                    // Process 'seac'.
                    let accent_char = seac_code_to_glyph_id(&ctx.metadata.charset, p.stack.pop())
                        .ok_or(OutlineError::InvalidSeacCode)?;
                    let base_char = seac_code_to_glyph_id(&ctx.metadata.charset, p.stack.pop())
                        .ok_or(OutlineError::InvalidSeacCode)?;
                    let dy = p.stack.pop();
                    let dx = p.stack.pop();

                    if ctx.width.is_none() && !p.stack.is_empty() {
                        ctx.width = Some(p.stack.pop());
                    }

                    if depth == STACK_LIMIT {
                        return Err(OutlineError::NestingLimitReached);
                    }

                    ctx.has_seac = true;

                    let base_char_string = ctx
                        .metadata
                        .char_strings
                        .get(u32::from(base_char.0))
                        .ok_or(OutlineError::InvalidSeacCode)?;
                    _parse_char_string(ctx, base_char_string, depth + 1, p)?;
                    p.x = dx;
                    p.y = dy;

                    let accent_char_string = ctx
                        .metadata
                        .char_strings
                        .get(u32::from(accent_char.0))
                        .ok_or(OutlineError::InvalidSeacCode)?;
                    _parse_char_string(ctx, accent_char_string, depth + 1, p)?;
                } else if p.stack.len() == 1 && ctx.width.is_none() {
                    ctx.width = Some(p.stack.pop());
                }

                if !p.is_first_move_to {
                    p.is_first_move_to = true;
                    p.builder.close();
                }

                if !s.at_end() {
                    return Err(OutlineError::DataAfterEndChar);
                }

                ctx.has_endchar = true;

                break;
            }
            operator::HINT_MASK | operator::COUNTER_MASK => {
                trace_op!("hintmask", p);

                let mut len = p.stack.len();

                // If the stack length is uneven, than the first value is a `width`.
                if len.is_odd() && ctx.width.is_none() {
                    len -= 1;
                    ctx.width = Some(p.stack.at(0));
                }

                // We are ignoring the hint operators.
                p.stack.clear();

                ctx.stems_len = ctx.stems_len.saturating_add(len as u32 >> 1);

                s.advance_checked(usize::num_from(ctx.stems_len.saturating_add(7) >> 3))
                    .ok_or(OutlineError::ReadOutOfBounds)?;
            }
            operator::MOVE_TO => {
                trace_op!("rmoveto", p);

                let mut i = 0;
                if p.stack.len() == 3 && ctx.width.is_none() {
                    i += 1;
                    ctx.width = Some(p.stack.at(0));
                }

                p.parse_move_to(i)?;
            }
            operator::HORIZONTAL_MOVE_TO => {
                trace_op!("hmoveto", p);

                let mut i = 0;
                if p.stack.len() == 2 && ctx.width.is_none() {
                    i += 1;
                    ctx.width = Some(p.stack.at(0));
                }

                p.parse_horizontal_move_to(i)?;
            }
            operator::CURVE_LINE => {
                trace_op!("rcurveline", p);
                p.parse_curve_line()?;
            }
            operator::LINE_CURVE => {
                trace_op!("rlinecurve", p);
                p.parse_line_curve()?;
            }
            operator::VV_CURVE_TO => {
                trace_op!("vvcurveto", p);
                p.parse_vv_curve_to()?;
            }
            operator::HH_CURVE_TO => {
                trace_op!("hhcurveto", p);
                p.parse_hh_curve_to()?;
            }
            operator::SHORT_INT => {
                p.parse_short_int(&mut s)?;
            }
            operator::CALL_GLOBAL_SUBROUTINE => {
                trace_op!("callgsubr", p);

                if p.stack.is_empty() {
                    return Err(OutlineError::InvalidArgumentsStackLength);
                }

                if depth == STACK_LIMIT {
                    return Err(OutlineError::NestingLimitReached);
                }

                let subroutine_bias = calc_subroutine_bias(ctx.metadata.global_subrs.len());
                let index = conv_subroutine_index(p.stack.pop(), subroutine_bias)?;
                let char_string = ctx
                    .metadata
                    .global_subrs
                    .get(index)
                    .ok_or(OutlineError::InvalidSubroutineIndex)?;
                _parse_char_string(ctx, char_string, depth + 1, p)?;

                if ctx.has_endchar && !ctx.has_seac {
                    if !s.at_end() {
                        return Err(OutlineError::DataAfterEndChar);
                    }

                    break;
                }
            }
            operator::VH_CURVE_TO => {
                trace_op!("vhcurveto", p);
                p.parse_vh_curve_to()?;
            }
            operator::HV_CURVE_TO => {
                trace_op!("hvcurveto", p);
                p.parse_hv_curve_to()?;
            }
            32..=246 => {
                p.parse_int1(op)?;
            }
            247..=250 => {
                p.parse_int2(op, &mut s)?;
            }
            251..=254 => {
                p.parse_int3(op, &mut s)?;
            }
            operator::FIXED_16_16 => {
                p.parse_fixed(&mut s)?;
            }
        }

        if p.width_only && ctx.width.is_some() {
            break;
        }
    }

    Ok(())
}

// The codes are Standard encoding codes, which are mapped through the charset.
fn seac_code_to_glyph_id(charset: &Charset<'_>, n: f32) -> Option<GlyphId> {
    let code = u8::try_num_from(n)?;
    let sid = STANDARD_ENCODING[usize::from(code)];
    if sid == 0 {
        return None;
    }

    charset.sid_to_gid(StringId(u16::from(sid)))
}
