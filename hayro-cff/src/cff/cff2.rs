//! A [Compact Font Format 2 Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/cff2) implementation.
//!
//! Only the default instance of a variable font is outlined. Deltas of `blend`
//! operators are discarded.

// https://docs.microsoft.com/en-us/typography/opentype/spec/cff2charstr

use core::ops::Range;

use super::charstring::{CharStringParser, operator};
use super::dict::DictionaryParser;
use super::fd_select::{FDSelect, parse_fd_select};
use super::index::{Index, parse_index};
use super::parser::{NumFrom, Stream};
use super::{calc_subroutine_bias, conv_subroutine_index};
use crate::argstack::ArgumentsStack;
use crate::util::TryNumFrom;
use crate::{Builder, GlyphId, Matrix, OutlineBuilder, OutlineError, ParseError, Rect, Transform};

// https://docs.microsoft.com/en-us/typography/opentype/spec/cff2#7-top-dict-data
// 'Operators in DICT may be preceded by up to a maximum of 513 operands.'
const MAX_OPERANDS_LEN: usize = 513;

// https://docs.microsoft.com/en-us/typography/opentype/spec/cff2charstr#appendix-b-cff2-charstring-implementation-limits
const STACK_LIMIT: u8 = 10;
const MAX_ARGUMENTS_STACK_LEN: usize = 513;

// https://docs.microsoft.com/en-us/typography/opentype/spec/cff2#table-9-top-dict-operator-entries
mod top_dict_operator {
    pub(crate) const CHAR_STRINGS_OFFSET: u16 = 17;
    pub(crate) const VARIATION_STORE_OFFSET: u16 = 24;
    pub(crate) const FONT_MATRIX: u16 = 1207;
    pub(crate) const FONT_DICT_INDEX_OFFSET: u16 = 1236;
    pub(crate) const FONT_DICT_SELECT_OFFSET: u16 = 1237;
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/cff2#table-10-font-dict-operator-entries
mod font_dict_operator {
    pub(crate) const PRIVATE_DICT_SIZE_AND_OFFSET: u16 = 18;
}

// https://docs.microsoft.com/en-us/typography/opentype/spec/cff2#table-16-private-dict-operators
mod private_dict_operator {
    pub(crate) const LOCAL_SUBROUTINES_OFFSET: u16 = 19;
    pub(crate) const VARIATION_STORE_INDEX: u16 = 22;
}

/// A [Compact Font Format 2 Table](
/// https://docs.microsoft.com/en-us/typography/opentype/spec/cff2).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    // The whole CFF2 table.
    // Used to resolve Private DICTs and local subroutines.
    table_data: &'a [u8],

    global_subrs: Index<'a>,
    char_strings: Index<'a>,
    fd_array: Index<'a>,
    fd_select: Option<FDSelect<'a>>,
    // The ItemVariationStore data without the length prefix.
    variation_store: &'a [u8],
    number_of_glyphs: u16,
    matrix: Matrix,
    transform: Option<Transform>,
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
    pub fn parse_with_upem(data: &'a [u8], units_per_em: u16) -> Result<Self, ParseError> {
        Self::parse_impl(data, Some(units_per_em))
    }

    fn parse_impl(data: &'a [u8], units_per_em: Option<u16>) -> Result<Self, ParseError> {
        let table = parse_table(data, units_per_em);

        match &table {
            Ok(table) => {
                ldebug!("parsed a CFF2 font with {} glyphs", table.number_of_glyphs);
            }
            Err(e) => {
                lwarn!("failed to parse a CFF2 table: {}", e);
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

    /// Outlines the default instance of a glyph and returns its tight bounding box.
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
        parse_char_string(data, self, glyph_id, &mut builder)?;
        builder.finish()
    }
}

fn parse_table(data: &[u8], units_per_em: Option<u16>) -> Result<Table<'_>, ParseError> {
    let mut s = Stream::new(data);

    // Parse Header.
    let major = s.read::<u8>().ok_or(ParseError::ReadOutOfBounds)?;
    s.skip::<u8>(); // minor
    let header_size = s.read::<u8>().ok_or(ParseError::ReadOutOfBounds)?;
    let top_dict_length = s.read::<u16>().ok_or(ParseError::ReadOutOfBounds)?;

    if major != 2 {
        return Err(ParseError::UnsupportedVersion);
    }

    // Jump to Top DICT. It's not necessarily right after the header.
    if header_size > 5 {
        s.advance_checked(usize::from(header_size) - 5)
            .ok_or(ParseError::ReadOutOfBounds)?;
    }

    let top_dict_data = s
        .read_bytes(usize::from(top_dict_length))
        .ok_or(ParseError::ReadOutOfBounds)?;
    let top_dict = parse_top_dict(top_dict_data).ok_or(ParseError::MalformedTopDict)?;

    let char_strings_offset = top_dict
        .char_strings_offset
        .filter(|offset| *offset != 0)
        .ok_or(ParseError::MissingCharStrings)?;

    // Global Subroutines INDEX directly follows the Top DICT.
    let global_subrs = parse_index::<u32>(&mut s).ok_or(ParseError::MalformedIndex)?;

    let char_strings = Stream::new_at(data, char_strings_offset)
        .and_then(|mut s| parse_index::<u32>(&mut s))
        .ok_or(ParseError::MalformedIndex)?;

    let number_of_glyphs =
        u16::try_from(char_strings.len()).map_err(|_| ParseError::TooManyGlyphs)?;
    if number_of_glyphs == 0 {
        return Err(ParseError::NoGlyphs);
    }

    let variation_store: &[u8] = match top_dict.variation_store_offset {
        Some(offset) => {
            let mut s = Stream::new_at(data, offset).ok_or(ParseError::ReadOutOfBounds)?;
            let len = s.read::<u16>().ok_or(ParseError::ReadOutOfBounds)?;
            s.read_bytes(usize::from(len))
                .ok_or(ParseError::ReadOutOfBounds)?
        }
        None => &[],
    };

    let fd_array = match top_dict.fd_array_offset {
        Some(offset) => Stream::new_at(data, offset)
            .and_then(|mut s| parse_index::<u32>(&mut s))
            .ok_or(ParseError::MalformedCidData)?,
        None => Index::default(),
    };

    let fd_select = match top_dict.fd_select_offset {
        Some(offset) => Some(
            Stream::new_at(data, offset)
                .and_then(|mut s| parse_fd_select(number_of_glyphs, &mut s))
                .ok_or(ParseError::MalformedCidData)?,
        ),
        None => None,
    };

    Ok(Table {
        table_data: data,
        global_subrs,
        char_strings,
        fd_array,
        fd_select,
        variation_store,
        number_of_glyphs,
        matrix: top_dict.matrix,
        transform: Transform::new(top_dict.matrix, units_per_em),
    })
}

#[derive(Default, Debug)]
struct TopDict {
    char_strings_offset: Option<usize>,
    variation_store_offset: Option<usize>,
    fd_array_offset: Option<usize>,
    fd_select_offset: Option<usize>,
    matrix: Matrix,
}

fn parse_top_dict(data: &[u8]) -> Option<TopDict> {
    let mut dict = TopDict::default();

    let mut operands_buffer = [0.0; MAX_OPERANDS_LEN];
    let mut dict_parser = DictionaryParser::new(data, &mut operands_buffer);
    while let Some(operator) = dict_parser.parse_next() {
        match operator.get() {
            top_dict_operator::CHAR_STRINGS_OFFSET => {
                dict.char_strings_offset = Some(dict_parser.parse_offset()?);
            }
            top_dict_operator::VARIATION_STORE_OFFSET => {
                dict.variation_store_offset = dict_parser.parse_offset();
            }
            top_dict_operator::FONT_DICT_INDEX_OFFSET => {
                dict.fd_array_offset = dict_parser.parse_offset();
            }
            top_dict_operator::FONT_DICT_SELECT_OFFSET => {
                dict.fd_select_offset = dict_parser.parse_offset();
            }
            top_dict_operator::FONT_MATRIX => {
                dict_parser.parse_operands()?;
                if let [sx, ky, kx, sy, tx, ty] = *dict_parser.operands() {
                    dict.matrix = Matrix {
                        sx: sx as f32,
                        ky: ky as f32,
                        kx: kx as f32,
                        sy: sy as f32,
                        tx: tx as f32,
                        ty: ty as f32,
                    };
                }
            }
            _ => {}
        }
    }

    Some(dict)
}

fn parse_font_dict(data: &[u8]) -> Option<Range<usize>> {
    let mut operands_buffer = [0.0; MAX_OPERANDS_LEN];
    let mut dict_parser = DictionaryParser::new(data, &mut operands_buffer);
    while let Some(operator) = dict_parser.parse_next() {
        if operator.get() == font_dict_operator::PRIVATE_DICT_SIZE_AND_OFFSET {
            return dict_parser.parse_range();
        }
    }

    None
}

#[derive(Default, Debug)]
struct PrivateDict {
    local_subroutines_offset: Option<usize>,
    vsindex: Option<u16>,
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
            private_dict_operator::VARIATION_STORE_INDEX => {
                dict.vsindex = dict_parser
                    .parse_number()
                    .and_then(|n| u16::try_from(i32::try_num_from(n)?).ok());
            }
            _ => {}
        }
    }

    dict
}

/// Per-glyph data stored in the glyph's Private DICT.
#[derive(Default)]
struct GlyphPrivateData<'a> {
    local_subrs: Option<Index<'a>>,
    vsindex: u16,
}

// Fonts without an FDSelect use the first Font DICT for all glyphs.
fn parse_glyph_private_data<'a>(
    table: &Table<'a>,
    glyph_id: GlyphId,
) -> Option<GlyphPrivateData<'a>> {
    let font_dict_index = match table.fd_select {
        Some(ref fd_select) => fd_select.font_dict_index(glyph_id)?,
        None => 0,
    };

    let font_dict_data = table.fd_array.get(u32::from(font_dict_index))?;
    let private_dict_range = parse_font_dict(font_dict_data)?;
    let private_dict = parse_private_dict(table.table_data.get(private_dict_range.clone())?);

    // 'The local subroutines offset is relative to the beginning
    // of the Private DICT data.'
    let local_subrs = private_dict
        .local_subroutines_offset
        .and_then(|offset| private_dict_range.start.checked_add(offset))
        .and_then(|start| Stream::new_at(table.table_data, start))
        .and_then(|mut s| parse_index::<u32>(&mut s));

    Some(GlyphPrivateData {
        local_subrs,
        vsindex: private_dict.vsindex.unwrap_or(0),
    })
}

// Returns the number of regions used by the ItemVariationData at `vsindex`.
fn parse_variation_regions(store: &[u8], vsindex: u16) -> Option<u16> {
    let mut s = Stream::new(store);
    if s.read::<u16>()? != 1 {
        return None;
    }

    s.skip::<u32>(); // variation region list offset
    let count = s.read::<u16>()?;
    let offsets = s.read_array16::<u32>(count)?;
    let offset = usize::num_from(offsets.get(vsindex)?);

    let mut s = Stream::new_at(store, offset)?;
    s.skip::<u16>(); // item count
    s.skip::<u16>(); // word delta count
    s.read::<u16>()
}

struct CharStringParserContext<'a> {
    metadata: &'a Table<'a>,
    local_subrs: Option<Index<'a>>,
    stems_len: u32,
    vsindex: u16,
    has_vsindex: bool,
    has_blend: bool,
    // Resolved on the first `blend`.
    regions_len: Option<u16>,
}

fn parse_char_string(
    data: &[u8],
    metadata: &Table<'_>,
    glyph_id: GlyphId,
    builder: &mut Builder<'_>,
) -> Result<(), OutlineError> {
    let private_data = parse_glyph_private_data(metadata, glyph_id).unwrap_or_default();

    let mut ctx = CharStringParserContext {
        metadata,
        local_subrs: private_data.local_subrs,
        stems_len: 0,
        vsindex: private_data.vsindex,
        has_vsindex: false,
        has_blend: false,
        regions_len: None,
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
        width_only: false,
    };
    _parse_char_string(&mut ctx, data, 0, &mut parser)?;

    // CFF2 charstrings have no endchar, so the last contour is closed here.
    if !parser.is_first_move_to {
        parser.is_first_move_to = true;
        parser.builder.close();
    }

    Ok(())
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
            0 | 2 | 9 | 11 | 13 | 14 | 17 => {
                // Reserved.
                lwarn!("reserved CFF2 charstring operator {}", op);
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

                ctx.stems_len = ctx.stems_len.saturating_add(p.stack.len() as u32 >> 1);

                // We are ignoring the hint operators.
                p.stack.clear();
            }
            operator::VERTICAL_MOVE_TO => {
                trace_op!("vmoveto", p);
                p.parse_vertical_move_to(0)?;
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

                let Some(local_subrs) = ctx.local_subrs else {
                    return Err(OutlineError::NoLocalSubroutines);
                };

                let subroutine_bias = calc_subroutine_bias(local_subrs.len());
                let index = conv_subroutine_index(p.stack.pop(), subroutine_bias)?;
                let char_string = local_subrs
                    .get(index)
                    .ok_or(OutlineError::InvalidSubroutineIndex)?;
                _parse_char_string(ctx, char_string, depth + 1, p)?;
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
                        lwarn!("unsupported CFF2 charstring operator 12 {}", op2);
                        return Err(OutlineError::UnsupportedOperator);
                    }
                }
            }
            operator::VS_INDEX => {
                trace_op!("vsindex", p);

                // 'vsindex can occur only once per charstring, and must precede the first blend.'
                if ctx.has_vsindex || ctx.has_blend {
                    return Err(OutlineError::InvalidOperator);
                }

                if p.stack.len() != 1 {
                    return Err(OutlineError::InvalidArgumentsStackLength);
                }

                ctx.vsindex = u16::try_num_from(p.stack.pop())
                    .ok_or(OutlineError::InvalidItemVariationDataIndex)?;
                ctx.has_vsindex = true;
                ctx.regions_len = None;
            }
            operator::BLEND => {
                trace_op!("blend", p);

                ctx.has_blend = true;

                let regions_len = match ctx.regions_len {
                    Some(len) => len,
                    None => {
                        let len = parse_variation_regions(ctx.metadata.variation_store, ctx.vsindex)
                            .ok_or(OutlineError::InvalidItemVariationDataIndex)?;
                        ctx.regions_len = Some(len);
                        len
                    }
                };

                if p.stack.is_empty() {
                    return Err(OutlineError::InvalidArgumentsStackLength);
                }

                // n default values, followed by n * regions_len deltas, followed by n.
                let n = u16::try_num_from(p.stack.pop())
                    .ok_or(OutlineError::InvalidArgumentsStackLength)?;
                let n = usize::from(n);
                let regions_len = usize::from(regions_len);

                let deltas_len = n
                    .checked_mul(regions_len)
                    .ok_or(OutlineError::InvalidArgumentsStackLength)?;
                let len = n
                    .checked_add(deltas_len)
                    .ok_or(OutlineError::InvalidArgumentsStackLength)?;
                if p.stack.len() < len {
                    return Err(OutlineError::InvalidArgumentsStackLength);
                }

                // Only the default instance is supported, so deltas are dropped.
                p.stack.remove_last_n(deltas_len);
            }
            operator::HINT_MASK | operator::COUNTER_MASK => {
                trace_op!("hintmask", p);

                ctx.stems_len = ctx.stems_len.saturating_add(p.stack.len() as u32 >> 1);

                // We are ignoring the hint operators.
                p.stack.clear();

                s.advance_checked(usize::num_from(ctx.stems_len.saturating_add(7) >> 3))
                    .ok_or(OutlineError::ReadOutOfBounds)?;
            }
            operator::MOVE_TO => {
                trace_op!("rmoveto", p);
                p.parse_move_to(0)?;
            }
            operator::HORIZONTAL_MOVE_TO => {
                trace_op!("hmoveto", p);
                p.parse_horizontal_move_to(0)?;
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
    }

    Ok(())
}
