//! Helpers for assembling font data in tests.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::OutlineBuilder;

#[derive(Clone, Copy, Debug)]
pub(crate) enum TtfType {
    Raw(&'static [u8]),
    UInt8(u8),
    UInt16(u16),
    Int16(i16),
    UInt32(u32),
    /// A CFF number in its shortest encoding.
    CFFInt(i32),
    /// A CFF DICT number that always takes five bytes.
    CFFLong(i32),
}

pub(crate) fn convert(values: &[TtfType]) -> Vec<u8> {
    let mut data = Vec::with_capacity(256);
    for v in values {
        convert_type(*v, &mut data);
    }

    data
}

fn convert_type(v: TtfType, data: &mut Vec<u8>) {
    match v {
        TtfType::Raw(bytes) => {
            data.extend_from_slice(bytes);
        }
        TtfType::UInt8(n) => {
            data.push(n);
        }
        TtfType::UInt16(n) => {
            data.extend_from_slice(&n.to_be_bytes());
        }
        TtfType::Int16(n) => {
            data.extend_from_slice(&n.to_be_bytes());
        }
        TtfType::UInt32(n) => {
            data.extend_from_slice(&n.to_be_bytes());
        }
        TtfType::CFFInt(n) => match n {
            -107..=107 => {
                data.push((n as i16 + 139) as u8);
            }
            108..=1131 => {
                let n = n - 108;
                data.push(((n >> 8) + 247) as u8);
                data.push(n as u8);
            }
            -1131..=-108 => {
                let n = -n - 108;
                data.push(((n >> 8) + 251) as u8);
                data.push(n as u8);
            }
            -32768..=32767 => {
                data.push(28);
                data.extend_from_slice(&(n as i16).to_be_bytes());
            }
            _ => {
                data.push(29);
                data.extend_from_slice(&n.to_be_bytes());
            }
        },
        TtfType::CFFLong(n) => {
            data.push(29);
            data.extend_from_slice(&n.to_be_bytes());
        }
    }
}

/// Encodes a real number operand, like `1.5` or `-2E-3`.
pub(crate) fn cff_real(number: &str) -> Vec<u8> {
    let mut nibbles = Vec::new();
    let mut chars = number.chars().peekable();
    while let Some(c) = chars.next() {
        let nibble = match c {
            '0'..='9' => c as u8 - b'0',
            '.' => 0xA,
            'E' if chars.peek() == Some(&'-') => {
                chars.next();
                0xC
            }
            'E' => 0xB,
            '-' => 0xE,
            _ => panic!("invalid real number"),
        };
        nibbles.push(nibble);
    }

    nibbles.push(0xF);
    if nibbles.len() % 2 != 0 {
        nibbles.push(0xF);
    }

    let mut data = vec![30];
    for pair in nibbles.chunks(2) {
        data.push((pair[0] << 4) | pair[1]);
    }

    data
}

/// Builds an INDEX with a u16 count.
pub(crate) fn cff_index(items: &[Vec<u8>]) -> Vec<u8> {
    index_impl(items, false)
}

/// Builds an INDEX with a u32 count.
pub(crate) fn cff2_index(items: &[Vec<u8>]) -> Vec<u8> {
    index_impl(items, true)
}

fn index_impl(items: &[Vec<u8>], long_count: bool) -> Vec<u8> {
    let mut data = Vec::new();
    if long_count {
        data.extend_from_slice(&(items.len() as u32).to_be_bytes());
    } else {
        data.extend_from_slice(&(items.len() as u16).to_be_bytes());
    }

    if items.is_empty() {
        return data;
    }

    let total: usize = items.iter().map(|item| item.len()).sum();
    let offset_size: usize = match total + 1 {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x10000..=0xFFFFFF => 3,
        _ => 4,
    };

    data.push(offset_size as u8);

    let mut offset = 1u32;
    let push_offset = |data: &mut Vec<u8>, offset: u32| {
        data.extend_from_slice(&offset.to_be_bytes()[4 - offset_size..]);
    };

    push_offset(&mut data, offset);
    for item in items {
        offset += item.len() as u32;
        push_offset(&mut data, offset);
    }

    for item in items {
        data.extend_from_slice(item);
    }

    data
}

/// Records outline segments as an SVG-like path string.
pub(crate) struct PathBuilder(pub(crate) String);

impl PathBuilder {
    pub(crate) fn new() -> Self {
        Self(String::new())
    }
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        write!(&mut self.0, "M {} {} ", x, y).unwrap();
    }

    fn line_to(&mut self, x: f32, y: f32) {
        write!(&mut self.0, "L {} {} ", x, y).unwrap();
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        write!(&mut self.0, "C {} {} {} {} {} {} ", x1, y1, x2, y2, x, y).unwrap();
    }

    fn close(&mut self) {
        write!(&mut self.0, "Z ").unwrap();
    }
}

/// Assembles a complete CFF table.
///
/// All offsets in DICTs are written as five byte numbers, so the layout
/// can be computed before the offsets are known.
pub(crate) struct CffBuilder {
    pub(crate) char_strings: Vec<Vec<u8>>,
    pub(crate) global_subrs: Vec<Vec<u8>>,
    pub(crate) local_subrs: Vec<Vec<u8>>,
    pub(crate) strings: Vec<Vec<u8>>,
    /// A predefined charset ID.
    pub(crate) charset_id: Option<i32>,
    /// Raw custom charset data.
    pub(crate) charset: Option<Vec<u8>>,
    /// A predefined encoding ID.
    pub(crate) encoding_id: Option<i32>,
    /// Raw custom encoding data.
    pub(crate) encoding: Option<Vec<u8>>,
    pub(crate) default_width: Option<i32>,
    pub(crate) nominal_width: Option<i32>,
    /// Six encoded FontMatrix operands.
    pub(crate) font_matrix: Option<Vec<u8>>,
    /// Overrides the Private DICT relative offset of the local subroutines.
    pub(crate) local_subrs_offset: Option<i32>,
    /// Writes ROS, FDArray and FDSelect instead of a top-level Private DICT.
    pub(crate) cid: bool,
}

impl CffBuilder {
    pub(crate) fn new(char_strings: Vec<Vec<u8>>) -> Self {
        Self {
            char_strings,
            global_subrs: Vec::new(),
            local_subrs: Vec::new(),
            strings: Vec::new(),
            charset_id: None,
            charset: None,
            encoding_id: None,
            encoding: None,
            default_width: None,
            nominal_width: None,
            font_matrix: None,
            local_subrs_offset: None,
            cid: false,
        }
    }

    fn has_private_dict(&self) -> bool {
        self.cid
            || !self.local_subrs.is_empty()
            || self.default_width.is_some()
            || self.nominal_width.is_some()
            || self.local_subrs_offset.is_some()
    }

    fn private_dict(&self) -> Vec<u8> {
        use TtfType::*;

        let mut data = Vec::new();
        if let Some(width) = self.default_width {
            data.extend(convert(&[CFFInt(width), UInt8(20)]));
        }

        if let Some(width) = self.nominal_width {
            data.extend(convert(&[CFFInt(width), UInt8(21)]));
        }

        if !self.local_subrs.is_empty() || self.local_subrs_offset.is_some() {
            // The local subroutines directly follow the Private DICT.
            let len = data.len() as i32 + 6;
            let offset = self.local_subrs_offset.unwrap_or(len);
            data.extend(convert(&[CFFLong(offset), UInt8(19)]));
        }

        data
    }

    fn top_dict(&self, layout: &Layout) -> Vec<u8> {
        use TtfType::*;

        let mut data = Vec::new();
        if self.cid {
            // Registry, Ordering, Supplement.
            data.extend(convert(&[CFFInt(0), CFFInt(0), CFFInt(0), UInt8(12), UInt8(30)]));
        }

        if let Some(id) = self.charset_id {
            data.extend(convert(&[CFFLong(id), UInt8(15)]));
        } else if self.charset.is_some() {
            data.extend(convert(&[CFFLong(layout.charset as i32), UInt8(15)]));
        }

        if let Some(id) = self.encoding_id {
            data.extend(convert(&[CFFLong(id), UInt8(16)]));
        } else if self.encoding.is_some() {
            data.extend(convert(&[CFFLong(layout.encoding as i32), UInt8(16)]));
        }

        data.extend(convert(&[CFFLong(layout.char_strings as i32), UInt8(17)]));

        if self.has_private_dict() && !self.cid {
            data.extend(convert(&[
                CFFLong(layout.private_len as i32),
                CFFLong(layout.private as i32),
                UInt8(18),
            ]));
        }

        if let Some(matrix) = &self.font_matrix {
            data.extend_from_slice(matrix);
            data.extend(convert(&[UInt8(12), UInt8(7)]));
        }

        if self.cid {
            data.extend(convert(&[
                CFFLong(layout.fd_array as i32),
                UInt8(12),
                UInt8(36),
                CFFLong(layout.fd_select as i32),
                UInt8(12),
                UInt8(37),
            ]));
        }

        data
    }

    fn font_dict(&self, layout: &Layout) -> Vec<u8> {
        use TtfType::*;

        convert(&[
            CFFLong(layout.private_len as i32),
            CFFLong(layout.private as i32),
            UInt8(18),
        ])
    }

    fn fd_select(&self) -> Vec<u8> {
        use TtfType::*;

        convert(&[
            UInt8(3),
            UInt16(1),
            UInt16(0),
            UInt8(0),
            UInt16(self.char_strings.len() as u16),
        ])
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let header = [1u8, 0, 4, 4];
        let name_index = cff_index(&[b"Test".to_vec()]);
        let string_index = cff_index(&self.strings);
        let global_subrs_index = cff_index(&self.global_subrs);
        let char_strings_index = cff_index(&self.char_strings);
        let private_dict = if self.has_private_dict() {
            self.private_dict()
        } else {
            Vec::new()
        };
        let local_subrs_index = if self.local_subrs.is_empty() {
            Vec::new()
        } else {
            cff_index(&self.local_subrs)
        };
        let charset = self.charset.clone().unwrap_or_default();
        let encoding = self.encoding.clone().unwrap_or_default();
        let fd_select = if self.cid { self.fd_select() } else { Vec::new() };

        // DICT sizes don't depend on the actual offsets.
        let mut layout = Layout::default();
        let top_dict_len = cff_index(&[self.top_dict(&layout)]).len();
        let fd_array_len = if self.cid {
            cff_index(&[self.font_dict(&layout)]).len()
        } else {
            0
        };

        let mut offset = header.len() + name_index.len() + top_dict_len;
        offset += string_index.len() + global_subrs_index.len();
        layout.char_strings = offset;
        offset += char_strings_index.len();
        layout.private = offset;
        layout.private_len = private_dict.len();
        offset += private_dict.len() + local_subrs_index.len();
        layout.charset = offset;
        offset += charset.len();
        layout.encoding = offset;
        offset += encoding.len();
        layout.fd_array = offset;
        offset += fd_array_len;
        layout.fd_select = offset;

        let mut data = Vec::new();
        data.extend_from_slice(&header);
        data.extend(name_index);
        data.extend(cff_index(&[self.top_dict(&layout)]));
        data.extend(string_index);
        data.extend(global_subrs_index);
        data.extend(char_strings_index);
        data.extend(private_dict);
        data.extend(local_subrs_index);
        data.extend(charset);
        data.extend(encoding);
        if self.cid {
            data.extend(cff_index(&[self.font_dict(&layout)]));
        }
        data.extend(fd_select);

        data
    }
}

#[derive(Default)]
struct Layout {
    char_strings: usize,
    private: usize,
    private_len: usize,
    charset: usize,
    encoding: usize,
    fd_array: usize,
    fd_select: usize,
}
