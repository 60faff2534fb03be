/*!
A CFF and CFF2 font parser.

This crate is derived from the CFF code of [`ttf-parser`](https://github.com/harfbuzz/ttf-parser),
reduced to what is needed for turning the outlines of bare CFF/CFF2 tables into paths.
The input is a single table that has already been sliced out of a font file (or embedded
as a `FontFile3` stream in a PDF), and all structures borrow from that buffer.

The main entry points are [`cff::Table`] and [`cff::cff2::Table`].
*/

#![no_std]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(test)]
extern crate alloc;

#[macro_use]
mod log;

use core::fmt;

use crate::util::TryNumFrom;

pub mod cff;

mod argstack;
mod util;
#[cfg(test)]
mod writer;

/// A type-safe wrapper for glyph ID.
#[repr(transparent)]
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Default, Debug, Hash)]
pub struct GlyphId(pub u16);

/// A trait for glyph outline construction.
pub trait OutlineBuilder {
    /// Appends a `MoveTo` segment.
    ///
    /// Start of a contour.
    fn move_to(&mut self, x: f32, y: f32);

    /// Appends a `LineTo` segment.
    fn line_to(&mut self, x: f32, y: f32);

    /// Appends a `CurveTo` segment.
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);

    /// Appends a `ClosePath` segment.
    ///
    /// End of a contour.
    fn close(&mut self);
}

struct DummyOutline;
impl OutlineBuilder for DummyOutline {
    fn move_to(&mut self, _: f32, _: f32) {}
    fn line_to(&mut self, _: f32, _: f32) {}
    fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {}
    fn close(&mut self) {}
}

/// A rectangle.
///
/// Doesn't guarantee that `x_min` <= `x_max` and/or `y_min` <= `y_max`.
#[repr(C)]
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

impl Rect {
    /// Returns rect's width.
    #[inline]
    pub fn width(&self) -> i32 {
        i32::from(self.x_max) - i32::from(self.x_min)
    }

    /// Returns rect's height.
    #[inline]
    pub fn height(&self) -> i32 {
        i32::from(self.y_max) - i32::from(self.y_min)
    }
}

/// A rectangle described by the left-lower and upper-right points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    /// The horizontal minimum of the rect.
    pub x_min: f32,
    /// The vertical minimum of the rect.
    pub y_min: f32,
    /// The horizontal maximum of the rect.
    pub x_max: f32,
    /// The vertical maximum of the rect.
    pub y_max: f32,
}

impl RectF {
    #[inline]
    fn new() -> Self {
        Self {
            x_min: f32::MAX,
            y_min: f32::MAX,
            x_max: f32::MIN,
            y_max: f32::MIN,
        }
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.x_min == f32::MAX
            && self.y_min == f32::MAX
            && self.x_max == f32::MIN
            && self.y_max == f32::MIN
    }

    #[inline]
    fn extend_by(&mut self, x: f32, y: f32) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }

    #[inline]
    fn to_rect(self) -> Option<Rect> {
        Some(Rect {
            x_min: i16::try_num_from(self.x_min)?,
            y_min: i16::try_num_from(self.y_min)?,
            x_max: i16::try_num_from(self.x_max)?,
            y_max: i16::try_num_from(self.y_max)?,
        })
    }
}

/// A font matrix scaled to a concrete units-per-em value.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Transform {
    sx: f32,
    ky: f32,
    kx: f32,
    sy: f32,
    tx: f32,
    ty: f32,
}

impl Transform {
    /// Returns a transform if `matrix` doesn't simply map a 1000 units em onto
    /// `units_per_em`.
    pub(crate) fn new(matrix: Matrix, units_per_em: Option<u16>) -> Option<Self> {
        let upem = units_per_em?;

        if matrix.is_default() && upem == 1000 {
            return None;
        }

        let upem = f32::from(upem);

        Some(Self {
            sx: matrix.sx * upem,
            ky: matrix.ky * upem,
            kx: matrix.kx * upem,
            sy: matrix.sy * upem,
            tx: matrix.tx * upem,
            ty: matrix.ty * upem,
        })
    }

    #[inline]
    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }
}

pub(crate) struct Builder<'a> {
    pub(crate) builder: &'a mut dyn OutlineBuilder,
    pub(crate) bbox: RectF,
    pub(crate) transform: Option<Transform>,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(builder: &'a mut dyn OutlineBuilder, transform: Option<Transform>) -> Self {
        Self {
            builder,
            bbox: RectF::new(),
            transform,
        }
    }

    #[inline]
    fn point(&mut self, x: f32, y: f32) -> (f32, f32) {
        let (x, y) = match &self.transform {
            Some(ts) => ts.apply(x, y),
            None => (x, y),
        };

        self.bbox.extend_by(x, y);
        (x, y)
    }

    #[inline]
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    #[inline]
    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    #[inline]
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.curve_to(x1, y1, x2, y2, x, y);
    }

    #[inline]
    fn close(&mut self) {
        self.builder.close();
    }

    /// Converts the accumulated bounding box, failing for glyphs without geometry.
    pub(crate) fn finish(self) -> Result<Rect, OutlineError> {
        if self.bbox.is_default() {
            return Err(OutlineError::ZeroBBox);
        }

        self.bbox.to_rect().ok_or(OutlineError::BboxOverflow)
    }
}

/// An affine transformation matrix.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub sx: f32,
    pub ky: f32,
    pub kx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Matrix {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            sx: 0.001,
            ky: 0.0,
            kx: 0.0,
            sy: 0.001,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

/// A list of errors that can occur during CFF/CFF2 glyph outlining.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutlineError {
    NoGlyph,
    ReadOutOfBounds,
    ZeroBBox,
    InvalidOperator,
    UnsupportedOperator,
    MissingEndChar,
    DataAfterEndChar,
    NestingLimitReached,
    ArgumentsStackLimitReached,
    InvalidArgumentsStackLength,
    BboxOverflow,
    MissingMoveTo,
    InvalidSubroutineIndex,
    NoLocalSubroutines,
    InvalidSeacCode,
    InvalidItemVariationDataIndex,
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGlyph => f.write_str("glyph doesn't exist"),
            Self::ReadOutOfBounds => f.write_str("read past the end of the charstring"),
            Self::ZeroBBox => f.write_str("glyph has an empty bounding box"),
            Self::InvalidOperator => f.write_str("invalid charstring operator"),
            Self::UnsupportedOperator => f.write_str("unsupported charstring operator"),
            Self::MissingEndChar => f.write_str("charstring doesn't end with endchar"),
            Self::DataAfterEndChar => f.write_str("data after endchar"),
            Self::NestingLimitReached => f.write_str("subroutine nesting limit reached"),
            Self::ArgumentsStackLimitReached => f.write_str("arguments stack limit reached"),
            Self::InvalidArgumentsStackLength => f.write_str("invalid number of arguments"),
            Self::BboxOverflow => f.write_str("bounding box overflow"),
            Self::MissingMoveTo => f.write_str("missing moveto"),
            Self::InvalidSubroutineIndex => f.write_str("invalid subroutine index"),
            Self::NoLocalSubroutines => f.write_str("no local subroutines"),
            Self::InvalidSeacCode => f.write_str("invalid seac code"),
            Self::InvalidItemVariationDataIndex => {
                f.write_str("invalid item variation data index")
            }
        }
    }
}

impl core::error::Error for OutlineError {}

/// A list of errors that can occur while parsing a CFF/CFF2 table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParseError {
    /// The table is truncated.
    ReadOutOfBounds,
    /// The table has an unsupported major version.
    UnsupportedVersion,
    /// One of the INDEX structures is malformed.
    MalformedIndex,
    /// The Top DICT is malformed.
    MalformedTopDict,
    /// A Private DICT or its local subroutines are malformed.
    MalformedPrivateDict,
    /// The Top DICT doesn't reference any CharStrings.
    MissingCharStrings,
    /// The CharStrings INDEX is empty.
    NoGlyphs,
    /// The CharStrings INDEX has more than 65535 entries.
    TooManyGlyphs,
    /// The charset is malformed.
    MalformedCharset,
    /// The encoding is malformed.
    MalformedEncoding,
    /// The FDArray or FDSelect of a CID-keyed font is missing or malformed.
    MalformedCidData,
    /// A CID-keyed font uses one of the predefined charsets.
    PredefinedCidCharset,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOutOfBounds => f.write_str("table is truncated"),
            Self::UnsupportedVersion => f.write_str("unsupported table version"),
            Self::MalformedIndex => f.write_str("malformed INDEX"),
            Self::MalformedTopDict => f.write_str("malformed Top DICT"),
            Self::MalformedPrivateDict => f.write_str("malformed Private DICT"),
            Self::MissingCharStrings => f.write_str("missing CharStrings"),
            Self::NoGlyphs => f.write_str("font has no glyphs"),
            Self::TooManyGlyphs => f.write_str("font has too many glyphs"),
            Self::MalformedCharset => f.write_str("malformed charset"),
            Self::MalformedEncoding => f.write_str("malformed encoding"),
            Self::MalformedCidData => f.write_str("malformed FDArray or FDSelect"),
            Self::PredefinedCidCharset => f.write_str("CID-keyed font uses a predefined charset"),
        }
    }
}

impl core::error::Error for ParseError {}
