//! Binary parsing utils.

use core::convert::TryInto;
use core::marker::PhantomData;

use crate::GlyphId;

/// A trait for parsing raw binary data of fixed size.
pub(crate) trait FromData: Sized {
    /// Object's raw data size.
    const SIZE: usize;

    /// Parses an object from a raw data.
    fn parse(data: &[u8]) -> Option<Self>;
}

impl FromData for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.first().copied()
    }
}

impl FromData for u16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(Self::from_be_bytes)
    }
}

impl FromData for i16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(Self::from_be_bytes)
    }
}

impl FromData for u32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(Self::from_be_bytes)
    }
}

impl FromData for i32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(Self::from_be_bytes)
    }
}

impl FromData for GlyphId {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        u16::parse(data).map(GlyphId)
    }
}

/// A u24 number.
///
/// Stored as u32, but encoded as 3 bytes in the font.
#[derive(Clone, Copy, Debug)]
pub(crate) struct U24(pub u32);

impl FromData for U24 {
    const SIZE: usize = 3;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let data: [u8; 3] = data.try_into().ok()?;
        Some(Self(u32::from_be_bytes([0, data[0], data[1], data[2]])))
    }
}

/// A 16.16 fixed-point number.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Fixed(pub f32);

impl FromData for Fixed {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        i32::parse(data).map(|n| Self(n as f32 / 65536.0))
    }
}

/// A safe u32 to usize casting.
///
/// Rust doesn't implement `From<u32> for usize`,
/// because it has to support 16 bit targets.
/// We don't, so we can allow this.
pub(crate) trait NumFrom<T>: Sized {
    /// Converts u32 into usize.
    fn num_from(_: T) -> Self;
}

impl NumFrom<u32> for usize {
    #[inline]
    fn num_from(v: u32) -> Self {
        #[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
        {
            v as Self
        }

        // compilation error on 16 bit targets
    }
}

/// A slice-like container that converts internal binary data only on access.
///
/// Array values are stored in a continuous data chunk.
#[derive(Clone, Copy)]
pub(crate) struct LazyArray16<'a, T> {
    data: &'a [u8],
    data_type: PhantomData<T>,
}

impl<T> Default for LazyArray16<'_, T> {
    #[inline]
    fn default() -> Self {
        LazyArray16 {
            data: &[],
            data_type: PhantomData,
        }
    }
}

impl<'a, T: FromData> LazyArray16<'a, T> {
    /// Creates a new `LazyArray`.
    #[inline]
    pub(crate) fn new(data: &'a [u8]) -> Self {
        LazyArray16 {
            data,
            data_type: PhantomData,
        }
    }

    /// Returns a value at `index`.
    #[inline]
    pub(crate) fn get(&self, index: u16) -> Option<T> {
        if index < self.len() {
            let start = usize::from(index) * T::SIZE;
            let end = start + T::SIZE;
            self.data.get(start..end).and_then(T::parse)
        } else {
            None
        }
    }

    /// Returns array's length.
    #[inline]
    pub(crate) fn len(&self) -> u16 {
        (self.data.len() / T::SIZE) as u16
    }

    /// Checks if array is empty.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: FromData + core::fmt::Debug + Copy> core::fmt::Debug for LazyArray16<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(*self).finish()
    }
}

impl<'a, T: FromData> IntoIterator for LazyArray16<'a, T> {
    type Item = T;
    type IntoIter = LazyArrayIter16<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        LazyArrayIter16 {
            data: self,
            index: 0,
        }
    }
}

/// An iterator over `LazyArray16`.
#[derive(Clone, Copy)]
#[allow(missing_debug_implementations)]
pub(crate) struct LazyArrayIter16<'a, T> {
    data: LazyArray16<'a, T>,
    index: u16,
}

impl<T: FromData> Iterator for LazyArrayIter16<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.index = self.index.checked_add(1)?;
        self.data.get(self.index - 1)
    }

    #[inline]
    fn count(self) -> usize {
        usize::from(self.data.len().saturating_sub(self.index))
    }
}

/// A streaming binary parser.
#[derive(Clone, Default, Debug)]
pub(crate) struct Stream<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Stream<'a> {
    /// Creates a new `Stream` parser.
    #[inline]
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Stream { data, offset: 0 }
    }

    /// Creates a new `Stream` parser at offset.
    ///
    /// Returns `None` when `offset` is out of bounds.
    #[inline]
    pub(crate) fn new_at(data: &'a [u8], offset: usize) -> Option<Self> {
        if offset <= data.len() {
            Some(Stream { data, offset })
        } else {
            None
        }
    }

    /// Checks that stream reached the end of the data.
    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Returns the current offset.
    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the trailing data.
    ///
    /// Returns `None` when `Stream` is reached the end.
    #[inline]
    pub(crate) fn tail(&self) -> Option<&'a [u8]> {
        self.data.get(self.offset..)
    }

    /// Advances by `FromData::SIZE`.
    ///
    /// Doesn't check bounds.
    #[inline]
    pub(crate) fn skip<T: FromData>(&mut self) {
        self.advance(T::SIZE);
    }

    /// Advances by the specified `len`.
    ///
    /// Doesn't check bounds.
    #[inline]
    pub(crate) fn advance(&mut self, len: usize) {
        self.offset += len;
    }

    /// Advances by the specified `len` and checks for bounds.
    #[inline]
    pub(crate) fn advance_checked(&mut self, len: usize) -> Option<()> {
        if self.offset.checked_add(len)? <= self.data.len() {
            self.advance(len);
            Some(())
        } else {
            None
        }
    }

    /// Parses the type from the stream.
    ///
    /// Returns `None` when there is not enough data left in the stream
    /// or the type parsing failed.
    #[inline]
    pub(crate) fn read<T: FromData>(&mut self) -> Option<T> {
        self.read_bytes(T::SIZE).and_then(T::parse)
    }

    /// Reads N bytes from the stream.
    #[inline]
    pub(crate) fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        // Lengths come straight from the font, so the end may overflow.
        let end = self.offset.checked_add(len)?;
        let v = self.data.get(self.offset..end)?;
        self.advance(len);
        Some(v)
    }

    /// Reads the next `count` types as a slice.
    #[inline]
    pub(crate) fn read_array16<T: FromData>(&mut self, count: u16) -> Option<LazyArray16<'a, T>> {
        let len = usize::from(count) * T::SIZE;
        self.read_bytes(len).map(LazyArray16::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_big_endian() {
        let mut s = Stream::new(&[0x01, 0x02, 0xFF, 0xFE, 0x00, 0x01, 0x00]);
        assert_eq!(s.read::<u16>(), Some(0x0102));
        assert_eq!(s.read::<i16>(), Some(-2));
        assert_eq!(s.read::<U24>().map(|n| n.0), Some(0x0100));
        assert!(s.at_end());
        assert_eq!(s.read::<u8>(), None);
    }

    #[test]
    fn read_fixed() {
        let mut s = Stream::new(&[0x00, 0x01, 0x80, 0x00]);
        assert_eq!(s.read::<Fixed>(), Some(Fixed(1.5)));
    }

    #[test]
    fn new_at_out_of_bounds() {
        assert!(Stream::new_at(&[1, 2], 2).is_some());
        assert!(Stream::new_at(&[1, 2], 3).is_none());
    }

    #[test]
    fn advance_checked_past_end() {
        let mut s = Stream::new(&[1, 2, 3]);
        assert_eq!(s.advance_checked(2), Some(()));
        assert_eq!(s.advance_checked(2), None);
        assert_eq!(s.offset(), 2);
    }

    #[test]
    fn lazy_array() {
        let data = [0x00, 0x01, 0x00, 0x02, 0x00];
        let array = LazyArray16::<u16>::new(&data);
        assert_eq!(array.len(), 2);
        assert_eq!(array.get(1), Some(2));
        assert_eq!(array.get(2), None);
        assert_eq!(array.into_iter().count(), 2);
        assert!(!array.is_empty());
        assert!(LazyArray16::<u16>::default().is_empty());
    }

    #[test]
    fn read_bytes_with_huge_length() {
        let mut s = Stream::new(&[1, 2, 3]);
        s.advance(1);
        assert_eq!(s.read_bytes(usize::MAX), None);
        assert_eq!(s.read_bytes(u32::MAX as usize), None);
        assert_eq!(s.offset(), 1);
        assert_eq!(s.read_bytes(2), Some(&[2, 3][..]));
    }
}
