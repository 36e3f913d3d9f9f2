//! winnow-based little-endian readers over one mesh slice.
//!
//! Every read checks the remaining length before it consumes anything, so a
//! short buffer is reported at the offending read with its absolute offset
//! instead of being partially consumed.

use winnow::Parser;
use winnow::binary::{le_f32, le_i32, le_u8, le_u16, le_u32};
use winnow::combinator::repeat;
use winnow::error::{ContextError, ErrMode};
use winnow::token::take;

use crate::error::{MeshError, MeshResult};

/// Common result type for winnow parsers.
pub type WResult<T> = Result<T, ErrMode<ContextError>>;

/// Cursor over the bytes of a single mesh slice.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    input: &'a [u8],
    /// Absolute offset of the first byte of the slice in the caller's buffer.
    base: usize,
    len: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8], base: usize) -> Self {
        Self {
            input: data,
            base,
            len: data.len(),
        }
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.base + (self.len - self.input.len())
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Fail with [`MeshError::Truncated`] unless `needed` bytes remain.
    pub fn ensure(&self, what: &'static str, needed: usize) -> MeshResult<()> {
        if needed > self.input.len() {
            return Err(MeshError::Truncated {
                what,
                offset: self.position(),
                needed,
                available: self.input.len(),
            });
        }
        Ok(())
    }

    /// Run `parser` after checking that `needed` bytes are available.
    pub fn parse<O, P>(
        &mut self,
        what: &'static str,
        needed: usize,
        mut parser: P,
    ) -> MeshResult<O>
    where
        P: Parser<&'a [u8], O, ErrMode<ContextError>>,
    {
        self.ensure(what, needed)?;
        let offset = self.position();
        let available = self.input.len();
        parser
            .parse_next(&mut self.input)
            .map_err(|_| MeshError::Truncated {
                what,
                offset,
                needed,
                available,
            })
    }

    pub fn u8(&mut self, what: &'static str) -> MeshResult<u8> {
        self.parse(what, 1, le_u8)
    }

    pub fn u32(&mut self, what: &'static str) -> MeshResult<u32> {
        self.parse(what, 4, le_u32)
    }

    pub fn i32(&mut self, what: &'static str) -> MeshResult<i32> {
        self.parse(what, 4, le_i32)
    }

    pub fn bytes(&mut self, what: &'static str, len: usize) -> MeshResult<&'a [u8]> {
        self.parse(what, len, take(len))
    }

    /// Read `count` consecutive `f32` values.
    pub fn f32_array(&mut self, what: &'static str, count: usize) -> MeshResult<Vec<f32>> {
        let needed = self.byte_len(what, count, 4)?;
        self.parse(what, needed, repeat(count, le_f32))
    }

    pub fn u8_array(&mut self, what: &'static str, count: usize) -> MeshResult<Vec<u8>> {
        self.parse(what, count, repeat(count, le_u8))
    }

    pub fn u16_array(&mut self, what: &'static str, count: usize) -> MeshResult<Vec<u16>> {
        let needed = self.byte_len(what, count, 2)?;
        self.parse(what, needed, repeat(count, le_u16))
    }

    pub fn i32_array(&mut self, what: &'static str, count: usize) -> MeshResult<Vec<i32>> {
        let needed = self.byte_len(what, count, 4)?;
        self.parse(what, needed, repeat(count, le_i32))
    }

    fn byte_len(&self, what: &'static str, count: usize, width: usize) -> MeshResult<usize> {
        count.checked_mul(width).ok_or(MeshError::Truncated {
            what,
            offset: self.position(),
            needed: usize::MAX,
            available: self.input.len(),
        })
    }
}
