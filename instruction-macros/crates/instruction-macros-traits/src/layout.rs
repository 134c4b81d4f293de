//! The [`Layout`] trait: a packed, little-endian, length-exact binary layout.
//!
//! Records compose their fields in declaration order with no padding or alignment. The format is
//! the one the Plasma program reads, which is byte-compatible with Borsh.

use crate::{
    error::{
        DecodingError,
        DecodingErrorKind,
        EncodingError,
        EncodingErrorKind,
    },
    schema::LayoutKind,
};

pub trait Layout: Sized {
    /// The exact number of bytes [`Layout::encode_into`] writes for `self`.
    fn encoded_len(&self) -> usize;

    /// Writes `self` into `dst` starting at `offset` and returns the number of bytes written.
    fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError>;

    /// Reads a value from `src` starting at `offset`, returning it with the number of bytes read.
    fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError>;

    fn describe() -> LayoutKind;

    /// Measures, allocates exactly, then writes once.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let measured = self.encoded_len();
        let mut bytes = vec![0; measured];
        let written = self.encode_into(&mut bytes, 0)?;
        if written != measured {
            return Err(EncodingErrorKind::LengthMismatch { written, measured }.into());
        }
        Ok(bytes)
    }

    /// Decodes a value that must span all of `bytes`.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodingError> {
        let (value, read) = Self::decode_from(bytes, 0)?;
        match bytes.len().saturating_sub(read) {
            0 => Ok(value),
            remaining => Err(DecodingErrorKind::TrailingBytes { remaining }.into()),
        }
    }
}

/// Variable-length values whose element count can be bounded by a declared maximum.
pub trait SequenceLen {
    fn sequence_len(&self) -> usize;
}

impl<T> SequenceLen for Vec<T> {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

impl SequenceLen for String {
    fn sequence_len(&self) -> usize {
        self.len()
    }
}

impl<T: SequenceLen> SequenceLen for Option<T> {
    fn sequence_len(&self) -> usize {
        self.as_ref().map_or(0, SequenceLen::sequence_len)
    }
}

/// Rejects a value longer than a field's declared maximum before anything is written.
pub fn check_max_len<T: SequenceLen>(value: &T, max: usize) -> Result<(), EncodingError> {
    let len = value.sequence_len();
    if len > max {
        return Err(EncodingErrorKind::LengthExceedsMax { len, max }.into());
    }
    Ok(())
}

/// Rejects a decoded value longer than a field's declared maximum.
pub fn check_decoded_max_len<T: SequenceLen>(value: &T, max: usize) -> Result<(), DecodingError> {
    let len = value.sequence_len();
    if len > max {
        return Err(DecodingErrorKind::LengthExceedsMax { len, max }.into());
    }
    Ok(())
}

/// Copies `src` into `dst[offset..]`, failing instead of panicking when `dst` is too short.
#[inline(always)]
pub fn write_bytes(dst: &mut [u8], offset: usize, src: &[u8]) -> Result<usize, EncodingError> {
    let available = dst.len().saturating_sub(offset);
    match offset
        .checked_add(src.len())
        .and_then(|end| dst.get_mut(offset..end))
    {
        Some(dst) => {
            dst.copy_from_slice(src);
            Ok(src.len())
        }
        None => Err(EncodingErrorKind::BufferTooSmall {
            needed: src.len(),
            available,
        }
        .into()),
    }
}

/// Reads exactly `N` bytes at `offset`.
#[inline(always)]
pub fn read_bytes<const N: usize>(src: &[u8], offset: usize) -> Result<[u8; N], DecodingError> {
    let available = src.len().saturating_sub(offset);
    offset
        .checked_add(N)
        .and_then(|end| src.get(offset..end))
        .and_then(|bytes| <[u8; N]>::try_from(bytes).ok())
        .ok_or_else(|| DecodingErrorKind::Truncated { needed: N, available }.into())
}
