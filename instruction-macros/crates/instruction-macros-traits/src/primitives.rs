//! [`Layout`] implementations for scalars, addresses, arrays, sequences and options.

use solana_address::Address;

use crate::{
    error::{
        DecodingError,
        DecodingErrorKind,
        EncodingError,
        EncodingErrorKind,
    },
    layout::{
        read_bytes,
        write_bytes,
        Layout,
    },
    schema::LayoutKind,
};

pub const U32_SIZE: usize = 4;
pub const ADDRESS_SIZE: usize = 32;

macro_rules! impl_le_layout {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Layout for $ty {
                #[inline(always)]
                fn encoded_len(&self) -> usize {
                    size_of::<$ty>()
                }

                #[inline(always)]
                fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
                    write_bytes(dst, offset, &self.to_le_bytes())
                }

                #[inline(always)]
                fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError> {
                    let bytes = read_bytes::<{ size_of::<$ty>() }>(src, offset)?;
                    Ok((<$ty>::from_le_bytes(bytes), size_of::<$ty>()))
                }

                fn describe() -> LayoutKind {
                    LayoutKind::$kind
                }
            }
        )*
    };
}

impl_le_layout!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
);

impl Layout for () {
    fn encoded_len(&self) -> usize {
        0
    }

    fn encode_into(&self, _dst: &mut [u8], _offset: usize) -> Result<usize, EncodingError> {
        Ok(0)
    }

    fn decode_from(_src: &[u8], _offset: usize) -> Result<(Self, usize), DecodingError> {
        Ok(((), 0))
    }

    fn describe() -> LayoutKind {
        LayoutKind::Unit
    }
}

impl Layout for bool {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
        write_bytes(dst, offset, &[*self as u8])
    }

    fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError> {
        match read_bytes::<1>(src, offset)? {
            [0] => Ok((false, 1)),
            [1] => Ok((true, 1)),
            [b] => Err(DecodingErrorKind::InvalidBool(b).into()),
        }
    }

    fn describe() -> LayoutKind {
        LayoutKind::Bool
    }
}

impl Layout for Address {
    fn encoded_len(&self) -> usize {
        ADDRESS_SIZE
    }

    fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
        write_bytes(dst, offset, self.as_ref())
    }

    fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError> {
        let bytes = read_bytes::<ADDRESS_SIZE>(src, offset)?;
        Ok((Address::new_from_array(bytes), ADDRESS_SIZE))
    }

    fn describe() -> LayoutKind {
        LayoutKind::Address
    }
}

impl<T: Layout, const N: usize> Layout for [T; N] {
    fn encoded_len(&self) -> usize {
        self.iter().map(Layout::encoded_len).sum()
    }

    fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
        encode_elements(self, dst, offset)
    }

    fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError> {
        let (elements, read) = decode_elements::<T>(src, offset, N)?;
        let array = <[T; N]>::try_from(elements).map_err(|elements| {
            DecodingError::from(DecodingErrorKind::Truncated {
                needed: N,
                available: elements.len(),
            })
        })?;
        Ok((array, read))
    }

    fn describe() -> LayoutKind {
        LayoutKind::Array {
            len: N,
            element: Box::new(T::describe()),
        }
    }
}

impl<T: Layout> Layout for Vec<T> {
    fn encoded_len(&self) -> usize {
        U32_SIZE + self.iter().map(Layout::encoded_len).sum::<usize>()
    }

    fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
        let prefix = encode_len_prefix(self.len(), dst, offset)?;
        Ok(prefix + encode_elements(self, dst, offset + prefix)?)
    }

    fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError> {
        let (len, prefix) = u32::decode_from(src, offset)?;
        let (elements, read) = decode_elements::<T>(src, offset + prefix, len as usize)?;
        Ok((elements, prefix + read))
    }

    fn describe() -> LayoutKind {
        LayoutKind::Vec {
            element: Box::new(T::describe()),
        }
    }
}

impl Layout for String {
    fn encoded_len(&self) -> usize {
        U32_SIZE + self.len()
    }

    fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
        let prefix = encode_len_prefix(self.len(), dst, offset)?;
        Ok(prefix + write_bytes(dst, offset + prefix, self.as_bytes())?)
    }

    fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError> {
        let (len, prefix) = u32::decode_from(src, offset)?;
        let start = offset + prefix;
        let available = src.len().saturating_sub(start);
        let bytes = src
            .get(start..)
            .and_then(|rest| rest.get(..len as usize))
            .ok_or(DecodingErrorKind::Truncated {
                needed: len as usize,
                available,
            })?;
        let string = std::str::from_utf8(bytes).map_err(|_| DecodingErrorKind::InvalidUtf8)?;
        Ok((string.to_owned(), prefix + bytes.len()))
    }

    fn describe() -> LayoutKind {
        LayoutKind::String
    }
}

impl<T: Layout> Layout for Option<T> {
    fn encoded_len(&self) -> usize {
        1 + self.as_ref().map_or(0, Layout::encoded_len)
    }

    fn encode_into(&self, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
        match self {
            None => write_bytes(dst, offset, &[0]),
            Some(value) => {
                let tag = write_bytes(dst, offset, &[1])?;
                Ok(tag + value.encode_into(dst, offset + tag)?)
            }
        }
    }

    fn decode_from(src: &[u8], offset: usize) -> Result<(Self, usize), DecodingError> {
        match read_bytes::<1>(src, offset)? {
            [0] => Ok((None, 1)),
            [1] => {
                let (value, read) = T::decode_from(src, offset + 1)?;
                Ok((Some(value), 1 + read))
            }
            [tag] => Err(DecodingErrorKind::InvalidOptionTag(tag).into()),
        }
    }

    fn describe() -> LayoutKind {
        LayoutKind::Option {
            inner: Box::new(T::describe()),
        }
    }
}

fn encode_len_prefix(len: usize, dst: &mut [u8], offset: usize) -> Result<usize, EncodingError> {
    let prefix = u32::try_from(len).map_err(|_| EncodingErrorKind::LengthPrefixOverflow { len })?;
    prefix.encode_into(dst, offset)
}

fn encode_elements<T: Layout>(
    elements: &[T],
    dst: &mut [u8],
    offset: usize,
) -> Result<usize, EncodingError> {
    let mut cursor = offset;
    for (i, element) in elements.iter().enumerate() {
        cursor += element
            .encode_into(dst, cursor)
            .map_err(|e| e.within_index(i))?;
    }
    Ok(cursor - offset)
}

fn decode_elements<T: Layout>(
    src: &[u8],
    offset: usize,
    count: usize,
) -> Result<(Vec<T>, usize), DecodingError> {
    // A corrupt length prefix must not turn into a huge allocation; every element is at least
    // one byte except zero-sized layouts.
    let mut elements = Vec::with_capacity(count.min(src.len().saturating_sub(offset)));
    let mut cursor = offset;
    for i in 0..count {
        let (element, read) = T::decode_from(src, cursor).map_err(|e| e.within_index(i))?;
        elements.push(element);
        cursor += read;
    }
    Ok((elements, cursor - offset))
}

#[cfg(test)]
mod tests {
    use borsh::BorshSerialize;

    use super::*;

    fn assert_matches_borsh<T: Layout + BorshSerialize + PartialEq + std::fmt::Debug>(value: T) {
        let bytes = value.to_bytes().expect("Should encode");
        assert_eq!(bytes, borsh::to_vec(&value).expect("Should borsh-encode"));
        assert_eq!(bytes.len(), value.encoded_len());
        assert_eq!(T::from_bytes(&bytes).expect("Should decode"), value);
    }

    #[test]
    fn scalars_are_little_endian() {
        assert_eq!(0x0102_0304u32.to_bytes().unwrap(), [4, 3, 2, 1]);
        assert_eq!((-2i16).to_bytes().unwrap(), [0xfe, 0xff]);
        assert_eq!(u128::MAX.to_bytes().unwrap(), [0xff; 16]);
    }

    #[test]
    fn matches_borsh_byte_for_byte() {
        assert_matches_borsh(42u8);
        assert_matches_borsh(u64::MAX - 7);
        assert_matches_borsh(i64::MIN);
        assert_matches_borsh(true);
        assert_matches_borsh([7u32, 8, 9]);
        assert_matches_borsh(vec![1u16, 2, 3]);
        assert_matches_borsh(Vec::<u64>::new());
        assert_matches_borsh(String::from("plasma"));
        assert_matches_borsh(Some(5u64));
        assert_matches_borsh(None::<u64>);
        assert_matches_borsh(Some(vec![Some(1u8), None]));
    }

    #[test]
    fn address_is_raw_32_bytes() {
        let address = Address::new_from_array([9; 32]);
        // `Address` has an inherent `to_bytes`, so name the trait.
        let bytes = Layout::to_bytes(&address).unwrap();
        assert_eq!(bytes, [9; 32]);
        assert_eq!(<Address as Layout>::from_bytes(&bytes).unwrap(), address);
        assert_eq!(Address::describe().fixed_len(), Some(ADDRESS_SIZE));
    }

    #[test]
    fn invalid_tags_are_rejected() {
        assert_eq!(
            bool::from_bytes(&[2]).unwrap_err().kind,
            DecodingErrorKind::InvalidBool(2)
        );
        assert_eq!(
            Option::<u8>::from_bytes(&[3, 0]).unwrap_err().kind,
            DecodingErrorKind::InvalidOptionTag(3)
        );
    }

    #[test]
    fn truncated_input_is_rejected() {
        let err = u64::from_bytes(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err.kind,
            DecodingErrorKind::Truncated {
                needed: 8,
                available: 3
            }
        );

        // Length prefix claims 3 elements but only 2 follow.
        let err = Vec::<u16>::from_bytes(&[3, 0, 0, 0, 1, 0, 2, 0]).unwrap_err();
        assert_eq!(err.path.to_string(), "[2]");

        let err = String::from_bytes(&[5, 0, 0, 0, b'a']).unwrap_err();
        assert_eq!(
            err.kind,
            DecodingErrorKind::Truncated {
                needed: 5,
                available: 1
            }
        );
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        assert_eq!(
            u16::from_bytes(&[1, 0, 0]).unwrap_err().kind,
            DecodingErrorKind::TrailingBytes { remaining: 1 }
        );
    }

    #[test]
    fn decode_at_offset_reports_bytes_read() {
        let src = [0xaa, 1, 0x2a, 0, 0, 0, 0, 0, 0, 0, 0xbb];
        let (value, read) = Option::<u64>::decode_from(&src, 1).unwrap();
        assert_eq!(value, Some(42));
        assert_eq!(read, 9);
    }

    #[test]
    fn encode_into_short_buffer_fails() {
        let mut dst = [0u8; 4];
        let err = 7u64.encode_into(&mut dst, 0).unwrap_err();
        assert_eq!(
            err.kind,
            EncodingErrorKind::BufferTooSmall {
                needed: 8,
                available: 4
            }
        );
        assert_eq!(dst, [0; 4]);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert_eq!(
            String::from_bytes(&[2, 0, 0, 0, 0xff, 0xfe]).unwrap_err().kind,
            DecodingErrorKind::InvalidUtf8
        );
    }
}
