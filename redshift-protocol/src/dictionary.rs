//! Dictionary encoding and decoding for phone/watch messages.
//!
//! Dictionary format (multi-byte fields are little-endian):
//! - COUNT (1 byte): number of tuples that follow
//! - then COUNT tuples, each:
//!   - KEY (4 bytes): message key
//!   - TYPE (1 byte): wire type, see [`TupleType`]
//!   - LENGTH (2 bytes): value length in bytes
//!   - VALUE (LENGTH bytes)
//!
//! Bytes after the last counted tuple are ignored.

use heapless::Vec;

/// Size of the dictionary header (COUNT)
pub const DICT_HEADER_SIZE: usize = 1;

/// Size of a tuple header (KEY + TYPE + LENGTH)
pub const TUPLE_HEADER_SIZE: usize = 4 + 1 + 2;

/// Errors that can occur during dictionary parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictionaryError {
    /// Payload has no COUNT byte
    Empty,
    /// A tuple header or value runs past the end of the payload
    Truncated,
    /// Tuple TYPE byte is not a known wire type
    UnknownType(u8),
    /// Tuple does not carry an integer
    NotAnInteger,
    /// Tuple does not carry a byte array
    NotByteArray,
    /// Integer tuple is not 1, 2 or 4 bytes wide
    InvalidWidth(u16),
    /// Buffer too small for encoding
    BufferTooSmall,
    /// A dictionary holds at most 255 tuples
    TooManyTuples,
}

/// Wire type of a tuple value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleType {
    /// Raw bytes
    ByteArray,
    /// NUL-terminated string
    CString,
    /// Unsigned little-endian integer
    Uint,
    /// Signed little-endian integer
    Int,
}

// Wire format values
const TYPE_BYTE_ARRAY: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

impl TupleType {
    /// Parse a wire type from its TYPE byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TYPE_BYTE_ARRAY => Some(TupleType::ByteArray),
            TYPE_CSTRING => Some(TupleType::CString),
            TYPE_UINT => Some(TupleType::Uint),
            TYPE_INT => Some(TupleType::Int),
            _ => None,
        }
    }

    /// Convert to TYPE byte
    pub fn to_byte(self) -> u8 {
        match self {
            TupleType::ByteArray => TYPE_BYTE_ARRAY,
            TupleType::CString => TYPE_CSTRING,
            TupleType::Uint => TYPE_UINT,
            TupleType::Int => TYPE_INT,
        }
    }
}

/// A single key/value entry borrowed from a dictionary payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple<'a> {
    /// Message key
    pub key: u32,
    /// Wire type of `value`
    pub tuple_type: TupleType,
    /// Raw value bytes (LENGTH bytes)
    pub value: &'a [u8],
}

impl<'a> Tuple<'a> {
    /// Read the value as an integer, widened to `i64`
    ///
    /// Accepts both integer wire types at widths of 1, 2 or 4 bytes.
    pub fn integer(&self) -> Result<i64, DictionaryError> {
        let width = self.value.len() as u16;
        match self.tuple_type {
            TupleType::Uint => {
                let value = match *self.value {
                    [b] => u32::from(b),
                    [b0, b1] => u32::from(u16::from_le_bytes([b0, b1])),
                    [b0, b1, b2, b3] => u32::from_le_bytes([b0, b1, b2, b3]),
                    _ => return Err(DictionaryError::InvalidWidth(width)),
                };
                Ok(i64::from(value))
            }
            TupleType::Int => {
                let value = match *self.value {
                    [b] => i32::from(b as i8),
                    [b0, b1] => i32::from(i16::from_le_bytes([b0, b1])),
                    [b0, b1, b2, b3] => i32::from_le_bytes([b0, b1, b2, b3]),
                    _ => return Err(DictionaryError::InvalidWidth(width)),
                };
                Ok(i64::from(value))
            }
            TupleType::ByteArray | TupleType::CString => Err(DictionaryError::NotAnInteger),
        }
    }

    /// Raw bytes of a byte-array tuple
    pub fn bytes(&self) -> Option<&'a [u8]> {
        match self.tuple_type {
            TupleType::ByteArray => Some(self.value),
            _ => None,
        }
    }
}

/// A parsed dictionary header over a borrowed payload
///
/// Parsing is lazy: tuples are decoded while iterating, so a payload with
/// a corrupt tail still yields every tuple before the corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dictionary<'a> {
    count: u8,
    body: &'a [u8],
}

impl<'a> Dictionary<'a> {
    /// Wrap a payload, reading its COUNT byte
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DictionaryError> {
        let (&count, body) = bytes.split_first().ok_or(DictionaryError::Empty)?;
        Ok(Self { count, body })
    }

    /// Number of tuples announced by the header
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Check if the header announces no tuples
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate over the tuples
    pub fn iter(&self) -> Tuples<'a> {
        Tuples {
            remaining: self.count,
            rest: self.body,
        }
    }

    /// Find the first well-formed tuple with the given key
    pub fn find(&self, key: u32) -> Option<Tuple<'a>> {
        self.iter()
            .filter_map(Result::ok)
            .find(|tuple| tuple.key == key)
    }
}

impl<'a> IntoIterator for &Dictionary<'a> {
    type Item = Result<Tuple<'a>, DictionaryError>;
    type IntoIter = Tuples<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tuples of a [`Dictionary`]
///
/// A tuple with an unknown TYPE byte yields `Err(UnknownType)` and is
/// skipped; iteration continues with the next tuple. A truncated tuple
/// yields `Err(Truncated)` and ends iteration.
#[derive(Debug, Clone)]
pub struct Tuples<'a> {
    remaining: u8,
    rest: &'a [u8],
}

impl<'a> Iterator for Tuples<'a> {
    type Item = Result<Tuple<'a>, DictionaryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let rest = self.rest;
        if rest.len() < TUPLE_HEADER_SIZE {
            self.remaining = 0;
            return Some(Err(DictionaryError::Truncated));
        }

        let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
        let type_byte = rest[4];
        let length = u16::from_le_bytes([rest[5], rest[6]]) as usize;

        let value_end = TUPLE_HEADER_SIZE + length;
        if rest.len() < value_end {
            self.remaining = 0;
            return Some(Err(DictionaryError::Truncated));
        }

        let value = &rest[TUPLE_HEADER_SIZE..value_end];
        self.rest = &rest[value_end..];
        self.remaining -= 1;

        match TupleType::from_byte(type_byte) {
            Some(tuple_type) => Some(Ok(Tuple {
                key,
                tuple_type,
                value,
            })),
            None => Some(Err(DictionaryError::UnknownType(type_byte))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}

/// Builder for an encoded dictionary in a fixed-capacity buffer
#[derive(Debug, Clone)]
pub struct DictionaryWriter<const N: usize> {
    buffer: Vec<u8, N>,
    count: u8,
}

impl<const N: usize> DictionaryWriter<N> {
    /// Start an empty dictionary
    pub fn new() -> Result<Self, DictionaryError> {
        let mut buffer = Vec::new();
        buffer
            .push(0)
            .map_err(|_| DictionaryError::BufferTooSmall)?;
        Ok(Self { buffer, count: 0 })
    }

    /// Number of tuples written so far
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Check if no tuple has been written
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Append a tuple with an arbitrary wire type and raw value
    pub fn push_raw(
        &mut self,
        key: u32,
        tuple_type: TupleType,
        value: &[u8],
    ) -> Result<&mut Self, DictionaryError> {
        if self.count == u8::MAX {
            return Err(DictionaryError::TooManyTuples);
        }
        let length = u16::try_from(value.len()).map_err(|_| DictionaryError::BufferTooSmall)?;

        // Validate capacity up front so a failed push leaves the buffer intact
        if self.buffer.len() + TUPLE_HEADER_SIZE + value.len() > N {
            return Err(DictionaryError::BufferTooSmall);
        }

        let mut header = [0u8; TUPLE_HEADER_SIZE];
        header[..4].copy_from_slice(&key.to_le_bytes());
        header[4] = tuple_type.to_byte();
        header[5..].copy_from_slice(&length.to_le_bytes());

        self.buffer
            .extend_from_slice(&header)
            .map_err(|_| DictionaryError::BufferTooSmall)?;
        self.buffer
            .extend_from_slice(value)
            .map_err(|_| DictionaryError::BufferTooSmall)?;

        self.count += 1;
        Ok(self)
    }

    /// Append a 1-byte unsigned integer
    pub fn push_u8(&mut self, key: u32, value: u8) -> Result<&mut Self, DictionaryError> {
        self.push_raw(key, TupleType::Uint, &[value])
    }

    /// Append a 2-byte unsigned integer
    pub fn push_u16(&mut self, key: u32, value: u16) -> Result<&mut Self, DictionaryError> {
        self.push_raw(key, TupleType::Uint, &value.to_le_bytes())
    }

    /// Append a 4-byte unsigned integer
    pub fn push_u32(&mut self, key: u32, value: u32) -> Result<&mut Self, DictionaryError> {
        self.push_raw(key, TupleType::Uint, &value.to_le_bytes())
    }

    /// Append a 1-byte signed integer
    pub fn push_i8(&mut self, key: u32, value: i8) -> Result<&mut Self, DictionaryError> {
        self.push_raw(key, TupleType::Int, &value.to_le_bytes())
    }

    /// Append a 2-byte signed integer
    pub fn push_i16(&mut self, key: u32, value: i16) -> Result<&mut Self, DictionaryError> {
        self.push_raw(key, TupleType::Int, &value.to_le_bytes())
    }

    /// Append a 4-byte signed integer
    pub fn push_i32(&mut self, key: u32, value: i32) -> Result<&mut Self, DictionaryError> {
        self.push_raw(key, TupleType::Int, &value.to_le_bytes())
    }

    /// Append a byte array
    pub fn push_bytes(&mut self, key: u32, value: &[u8]) -> Result<&mut Self, DictionaryError> {
        self.push_raw(key, TupleType::ByteArray, value)
    }

    /// Finish encoding and return the payload
    pub fn finish(mut self) -> Vec<u8, N> {
        self.buffer[0] = self.count;
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_one(key: u32, tuple_type: TupleType, value: &[u8]) -> Vec<u8, 64> {
        let mut writer = DictionaryWriter::<64>::new().unwrap();
        writer.push_raw(key, tuple_type, value).unwrap();
        writer.finish()
    }

    #[test]
    fn test_encode_layout() {
        let encoded = encode_one(0x0102_0304, TupleType::Uint, &[0x2A]);

        assert_eq!(encoded.len(), DICT_HEADER_SIZE + TUPLE_HEADER_SIZE + 1);
        assert_eq!(encoded[0], 1); // count
        assert_eq!(&encoded[1..5], &[0x04, 0x03, 0x02, 0x01]); // key, little-endian
        assert_eq!(encoded[5], 2); // Uint
        assert_eq!(&encoded[6..8], &[1, 0]); // length
        assert_eq!(encoded[8], 0x2A);
    }

    #[test]
    fn test_parse_multiple_tuples() {
        let mut writer = DictionaryWriter::<64>::new().unwrap();
        writer.push_u8(1, 7).unwrap().push_i16(2, -300).unwrap();
        let encoded = writer.finish();

        let dict = Dictionary::parse(&encoded).unwrap();
        assert_eq!(dict.len(), 2);

        let tuples: heapless::Vec<Tuple, 4> = dict.iter().map(|t| t.unwrap()).collect();
        assert_eq!(tuples[0].key, 1);
        assert_eq!(tuples[0].integer(), Ok(7));
        assert_eq!(tuples[1].key, 2);
        assert_eq!(tuples[1].tuple_type, TupleType::Int);
        assert_eq!(tuples[1].integer(), Ok(-300));
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(Dictionary::parse(&[]), Err(DictionaryError::Empty));
    }

    #[test]
    fn test_zero_count_ignores_trailing_bytes() {
        let dict = Dictionary::parse(&[0, 0xFF, 0xFF]).unwrap();
        assert!(dict.is_empty());
        assert_eq!(dict.iter().count(), 0);
    }

    #[test]
    fn test_truncated_value_stops_iteration() {
        let mut encoded = encode_one(5, TupleType::Uint, &[1, 0, 0, 0]);
        encoded.truncate(encoded.len() - 2);

        let dict = Dictionary::parse(&encoded).unwrap();
        let mut iter = dict.iter();
        assert_eq!(iter.next(), Some(Err(DictionaryError::Truncated)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_count_larger_than_body() {
        let mut encoded = encode_one(9, TupleType::Uint, &[3]);
        encoded[0] = 3;

        let dict = Dictionary::parse(&encoded).unwrap();
        let mut iter = dict.iter();
        assert_eq!(iter.next().unwrap().unwrap().key, 9);
        assert_eq!(iter.next(), Some(Err(DictionaryError::Truncated)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let mut writer = DictionaryWriter::<64>::new().unwrap();
        writer.push_u8(1, 1).unwrap().push_u8(2, 2).unwrap();
        let mut encoded = writer.finish();
        // TYPE byte of the first tuple
        encoded[5] = 0x7F;

        let dict = Dictionary::parse(&encoded).unwrap();
        let mut iter = dict.iter();
        assert_eq!(iter.next(), Some(Err(DictionaryError::UnknownType(0x7F))));
        assert_eq!(iter.next().unwrap().unwrap().key, 2);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_integer_widths() {
        let tuple = Tuple {
            key: 0,
            tuple_type: TupleType::Uint,
            value: &[0xFF, 0xFF, 0xFF, 0xFF],
        };
        assert_eq!(tuple.integer(), Ok(u32::MAX as i64));

        let tuple = Tuple {
            key: 0,
            tuple_type: TupleType::Int,
            value: &[0xFF],
        };
        assert_eq!(tuple.integer(), Ok(-1));

        let tuple = Tuple {
            key: 0,
            tuple_type: TupleType::Uint,
            value: &[1, 2, 3],
        };
        assert_eq!(tuple.integer(), Err(DictionaryError::InvalidWidth(3)));
    }

    #[test]
    fn test_integer_rejects_non_integer_types() {
        let tuple = Tuple {
            key: 0,
            tuple_type: TupleType::CString,
            value: b"1\0",
        };
        assert_eq!(tuple.integer(), Err(DictionaryError::NotAnInteger));
        assert_eq!(tuple.bytes(), None);
    }

    #[test]
    fn test_find() {
        let mut writer = DictionaryWriter::<64>::new().unwrap();
        writer
            .push_u8(10, 1)
            .unwrap()
            .push_bytes(11, &[4, 5, 6])
            .unwrap();
        let encoded = writer.finish();

        let dict = Dictionary::parse(&encoded).unwrap();
        assert_eq!(dict.find(11).and_then(|t| t.bytes()), Some(&[4u8, 5, 6][..]));
        assert!(dict.find(12).is_none());
    }

    #[test]
    fn test_writer_buffer_too_small() {
        // COUNT + one 1-byte tuple
        let mut writer = DictionaryWriter::<9>::new().unwrap();
        assert_eq!(writer.push_u8(1, 1).map(|_| ()), Ok(()));
        assert_eq!(
            writer.push_u8(2, 2).map(|_| ()),
            Err(DictionaryError::BufferTooSmall)
        );

        // The failed push must not leave a partial tuple behind
        let encoded = writer.finish();
        let dict = Dictionary::parse(&encoded).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.iter().count(), 1);
    }
}
