use ndef_sink::OutputSink;
use tracing::{debug, trace};

use crate::{
    error::{DecodeError, EncodeError},
    ndef_type::NdefType,
    parser::{
        self,
        stream::{InputCursor, StreamExt as _},
    },
    position::{Position, RecordFlags},
};

/// Payloads shorter than this use the one byte length form
pub const SHORT_RECORD_LIMIT: usize = 256;

/// Flags, type length and a short payload length
pub const MIN_HEADER_LENGTH: usize = 3;

/// The envelope of a single record, borrowed from the input it was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader<'a> {
    pub position: Position,
    pub type_name_format: NdefType,
    pub short_record: bool,
    pub type_: &'a [u8],
    pub id: Option<&'a [u8]>,
    pub payload_length: u32,
    pub payload: &'a [u8],
}

impl<'a> RecordHeader<'a> {
    /// Decode the record starting at the cursor, returns the header and the number of bytes the
    /// whole record takes. The cursor itself is not moved.
    pub fn decode(cursor: &InputCursor<'a>) -> Result<(Self, usize), DecodeError> {
        let available = cursor.available();
        if available < MIN_HEADER_LENGTH {
            return Err(DecodeError::Truncated {
                needed: MIN_HEADER_LENGTH - available,
            });
        }

        let flags = RecordFlags::from_bits_retain(cursor.remaining()[0]);
        if flags.contains(RecordFlags::CHUNKED) {
            debug!(index = cursor.index(), "rejecting chunked record");
            return Err(DecodeError::ChunkedRecord);
        }

        let mut input = cursor.stream();
        let header = parser::parse_record_header(&mut input)?;

        Ok((header, available - input.len()))
    }

    pub fn is_type(&self, type_: &str) -> bool {
        self.type_ == type_.as_bytes()
    }

    pub(crate) fn expect_type(&self, expected: &'static str) -> Result<(), DecodeError> {
        if self.is_type(expected) {
            return Ok(());
        }

        Err(DecodeError::UnexpectedType {
            expected,
            found: String::from_utf8_lossy(self.type_).into_owned(),
        })
    }
}

/// Write a record header without its payload, returns the number of bytes written
///
/// An empty `type_` writes a type length of zero. Nothing is written when the type or payload
/// length cannot be represented.
pub fn write_header(
    sink: &mut OutputSink,
    type_name_format: NdefType,
    type_: &[u8],
    position: Position,
    payload_length: usize,
) -> Result<usize, EncodeError> {
    let type_length =
        u8::try_from(type_.len()).map_err(|_| EncodeError::TypeTooLong(type_.len()))?;

    let long_length =
        u32::try_from(payload_length).map_err(|_| EncodeError::PayloadTooLong(payload_length))?;

    let short_record = payload_length < SHORT_RECORD_LIMIT;

    let mut flags = position.flags() | RecordFlags::from_bits_retain(type_name_format.bits());
    flags.set(RecordFlags::SHORT_RECORD, short_record);

    trace!(
        flags = flags.bits(),
        type_length,
        payload_length,
        "writing record header"
    );

    sink.push(flags.bits())?;
    sink.push(type_length)?;

    let length_bytes = if short_record {
        sink.push(long_length as u8)?;
        1
    } else {
        sink.extend_from_slice(&long_length.to_be_bytes())?;
        4
    };

    sink.extend_from_slice(type_)?;

    Ok(2 + length_bytes + type_.len())
}

/// Write a complete record of any type name format, header followed by `payload`
pub fn write_record(
    sink: &mut OutputSink,
    type_name_format: NdefType,
    type_: &[u8],
    position: Position,
    payload: &[u8],
) -> Result<usize, EncodeError> {
    let header_length = write_header(sink, type_name_format, type_, position, payload.len())?;
    sink.extend_from_slice(payload)?;

    Ok(header_length + payload.len())
}
