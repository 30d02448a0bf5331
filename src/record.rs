use crate::{
    error::DecodeError,
    header::RecordHeader,
    ndef_type::NdefType,
    parser::stream::InputCursor,
    position::Position,
    smart_poster::{SMART_POSTER_TYPE, SmartPosterRecord},
    text::{TEXT_TYPE, TextRecord},
    uri::{URI_TYPE, UriRecord},
};

/// Anything that can be decoded from the record at a cursor
///
/// Implementations return the value and the number of bytes the record occupies, without moving
/// the cursor. Use [`InputCursor::read`] to decode and advance in one step.
pub trait Decode<'a>: Sized {
    fn decode(cursor: &InputCursor<'a>) -> Result<(Self, usize), DecodeError>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_more::Display, strum::EnumIter)]
pub enum RecordKind {
    Unknown,
    Uri,
    Text,
    SmartPoster,
    /// Recognised as a kind only, no wifi record is ever decoded
    Wifi,
}

/// A record decoded into the most specific variant its type allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedRecord<'a> {
    Unknown(RecordHeader<'a>),
    Uri(UriRecord<'a>),
    Text(TextRecord<'a>),
    SmartPoster(SmartPosterRecord<'a>),
}

impl DecodedRecord<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            DecodedRecord::Unknown(_) => RecordKind::Unknown,
            DecodedRecord::Uri(_) => RecordKind::Uri,
            DecodedRecord::Text(_) => RecordKind::Text,
            DecodedRecord::SmartPoster(_) => RecordKind::SmartPoster,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            DecodedRecord::Unknown(header) => header.position,
            DecodedRecord::Uri(record) => record.position,
            DecodedRecord::Text(record) => record.position,
            DecodedRecord::SmartPoster(record) => record.position,
        }
    }
}

impl<'a> Decode<'a> for RecordHeader<'a> {
    fn decode(cursor: &InputCursor<'a>) -> Result<(Self, usize), DecodeError> {
        RecordHeader::decode(cursor)
    }
}

impl<'a> Decode<'a> for UriRecord<'a> {
    fn decode(cursor: &InputCursor<'a>) -> Result<(Self, usize), DecodeError> {
        let (header, consumed) = RecordHeader::decode(cursor)?;
        Ok((UriRecord::from_header(header)?, consumed))
    }
}

impl<'a> Decode<'a> for TextRecord<'a> {
    fn decode(cursor: &InputCursor<'a>) -> Result<(Self, usize), DecodeError> {
        let (header, consumed) = RecordHeader::decode(cursor)?;
        Ok((TextRecord::from_header(header)?, consumed))
    }
}

impl<'a> Decode<'a> for SmartPosterRecord<'a> {
    fn decode(cursor: &InputCursor<'a>) -> Result<(Self, usize), DecodeError> {
        let (header, consumed) = RecordHeader::decode(cursor)?;
        Ok((SmartPosterRecord::from_header(header)?, consumed))
    }
}

impl<'a> Decode<'a> for DecodedRecord<'a> {
    fn decode(cursor: &InputCursor<'a>) -> Result<(Self, usize), DecodeError> {
        let (header, consumed) = RecordHeader::decode(cursor)?;

        if header.type_name_format != NdefType::WellKnown {
            return Ok((DecodedRecord::Unknown(header), consumed));
        }

        let record = match header.type_ {
            type_ if type_ == URI_TYPE.as_bytes() => {
                DecodedRecord::Uri(UriRecord::from_header(header)?)
            }
            type_ if type_ == TEXT_TYPE.as_bytes() => {
                DecodedRecord::Text(TextRecord::from_header(header)?)
            }
            type_ if type_ == SMART_POSTER_TYPE.as_bytes() => {
                DecodedRecord::SmartPoster(SmartPosterRecord::from_header(header)?)
            }
            _ => DecodedRecord::Unknown(header),
        };

        Ok((record, consumed))
    }
}
