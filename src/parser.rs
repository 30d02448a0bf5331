pub mod stream;

use stream::Stream;
use winnow::{
    ModalResult, Parser,
    binary::{
        be_u8, be_u32,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    error::{ContextError, ErrMode},
    token::take,
};

use crate::{header::RecordHeader, ndef_type::NdefType, position::Position};

/// The flags byte split into its fields, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderByte {
    pub message_begin: bool,
    pub message_end: bool,
    pub short_record: bool,
    pub chunked: bool,
    pub has_id_length: bool,
    pub type_name_format: u8,
}

pub fn parse_header_byte(input: &mut Stream<'_>) -> ModalResult<HeaderByte> {
    let (message_begin, message_end, short_record, chunked, has_id_length, type_name_format) =
        bits::<_, _, ErrMode<ContextError>, _, _>((
            take_bool,
            take_bool,
            take_bool,
            take_bool,
            take_bool,
            take_bits(3_u8),
        ))
        .parse_next(input)?;

    Ok(HeaderByte {
        message_begin,
        message_end,
        short_record,
        chunked,
        has_id_length,
        type_name_format,
    })
}

/// Parse a full record, header fields plus the type, id and payload slices
pub fn parse_record_header<'i>(input: &mut Stream<'i>) -> ModalResult<RecordHeader<'i>> {
    let header_byte = parse_header_byte(input)?;

    let type_length = be_u8.parse_next(input)?;

    let payload_length = if header_byte.short_record {
        be_u8.map(|length: u8| length as u32).parse_next(input)?
    } else {
        be_u32.parse_next(input)?
    };

    let id_length = if header_byte.has_id_length {
        Some(be_u8.parse_next(input)?)
    } else {
        None
    };

    let type_ = take(type_length as usize).parse_next(input)?;
    let id = parse_id(input, id_length)?;
    let payload = take(payload_length as usize).parse_next(input)?;

    Ok(RecordHeader {
        position: Position::new(header_byte.message_begin, header_byte.message_end),
        type_name_format: NdefType::from_bits(header_byte.type_name_format),
        short_record: header_byte.short_record,
        type_,
        id,
        payload_length,
        payload,
    })
}

// private
fn parse_id<'i>(input: &mut Stream<'i>, id_length: Option<u8>) -> ModalResult<Option<&'i [u8]>> {
    if let Some(id_len) = id_length {
        take(id_len as usize).map(Some).parse_next(input)
    } else {
        Ok(None)
    }
}
