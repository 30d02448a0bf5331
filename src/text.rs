use ndef_sink::OutputSink;

use crate::{
    error::{DecodeError, EncodeError},
    header::{RecordHeader, write_header},
    ndef_type::NdefType,
    position::Position,
};

pub const TEXT_TYPE: &str = "T";

/// Largest language code the six bit length field can describe
pub const MAX_LANGUAGE_LENGTH: usize = 0x3F;

const STATUS_UTF16: u8 = 0x80;
const STATUS_LANGUAGE_LENGTH: u8 = 0x3F;

/// A well-known `"T"` record, always utf-8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRecord<'a> {
    /// Set when decoding, encoding takes the position as an argument
    pub position: Position,
    /// IANA language code, e.g. `en`, may be empty
    pub language: &'a str,
    pub text: &'a str,
}

impl<'a> TextRecord<'a> {
    pub fn new(language: &'a str, text: &'a str) -> Self {
        Self {
            position: Position::default(),
            language,
            text,
        }
    }

    /// Encode as a record at `position`, returns the number of bytes written
    pub fn encode(&self, sink: &mut OutputSink, position: Position) -> Result<usize, EncodeError> {
        let language_length = self.language.len();
        if language_length > MAX_LANGUAGE_LENGTH {
            return Err(EncodeError::LanguageTooLong(language_length));
        }

        let payload_length = language_length + self.text.len() + 1;
        let header_length = write_header(
            sink,
            NdefType::WellKnown,
            TEXT_TYPE.as_bytes(),
            position,
            payload_length,
        )?;

        // top two bits stay clear: utf-8 and the reserved bit
        sink.push(language_length as u8)?;
        sink.extend_from_slice(self.language.as_bytes())?;
        sink.extend_from_slice(self.text.as_bytes())?;

        Ok(header_length + payload_length)
    }

    pub fn write_str(
        sink: &mut OutputSink,
        language: &str,
        text: &str,
        position: Position,
    ) -> Result<usize, EncodeError> {
        TextRecord::new(language, text).encode(sink, position)
    }

    /// Interpret the payload of an already framed record
    pub fn from_header(header: RecordHeader<'a>) -> Result<Self, DecodeError> {
        header.expect_type(TEXT_TYPE)?;

        let (&status, rest) = header
            .payload
            .split_first()
            .ok_or(DecodeError::EmptyPayload)?;

        if status & STATUS_UTF16 != 0 {
            return Err(DecodeError::Utf16Text);
        }

        let language_length = (status & STATUS_LANGUAGE_LENGTH) as usize;
        if language_length > rest.len() {
            return Err(DecodeError::LanguageOverrun {
                language_length,
                available: rest.len(),
            });
        }

        let (language, text) = rest.split_at(language_length);

        Ok(Self {
            position: header.position,
            language: std::str::from_utf8(language)?,
            text: std::str::from_utf8(text)?,
        })
    }
}
