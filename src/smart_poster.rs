use ndef_sink::OutputSink;
use tracing::debug;

use crate::{
    error::{DecodeError, EncodeError},
    header::{RecordHeader, write_header},
    ndef_type::NdefType,
    parser::stream::InputCursor,
    position::Position,
    text::{TEXT_TYPE, TextRecord},
    uri::{URI_TYPE, UriPrefix, UriRecord},
};

pub const SMART_POSTER_TYPE: &str = "Sp";

/// A well-known `"Sp"` record: a URI with an optional title, carried as nested records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartPosterRecord<'a> {
    /// Set when decoding, encoding takes the position as an argument
    pub position: Position,
    pub prefix: UriPrefix,
    /// The URI after `prefix`
    pub uri: &'a str,
    pub title: Option<&'a str>,
}

impl<'a> SmartPosterRecord<'a> {
    pub fn new(prefix: UriPrefix, uri: &'a str, title: Option<&'a str>) -> Self {
        Self {
            position: Position::default(),
            prefix,
            uri,
            title,
        }
    }

    /// Build from a full URI, picking the longest matching prefix
    pub fn from_uri(uri: &'a str, title: Option<&'a str>) -> Self {
        let formatted = UriRecord::format(uri);
        Self::new(formatted.prefix, formatted.suffix, title)
    }

    /// The full URI, prefix expanded
    pub fn to_uri(&self) -> String {
        UriRecord::new(self.prefix, self.uri).to_uri()
    }

    /// Encode as a record at `position`, returns the number of bytes written
    ///
    /// The nested records have their own positions: the URI record is `Start` when a title
    /// follows, `StartEnd` otherwise, and the title is an `End` text record without a language.
    /// An empty title is treated as no title.
    pub fn encode(&self, sink: &mut OutputSink, position: Position) -> Result<usize, EncodeError> {
        if self.uri.is_empty() {
            return Err(EncodeError::EmptyUri);
        }

        let title = self.title.filter(|title| !title.is_empty());

        // dropped on every return below
        let mut inner = OutputSink::new();

        let uri_position = if title.is_some() {
            Position::Start
        } else {
            Position::StartEnd
        };

        UriRecord::new(self.prefix, self.uri).encode(&mut inner, uri_position)?;

        if let Some(title) = title {
            TextRecord::new("", title).encode(&mut inner, Position::End)?;
        }

        let header_length = write_header(
            sink,
            NdefType::WellKnown,
            SMART_POSTER_TYPE.as_bytes(),
            position,
            inner.len(),
        )?;

        sink.extend_from_slice(inner.as_slice())?;

        Ok(header_length + inner.len())
    }

    /// Interpret the payload of an already framed record
    ///
    /// The payload must split exactly into nested records. The first URI record and the first
    /// text record are used, anything else is skipped.
    pub fn from_header(header: RecordHeader<'a>) -> Result<Self, DecodeError> {
        header.expect_type(SMART_POSTER_TYPE)?;

        let mut inner = InputCursor::new(header.payload);
        let mut uri: Option<UriRecord<'a>> = None;
        let mut title: Option<&'a str> = None;

        while !inner.is_exhausted() {
            let (sub_header, consumed) = RecordHeader::decode(&inner)?;

            if sub_header.is_type(URI_TYPE) {
                let record = UriRecord::from_header(sub_header)?;
                uri.get_or_insert(record);
            } else if sub_header.is_type(TEXT_TYPE) {
                let record = TextRecord::from_header(sub_header)?;
                title.get_or_insert(record.text);
            } else {
                debug!(
                    type_ = %String::from_utf8_lossy(sub_header.type_),
                    "skipping smart poster sub-record"
                );
            }

            inner.advance(consumed)?;
        }

        let uri = uri.ok_or(DecodeError::MissingUri)?;

        Ok(Self {
            position: header.position,
            prefix: uri.prefix,
            uri: uri.suffix,
            title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{header::write_record, record::Decode as _};

    fn encode(poster: SmartPosterRecord<'_>, position: Position) -> Vec<u8> {
        let mut sink = OutputSink::new();
        poster.encode(&mut sink, position).unwrap();
        sink.into_vec()
    }

    #[test]
    fn empty_uri_fails_regardless_of_title() {
        for title in [None, Some(""), Some("A title")] {
            let mut sink = OutputSink::new();
            let err = SmartPosterRecord::new(UriPrefix::Https, "", title)
                .encode(&mut sink, Position::StartEnd)
                .unwrap_err();

            assert_eq!(err, EncodeError::EmptyUri);
            assert!(sink.is_empty());
        }
    }

    #[test]
    fn without_title_single_sub_record() {
        let poster = SmartPosterRecord::from_uri("https://example.com", None);
        let bytes = encode(poster, Position::StartEnd);

        let mut expected = vec![0xE1, 0x02, 0x10, b'S', b'p'];
        expected.extend_from_slice(&[0xE1, 0x01, 0x0C, b'U', 0x04]);
        expected.extend_from_slice(b"example.com");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn empty_title_is_no_title() {
        let with_empty = encode(
            SmartPosterRecord::from_uri("https://example.com", Some("")),
            Position::StartEnd,
        );
        let without = encode(
            SmartPosterRecord::from_uri("https://example.com", None),
            Position::StartEnd,
        );

        assert_eq!(with_empty, without);
    }

    #[test]
    fn with_title_two_sub_records() {
        let poster = SmartPosterRecord::from_uri("https://example.com", Some("Hello"));
        let bytes = encode(poster, Position::Middle);

        let (outer, consumed) = RecordHeader::decode(&InputCursor::new(&bytes)).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(outer.position, Position::Middle);
        assert!(outer.is_type("Sp"));

        let mut inner = InputCursor::new(outer.payload);
        let uri: UriRecord = inner.read().unwrap();
        let text: TextRecord = inner.read().unwrap();
        assert!(inner.is_exhausted());

        assert_eq!(uri.position, Position::Start);
        assert_eq!(uri.to_uri(), "https://example.com");
        assert_eq!(text.position, Position::End);
        assert_eq!(text.language, "");
        assert_eq!(text.text, "Hello");
    }

    #[test]
    fn roundtrip() {
        let poster = SmartPosterRecord::from_uri("https://example.com", Some("Hello"));
        let bytes = encode(poster, Position::End);

        let (decoded, consumed) = SmartPosterRecord::decode(&InputCursor::new(&bytes)).unwrap();
        assert_eq!(consumed, bytes.len());
        assert_eq!(decoded.position, Position::End);
        assert_eq!(decoded.prefix, UriPrefix::Https);
        assert_eq!(decoded.uri, "example.com");
        assert_eq!(decoded.to_uri(), "https://example.com");
        assert_eq!(decoded.title, Some("Hello"));
    }

    #[test]
    fn roundtrip_large_poster_uses_long_form() {
        let title = "t".repeat(280);
        let poster = SmartPosterRecord::from_uri("http://www.example.com", Some(title.as_str()));
        let bytes = encode(poster, Position::StartEnd);
        assert_eq!(bytes[0], 0xC1);

        let (decoded, _) = SmartPosterRecord::decode(&InputCursor::new(&bytes)).unwrap();
        assert_eq!(decoded.prefix, UriPrefix::HttpWww);
        assert_eq!(decoded.title, Some(title.as_str()));
    }

    fn poster_from_payload(payload: &[u8]) -> Vec<u8> {
        let mut sink = OutputSink::new();
        write_record(
            &mut sink,
            NdefType::WellKnown,
            b"Sp",
            Position::StartEnd,
            payload,
        )
        .unwrap();
        sink.into_vec()
    }

    #[test]
    fn decode_skips_unknown_sub_records_and_keeps_first() {
        let mut payload = OutputSink::new();
        write_record(&mut payload, NdefType::WellKnown, b"act", Position::Start, &[0x00]).unwrap();
        TextRecord::new("en", "First").encode(&mut payload, Position::Middle).unwrap();
        UriRecord::format("tel:123").encode(&mut payload, Position::Middle).unwrap();
        UriRecord::format("tel:456").encode(&mut payload, Position::Middle).unwrap();
        TextRecord::new("de", "Zweite").encode(&mut payload, Position::End).unwrap();

        let bytes = poster_from_payload(payload.as_slice());
        let (decoded, _) = SmartPosterRecord::decode(&InputCursor::new(&bytes)).unwrap();

        assert_eq!(decoded.prefix, UriPrefix::Tel);
        assert_eq!(decoded.uri, "123");
        assert_eq!(decoded.title, Some("First"));
    }

    #[test]
    fn decode_without_uri_fails() {
        let mut payload = OutputSink::new();
        TextRecord::new("en", "Just a title").encode(&mut payload, Position::StartEnd).unwrap();

        let bytes = poster_from_payload(payload.as_slice());
        let err = SmartPosterRecord::decode(&InputCursor::new(&bytes)).unwrap_err();
        assert_eq!(err, DecodeError::MissingUri);
    }

    #[test]
    fn decode_empty_payload_has_no_uri() {
        let bytes = poster_from_payload(&[]);
        let err = SmartPosterRecord::decode(&InputCursor::new(&bytes)).unwrap_err();
        assert_eq!(err, DecodeError::MissingUri);
    }

    #[test]
    fn decode_fails_on_trailing_garbage() {
        let mut payload = OutputSink::new();
        UriRecord::format("https://example.com").encode(&mut payload, Position::StartEnd).unwrap();
        payload.extend_from_slice(&[0xE1, 0x01]).unwrap();

        let bytes = poster_from_payload(payload.as_slice());
        let err = SmartPosterRecord::decode(&InputCursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn decode_fails_on_malformed_sub_record() {
        let mut payload = OutputSink::new();
        write_record(&mut payload, NdefType::WellKnown, b"U", Position::StartEnd, &[0x7F, b'x'])
            .unwrap();

        let bytes = poster_from_payload(payload.as_slice());
        let err = SmartPosterRecord::decode(&InputCursor::new(&bytes)).unwrap_err();
        assert_eq!(err, DecodeError::InvalidPrefix(0x7F));
    }

    #[test]
    fn decode_rejects_other_outer_types() {
        let mut sink = OutputSink::new();
        UriRecord::format("https://example.com").encode(&mut sink, Position::StartEnd).unwrap();

        let err = SmartPosterRecord::decode(&InputCursor::new(sink.as_slice())).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedType { expected: "Sp", .. }));
    }
}
