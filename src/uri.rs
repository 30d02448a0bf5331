use std::fmt;

use ndef_sink::OutputSink;
use strum::IntoEnumIterator as _;
use tracing::trace;

use crate::{
    error::{DecodeError, EncodeError},
    header::{RecordHeader, write_header},
    ndef_type::NdefType,
    position::Position,
};

pub const URI_TYPE: &str = "U";

/// Abbreviations from the NFC Forum URI record type, indexed by prefix id
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

/// Identifier byte that abbreviates the start of a URI, see [`URI_PREFIXES`]
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumCount,
    strum::FromRepr,
)]
#[repr(u8)]
pub enum UriPrefix {
    #[default]
    NoPrefix = 0x00,
    HttpWww,
    HttpsWww,
    Http,
    Https,
    Tel,
    Mailto,
    FtpAnonymous,
    FtpFtp,
    Ftps,
    Sftp,
    Smb,
    Nfs,
    Ftp,
    Dav,
    News,
    Telnet,
    Imap,
    Rtsp,
    Urn,
    Pop,
    Sip,
    Sips,
    Tftp,
    Btspp,
    Btl2cap,
    Btgoep,
    Tcpobex,
    Irdaobex,
    File,
    UrnEpcId,
    UrnEpcTag,
    UrnEpcPat,
    UrnEpcRaw,
    UrnEpc,
    UrnNfc,
}

impl UriPrefix {
    pub fn from_id(id: u8) -> Option<Self> {
        Self::from_repr(id)
    }

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        URI_PREFIXES[self as usize]
    }
}

/// A well-known `"U"` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriRecord<'a> {
    /// Set when decoding, encoding takes the position as an argument
    pub position: Position,
    pub prefix: UriPrefix,
    pub suffix: &'a str,
}

impl<'a> UriRecord<'a> {
    pub fn new(prefix: UriPrefix, suffix: &'a str) -> Self {
        Self {
            position: Position::default(),
            prefix,
            suffix,
        }
    }

    /// Split `uri` into the longest matching table prefix and the rest
    ///
    /// The table is scanned in id order and only a strictly longer match replaces the current
    /// one, so on equal lengths the lower id wins.
    pub fn format(uri: &'a str) -> Self {
        let mut record = Self::new(UriPrefix::NoPrefix, uri);
        let mut matched_length = 0;

        for prefix in UriPrefix::iter().skip(1) {
            let prefix_str = prefix.as_str();
            if prefix_str.len() <= matched_length {
                continue;
            }

            if let Some(suffix) = uri.strip_prefix(prefix_str) {
                record.prefix = prefix;
                record.suffix = suffix;
                matched_length = prefix_str.len();
            }
        }

        trace!(prefix = ?record.prefix, "formatted uri");
        record
    }

    /// The full URI, prefix expanded
    pub fn to_uri(&self) -> String {
        self.to_string()
    }

    /// Encode as a record at `position`, returns the number of bytes written
    pub fn encode(&self, sink: &mut OutputSink, position: Position) -> Result<usize, EncodeError> {
        let payload_length = self.suffix.len() + 1;
        let header_length = write_header(
            sink,
            NdefType::WellKnown,
            URI_TYPE.as_bytes(),
            position,
            payload_length,
        )?;

        sink.push(self.prefix.id())?;
        sink.extend_from_slice(self.suffix.as_bytes())?;

        Ok(header_length + payload_length)
    }

    /// Format and encode `uri` in one go
    pub fn write_str(
        sink: &mut OutputSink,
        uri: &str,
        position: Position,
    ) -> Result<usize, EncodeError> {
        UriRecord::format(uri).encode(sink, position)
    }

    /// Interpret the payload of an already framed record
    pub fn from_header(header: RecordHeader<'a>) -> Result<Self, DecodeError> {
        header.expect_type(URI_TYPE)?;

        let (&id, suffix) = header
            .payload
            .split_first()
            .ok_or(DecodeError::EmptyPayload)?;

        let prefix = UriPrefix::from_id(id).ok_or(DecodeError::InvalidPrefix(id))?;
        let suffix = std::str::from_utf8(suffix)?;

        Ok(Self {
            position: header.position,
            prefix,
            suffix,
        })
    }
}

impl fmt::Display for UriRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.as_str(), self.suffix)
    }
}
