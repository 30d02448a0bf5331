//! Encoder and decoder for single NFC Data Exchange Format (NDEF) records.
//!
//! Decoding borrows from the caller's buffer and never copies: every string and slice in a decoded
//! record points into the bytes handed to [`InputCursor::new`]. Encoding appends to an
//! [`OutputSink`].
//!
//! ```
//! use ndef::{Decode, InputCursor, OutputSink, Position, UriPrefix, UriRecord};
//!
//! let mut sink = OutputSink::new();
//! UriRecord::format("https://www.example.com").encode(&mut sink, Position::StartEnd)?;
//! assert_eq!(sink.as_slice()[..4], [0xE1, 0x01, 0x0C, b'U']);
//!
//! let mut cursor = InputCursor::new(sink.as_slice());
//! let uri: UriRecord = cursor.read()?;
//! assert_eq!(uri.prefix, UriPrefix::HttpsWww);
//! assert_eq!(uri.suffix, "example.com");
//! assert!(cursor.is_exhausted());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod header;
pub mod ndef_type;
pub mod parser;
pub mod position;
pub mod record;
pub mod smart_poster;
pub mod text;
pub mod uri;

pub use error::{DecodeError, EncodeError, ErrorKind};
pub use header::{RecordHeader, write_header, write_record};
pub use ndef_sink::{OutputSink, SinkError};
pub use ndef_type::NdefType;
pub use parser::stream::InputCursor;
pub use position::{Position, RecordFlags};
pub use record::{Decode, DecodedRecord, RecordKind};
pub use smart_poster::SmartPosterRecord;
pub use text::TextRecord;
pub use uri::{UriPrefix, UriRecord};
