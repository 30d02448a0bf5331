use bitflags::bitflags;

bitflags! {
    /// The flags byte that opens every record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RecordFlags: u8 {
        /// Set on the first record of a message
        const MESSAGE_BEGIN = 0x80;
        /// Set on the last record of a message
        const MESSAGE_END = 0x40;
        /// Payload length is a single byte instead of four
        const SHORT_RECORD = 0x20;
        /// Payload continues in the next record, not supported
        const CHUNKED = 0x10;
        /// An id length byte and id field are present
        const ID_LENGTH = 0x08;
        const TYPE_NAME_FORMAT = 0x07;
    }
}

/// Where a record sits in its message
///
/// Only carried through encode and decode, consistency across a sequence of records is up to the
/// caller.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Position {
    Start,
    End,
    StartEnd,
    #[default]
    Middle,
}

impl Position {
    pub fn new(message_begin: bool, message_end: bool) -> Self {
        match (message_begin, message_end) {
            (true, true) => Position::StartEnd,
            (true, false) => Position::Start,
            (false, true) => Position::End,
            (false, false) => Position::Middle,
        }
    }

    pub fn from_flags(flags: RecordFlags) -> Self {
        Self::new(
            flags.contains(RecordFlags::MESSAGE_BEGIN),
            flags.contains(RecordFlags::MESSAGE_END),
        )
    }

    pub fn flags(self) -> RecordFlags {
        match self {
            Position::Start => RecordFlags::MESSAGE_BEGIN,
            Position::End => RecordFlags::MESSAGE_END,
            Position::StartEnd => RecordFlags::MESSAGE_BEGIN | RecordFlags::MESSAGE_END,
            Position::Middle => RecordFlags::empty(),
        }
    }

    pub fn is_begin(self) -> bool {
        matches!(self, Position::Start | Position::StartEnd)
    }

    pub fn is_end(self) -> bool {
        matches!(self, Position::End | Position::StartEnd)
    }
}
