/// Type name format, the low three bits of the flags byte
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_more::Display, strum::EnumIter)]
#[repr(u8)]
pub enum NdefType {
    Empty = 0x00,
    WellKnown = 0x01,
    Mime = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
    Reserved = 0x07,
}

impl NdefType {
    pub const MASK: u8 = 0x07;

    /// Anything above the low three bits is ignored
    pub fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0 => NdefType::Empty,
            1 => NdefType::WellKnown,
            2 => NdefType::Mime,
            3 => NdefType::AbsoluteUri,
            4 => NdefType::External,
            5 => NdefType::Unknown,
            6 => NdefType::Unchanged,
            7 => NdefType::Reserved,
            _ => unreachable!("masked to three bits"),
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator as _;

    use super::*;

    #[test]
    fn bits_roundtrip_for_every_format() {
        for tnf in NdefType::iter() {
            assert_eq!(NdefType::from_bits(tnf.bits()), tnf);
        }
    }

    #[test]
    fn upper_bits_are_ignored() {
        assert_eq!(NdefType::from_bits(0xD1), NdefType::WellKnown);
        assert_eq!(NdefType::from_bits(0xFA), NdefType::Mime);
    }
}
