use winnow::{Bytes, Partial};

use crate::{error::DecodeError, record::Decode};

pub type Stream<'i> = Partial<&'i Bytes>;
pub fn new(b: &[u8]) -> Stream<'_> {
    Partial::new(Bytes::new(b))
}

pub trait StreamExt {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StreamExt for Stream<'_> {
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

/// Read position over a borrowed input buffer
///
/// Decoding through [`Decode::decode`] never moves the cursor, it reports how many bytes the
/// record took. [`InputCursor::read`] is the only way a decode advances it, and only on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputCursor<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> InputCursor<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The whole buffer, including bytes already read
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn available(&self) -> usize {
        self.data.len() - self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.available() == 0
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.index..]
    }

    pub fn advance(&mut self, count: usize) -> Result<(), DecodeError> {
        let available = self.available();
        if count > available {
            return Err(DecodeError::Truncated {
                needed: count - available,
            });
        }

        self.index += count;
        Ok(())
    }

    /// Decode the next record and move past it
    pub fn read<R: Decode<'a>>(&mut self) -> Result<R, DecodeError> {
        let (record, consumed) = R::decode(self)?;
        self.index += consumed;
        Ok(record)
    }

    pub(crate) fn stream(&self) -> Stream<'a> {
        new(self.remaining())
    }
}
