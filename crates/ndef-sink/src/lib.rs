//! Growable output buffer shared by every NDEF encoder.
//!
//! Capacity always grows to the next power of two of the required length. Dropping the length back
//! to zero hands the allocation back to the allocator.

use std::collections::TryReserveError;

use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("requested capacity {requested} has no power of two representable in usize")]
    CapacityOverflow { requested: usize },

    #[error("unable to grow output sink: {0}")]
    Allocation(#[from] TryReserveError),
}

pub type Error = SinkError;
type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSink {
    data: Vec<u8>,
}

impl OutputSink {
    /// Empty sink, nothing is allocated until the first write
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Make sure the sink can hold at least `min_capacity` bytes
    ///
    /// The new capacity is `max(min_capacity, len)` rounded up to the next power of two. A sink
    /// that is already large enough is left alone, and on failure the sink is unchanged.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        let wanted = min_capacity.max(self.data.len());
        if wanted == 0 {
            return Ok(());
        }

        let target = wanted
            .checked_next_power_of_two()
            .ok_or(SinkError::CapacityOverflow { requested: wanted })?;

        if self.data.capacity() >= target {
            return Ok(());
        }

        trace!(from = self.data.capacity(), to = target, "growing output sink");
        self.data.try_reserve_exact(target - self.data.len())?;

        Ok(())
    }

    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.reserve(self.data.len() + 1)?;
        self.data.push(byte);
        Ok(())
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let required = self
            .data
            .len()
            .checked_add(bytes.len())
            .ok_or(SinkError::CapacityOverflow { requested: usize::MAX })?;

        self.reserve(required)?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Shorten the sink, a length of zero releases the backing allocation
    pub fn truncate(&mut self, len: usize) {
        if len == 0 {
            self.release();
            return;
        }

        self.data.truncate(len);
    }

    pub fn clear(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.data.capacity() > 0 {
            trace!(capacity = self.data.capacity(), "releasing output sink");
        }

        self.data = Vec::new();
    }
}

impl AsRef<[u8]> for OutputSink {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<OutputSink> for Vec<u8> {
    fn from(sink: OutputSink) -> Self {
        sink.data
    }
}
