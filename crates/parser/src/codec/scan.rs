//! Resumable delimiter scanning into a bounded scratch buffer.
//!
//! A field is collected byte by byte into [`ScanState`] until its delimiter is seen. Bytes
//! that look like the start of the delimiter are held back (counted in `match_progress`)
//! and only written to the buffer once the match is proven false, so the delimiter never
//! lands in the field. Everything needed to resume lives in [`ScanState`]: feeding the
//! input in several pieces gives exactly the result of feeding it in one.

use std::cmp;
use std::mem;

use bytes::Bytes;

use crate::protocol::ParseError;

/// Outcome of one [`ScanState::scan_until`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Scan {
    /// The delimiter was matched completely, the cursor points just past it.
    Found,
    /// Accepting the next byte would exceed the buffer capacity.
    Overflow,
    /// The chunk ran out first.
    Continue,
}

/// Working state for the field currently being parsed.
///
/// `buffer.len()` is the write cursor.
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    buffer: Vec<u8>,
    capacity: usize,
    match_progress: usize,
}

impl ScanState {
    /// Prepares a fresh buffer able to hold `capacity` bytes.
    ///
    /// Any buffer still held is released first.
    pub(crate) fn reset(&mut self, capacity: usize) -> Result<(), ParseError> {
        self.buffer = Vec::new();
        self.buffer.try_reserve_exact(capacity).map_err(|_| ParseError::OutOfMemory)?;
        self.capacity = capacity;
        self.match_progress = 0;
        Ok(())
    }

    /// Copies bytes from `chunk[*cursor..]` until `delimiter` is matched.
    ///
    /// On a mismatch the held-back delimiter prefix is flushed into the buffer before the
    /// mismatching byte, both counted against the capacity.
    pub(crate) fn scan_until(&mut self, chunk: &[u8], cursor: &mut usize, delimiter: &[u8]) -> Scan {
        debug_assert!(!delimiter.is_empty());

        while let Some(&byte) = chunk.get(*cursor) {
            if byte == delimiter[self.match_progress] {
                self.match_progress += 1;
                *cursor += 1;
                if self.match_progress == delimiter.len() {
                    return Scan::Found;
                }
                continue;
            }

            if self.buffer.len() + self.match_progress >= self.capacity {
                return Scan::Overflow;
            }

            self.buffer.extend_from_slice(&delimiter[..self.match_progress]);
            self.match_progress = 0;
            self.buffer.push(byte);
            *cursor += 1;
        }

        Scan::Continue
    }

    /// Copies raw bytes until the buffer holds exactly `capacity` bytes.
    ///
    /// Returns true when the buffer is full.
    pub(crate) fn fill(&mut self, chunk: &[u8], cursor: &mut usize) -> bool {
        let available = &chunk[cmp::min(*cursor, chunk.len())..];
        let len = cmp::min(self.remaining(), available.len());
        self.buffer.extend_from_slice(&available[..len]);
        *cursor += len;
        self.is_full()
    }

    /// Moves the collected bytes out, leaving an empty buffer behind.
    pub(crate) fn take(&mut self) -> Bytes {
        self.match_progress = 0;
        Bytes::from(mem::take(&mut self.buffer))
    }

    /// Drops the buffer without handing it out.
    pub(crate) fn release(&mut self) {
        self.buffer = Vec::new();
        self.match_progress = 0;
    }

    /// Number of bytes written so far.
    #[cfg(test)]
    pub(crate) fn written(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.buffer.len())
    }

    fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }
}

/// Copies `bytes` into a new, exactly sized allocation.
pub(crate) fn try_copy(bytes: &[u8]) -> Result<Bytes, ParseError> {
    let mut owned = Vec::new();
    owned.try_reserve_exact(bytes.len()).map_err(|_| ParseError::OutOfMemory)?;
    owned.extend_from_slice(bytes);
    Ok(Bytes::from(owned))
}
