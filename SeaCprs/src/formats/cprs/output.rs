//! Output assembly for the CPRS decoder
//!
//! Bytes are appended one at a time into a 4-byte pending group, and only
//! reach the output buffer when the group is full or when it is flushed
//! early. Back-references read from the buffer, so a copy whose source lies in
//! the pending group must flush it first (see [`OutputAssembler::emit_back_reference`]).

use crate::error::{Error, Result};

/// Bytes per committed group.
const GROUP_SIZE: usize = 4;

/// Fixed-size output buffer with word-granular commits.
#[derive(Debug)]
pub struct OutputAssembler {
    buffer: Vec<u8>,
    position: usize,
    pending: [u8; GROUP_SIZE],
    last_byte: u8,
    hazard_flushes: usize,
}

impl OutputAssembler {
    /// Allocate an output buffer of exactly `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            buffer: vec![0u8; size],
            position: 0,
            pending: [0; GROUP_SIZE],
            last_byte: 0,
            hazard_flushes: 0,
        }
    }

    /// Append one byte, committing the pending group once it is full.
    pub fn emit_byte(&mut self, byte: u8) -> Result<()> {
        if self.position >= self.buffer.len() {
            return Err(Error::OutputOverflow {
                declared: self.buffer.len(),
            });
        }

        self.pending[self.position % GROUP_SIZE] = byte;
        self.position += 1;
        self.last_byte = byte;

        if self.position % GROUP_SIZE == 0 {
            let start = self.position - GROUP_SIZE;
            self.buffer[start..self.position].copy_from_slice(&self.pending);
            self.pending = [0; GROUP_SIZE];
        }
        Ok(())
    }

    /// Commit the current partial group to the buffer without closing it.
    pub fn flush_pending(&mut self) {
        let filled = self.position % GROUP_SIZE;
        if filled == 0 {
            return;
        }
        let start = self.position - filled;
        self.buffer[start..self.position].copy_from_slice(&self.pending[..filled]);
    }

    /// Read a committed byte.
    ///
    /// Returns `None` at or past the write position. Bytes of the pending group
    /// read as whatever was last flushed there (zero if never flushed).
    pub fn read_byte_at(&self, pos: usize) -> Option<u8> {
        if pos < self.position {
            self.buffer.get(pos).copied()
        } else {
            None
        }
    }

    /// Append a literal byte.
    pub fn emit_literal(&mut self, byte: u8) -> Result<()> {
        self.emit_byte(byte)
    }

    /// Repeat the last emitted byte `run` times.
    pub fn emit_run_fill(&mut self, run: usize) -> Result<()> {
        let byte = self.last_byte;
        for _ in 0..run {
            self.emit_byte(byte)?;
        }
        Ok(())
    }

    /// Copy `length` bytes from `distance` bytes behind the write position.
    ///
    /// The copy runs byte by byte so that overlapping copies repeat the
    /// pattern. With a distance under one group and an unaligned write
    /// position the source byte can still be pending, so the group is flushed
    /// before every such read.
    pub fn emit_back_reference(&mut self, distance: usize, length: usize) -> Result<()> {
        for _ in 0..length {
            if distance < GROUP_SIZE && self.position % GROUP_SIZE != 0 {
                self.flush_pending();
                self.hazard_flushes += 1;
            }

            let invalid = Error::InvalidBackReference {
                distance,
                position: self.position,
            };
            let byte = self
                .position
                .checked_sub(distance)
                .and_then(|source| self.read_byte_at(source))
                .ok_or(invalid)?;
            self.emit_byte(byte)?;
        }
        Ok(())
    }

    /// Current write position, i.e. the number of bytes emitted.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The byte a run-fill would repeat.
    pub fn last_byte(&self) -> u8 {
        self.last_byte
    }

    /// Number of early flushes forced by short back-references.
    pub fn hazard_flushes(&self) -> usize {
        self.hazard_flushes
    }

    /// Flush the pending group and hand back the buffer and the written count.
    ///
    /// The buffer is cut down to the written count unless `keep_allocated_size`
    /// is set, in which case the unwritten tail stays zero-filled.
    pub fn finish(mut self, keep_allocated_size: bool) -> (Vec<u8>, usize) {
        self.flush_pending();
        let written = self.position;
        if !keep_allocated_size {
            self.buffer.truncate(written);
        }
        (self.buffer, written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_all(out: &mut OutputAssembler, bytes: &[u8]) {
        for &b in bytes {
            out.emit_literal(b).unwrap();
        }
    }

    #[test]
    fn test_groups_commit_on_alignment() {
        let mut out = OutputAssembler::new(8);
        emit_all(&mut out, &[1, 2, 3]);
        assert_eq!(out.read_byte_at(0), Some(0));

        out.emit_byte(4).unwrap();
        assert_eq!(out.read_byte_at(0), Some(1));
        assert_eq!(out.read_byte_at(3), Some(4));
        assert_eq!(out.read_byte_at(4), None);
    }

    #[test]
    fn test_flush_pending_makes_bytes_visible() {
        let mut out = OutputAssembler::new(8);
        emit_all(&mut out, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(out.read_byte_at(5), Some(0));

        out.flush_pending();
        assert_eq!(out.read_byte_at(4), Some(5));
        assert_eq!(out.read_byte_at(5), Some(6));
    }

    #[test]
    fn test_run_fill_repeats_last_byte() {
        let mut out = OutputAssembler::new(6);
        out.emit_literal(0xaa).unwrap();
        out.emit_run_fill(5).unwrap();
        let (data, written) = out.finish(false);
        assert_eq!(written, 6);
        assert_eq!(data, vec![0xaa; 6]);
    }

    #[test]
    fn test_run_fill_after_copy_repeats_copied_byte() {
        let mut out = OutputAssembler::new(10);
        emit_all(&mut out, &[1, 2, 3, 4]);
        out.emit_back_reference(4, 2).unwrap();
        assert_eq!(out.last_byte(), 2);
        out.emit_run_fill(2).unwrap();
        let (data, _) = out.finish(false);
        assert_eq!(data, vec![1, 2, 3, 4, 1, 2, 2, 2]);
    }

    #[test]
    fn test_overlapping_copy_flushes_each_byte() {
        let mut out = OutputAssembler::new(8);
        emit_all(&mut out, &[5, 6]);
        out.emit_back_reference(2, 6).unwrap();
        // positions 2, 3, 5, 6, 7 are unaligned when read
        assert_eq!(out.hazard_flushes(), 5);
        let (data, written) = out.finish(false);
        assert_eq!(written, 8);
        assert_eq!(data, vec![5, 6, 5, 6, 5, 6, 5, 6]);
    }

    #[test]
    fn test_long_distance_copy_needs_no_flush() {
        let mut out = OutputAssembler::new(8);
        emit_all(&mut out, &[1, 2, 3, 4]);
        out.emit_back_reference(4, 4).unwrap();
        assert_eq!(out.hazard_flushes(), 0);
        let (data, _) = out.finish(false);
        assert_eq!(data, vec![1, 2, 3, 4, 1, 2, 3, 4]);
    }

    #[test]
    fn test_copy_before_start_is_rejected() {
        let mut out = OutputAssembler::new(8);
        emit_all(&mut out, &[1, 2]);
        let err = out.emit_back_reference(4, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBackReference { distance: 4, position: 2 }
        ));
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut out = OutputAssembler::new(2);
        emit_all(&mut out, &[1, 2]);
        let err = out.emit_literal(3).unwrap_err();
        assert!(matches!(err, Error::OutputOverflow { declared: 2 }));
        assert_eq!(out.position(), 2);
    }

    #[test]
    fn test_finish_keeps_allocated_size() {
        let mut out = OutputAssembler::new(6);
        emit_all(&mut out, &[7, 8, 9]);
        let (data, written) = out.finish(true);
        assert_eq!(written, 3);
        assert_eq!(data, vec![7, 8, 9, 0, 0, 0]);
    }
}
