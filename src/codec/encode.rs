//! Token encoder: writes literal runs and match tokens into the output.
//!
//! The literal-run control byte is emitted *before* its bytes, as a
//! placeholder holding `MAX_COPY - 1`.  Once the run ends (a match is found
//! or input is exhausted) the placeholder is patched with the real count, or
//! dropped when the run turned out empty.  Every write is checked against the
//! output capacity.

use super::compress::CompressError;
use super::types::{
    FAR_MARKER, FAR_SENTINEL, LEN_EXTENDED, LEN_SHIFT, MAX_COPY, MAX_DISTANCE, VERSION_MARKER,
};

/// Sequential writer over a caller-provided output buffer.
pub struct TokenWriter<'a> {
    dst: &'a mut [u8],
    op: usize,
    /// Bytes in the literal run currently open (0 = placeholder only).
    copy: usize,
}

impl<'a> TokenWriter<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        TokenWriter { dst, op: 0, copy: 0 }
    }

    /// Bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.op
    }

    #[inline(always)]
    fn push(&mut self, b: u8) -> Result<(), CompressError> {
        let slot = self.dst.get_mut(self.op).ok_or(CompressError::OutputTooSmall)?;
        *slot = b;
        self.op += 1;
        Ok(())
    }

    /// Open a literal run by writing its placeholder control byte.
    #[inline]
    pub fn start_literals(&mut self) -> Result<(), CompressError> {
        self.copy = 0;
        self.push((MAX_COPY - 1) as u8)
    }

    /// Append one literal byte; a full run of [`MAX_COPY`] bytes is closed
    /// as-is and a fresh placeholder opened behind it.
    #[inline]
    pub fn literal(&mut self, b: u8) -> Result<(), CompressError> {
        self.push(b)?;
        self.copy += 1;
        if self.copy == MAX_COPY {
            self.copy = 0;
            self.push((MAX_COPY - 1) as u8)?;
        }
        Ok(())
    }

    /// Close the open literal run: patch its control byte, or take back the
    /// placeholder when no literal followed it.
    pub fn close_literals(&mut self) {
        if self.copy > 0 {
            self.dst[self.op - self.copy - 1] = (self.copy - 1) as u8;
        } else {
            self.op -= 1;
        }
        self.copy = 0;
    }

    fn extended_length(&mut self, mut len: usize) -> Result<(), CompressError> {
        len -= LEN_EXTENDED;
        while len >= 255 {
            self.push(255)?;
            len -= 255;
        }
        self.push(len as u8)
    }

    /// Emit a match token.
    ///
    /// `len` is the biased length (match length minus 2, `>= 1`); `distance`
    /// is the biased distance (true distance minus 1).  Distances below
    /// [`MAX_DISTANCE`] use the 2-byte near form; larger ones go through the
    /// far sentinel with `distance - MAX_DISTANCE` in two explicit bytes.
    pub fn match_token(&mut self, len: usize, distance: usize) -> Result<(), CompressError> {
        let class = len.min(LEN_EXTENDED);
        let head = (class << LEN_SHIFT) as u8;

        if distance < MAX_DISTANCE {
            self.push(head + (distance >> 8) as u8)?;
            if class == LEN_EXTENDED {
                self.extended_length(len)?;
            }
            self.push((distance & 255) as u8)
        } else {
            let far = distance - MAX_DISTANCE;
            self.push(head + FAR_MARKER)?;
            if class == LEN_EXTENDED {
                self.extended_length(len)?;
            }
            self.push(FAR_SENTINEL)?;
            self.push((far >> 8) as u8)?;
            self.push((far & 255) as u8)
        }
    }

    /// Close the last literal run, tag the stream and return its length.
    pub fn finish(mut self) -> usize {
        self.close_literals();
        self.dst[0] |= VERSION_MARKER;
        self.op
    }
}
