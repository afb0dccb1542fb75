// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Bounds-checked cursor over a packet or message body.
//!
//! All multi-byte integers on the wire are big-endian. Fixed-width string
//! fields are space-padded on the right; the logical value is the prefix up
//! to the first space. The 10-byte session identifier is the one exception
//! and is copied verbatim.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("truncated field: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
}

/// Read cursor over a byte slice. Every read checks bounds and advances.
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `size` bytes.
    pub fn take(&mut self, size: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < size {
            return Err(WireError::Truncated {
                needed: size,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + size];
        self.pos += size;
        Ok(bytes)
    }

    pub fn u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    /// Single-octet code field, transported as u8 and rendered as ASCII.
    pub fn code(&mut self) -> Result<u8, WireError> {
        self.u8()
    }

    pub fn u16(&mut self) -> Result<u16, WireError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn u32(&mut self) -> Result<u32, WireError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// 48-bit big-endian integer widened to u64 (TotalView timestamps).
    pub fn u48(&mut self) -> Result<u64, WireError> {
        let bytes = self.take(6)?;
        let mut value = 0u64;
        for byte in bytes {
            value = (value << 8) | u64::from(*byte);
        }
        Ok(value)
    }

    pub fn u64(&mut self) -> Result<u64, WireError> {
        let bytes = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(buf))
    }

    /// Fixed-width string, trimmed at the first space (possibly empty).
    pub fn padded_str(&mut self, width: usize) -> Result<String, WireError> {
        let bytes = self.take(width)?;
        let end = bytes.iter().position(|b| *b == b' ').unwrap_or(width);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Fixed-width string copied for its full width, no trimming.
    pub fn verbatim_str(&mut self, width: usize) -> Result<String, WireError> {
        let bytes = self.take(width)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
