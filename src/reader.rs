//!
//! Byte-cursor helper used by the parser
//!
use std::io::Read;

use crate::parser::IppParseError;

/// Thin wrapper around any [`Read`] that reads the big-endian primitives and
/// fixed-length byte runs the IPP wire format is built from.
pub struct IppReader<R> {
    inner: R,
}

impl<R: Read> IppReader<R> {
    pub fn new(inner: R) -> IppReader<R> {
        IppReader { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_u8(&mut self) -> Result<u8, IppParseError> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf).map_err(IppParseError::from)?;
        Ok(buf[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, IppParseError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, IppParseError> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf).map_err(IppParseError::from)?;
        Ok(u16::from_be_bytes(buf))
    }

    pub fn read_i16(&mut self) -> Result<i16, IppParseError> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_i32(&mut self) -> Result<i32, IppParseError> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf).map_err(IppParseError::from)?;
        Ok(i32::from_be_bytes(buf))
    }

    pub fn read_exact_vec(&mut self, len: usize) -> Result<Vec<u8>, IppParseError> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf).map_err(IppParseError::from)?;
        Ok(buf)
    }

    /// Read the remainder of the stream verbatim (trailing document data).
    pub fn read_to_end(&mut self) -> Result<Vec<u8>, IppParseError> {
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf).map_err(IppParseError::from)?;
        Ok(buf)
    }
}
