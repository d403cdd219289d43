use crate::dns::errors::{DecodeQueryErrors, Malformed};

/// A forward-only cursor over a received buffer.
///
/// Every read is checked against the end of the buffer and fails with
/// [`Malformed::Truncated`] instead of panicking.
#[derive(Debug, Clone)]
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    current: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Reader { buf, current: 0 }
    }

    /// Starts reading at `offset`. An offset past the end is clamped, so the next
    /// read reports truncation.
    pub(crate) fn at(buf: &'a [u8], offset: usize) -> Self {
        Reader {
            buf,
            current: offset.min(buf.len()),
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.current
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.current
    }

    pub(crate) fn take_slice(
        &mut self,
        len: usize,
        field: &'static str,
    ) -> Result<&'a [u8], DecodeQueryErrors> {
        if len > self.remaining() {
            return Err(Malformed::Truncated {
                field,
                offset: self.current,
                needed: len,
                available: self.remaining(),
            }
            .into());
        }
        let result = &self.buf[self.current..self.current + len];
        self.current += len;
        Ok(result)
    }

    pub(crate) fn take(&mut self, field: &'static str) -> Result<u8, DecodeQueryErrors> {
        Ok(self.take_slice(1, field)?[0])
    }

    pub(crate) fn take_u16(&mut self, field: &'static str) -> Result<u16, DecodeQueryErrors> {
        let bytes = self.take_slice(2, field)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn take_u32(&mut self, field: &'static str) -> Result<u32, DecodeQueryErrors> {
        let bytes = self.take_slice(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
