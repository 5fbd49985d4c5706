//! The small DER subset crypto-conditions use: context-specific tags,
//! definite lengths, octet strings, unsigned integers and bit strings.

use crate::error::CryptoError;

pub(crate) const SEQUENCE: u8 = 0x30;

/// Context-specific primitive tag `[n]`.
pub(crate) fn primitive(n: u8) -> u8 {
    0x80 | n
}

/// Context-specific constructed tag `[n]`.
pub(crate) fn constructed(n: u8) -> u8 {
    0xA0 | n
}

pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    fn byte(&mut self) -> Result<u8, CryptoError> {
        let b = *self
            .buf
            .get(self.pos)
            .ok_or(CryptoError::Der("unexpected end of input"))?;
        self.pos += 1;
        Ok(b)
    }

    fn length(&mut self) -> Result<usize, CryptoError> {
        let first = self.byte()?;
        if first < 0x80 {
            return Ok(usize::from(first));
        }
        let count = usize::from(first & 0x7F);
        if count == 0 || count > 4 {
            return Err(CryptoError::Der("unsupported length encoding"));
        }
        let mut len = 0usize;
        for _ in 0..count {
            len = (len << 8) | usize::from(self.byte()?);
        }
        if len < 0x80 || (count > 1 && len >> ((count - 1) * 8) == 0) {
            return Err(CryptoError::Der("non-minimal length"));
        }
        Ok(len)
    }

    /// Read one tag-length-value triple and return the tag and the contents.
    pub fn tlv(&mut self) -> Result<(u8, &'a [u8]), CryptoError> {
        let tag = self.byte()?;
        let len = self.length()?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(CryptoError::Der("length runs past the end of input"))?;
        let contents = &self.buf[self.pos..end];
        self.pos = end;
        Ok((tag, contents))
    }

    /// Read a TLV and require a specific tag.
    pub fn expect_tag(&mut self, tag: u8) -> Result<&'a [u8], CryptoError> {
        let (actual, contents) = self.tlv()?;
        if actual != tag {
            return Err(CryptoError::Der("unexpected tag"));
        }
        Ok(contents)
    }

    pub fn finish(&self) -> Result<(), CryptoError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CryptoError::TrailingBytes(self.remaining()))
        }
    }
}

pub(crate) fn write_tlv(out: &mut Vec<u8>, tag: u8, contents: &[u8]) {
    out.push(tag);
    let len = contents.len();
    if len < 0x80 {
        out.push(len as u8);
    } else {
        let bytes = len.to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        out.push(0x80 | (bytes.len() - skip) as u8);
        out.extend_from_slice(&bytes[skip..]);
    }
    out.extend_from_slice(contents);
}

/// Minimal two's-complement encoding of a non-negative integer.
pub(crate) fn encode_uint(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count().min(7);
    let mut out = Vec::with_capacity(9);
    if bytes[skip] & 0x80 != 0 {
        out.push(0);
    }
    out.extend_from_slice(&bytes[skip..]);
    out
}

pub(crate) fn decode_uint(contents: &[u8]) -> Result<u64, CryptoError> {
    match contents {
        [] => Err(CryptoError::Der("empty integer")),
        [first, ..] if first & 0x80 != 0 => Err(CryptoError::Der("negative integer")),
        [0, second, ..] if second & 0x80 == 0 => Err(CryptoError::Der("non-minimal integer")),
        _ if contents.len() > 5 => Err(CryptoError::Der("integer exceeds 32 bits")),
        _ => {
            let value = contents.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
            if value > u64::from(u32::MAX) {
                return Err(CryptoError::Der("integer exceeds 32 bits"));
            }
            Ok(value)
        }
    }
}
