use std::io::{self, SeekFrom};

use lexbits_utils::{align::split_bit_pos, hints::cold_path};
use thiserror::Error;

use crate::ByteSource;

/// Errors that may occur when reading from a [`BitSeeker`].
#[derive(Debug, Error)]
pub enum SeekError {
    /// Reading a byte from the underlying source failed.
    #[error("failed to read from byte source: {0}")]
    Io(#[from] io::Error),

    /// More bits were requested than fit into a [`u64`].
    #[error("cannot read {0} bits at once; the maximum is 64")]
    TooWide(u32),

    /// The seek mode cannot be served without knowing the source's end.
    #[error("unsupported seek mode: {0:?}")]
    UnsupportedWhence(SeekFrom),

    /// The cursor would move before the first bit of the source.
    #[error("bit position would move before the start of the source")]
    NegativePosition,

    /// The cursor would move past the largest representable position.
    #[error("bit position overflows")]
    Overflow,
}

/// A bit-precision cursor over a random-access [`ByteSource`].
///
/// Fields are extracted MSB-first and may start at any bit and span
/// any number of bytes, up to 64 bits per read. The source is only
/// borrowed, so several seekers may walk the same data at once.
///
/// Failed operations leave the cursor where it was.
#[derive(Debug)]
pub struct BitSeeker<'a, S: ?Sized> {
    source: &'a S,
    pos: u64,
}

impl<'a, S: ByteSource + ?Sized> BitSeeker<'a, S> {
    /// Creates a new [`BitSeeker`] positioned at the first bit of
    /// `source`.
    pub const fn new(source: &'a S) -> Self {
        Self { source, pos: 0 }
    }

    /// Gets the source this seeker reads from.
    #[inline]
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Gets the absolute bit position of the cursor.
    #[inline]
    pub fn tell(&self) -> u64 {
        self.pos
    }

    /// Gets the index of the byte the cursor currently points into.
    #[inline]
    pub fn byte_offset(&self) -> u64 {
        split_bit_pos(self.pos).0
    }

    /// Gets the position of the cursor inside its current byte,
    /// where 0 is the most significant bit.
    #[inline]
    pub fn bit_offset(&self) -> u32 {
        split_bit_pos(self.pos).1
    }

    /// Reads the next `nbits` bits as an unsigned integer and
    /// advances the cursor past them.
    ///
    /// Reading 0 bits yields 0 without touching the source.
    pub fn read_bits(&mut self, nbits: u32) -> Result<u64, SeekError> {
        let (value, end) = self.extract(nbits)?;
        self.pos = end;

        Ok(value)
    }

    /// Reads the next `nbits` bits without advancing the cursor.
    pub fn peek_bits(&self, nbits: u32) -> Result<u64, SeekError> {
        self.extract(nbits).map(|(value, _)| value)
    }

    /// Reads a single bit and advances the cursor.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool, SeekError> {
        self.read_bits(1).map(|v| v != 0)
    }

    fn extract(&self, mut nbits: u32) -> Result<(u64, u64), SeekError> {
        if nbits > u64::BITS {
            cold_path();
            return Err(SeekError::TooWide(nbits));
        }
        if nbits == 0 {
            return Ok((0, self.pos));
        }

        let end = self
            .pos
            .checked_add(nbits as u64)
            .ok_or(SeekError::Overflow)?;

        let (byte, bit_offset) = split_bit_pos(self.pos);
        let head = self.source.read_byte_at(byte)? & (0xFFu8 >> bit_offset);

        // Fast path: the whole field lives inside the current byte.
        if bit_offset + nbits <= 8 {
            let value = head >> (8 - bit_offset - nbits);
            return Ok((value as u64, end));
        }

        // The field spans bytes. Take the head's remaining bits and
        // continue from the following byte boundary.
        let mut value = head as u64;
        let mut byte = byte + 1;
        nbits -= 8 - bit_offset;

        while nbits >= 8 {
            value = (value << 8) | self.source.read_byte_at(byte)? as u64;
            byte += 1;
            nbits -= 8;
        }

        if nbits > 0 {
            let tail = self.source.read_byte_at(byte)? >> (8 - nbits);
            value = (value << nbits) | tail as u64;
        }

        Ok((value, end))
    }

    /// Repositions the cursor and returns the new absolute bit
    /// position.
    ///
    /// [`SeekFrom::Start`] and [`SeekFrom::Current`] are supported.
    /// Since sources don't expose their length, [`SeekFrom::End`]
    /// fails with [`SeekError::UnsupportedWhence`].
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, SeekError> {
        let new = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(offset) => offset_pos(self.pos, offset)?,
            SeekFrom::End(..) => {
                cold_path();
                return Err(SeekError::UnsupportedWhence(pos));
            }
        };

        log::trace!("Seeking from bit {} to bit {new}", self.pos);
        self.pos = new;

        Ok(new)
    }

    /// Moves the cursor by `offset` bits, relative to its current
    /// position.
    ///
    /// This never touches the source.
    #[inline]
    pub fn skip(&mut self, offset: i64) -> Result<(), SeekError> {
        self.pos = offset_pos(self.pos, offset)?;
        Ok(())
    }

    /// Advances the cursor to the next byte boundary, unless it is
    /// already aligned. Returns the new position.
    pub fn realign_to_byte(&mut self) -> Result<u64, SeekError> {
        let pad = (8 - self.bit_offset()) & 7;
        self.skip(pad as i64)?;

        Ok(self.pos)
    }
}

#[inline]
fn offset_pos(pos: u64, offset: i64) -> Result<u64, SeekError> {
    if offset >= 0 {
        pos.checked_add(offset as u64).ok_or(SeekError::Overflow)
    } else {
        pos.checked_sub(offset.unsigned_abs())
            .ok_or(SeekError::NegativePosition)
    }
}
