use std::io::{self, Write};

use lexbits_utils::{align::low_mask, hints::cold_path};

use crate::ByteSink;

#[cold]
#[inline(never)]
fn field_too_wide(nbits: u32) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("cannot write {nbits} bits at once; the maximum is 64"),
    )
}

/// A writer which packs fields of arbitrary bit width into a byte
/// sink.
///
/// Bits are accumulated MSB-first in a single byte cache. Every
/// completed byte is immediately written to the sink, so the writer
/// never holds more than 7 pending bits between calls.
///
/// After the last field, [`BitWriter::flush`] or [`BitWriter::close`]
/// must be called to emit a trailing partial byte. Dropping the
/// writer discards pending bits.
#[derive(Debug)]
pub struct BitWriter<W> {
    // The sink completed bytes are written to.
    inner: W,

    // Bits of the partial byte, right-aligned.
    cache: u8,

    // How many bits in `cache` are currently filled.
    used: u32,

    // Number of bytes handed to the sink so far.
    emitted: u64,
}

impl<W: Write> BitWriter<W> {
    /// Creates a new [`BitWriter`] over the given sink.
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            cache: 0,
            used: 0,
            emitted: 0,
        }
    }

    /// Gets the number of bits buffered in the partial byte.
    ///
    /// This is always below 8.
    #[inline]
    pub fn pending_bits(&self) -> u32 {
        self.used
    }

    /// Gets the total number of bits written so far, including
    /// pending ones.
    #[inline]
    pub fn written_bits(&self) -> u64 {
        (self.emitted << 3) + self.used as u64
    }

    /// Gets a reference to the underlying sink.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Gets a mutable reference to the underlying sink.
    ///
    /// Writing bytes directly to it while bits are pending will
    /// interleave them before the partial byte.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consumes the [`BitWriter`] and returns the sink.
    ///
    /// Pending bits are lost; call [`BitWriter::flush`] first.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn emit(&mut self, byte: u8) -> io::Result<()> {
        // Reset before writing so a failed sink never leaves a full cache.
        self.cache = 0;
        self.used = 0;

        self.inner.write_all(&[byte])?;
        self.emitted += 1;

        Ok(())
    }

    /// Appends the low `nbits` bits of `value`, most significant bit
    /// first.
    ///
    /// Any higher bits in `value` are ignored. Writing 0 bits does
    /// nothing.
    ///
    /// Fails when `nbits` exceeds 64 or when the sink rejects a
    /// completed byte. In the latter case, the writer should not be
    /// used anymore.
    pub fn write_bits(&mut self, value: u64, mut nbits: u32) -> io::Result<()> {
        if nbits > u64::BITS {
            cold_path();
            return Err(field_too_wide(nbits));
        }

        while nbits > 0 {
            let chunk = nbits.min(8 - self.used);
            let bits = ((value >> (nbits - chunk)) & low_mask(chunk)) as u8;

            // `chunk` may be 8 when the cache is empty, so shift in a
            // wider type and let the truncation drop emitted bits.
            self.cache = ((self.cache as u16) << chunk) as u8 | bits;
            self.used += chunk;

            if self.used == 8 {
                self.emit(self.cache)?;
            }

            nbits -= chunk;
        }

        Ok(())
    }

    /// Appends a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Emits the pending partial byte, if any, with its low bits
    /// zero-padded, then flushes the sink.
    ///
    /// Without pending bits this does nothing. Subsequent writes
    /// start at a fresh byte.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.used > 0 {
            log::debug!("Padding partial byte with {} zero bits", 8 - self.used);
            self.emit(self.cache << (8 - self.used))?;
            self.inner.flush()?;
        }

        Ok(())
    }
}

impl<W: ByteSink> BitWriter<W> {
    /// Flushes pending bits and finalizes the sink.
    ///
    /// When flushing fails, the sink is not closed.
    pub fn close(mut self) -> io::Result<()> {
        self.flush()?;

        log::trace!("Closing sink after {} bytes", self.emitted);
        self.inner.close()
    }
}
