//! Arithmetic for converting between bit and byte quantities.
//!
//! Bit positions count from the most significant bit of byte 0.

/// Splits an absolute bit position into its byte index and the
/// offset of the bit inside that byte.
#[inline(always)]
pub const fn split_bit_pos(pos: u64) -> (u64, u32) {
    (pos >> 3, (pos & 7) as u32)
}

/// Gets the number of whole bytes needed to hold `nbits` bits.
#[inline(always)]
pub const fn bytes_for_bits(nbits: u64) -> u64 {
    (nbits >> 3) + ((nbits & 7) != 0) as u64
}

/// Produces a mask over the low `nbits` bits of a [`u64`].
///
/// Values of 64 and above yield a mask with all bits set.
#[inline(always)]
pub const fn low_mask(nbits: u32) -> u64 {
    if nbits >= u64::BITS {
        u64::MAX
    } else {
        (1 << nbits) - 1
    }
}
