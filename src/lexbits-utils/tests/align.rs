use lexbits_utils::align::*;

#[test]
fn test_split_bit_pos() {
    assert_eq!(split_bit_pos(0), (0, 0));
    assert_eq!(split_bit_pos(7), (0, 7));
    assert_eq!(split_bit_pos(8), (1, 0));
    assert_eq!(split_bit_pos(70), (8, 6));
}

#[test]
fn test_bytes_for_bits() {
    assert_eq!(bytes_for_bits(0), 0);
    assert_eq!(bytes_for_bits(1), 1);
    assert_eq!(bytes_for_bits(8), 1);
    assert_eq!(bytes_for_bits(9), 2);
    assert_eq!(bytes_for_bits(64), 8);
}

#[test]
fn test_low_mask() {
    assert_eq!(low_mask(0), 0);
    assert_eq!(low_mask(3), 0b111);
    assert_eq!(low_mask(63), u64::MAX >> 1);
    assert_eq!(low_mask(64), u64::MAX);
    assert_eq!(low_mask(100), u64::MAX);
}
