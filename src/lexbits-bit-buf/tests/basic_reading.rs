use std::io::{self, SeekFrom, Write};

use lexbits_bit_buf::{BitSeeker, SeekError};

#[test]
fn read_across_byte_boundary() -> Result<(), SeekError> {
    let data = [0xFF, 0x00];
    let mut seeker = BitSeeker::new(&data);

    assert_eq!(seeker.seek(SeekFrom::Start(6))?, 6);
    assert_eq!(seeker.read_bits(4)?, 0b1100);
    assert_eq!(seeker.tell(), 10);

    Ok(())
}

#[test]
fn read_primitives() -> Result<(), SeekError> {
    let data = [0xAB, 0xCD, 0xEF];
    let mut seeker = BitSeeker::new(&data[..]);

    assert_eq!(seeker.read_bits(4)?, 0xA);
    assert_eq!(seeker.read_bits(8)?, 0xBC);
    assert_eq!(seeker.read_bits(12)?, 0xDEF);
    assert_eq!(seeker.tell(), 24);

    Ok(())
}

#[test]
fn read_odd_widths() -> Result<(), SeekError> {
    let data = [0xDE, 0xAD, 0xBE, 0xEF];
    let mut seeker = BitSeeker::new(&data);

    assert_eq!(seeker.read_bits(5)?, 0b11011);
    assert_eq!(seeker.read_bits(13)?, 0x1AB6);
    assert_eq!(seeker.read_bits(14)?, 0x3EEF);

    Ok(())
}

#[test]
fn read_bits_one_by_one() -> Result<(), SeekError> {
    let data = [0b1010_1010];
    let mut seeker = BitSeeker::new(&data);

    for _ in 0..4 {
        assert!(seeker.read_bit()?);
        assert!(!seeker.read_bit()?);
    }

    Ok(())
}

#[test]
fn read_full_width_unaligned() -> Result<(), SeekError> {
    let data = [0xA0, 0x24, 0x68, 0xAC, 0xF1, 0x35, 0x79, 0xBD, 0xE0];
    let mut seeker = BitSeeker::new(&data);

    assert_eq!(seeker.read_bits(3)?, 0b101);
    assert_eq!(seeker.read_bits(u64::BITS)?, 0x0123_4567_89AB_CDEF);
    assert_eq!(seeker.tell(), 67);

    Ok(())
}

#[test]
fn read_zero_bits() -> Result<(), SeekError> {
    let empty: [u8; 0] = [];
    let mut seeker = BitSeeker::new(&empty);

    assert_eq!(seeker.read_bits(0)?, 0);
    assert_eq!(seeker.tell(), 0);

    Ok(())
}

#[test]
fn seek_and_skip() -> Result<(), SeekError> {
    let data = [0x12, 0x34, 0x56];
    let mut seeker = BitSeeker::new(&data);

    seeker.read_bits(12)?;
    assert_eq!(seeker.seek(SeekFrom::Start(0))?, 0);
    assert_eq!(seeker.read_bits(8)?, 0x12);

    assert_eq!(seeker.seek(SeekFrom::Current(4))?, 12);
    assert_eq!(seeker.read_bits(4)?, 0x4);

    assert_eq!(seeker.seek(SeekFrom::Current(-12))?, 4);
    assert_eq!(seeker.read_bits(8)?, 0x23);

    seeker.skip(-8)?;
    assert_eq!(seeker.tell(), 4);
    seeker.skip(12)?;
    assert_eq!(seeker.read_bits(8)?, 0x56);

    Ok(())
}

#[test]
fn seek_rejects_invalid_positions() {
    let data = [0u8; 2];
    let mut seeker = BitSeeker::new(&data);
    seeker.skip(3).unwrap();

    assert!(matches!(
        seeker.seek(SeekFrom::End(0)),
        Err(SeekError::UnsupportedWhence(SeekFrom::End(0)))
    ));
    assert!(matches!(
        seeker.seek(SeekFrom::Current(-4)),
        Err(SeekError::NegativePosition)
    ));
    assert!(matches!(seeker.skip(-4), Err(SeekError::NegativePosition)));

    assert_eq!(seeker.tell(), 3);
}

#[test]
fn read_past_end_keeps_cursor() {
    let data = [0xFF];
    let mut seeker = BitSeeker::new(&data);
    seeker.skip(4).unwrap();

    match seeker.read_bits(8) {
        Err(SeekError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("expected EOF error, got {other:?}"),
    }
    assert_eq!(seeker.tell(), 4);

    assert_eq!(seeker.read_bits(4).unwrap(), 0xF);
}

#[test]
fn reject_too_wide_field() {
    let data = [0u8; 16];
    let mut seeker = BitSeeker::new(&data);

    assert!(matches!(seeker.read_bits(65), Err(SeekError::TooWide(65))));
    assert_eq!(seeker.tell(), 0);
}

#[test]
fn peek_and_realign() -> Result<(), SeekError> {
    let data = [0x0F, 0xF0];
    let mut seeker = BitSeeker::new(&data);

    assert_eq!(seeker.peek_bits(8)?, 0x0F);
    assert_eq!(seeker.tell(), 0);

    assert_eq!(seeker.realign_to_byte()?, 0);

    seeker.read_bits(3)?;
    assert_eq!(seeker.byte_offset(), 0);
    assert_eq!(seeker.bit_offset(), 3);

    assert_eq!(seeker.realign_to_byte()?, 8);
    assert_eq!(seeker.read_bits(4)?, 0xF);

    Ok(())
}

#[test]
fn seekers_share_source() -> Result<(), SeekError> {
    let data = vec![0xC3, 0x3C];
    let mut first = BitSeeker::new(&data);
    let mut second = BitSeeker::new(first.source());

    second.skip(8)?;
    assert_eq!(first.read_bits(8)?, 0xC3);
    assert_eq!(second.read_bits(8)?, 0x3C);

    Ok(())
}

#[test]
fn read_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::tempfile()?;
    file.write_all(&[0xFF, 0x00])?;

    let mut seeker = BitSeeker::new(&file);
    seeker.seek(SeekFrom::Start(6))?;
    assert_eq!(seeker.read_bits(4)?, 0xC);

    assert!(matches!(seeker.read_bits(8), Err(SeekError::Io(..))));

    Ok(())
}
