//! Provides bit-granular serialization and random-access
//! deserialization of packed data.
//!
//! Compact encodings such as packed trie or automaton node records
//! store fields that are not aligned to byte boundaries. This crate
//! offers the two primitives needed to produce and consume them:
//!
//! - [`BitWriter`] appends fields of arbitrary width to a sequential
//!   [`ByteSink`], one byte at a time.
//! - [`BitSeeker`] extracts fields of arbitrary width from any bit
//!   offset of a random-access [`ByteSource`].
//!
//! # Bit order
//!
//! Within every byte, bit 0 is the most significant bit. Fields are
//! written and read MSB-first and packed without padding between
//! them. The only padding is the zero bits [`BitWriter::flush`] adds
//! to complete a trailing partial byte.
//!
//! ```
//! use std::io::SeekFrom;
//!
//! use lexbits_bit_buf::{BitSeeker, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11010, 5).unwrap();
//! writer.write_bits(0x3FF, 10).unwrap();
//! writer.flush().unwrap();
//!
//! let data = writer.into_inner();
//! assert_eq!(data, [0xBA, 0xFF, 0xC0]);
//!
//! let mut seeker = BitSeeker::new(&data[..]);
//! seeker.seek(SeekFrom::Start(8)).unwrap();
//! assert_eq!(seeker.read_bits(10).unwrap(), 0x3FF);
//! ```

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod seeker;
pub use seeker::{BitSeeker, SeekError};

mod sink;
pub use sink::ByteSink;

mod source;
pub use source::ByteSource;

mod writer;
pub use writer::BitWriter;
