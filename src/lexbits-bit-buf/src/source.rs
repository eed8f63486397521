use std::{fs, io};

#[cold]
#[inline(never)]
fn premature_eof(offset: u64) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("attempted to read byte {offset} past the end of the source"),
    )
}

/// A random-access byte origin for [`BitSeeker`][crate::BitSeeker].
///
/// Reads address a single byte by its absolute offset and make no
/// assumptions about the order in which offsets are visited. Sources
/// are only ever borrowed immutably, so any number of seekers can
/// share one.
pub trait ByteSource {
    /// Reads the byte at absolute position `offset`.
    ///
    /// Offsets past the end of the source fail with
    /// [`io::ErrorKind::UnexpectedEof`].
    fn read_byte_at(&self, offset: u64) -> io::Result<u8>;
}

impl ByteSource for [u8] {
    #[inline]
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        usize::try_from(offset)
            .ok()
            .and_then(|idx| self.get(idx))
            .copied()
            .ok_or_else(|| premature_eof(offset))
    }
}

impl<const N: usize> ByteSource for [u8; N] {
    #[inline]
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        self.as_slice().read_byte_at(offset)
    }
}

impl ByteSource for Vec<u8> {
    #[inline]
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        self.as_slice().read_byte_at(offset)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    #[inline]
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        (**self).read_byte_at(offset)
    }
}

#[cfg(feature = "mmap")]
impl ByteSource for memmap2::Mmap {
    #[inline]
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        self[..].read_byte_at(offset)
    }
}

// `pread` leaves the file cursor alone, so a shared `&File` is fine.
#[cfg(unix)]
impl ByteSource for fs::File {
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        use std::os::unix::fs::FileExt;

        let mut buf = [0; 1];
        match self.read_at(&mut buf, offset)? {
            0 => Err(premature_eof(offset)),
            _ => Ok(buf[0]),
        }
    }
}

#[cfg(windows)]
impl ByteSource for fs::File {
    fn read_byte_at(&self, offset: u64) -> io::Result<u8> {
        use std::os::windows::fs::FileExt;

        let mut buf = [0; 1];
        match self.seek_read(&mut buf, offset)? {
            0 => Err(premature_eof(offset)),
            _ => Ok(buf[0]),
        }
    }
}
