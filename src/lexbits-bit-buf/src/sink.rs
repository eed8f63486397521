use std::{
    fs,
    io::{self, Write},
    net::{Shutdown, TcpStream},
};

/// A sequential byte destination for [`BitWriter`][crate::BitWriter].
///
/// Every [`Write`] implementor can be a sink. Sinks which need to be
/// finalized, such as files or buffered writers, override
/// [`ByteSink::close`]; for everything else closing succeeds without
/// doing anything.
pub trait ByteSink: Write {
    /// Finalizes the sink after the last byte was written.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ByteSink for Vec<u8> {}

impl ByteSink for io::Cursor<Vec<u8>> {}

impl ByteSink for io::Cursor<&mut Vec<u8>> {}

impl ByteSink for io::Cursor<&mut [u8]> {}

impl ByteSink for io::Cursor<Box<[u8]>> {}

impl<const N: usize> ByteSink for io::Cursor<[u8; N]> {}

impl ByteSink for &mut [u8] {}

impl ByteSink for io::Sink {}

impl ByteSink for io::Stdout {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ByteSink for io::StdoutLock<'_> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl ByteSink for io::Stderr {}

impl ByteSink for io::StderrLock<'_> {}

impl ByteSink for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.shutdown(Shutdown::Write)
    }
}

impl ByteSink for fs::File {
    fn close(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

impl<W: ByteSink> ByteSink for io::BufWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        // Drain our own buffer before finalizing what's underneath.
        self.flush()?;
        self.get_mut().close()
    }
}

impl<W: ByteSink + ?Sized> ByteSink for &mut W {
    #[inline]
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<W: ByteSink + ?Sized> ByteSink for Box<W> {
    #[inline]
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
