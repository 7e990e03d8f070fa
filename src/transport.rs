//! Line oriented connections to the challenge
//!
//! The session only reads and writes whole lines. Once it is over, control
//! is handed to the operator with [`Transport::interactive`], which forwards
//! stdin to the peer and the peer's output to stdout.
mod process;
mod remote;

pub use self::process::Process;
pub use self::remote::Remote;

use log::{debug, trace};
use std::io::{self, BufRead, Write};
use std::thread;

/// A bidirectional, line oriented byte stream
pub trait Transport {
    /// Blocks until a full line has arrived. The terminator is included,
    /// unless the peer closed the stream in the middle of the line.
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if the stream is already closed.
    fn receive_line(&mut self) -> io::Result<Vec<u8>>;

    /// Sends `line` followed by a newline.
    fn send_line(&mut self, line: &[u8]) -> io::Result<()>;

    /// Passes the connection through to stdin and stdout until either side closes.
    fn interactive(self) -> io::Result<()>
    where
        Self: Sized;
}

/// A transport over a separate reader and writer
#[derive(Debug)]
pub struct Tube<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Tube<R, W> {
    /// Wraps the two halves of a connection
    pub fn new(reader: R, writer: W) -> Self {
        Tube { reader, writer }
    }

    /// Returns the reader and the writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R, W> Transport for Tube<R, W>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    fn receive_line(&mut self) -> io::Result<Vec<u8>> {
        read_line(&mut self.reader)
    }

    fn send_line(&mut self, line: &[u8]) -> io::Result<()> {
        write_line(&mut self.writer, line)
    }

    fn interactive(self) -> io::Result<()> {
        let Tube { mut reader, mut writer } = self;
        let output = thread::spawn(move || io::copy(&mut reader, &mut io::stdout().lock()));

        forward_stdin(&mut writer)?;
        // closes our side, the peer sees EOF
        drop(writer);

        match output.join() {
            Ok(copied) => copied.map(|n| debug!("peer closed after {} bytes", n)),
            Err(_) => Err(io::Error::new(io::ErrorKind::Other, "output thread panicked")),
        }
    }
}

pub(crate) fn read_line<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    if reader.read_until(b'\n', &mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed by peer",
        ));
    }
    trace!("<- {:?}", String::from_utf8_lossy(&line));
    Ok(line)
}

pub(crate) fn write_line<W: Write + ?Sized>(writer: &mut W, line: &[u8]) -> io::Result<()> {
    trace!("-> {:?}", String::from_utf8_lossy(line));
    writer.write_all(line)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

// copies stdin line by line until EOF
fn forward_stdin<W: Write + ?Sized>(writer: &mut W) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut line = Vec::new();
    loop {
        line.clear();
        if stdin.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        match writer.write_all(&line).and_then(|()| writer.flush()) {
            Ok(()) => {}
            // peer is gone, nothing left to forward to
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}
