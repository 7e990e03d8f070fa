use super::{read_line, write_line, Transport};
use log::{debug, info};
use rustls::{ClientConfig, ClientConnection, OwnedTrustAnchor, RootCertStore, ServerName, StreamOwned};
use std::convert::TryFrom;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

type TlsStream = StreamOwned<ClientConnection, TcpStream>;

// how long a read blocks in interactive mode before stdin is checked again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A TLS connection to the hosted challenge
pub struct Remote {
    stream: BufReader<TlsStream>,
}

impl Remote {
    /// Connects to `host:port` and verifies the certificate against the webpki roots.
    pub fn connect(host: &str, port: u16) -> io::Result<Self> {
        let mut root_store = RootCertStore::empty();
        root_store.add_trust_anchors(webpki_roots::TLS_SERVER_ROOTS.iter().map(|ta| {
            OwnedTrustAnchor::from_subject_spki_name_constraints(
                ta.subject,
                ta.spki,
                ta.name_constraints,
            )
        }));
        let config = ClientConfig::builder()
            .with_safe_defaults()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let server_name = ServerName::try_from(host)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        let conn = ClientConnection::new(Arc::new(config), server_name)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let sock = TcpStream::connect((host, port))?;
        info!("connected to {}:{}", host, port);

        Ok(Remote {
            stream: BufReader::new(StreamOwned::new(conn, sock)),
        })
    }
}

impl Transport for Remote {
    fn receive_line(&mut self) -> io::Result<Vec<u8>> {
        read_line(&mut self.stream)
    }

    fn send_line(&mut self, line: &[u8]) -> io::Result<()> {
        write_line(self.stream.get_mut(), line)
    }

    // The TLS session can't be split into a read and a write half, so reads
    // time out regularly to give queued stdin lines a chance to be sent.
    fn interactive(mut self) -> io::Result<()> {
        let (lines_tx, lines_rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().split(b'\n') {
                match line {
                    Ok(mut line) => {
                        line.push(b'\n');
                        if lines_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        let mut stdout = io::stdout();
        // whatever the session did not consume yet
        let buffered = self.stream.buffer().len();
        stdout.write_all(self.stream.buffer())?;
        self.stream.consume(buffered);
        stdout.flush()?;

        let stream = self.stream.get_mut();
        stream.sock.set_read_timeout(Some(POLL_INTERVAL))?;
        let mut buf = [0; 4096];
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    stdout.write_all(&buf[..n])?;
                    stdout.flush()?;
                }
                Err(err) if is_timeout(&err) => {}
                // peer went away without close_notify
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err),
            }

            loop {
                match lines_rx.try_recv() {
                    Ok(line) => {
                        stream.write_all(&line)?;
                        stream.flush()?;
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        debug!("stdin closed");
                        return Ok(());
                    }
                }
            }
        }
        debug!("peer closed the connection");
        Ok(())
    }
}

fn is_timeout(err: &io::Error) -> bool {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => true,
        _ => false,
    }
}
