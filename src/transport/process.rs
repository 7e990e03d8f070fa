use super::{Transport, Tube};
use log::{debug, info};
use std::ffi::OsStr;
use std::io::{self, BufReader};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A locally spawned challenge, talked to over its stdin and stdout
///
/// stderr is inherited, so the challenge's diagnostics show up in the terminal.
#[derive(Debug)]
pub struct Process {
    child: Child,
    tube: Tube<BufReader<ChildStdout>, ChildStdin>,
}

impl Process {
    /// Spawns `program` with `args`.
    pub fn spawn<P, I, A>(program: P, args: I) -> io::Result<Self>
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let mut child = Command::new(program.as_ref())
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        info!(
            "started {} (pid {})",
            program.as_ref().to_string_lossy(),
            child.id()
        );

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "child process has no piped stdin/stdout",
                ));
            }
        };

        Ok(Process {
            child,
            tube: Tube::new(BufReader::new(stdout), stdin),
        })
    }
}

impl Transport for Process {
    fn receive_line(&mut self) -> io::Result<Vec<u8>> {
        self.tube.receive_line()
    }

    fn send_line(&mut self, line: &[u8]) -> io::Result<()> {
        self.tube.send_line(line)
    }

    fn interactive(self) -> io::Result<()> {
        let Process { mut child, tube } = self;
        tube.interactive()?;
        let status = child.wait()?;
        debug!("challenge exited with {}", status);
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn echo_roundtrip() {
        let mut process = Process::spawn("cat", std::iter::empty::<&str>()).unwrap();
        process.send_line(b"hello").unwrap();
        assert_eq!(process.receive_line().unwrap(), b"hello\n");
        let Process { mut child, tube } = process;
        drop(tube);
        assert!(child.wait().unwrap().success());
    }

    #[test]
    fn eof_after_exit() {
        let mut process = Process::spawn("true", std::iter::empty::<&str>()).unwrap();
        let err = process.receive_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
