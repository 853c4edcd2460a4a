// util.rs

use std::io::{ErrorKind, Write};

/// Writes `s` and a newline, treating a closed pipe (`rsearch pick | head`)
/// as success.
pub fn writeln_ignore_broken_pipe<W: Write, S: AsRef<str>>(mut w: W, s: S) -> std::io::Result<()> {
    let result = writeln!(w, "{}", s.as_ref()).and_then(|_| w.flush());
    match result {
        Err(ref e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(ErrorKind::BrokenPipe.into())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn broken_pipe_is_not_an_error() {
        assert!(writeln_ignore_broken_pipe(ClosedPipe, "ls -la").is_ok());
    }

    #[test]
    fn writes_a_full_line() {
        let mut out = Vec::new();
        writeln_ignore_broken_pipe(&mut out, "git status").unwrap();
        assert_eq!(out, b"git status\n");
    }
}
