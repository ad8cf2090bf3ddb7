//! Keyboard triggers for the interactive loop.
//!
//! Lines are read on a plain OS thread instead of the runtime's blocking
//! pool, so a read that never returns cannot hold up runtime shutdown.

use std::io::{BufRead, ErrorKind};

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Any line other than `q`
    Refresh,
    Quit,
    /// End of input or a read error; no further events follow
    Closed,
}

pub fn parse_line(line: &str) -> InputEvent {
    if line.trim().eq_ignore_ascii_case("q") {
        InputEvent::Quit
    } else {
        InputEvent::Refresh
    }
}

/// Read lines from `reader` on a background thread.
pub fn spawn_reader<R>(reader: R) -> mpsc::UnboundedReceiver<InputEvent>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    let spawned = std::thread::Builder::new()
        .name("getij-input".into())
        .spawn(move || read_lines(reader, &tx));
    if let Err(e) = spawned {
        // the sender went down with the closure, so the receiver reports closed
        tracing::warn!(error = %e, "Could not start input thread, keyboard refresh disabled");
    }

    rx
}

fn read_lines<R: BufRead>(mut reader: R, tx: &mpsc::UnboundedSender<InputEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let event = parse_line(&String::from_utf8_lossy(&buf));
                if tx.send(event).is_err() || event == InputEvent::Quit {
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "Reading input failed, keyboard refresh disabled");
                break;
            }
        }
    }
    let _ = tx.send(InputEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};
    use std::sync::mpsc as std_mpsc;

    /// Yields whatever is pushed into the channel and blocks while it is empty.
    struct HeldOpen(std_mpsc::Receiver<Vec<u8>>);

    impl Read for HeldOpen {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.recv() {
                Ok(bytes) => {
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    Ok(n)
                }
                Err(_) => Ok(0),
            }
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("\n"), InputEvent::Refresh);
        assert_eq!(parse_line("refresh\n"), InputEvent::Refresh);
        assert_eq!(parse_line(" Q \n"), InputEvent::Quit);
        assert_eq!(parse_line("q"), InputEvent::Quit);
    }

    #[tokio::test]
    async fn test_lines_then_closed() {
        let mut rx = spawn_reader(Cursor::new(b"\n\nq\nignored\n".to_vec()));
        assert_eq!(rx.recv().await, Some(InputEvent::Refresh));
        assert_eq!(rx.recv().await, Some(InputEvent::Refresh));
        assert_eq!(rx.recv().await, Some(InputEvent::Quit));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_refresh() {
        let mut rx = spawn_reader(Cursor::new(b"\xff\xfe\n".to_vec()));
        assert_eq!(rx.recv().await, Some(InputEvent::Refresh));
        assert_eq!(rx.recv().await, Some(InputEvent::Closed));
    }

    #[tokio::test]
    async fn test_read_error_closes_input() {
        let mut rx = spawn_reader(BufReader::new(Broken));
        assert_eq!(rx.recv().await, Some(InputEvent::Closed));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_runtime_shuts_down_with_read_pending() {
        let (feed, source) = std_mpsc::channel();
        feed.send(b"\n".to_vec()).unwrap();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let mut rx = spawn_reader(BufReader::new(HeldOpen(source)));
            assert_eq!(rx.recv().await, Some(InputEvent::Refresh));
        });
        // the reader thread is still blocked in read(); dropping the runtime must not wait on it
        drop(runtime);

        drop(feed);
    }
}
