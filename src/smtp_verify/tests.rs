//! Scripted loopback SMTP server shared by the probe and orchestrator tests.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const DEFAULT_GREETING: &str = "220 mock.smtp.test ESMTP\r\n";

/// One client connection: a greeting, then `(expected command prefix, reply)`
/// pairs played in order.
pub(crate) struct MockSession {
    greeting: &'static str,
    script: Vec<(&'static str, &'static str)>,
}

impl MockSession {
    pub(crate) fn new(script: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            greeting: DEFAULT_GREETING,
            script,
        }
    }

    pub(crate) fn with_greeting(mut self, greeting: &'static str) -> Self {
        self.greeting = greeting;
        self
    }

    pub(crate) fn accepting() -> Self {
        Self::rejecting("250 2.1.5 Ok\r\n")
    }

    /// Standard dialogue ending with `rcpt_reply` for `RCPT TO`.
    pub(crate) fn rejecting(rcpt_reply: &'static str) -> Self {
        Self::new(vec![
            ("EHLO", "250 mock.example\r\n"),
            ("MAIL FROM:", "250 2.1.0 Ok\r\n"),
            ("RCPT TO:", rcpt_reply),
        ])
    }
}

/// Serves `sessions` one connection after another on an ephemeral port.
pub(crate) fn spawn_mock_server(sessions: Vec<MockSession>) -> (u16, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let (ready_tx, ready_rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        ready_tx.send(()).ok();
        for session in sessions {
            let (mut stream, _) = listener.accept().expect("accept");
            handle_session(&mut stream, session).expect("mock session I/O");
        }
    });
    ready_rx.recv().expect("server ready");
    (port, handle)
}

/// Accepts one connection and keeps it open without ever answering.
pub(crate) fn spawn_silent_server(hold: Duration) -> (u16, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let handle = thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(hold);
            drop(stream);
        }
    });
    (port, handle)
}

/// Writes `payload` in `chunk`-sized pieces, pausing `interval` between
/// them, then drains the connection until the client hangs up.
pub(crate) fn spawn_drip_server(
    payload: Vec<u8>,
    chunk: usize,
    interval: Duration,
) -> (u16, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let handle = thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        for piece in payload.chunks(chunk.max(1)) {
            if stream.write_all(piece).and_then(|()| stream.flush()).is_err() {
                return;
            }
            thread::sleep(interval);
        }
        let mut rest = Vec::new();
        let _ = stream.read_to_end(&mut rest);
    });
    (port, handle)
}

fn handle_session(stream: &mut TcpStream, session: MockSession) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    stream.write_all(session.greeting.as_bytes())?;
    stream.flush()?;
    for (expected, response) in session.script {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        assert!(
            line.starts_with(expected),
            "expected command starting with '{expected}', got '{line}'"
        );
        stream.write_all(response.as_bytes())?;
        stream.flush()?;
    }
    // Drain the trailing QUIT until the client hangs up.
    let mut rest = Vec::new();
    let _ = reader.read_to_end(&mut rest);
    Ok(())
}
