use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use super::error::ProbeError;
use super::types::{ProbeStage, SmtpReply};

/// Longest reply line accepted, CRLF included.
const MAX_REPLY_LINE: usize = 8192;
/// Most lines a single multiline reply may carry.
const MAX_REPLY_LINES: usize = 128;

/// A plain-text SMTP connection. Dropping the session sends a best-effort
/// `QUIT` and shuts the socket down, so every exit path closes it.
pub(crate) struct SmtpSession {
    host: String,
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    timeout: Option<Duration>,
}

impl SmtpSession {
    pub(crate) fn connect(
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self, ProbeError> {
        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|err| ProbeError::from_io(ProbeStage::Connect, host, err, timeout))?
            .collect();

        let mut last_err = None;
        for addr in &addrs {
            let attempt = match timeout {
                Some(timeout) => TcpStream::connect_timeout(addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => return Self::from_stream(host, stream, timeout),
                Err(err) => last_err = Some(err),
            }
        }

        let source = last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no socket address available",
            )
        });
        Err(ProbeError::from_io(ProbeStage::Connect, host, source, timeout))
    }

    fn from_stream(
        host: &str,
        stream: TcpStream,
        timeout: Option<Duration>,
    ) -> Result<Self, ProbeError> {
        let io_err = |err| ProbeError::from_io(ProbeStage::Connect, host, err, timeout);
        stream.set_read_timeout(timeout).map_err(io_err)?;
        stream.set_write_timeout(timeout).map_err(io_err)?;
        let reader = BufReader::new(stream.try_clone().map_err(io_err)?);
        Ok(Self {
            host: host.to_string(),
            stream,
            reader,
            timeout,
        })
    }

    pub(crate) fn read_greeting(&mut self) -> Result<SmtpReply, ProbeError> {
        let deadline = self.deadline();
        let reply = self.read_reply(ProbeStage::Greeting, deadline)?;
        tracing::debug!(host = %self.host, code = reply.code, "S: {}", reply.message);
        Ok(reply)
    }

    /// Sends `command` and waits for the complete reply. The whole round
    /// trip shares one deadline.
    pub(crate) fn command(
        &mut self,
        command: &str,
        stage: ProbeStage,
    ) -> Result<SmtpReply, ProbeError> {
        let deadline = self.deadline();
        tracing::debug!(host = %self.host, "C: {command}");
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.stream
            .write_all(&line)
            .and_then(|()| self.stream.flush())
            .map_err(|err| self.io_error(stage, err))?;

        let reply = self.read_reply(stage, deadline)?;
        tracing::debug!(host = %self.host, code = reply.code, "S: {}", reply.message);
        Ok(reply)
    }

    fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|timeout| Instant::now() + timeout)
    }

    fn read_reply(
        &mut self,
        stage: ProbeStage,
        deadline: Option<Instant>,
    ) -> Result<SmtpReply, ProbeError> {
        let mut code = None;
        let mut message_lines = Vec::new();
        loop {
            if message_lines.len() >= MAX_REPLY_LINES {
                return Err(ProbeError::protocol(format!(
                    "SMTP reply exceeds {MAX_REPLY_LINES} lines"
                )));
            }
            let raw = self.read_line(stage, deadline)?;
            let line = parse_reply_line(&raw)?;
            if let Some(existing) = code {
                if existing != line.code {
                    return Err(ProbeError::protocol(format!(
                        "inconsistent SMTP reply codes: {existing} vs {}",
                        line.code
                    )));
                }
            } else {
                code = Some(line.code);
            }
            message_lines.push(line.text);
            if !line.continued {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.ok_or_else(|| ProbeError::protocol("SMTP reply missing status code"))?,
            message: message_lines.join("\n"),
        })
    }

    /// Reads one line, shrinking the socket read timeout to what is left of
    /// `deadline` before every read so a server trickling bytes cannot
    /// stretch the round trip.
    fn read_line(
        &mut self,
        stage: ProbeStage,
        deadline: Option<Instant>,
    ) -> Result<String, ProbeError> {
        let mut line = Vec::new();
        loop {
            if let Some(deadline) = deadline {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(self.timed_out(stage));
                }
                self.stream
                    .set_read_timeout(Some(remaining))
                    .map_err(|err| self.io_error(stage, err))?;
            }

            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ProbeError::from_io(stage, &self.host, err, self.timeout)),
            };
            if available.is_empty() {
                return Err(ProbeError::from_io(
                    stage,
                    &self.host,
                    io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed while reading reply",
                    ),
                    self.timeout,
                ));
            }

            let (taken, complete) = match available.iter().position(|b| *b == b'\n') {
                Some(idx) => (idx + 1, true),
                None => (available.len(), false),
            };
            line.extend_from_slice(&available[..taken]);
            self.reader.consume(taken);

            if line.len() > MAX_REPLY_LINE {
                return Err(ProbeError::protocol(format!(
                    "SMTP reply line longer than {MAX_REPLY_LINE} bytes"
                )));
            }
            if complete {
                return Ok(String::from_utf8_lossy(&line).into_owned());
            }
        }
    }

    fn timed_out(&self, stage: ProbeStage) -> ProbeError {
        ProbeError::from_io(
            stage,
            &self.host,
            io::Error::new(io::ErrorKind::TimedOut, "round trip deadline exceeded"),
            self.timeout,
        )
    }

    fn io_error(&self, stage: ProbeStage, err: io::Error) -> ProbeError {
        ProbeError::from_io(stage, &self.host, err, self.timeout)
    }
}

impl Drop for SmtpSession {
    fn drop(&mut self) {
        let _ = self.stream.write_all(b"QUIT\r\n");
        let _ = self.stream.flush();
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ReplyLine {
    pub code: u16,
    pub continued: bool,
    pub text: String,
}

/// Parses one reply line (`250-text` or `250 text`), CRLF optional.
pub(crate) fn parse_reply_line(raw: &str) -> Result<ReplyLine, ProbeError> {
    let line = raw.trim_end_matches(['\r', '\n']);
    let code_part = line
        .get(..3)
        .ok_or_else(|| ProbeError::protocol(format!("invalid SMTP reply: '{line}'")))?;
    if !code_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProbeError::protocol(format!(
            "invalid SMTP status code: '{code_part}'"
        )));
    }
    let code = code_part
        .parse::<u16>()
        .map_err(|_| ProbeError::protocol(format!("invalid SMTP status code: '{code_part}'")))?;

    let continued = line.as_bytes().get(3).copied() == Some(b'-');
    let text = line.get(4..).unwrap_or_default().to_string();
    Ok(ReplyLine {
        code,
        continued,
        text,
    })
}
