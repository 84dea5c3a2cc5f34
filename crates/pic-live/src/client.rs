use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::{Duration, Instant};

use pic_core::{ErrorInfo, LiveConfig, PicError};
use tracing::{debug, info, warn};

use crate::translate::{translator_for, PathTranslator};

/// Encodes the single request line, `{"gds": "<path>"}` plus a newline.
pub fn preview_line(remote_path: &str) -> Result<Vec<u8>, PicError> {
    let path = serde_json::to_string(remote_path)
        .map_err(|err| PicError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    Ok(format!("{{\"gds\": {path}}}\n").into_bytes())
}

/// Outcome of one successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReport {
    /// Path as sent to the viewer.
    pub remote_path: String,
    /// Address the connection was made to.
    pub peer: SocketAddr,
    /// Length of the request line.
    pub bytes_sent: usize,
    /// Bytes read back from the viewer before it closed or the drain expired.
    pub drained_bytes: usize,
}

/// Client for a live viewer endpoint.
pub struct LiveClient {
    host: String,
    port: u16,
    io_timeout: Duration,
    drain_timeout: Duration,
    translator: Box<dyn PathTranslator>,
}

impl LiveClient {
    /// Client for the configured endpoint, timeouts and path style.
    pub fn new(config: &LiveConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            io_timeout: Duration::from_millis(config.connect_timeout_ms),
            drain_timeout: Duration::from_millis(config.drain_timeout_ms),
            translator: translator_for(config.path_style),
        }
    }

    /// Replaces the path translator.
    pub fn with_translator(mut self, translator: Box<dyn PathTranslator>) -> Self {
        self.translator = translator;
        self
    }

    /// Announces the layout file at `path` to the viewer.
    ///
    /// Path, connect and write failures are errors. Anything that goes
    /// wrong after the write side is closed only shortens the drain.
    pub fn push(&self, path: &Path) -> Result<PushReport, PicError> {
        if !path.exists() {
            return Err(PicError::Transport(
                ErrorInfo::new("layout-missing", "layout file does not exist")
                    .with_context("path", path.display()),
            ));
        }
        let absolute = fs::canonicalize(path).map_err(|err| {
            PicError::Transport(
                ErrorInfo::new("path-canonicalize", err.to_string()).with_context("path", path.display()),
            )
        })?;
        let remote_path = self.translator.translate(&absolute)?;
        let line = preview_line(&remote_path)?;

        let mut stream = self.connect()?;
        let peer = stream.peer_addr().map_err(|err| self.io_error("connect-failed", err))?;
        stream
            .set_read_timeout(Some(self.io_timeout))
            .and_then(|_| stream.set_write_timeout(Some(self.io_timeout)))
            .map_err(|err| self.io_error("socket-options", err))?;
        stream
            .write_all(&line)
            .and_then(|_| stream.flush())
            .map_err(|err| self.io_error("write-failed", err))?;
        stream
            .shutdown(Shutdown::Write)
            .map_err(|err| self.io_error("shutdown-failed", err))?;

        let drained_bytes = self.drain(&mut stream);
        info!(
            %peer,
            remote_path = remote_path.as_str(),
            bytes_sent = line.len(),
            drained_bytes,
            "pushed layout to viewer"
        );
        Ok(PushReport {
            remote_path,
            peer,
            bytes_sent: line.len(),
            drained_bytes,
        })
    }

    fn connect(&self) -> Result<TcpStream, PicError> {
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|err| self.io_error("resolve-failed", err))?;
        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.io_timeout) {
                Ok(stream) => return Ok(stream),
                Err(err) => {
                    debug!(%addr, error = %err, "connect attempt failed");
                    last_error = Some(err);
                }
            }
        }
        let message = match last_error {
            Some(err) => err.to_string(),
            None => "host resolved to no addresses".to_string(),
        };
        Err(PicError::Transport(
            ErrorInfo::new("connect-failed", message)
                .with_context("host", &self.host)
                .with_context("port", self.port)
                .with_hint("is the live viewer listening?"),
        ))
    }

    // Reads until the viewer closes, the deadline passes or the socket errors.
    fn drain(&self, stream: &mut TcpStream) -> usize {
        let deadline = Instant::now() + self.drain_timeout;
        let mut buf = [0u8; 1024];
        let mut total = 0;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!(total, "drain deadline reached");
                break;
            }
            if let Err(err) = stream.set_read_timeout(Some(remaining)) {
                warn!(error = %err, "could not bound drain");
                break;
            }
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    debug!(total, "viewer kept the connection open");
                    break;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!(error = %err, "drain ended early");
                    break;
                }
            }
        }
        total
    }

    fn io_error(&self, code: &str, err: std::io::Error) -> PicError {
        PicError::Transport(
            ErrorInfo::new(code, err.to_string())
                .with_context("host", &self.host)
                .with_context("port", self.port),
        )
    }
}

/// Pushes `path` to `host:port` with default timeouts and native paths.
pub fn push_layout(path: &Path, host: &str, port: u16) -> Result<PushReport, PicError> {
    let config = LiveConfig {
        host: host.to_string(),
        port,
        ..LiveConfig::default()
    };
    LiveClient::new(&config).push(path)
}
