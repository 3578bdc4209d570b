//! Network stream body source: frame records over TCP, one JSON line each.

use std::io::{BufRead, BufReader, ErrorKind};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::source::{FrameRecord, SourceStats, TrackedBody};

/// Bound on how long one grab may wait for a frame line; keeps the loop's
/// cycle time bounded when the sender stalls.
const READ_TIMEOUT: Duration = Duration::from_millis(500);

pub struct StreamSource {
    addr: String,
    reader: BufReader<TcpStream>,
    frames_read: u64,
    connected: bool,
}

impl StreamSource {
    /// Connect to a body-frame stream at `host:port`. Fails before the loop
    /// starts if the peer is unreachable.
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .with_context(|| format!("failed to connect to stream {}", addr))?;
        stream
            .set_read_timeout(Some(READ_TIMEOUT))
            .context("failed to set stream read timeout")?;
        log::info!("StreamSource: connected to {}", addr);
        Ok(Self {
            addr: addr.to_string(),
            reader: BufReader::new(stream),
            frames_read: 0,
            connected: true,
        })
    }

    pub fn next_frame(&mut self) -> Result<Vec<TrackedBody>> {
        if !self.connected {
            return Err(anyhow!("stream disconnected"));
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.connected = false;
                log::warn!("StreamSource: peer closed the connection");
                Err(anyhow!("stream closed by peer"))
            }
            Ok(_) => {
                if line.trim().is_empty() {
                    return Err(anyhow!("empty frame line"));
                }
                let record: FrameRecord =
                    serde_json::from_str(line.trim()).context("invalid frame record on stream")?;
                self.frames_read += 1;
                Ok(record.bodies)
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Err(anyhow!("no frame within read timeout"))
            }
            Err(e) => {
                self.connected = false;
                Err(e).context("stream read failed")
            }
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.connected
    }

    pub fn stats(&self) -> SourceStats {
        SourceStats {
            frames_captured: self.frames_read,
            input: format!("stream {}", self.addr),
        }
    }

    pub fn shutdown(&mut self) {
        if self.connected {
            let _ = self.reader.get_ref().shutdown(Shutdown::Both);
            self.connected = false;
        }
    }
}
