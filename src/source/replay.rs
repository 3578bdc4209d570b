//! Replay body source: recorded frame logs, one JSON frame per line.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::source::{FrameRecord, SourceStats, TrackedBody};

pub struct ReplaySource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    frames_read: u64,
    exhausted: bool,
}

impl ReplaySource {
    /// Open a recorded frame log. Fails if the file cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open replay file {}", path.display()))?;
        log::info!("ReplaySource: reading {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            frames_read: 0,
            exhausted: false,
        })
    }

    /// Next recorded frame. After the log runs out every call fails, which
    /// the loop treats like any other failed grab.
    pub fn next_frame(&mut self) -> Result<Vec<TrackedBody>> {
        if self.exhausted {
            return Err(anyhow!("replay exhausted"));
        }
        loop {
            match self.lines.next() {
                None => {
                    self.exhausted = true;
                    log::info!(
                        "ReplaySource: end of replay after {} frames",
                        self.frames_read
                    );
                    return Err(anyhow!("end of replay"));
                }
                Some(Err(e)) => {
                    self.exhausted = true;
                    return Err(e).context("replay read failed");
                }
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(line)) => {
                    let record: FrameRecord = serde_json::from_str(&line).with_context(|| {
                        format!("invalid frame record in {}", self.path.display())
                    })?;
                    self.frames_read += 1;
                    return Ok(record.bodies);
                }
            }
        }
    }

    pub fn is_healthy(&self) -> bool {
        !self.exhausted
    }

    pub fn stats(&self) -> SourceStats {
        SourceStats {
            frames_captured: self.frames_read,
            input: format!("replay {}", self.path.display()),
        }
    }
}
