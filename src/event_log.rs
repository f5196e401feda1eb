//! Append-only JSON-lines event log.
//!
//! The terminal belongs to the renderer while a game runs, so game events go to an
//! optional log file instead. Every record is one JSON object per line:
//!
//! ```text
//! {"seq":0,"ts":1700000000000,"type":"start","seed":42,"fps":60}
//! {"seq":1,"ts":1700000001234,"type":"lock","piece":"t","lines":1,...}
//! ```
//!
//! A write failure disables the log for the rest of the game; it never interrupts play.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::GameConfig;
use crate::types::CoreLastEvent;

/// Final standing of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub score: u32,
    pub level: u8,
    pub lines: u32,
}

/// One log event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Start {
        seed: u32,
        fps: u32,
    },
    Lock {
        piece: &'static str,
        lines: u32,
        score_gained: u32,
        perfect_clear: bool,
        combo: i8,
        level: u8,
        hard_drop_cells: u32,
        score: u32,
    },
    Pause,
    Resume,
    GameOver(Standing),
    Quit(Standing),
}

impl LogEvent {
    /// Lock record from a core event and the running score.
    pub fn lock(event: &CoreLastEvent, score: u32) -> Self {
        Self::Lock {
            piece: event.kind.as_str(),
            lines: event.lines_cleared,
            score_gained: event.score_gained,
            perfect_clear: event.perfect_clear,
            combo: event.combo,
            level: event.level,
            hard_drop_cells: event.hard_drop_cells,
            score,
        }
    }
}

#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    seq: u64,
    ts: u64,
    #[serde(flatten)]
    event: &'a LogEvent,
}

/// Event log writer; a disabled log accepts and drops records.
pub struct EventLog<W: Write = File> {
    out: Option<W>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Open (or create) `path` in append mode.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path))?;
        Ok(Self::new(file))
    }

    /// Log configured by `BLOCKFALL_LOG_PATH`, or a disabled one.
    ///
    /// Called before the terminal enters the alternate screen, so a problem can still
    /// be reported on stderr.
    pub fn from_config(config: &GameConfig) -> Self {
        let Some(path) = config.log_path.as_deref() else {
            return Self::disabled();
        };
        match Self::open(path) {
            Ok(log) => log,
            Err(e) => {
                eprintln!("[Blockfall] Event log disabled: {:#}", e);
                Self::disabled()
            }
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn disabled() -> Self {
        Self {
            out: None,
            seq: 0,
            buf: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Append one record.
    pub fn record(&mut self, event: &LogEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        let record = LogRecord {
            seq: self.seq,
            ts: now_ms(),
            event,
        };
        self.seq += 1;

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
        }
    }

    /// Underlying writer, if the log is still enabled.
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
