//! JSON-lines engine event log.
//!
//! One object per line, tagged by `type`, numbered by `seq`:
//!
//! ```text
//! {"type":"started","seq":0,"seed":7}
//! {"type":"spawned","seq":1,"kind":"i","piece":1}
//! {"type":"locked","seq":2,"kind":"i","row":19}
//! {"type":"rowsCleared","seq":3,"rows":[19],"bomb":false}
//! {"type":"gameOver","seq":4,"piecesSpawned":31,"rowsCleared":2}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::EngineEvent;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Record<'a> {
    Started {
        seq: u64,
        seed: Option<u64>,
    },
    Spawned {
        seq: u64,
        kind: &'static str,
        piece: u32,
    },
    Locked {
        seq: u64,
        kind: &'static str,
        row: i32,
    },
    RowsCleared {
        seq: u64,
        rows: &'a [i32],
        bomb: bool,
    },
    #[serde(rename_all = "camelCase")]
    GameOver {
        seq: u64,
        pieces_spawned: u32,
        rows_cleared: u32,
    },
}

impl<'a> Record<'a> {
    fn from_event(seq: u64, event: &'a EngineEvent) -> Self {
        match event {
            EngineEvent::Spawned { kind, piece } => Record::Spawned {
                seq,
                kind: kind.as_str(),
                piece: *piece,
            },
            EngineEvent::Locked { kind, row } => Record::Locked {
                seq,
                kind: kind.as_str(),
                row: *row,
            },
            EngineEvent::RowsCleared { rows, bomb } => Record::RowsCleared {
                seq,
                rows: rows.as_slice(),
                bomb: *bomb,
            },
            EngineEvent::GameOver {
                pieces_spawned,
                rows_cleared,
            } => Record::GameOver {
                seq,
                pieces_spawned: *pieces_spawned,
                rows_cleared: *rows_cleared,
            },
        }
    }
}

/// Appends engine events to a writer, one JSON object per line.
pub struct EventLog<W: Write> {
    out: W,
    seq: u64,
    line: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            line: Vec::with_capacity(128),
        }
    }

    /// Number of records written so far.
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    pub fn log_start(&mut self, seed: Option<u64>) -> Result<()> {
        let seq = self.seq;
        self.write(&Record::Started { seq, seed })
    }

    pub fn log_event(&mut self, event: &EngineEvent) -> Result<()> {
        let record = Record::from_event(self.seq, event);
        self.write(&record)
    }

    pub fn log_events<'e>(
        &mut self,
        events: impl IntoIterator<Item = &'e EngineEvent>,
    ) -> Result<()> {
        for event in events {
            self.log_event(event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flushing event log")
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, record: &Record<'_>) -> Result<()> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, record).context("encoding event")?;
        self.line.push(b'\n');
        self.out.write_all(&self.line).context("writing event log")?;
        self.seq += 1;
        Ok(())
    }
}
