use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Phase;
use crate::player::{PlayerAction, PlayerId};

/// One player action as it entered the engine: who, when in the hand, what.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: PlayerId,
    pub phase: Phase,
    pub action: PlayerAction,
}

/// How the hand was decided.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats that won at least one pot, or the last seat standing
    pub winners: Vec<PlayerId>,
    /// Chips paid out per seat
    pub payouts: BTreeMap<PlayerId, u32>,
    /// Outcome notes such as "all folded"
    #[serde(default)]
    pub notes: Option<String>,
}

/// Replayable record of one complete hand.
///
/// The seed plus the chronological action list reconstruct the hand exactly;
/// board and outcome are carried redundantly so a reader need not re-run the
/// engine. Written as one JSONL line per hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`, date plus a per-logger sequence number
    pub hand_id: String,
    /// Deck seed; replays the identical deal
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    /// Community cards in deal order
    pub board: Vec<Card>,
    /// One-line outcome summary
    pub result: Option<String>,
    /// RFC3339 write timestamp, stamped by the logger
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`HandRecord`]s to a JSONL file and hands out sequential hand ids.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        Ok(Self {
            writer: Some(BufWriter::new(File::create(path)?)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger with no backing file, for exercising id sequencing.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    /// Writes one record as a single line, stamping the write time if the
    /// record does not carry one already.
    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let Some(w) = &mut self.writer else {
            return Ok(());
        };
        let mut rec = record.clone();
        rec.ts
            .get_or_insert_with(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
        w.flush()
    }
}
