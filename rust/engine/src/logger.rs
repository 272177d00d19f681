use std::fmt;
use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::CheckResult;
use crate::hand::Hand;
use crate::player::PlayerId;

/// One declared move in a round's history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Declarer's id
    pub player_id: PlayerId,
    /// Display name of the declarer at the time of the move
    pub player: String,
    /// The declared combination
    pub hand: Hand,
}

/// Complete record of a finished round: what was claimed, what was really
/// in play, and how the check went.
/// Serialized to JSONL for round history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// `YYYYMMDD-NNNNNN`, assigned by the [`RoundLogger`] that wrote it
    #[serde(default)]
    pub id: Option<String>,
    /// Round number within the engine's lifetime, starting at 1
    pub round: u32,
    /// Seed the engine's deck was created with
    pub seed: Option<u64>,
    /// Moves in declaration order
    pub moves: Vec<MoveRecord>,
    /// Every card dealt this round
    pub pool: Vec<Card>,
    /// Check that ended the round
    pub check: CheckResult,
    /// Set when the check decided the game
    #[serde(default)]
    pub winner: Option<String>,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`RoundRecord`]s as JSON lines, one per checked round.
///
/// Records without an id get the next `YYYYMMDD-NNNNNN` id of the logger's
/// date; records without a timestamp get the current UTC time.
pub struct RoundLogger {
    out: Box<dyn Write + Send>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Creates (or truncates) the file at `path`, along with its directory.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => create_dir_all(dir)?,
            _ => {}
        }
        let file = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    /// Logs into any writer, with ids dated today.
    pub fn from_writer<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Box::new(out),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    /// Logger that discards its output, with ids dated `date`.
    pub fn detached(date: &str) -> Self {
        Self {
            out: Box::new(io::sink()),
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    /// Writes one line and returns the record as written.
    pub fn write(&mut self, record: &RoundRecord) -> io::Result<RoundRecord> {
        let mut stamped = record.clone();
        if stamped.id.is_none() {
            stamped.id = Some(self.next_id());
        }
        if stamped.ts.is_none() {
            stamped.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let mut line = serde_json::to_vec(&stamped).map_err(io::Error::other)?;
        line.push(b'\n');
        self.out.write_all(&line)?;
        self.out.flush()?;
        Ok(stamped)
    }
}

impl fmt::Debug for RoundLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundLogger")
            .field("date", &self.date)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}
