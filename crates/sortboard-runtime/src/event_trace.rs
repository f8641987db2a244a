#![forbid(unsafe_code)]

//! Drag event trace recording and replay.
//!
//! Records every [`DragEvent`] a session receives, with nanosecond
//! timestamps, to a JSONL file. [`TraceFile::events`] yields them back in
//! recorded order so a session can be rebuilt exactly.
//!
//! # Format
//!
//! Each line is a JSON object with `{event, ts_ns, ...payload}`.
//! The first line is always a `trace_header` carrying the schema version,
//! the session name and the [`SessionConfig`] in effect; the last line is a
//! `trace_summary`.
//!
//! # Storage
//!
//! [`TraceWriter::gzip`] writes `.jsonl.gz`; [`TraceWriter::plain`] writes
//! uncompressed `.jsonl`. The reader detects gzip by its magic bytes, so
//! both load through the same call.
//!
//! # Failure Modes
//!
//! | Condition | Result |
//! |-----------|--------|
//! | File missing / unreadable | [`TraceError::Io`] |
//! | Line is not a valid record | [`TraceError::Parse`] with 1-based line number |
//! | First record is not a header | [`TraceError::MissingHeader`] |
//! | Header schema differs | [`TraceError::SchemaMismatch`] |
//!
//! # Example
//!
//! ```
//! use sortboard_core::{Delta, DragEvent, SessionConfig};
//! use sortboard_runtime::event_trace::{TraceReader, TraceWriter};
//!
//! let mut buf = Vec::new();
//! let mut writer = TraceWriter::from_writer(&mut buf, "doc", &SessionConfig::default())?;
//! writer.record(&DragEvent::start("Card1"), 100)?;
//! writer.record(&DragEvent::over("Card1", Some("Card4"), Delta::new(0.0, -1.0)), 200)?;
//! writer.finish(Some(1))?;
//!
//! let trace = TraceReader::from_bytes(&buf)?;
//! let stamps: Vec<u64> = trace.events().map(|(_, ts)| ts).collect();
//! assert_eq!(stamps, [100, 200]);
//! assert_eq!(trace.final_version(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sortboard_core::{Delta, DragEvent, DragId, SessionConfig};

// ---------------------------------------------------------------------------
// Schema version
// ---------------------------------------------------------------------------

/// Current schema version for drag trace files.
pub const SCHEMA_VERSION: &str = "drag-trace-v1";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading a trace.
#[derive(Debug)]
pub enum TraceError {
    /// Reading or decompressing failed.
    Io(io::Error),
    /// A line could not be parsed as a [`TraceRecord`].
    Parse {
        /// 1-based line number in the decompressed text.
        line: usize,
        source: serde_json::Error,
    },
    /// The trace does not start with a `trace_header`.
    MissingHeader,
    /// The header names a schema this reader does not understand.
    SchemaMismatch { found: String },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "trace i/o error: {err}"),
            Self::Parse { line, source } => write!(f, "trace line {line}: {source}"),
            Self::MissingHeader => write!(f, "trace does not start with a trace_header record"),
            Self::SchemaMismatch { found } => write!(
                f,
                "unsupported trace schema {found:?} (expected {SCHEMA_VERSION:?})"
            ),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
            Self::MissingHeader | Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for TraceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

// ---------------------------------------------------------------------------
// Serializable trace records
// ---------------------------------------------------------------------------

/// A single record in a drag trace JSONL file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum TraceRecord {
    /// Header record (first line).
    #[serde(rename = "trace_header")]
    Header {
        schema_version: String,
        session_name: String,
        #[serde(default)]
        config: SessionConfig,
    },

    #[serde(rename = "drag_start")]
    Start { ts_ns: u64, active: DragId },

    #[serde(rename = "drag_over")]
    Over {
        ts_ns: u64,
        active: DragId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        over: Option<DragId>,
        dx: f64,
        dy: f64,
    },

    #[serde(rename = "drag_end")]
    End {
        ts_ns: u64,
        active: DragId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        over: Option<DragId>,
    },

    #[serde(rename = "drag_cancel")]
    Cancel { ts_ns: u64 },

    /// Summary record (last line).
    #[serde(rename = "trace_summary")]
    Summary {
        total_events: u64,
        total_duration_ns: u64,
        /// Board version after the last event, when the recorder knew it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        final_version: Option<u64>,
    },
}

impl TraceRecord {
    /// Convert a drag event into its record form.
    #[must_use]
    pub fn from_event(event: &DragEvent, ts_ns: u64) -> Self {
        match event {
            DragEvent::Start { active } => Self::Start {
                ts_ns,
                active: active.clone(),
            },
            DragEvent::Over {
                active,
                over,
                delta,
            } => Self::Over {
                ts_ns,
                active: active.clone(),
                over: over.clone(),
                dx: delta.x,
                dy: delta.y,
            },
            DragEvent::End { active, over } => Self::End {
                ts_ns,
                active: active.clone(),
                over: over.clone(),
            },
            DragEvent::Cancel => Self::Cancel { ts_ns },
        }
    }

    /// The drag event this record describes, if it is an event record.
    #[must_use]
    pub fn to_event(&self) -> Option<DragEvent> {
        match self {
            Self::Start { active, .. } => Some(DragEvent::Start {
                active: active.clone(),
            }),
            Self::Over {
                active,
                over,
                dx,
                dy,
                ..
            } => Some(DragEvent::Over {
                active: active.clone(),
                over: over.clone(),
                delta: Delta::new(*dx, *dy),
            }),
            Self::End { active, over, .. } => Some(DragEvent::End {
                active: active.clone(),
                over: over.clone(),
            }),
            Self::Cancel { .. } => Some(DragEvent::Cancel),
            Self::Header { .. } | Self::Summary { .. } => None,
        }
    }

    #[must_use]
    pub fn ts_ns(&self) -> Option<u64> {
        match self {
            Self::Start { ts_ns, .. }
            | Self::Over { ts_ns, .. }
            | Self::End { ts_ns, .. }
            | Self::Cancel { ts_ns } => Some(*ts_ns),
            Self::Header { .. } | Self::Summary { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TraceWriter
// ---------------------------------------------------------------------------

/// Appends drag trace records, one JSON object per line.
///
/// The header goes out on construction; [`TraceWriter::finish`] appends the
/// summary. Dropping a writer without finishing leaves a trace with no
/// summary, which still loads.
pub struct TraceWriter<W: Write> {
    writer: BufWriter<W>,
    config: SessionConfig,
    event_count: u64,
    first_ts_ns: Option<u64>,
    last_ts_ns: u64,
}

impl TraceWriter<std::fs::File> {
    /// Create (or truncate) an uncompressed `.jsonl` trace at `path`.
    pub fn plain(
        path: impl AsRef<Path>,
        session_name: &str,
        config: &SessionConfig,
    ) -> io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Self::from_writer(file, session_name, config)
    }
}

impl TraceWriter<flate2::write::GzEncoder<std::fs::File>> {
    /// Create (or truncate) a gzip-compressed `.jsonl.gz` trace at `path`.
    ///
    /// The encoder handed back by [`TraceWriter::finish`] still needs its own
    /// `finish()` to write the gzip trailer.
    pub fn gzip(
        path: impl AsRef<Path>,
        session_name: &str,
        config: &SessionConfig,
    ) -> io::Result<Self> {
        let file = std::fs::File::create(path)?;
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
        Self::from_writer(encoder, session_name, config)
    }
}

impl<W: Write> TraceWriter<W> {
    /// Wrap any sink and emit the header carrying `config`.
    pub fn from_writer(writer: W, session_name: &str, config: &SessionConfig) -> io::Result<Self> {
        let mut this = Self {
            writer: BufWriter::new(writer),
            config: config.clone(),
            event_count: 0,
            first_ts_ns: None,
            last_ts_ns: 0,
        };
        this.write_record(&TraceRecord::Header {
            schema_version: SCHEMA_VERSION.to_string(),
            session_name: session_name.to_string(),
            config: config.clone(),
        })?;
        Ok(this)
    }

    /// The configuration written into the header.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Append `event` stamped `ts_ns` nanoseconds into the session.
    pub fn record(&mut self, event: &DragEvent, ts_ns: u64) -> io::Result<()> {
        self.write_record(&TraceRecord::from_event(event, ts_ns))
    }

    /// Write any trace record.
    pub fn write_record(&mut self, record: &TraceRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(io::Error::other)?;
        self.writer.write_all(b"\n")?;

        if let Some(ts) = record.ts_ns() {
            self.first_ts_ns.get_or_insert(ts);
            self.last_ts_ns = ts;
            self.event_count += 1;
        }
        Ok(())
    }

    /// Number of event records written (excluding header/summary).
    #[inline]
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Write the summary and flush, returning the underlying writer.
    pub fn finish(mut self, final_version: Option<u64>) -> io::Result<W> {
        let total_duration_ns = self
            .first_ts_ns
            .map_or(0, |first| self.last_ts_ns.saturating_sub(first));

        self.write_record(&TraceRecord::Summary {
            total_events: self.event_count,
            total_duration_ns,
            final_version,
        })?;
        self.writer.flush()?;

        tracing::debug!(
            events = self.event_count,
            duration_ns = total_duration_ns,
            "drag trace finished"
        );

        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TraceReader
// ---------------------------------------------------------------------------

/// Reads drag trace records from JSONL (gzip or plain).
pub struct TraceReader;

impl TraceReader {
    /// Open a trace file and parse all records.
    pub fn open(path: impl AsRef<Path>) -> Result<TraceFile, TraceError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Parse trace records from raw bytes, decompressing gzip input.
    pub fn from_bytes(data: &[u8]) -> Result<TraceFile, TraceError> {
        let text = if data.starts_with(&GZIP_MAGIC) {
            let mut decoder = flate2::read::GzDecoder::new(data);
            let mut buf = Vec::new();
            decoder.read_to_end(&mut buf)?;
            buf
        } else {
            data.to_vec()
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(text.as_slice()).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: TraceRecord = serde_json::from_str(&line).map_err(|source| {
                TraceError::Parse {
                    line: index + 1,
                    source,
                }
            })?;
            records.push(record);
        }

        match records.first() {
            Some(TraceRecord::Header { schema_version, .. }) if schema_version == SCHEMA_VERSION => {}
            Some(TraceRecord::Header { schema_version, .. }) => {
                return Err(TraceError::SchemaMismatch {
                    found: schema_version.clone(),
                });
            }
            _ => return Err(TraceError::MissingHeader),
        }

        tracing::trace!(records = records.len(), "drag trace loaded");
        Ok(TraceFile { records })
    }
}

/// A parsed drag trace. Always starts with a valid header.
#[derive(Debug, Clone)]
pub struct TraceFile {
    records: Vec<TraceRecord>,
}

impl TraceFile {
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// The session name recorded in the header.
    #[must_use]
    pub fn session_name(&self) -> &str {
        match self.records.first() {
            Some(TraceRecord::Header { session_name, .. }) => session_name,
            _ => "",
        }
    }

    /// The session configuration recorded in the header.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        match self.records.first() {
            Some(TraceRecord::Header { config, .. }) => config.clone(),
            _ => SessionConfig::default(),
        }
    }

    /// The summary record, if the trace was finished.
    #[must_use]
    pub fn summary(&self) -> Option<&TraceRecord> {
        self.records
            .last()
            .filter(|r| matches!(r, TraceRecord::Summary { .. }))
    }

    #[must_use]
    pub fn total_events(&self) -> Option<u64> {
        match self.summary()? {
            TraceRecord::Summary { total_events, .. } => Some(*total_events),
            _ => None,
        }
    }

    #[must_use]
    pub fn final_version(&self) -> Option<u64> {
        match self.summary()? {
            TraceRecord::Summary { final_version, .. } => *final_version,
            _ => None,
        }
    }

    /// Recorded events in order, each with its timestamp.
    pub fn events(&self) -> impl Iterator<Item = (DragEvent, u64)> + '_ {
        self.records
            .iter()
            .filter_map(|r| Some((r.to_event()?, r.ts_ns()?)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
