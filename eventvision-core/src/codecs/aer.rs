//! ATIS AER codec (N-MNIST / N-Caltech101 style recordings).
//!
//! Record layout, 5 bytes per event:
//!
//! | byte | bits | field              |
//! |------|------|--------------------|
//! | 0    | 0-7  | x                  |
//! | 1    | 0-7  | y                  |
//! | 2    | 7    | polarity           |
//! | 2    | 0-6  | timestamp 16-22    |
//! | 3    | 0-7  | timestamp 8-15     |
//! | 4    | 0-7  | timestamp 0-7      |
//!
//! Records with `y == 240` are timer-wrap markers. Decoding adds 2^13 to the
//! marker's own timestamp and then drops the marker; the offset is not
//! carried into later events, so recordings with more than one wrap decode
//! with wrong timestamps after the first marker. Encoding mirrors this by
//! subtracting 2^13 from any `y == 240` event.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{read_record, Dataset};
use crate::error::Result;
use crate::events::{Event, EventStream};

pub const RECORD_SIZE: usize = 5;

/// Row value that marks a timer-wrap record.
pub const WRAP_MARKER_Y: u16 = 240;

/// Adjustment applied to a wrap marker's own timestamp.
pub const WRAP_OFFSET: i64 = 1 << 13;

const TS_MASK: i64 = (1 << 23) - 1;

/// Unpacks one record. Wrap markers are returned with their adjusted
/// timestamp; [`decode`] is responsible for dropping them.
#[inline]
pub fn decode_record(data: &[u8; RECORD_SIZE]) -> Event {
    let x = data[0] as u16;
    let y = data[1] as u16;
    let p = (data[2] & 0x80) >> 7;
    let mut t =
        (((data[2] & 0x7f) as i64) << 16) | ((data[3] as i64) << 8) | data[4] as i64;
    if y == WRAP_MARKER_Y {
        t += WRAP_OFFSET;
    }
    Event { t, x, y, p }
}

/// Packs one event. Values wider than the layout are truncated to their low
/// bits.
#[inline]
pub fn encode_record(ev: &Event) -> [u8; RECORD_SIZE] {
    let mut t = ev.t;
    if ev.y == WRAP_MARKER_Y {
        t = t.wrapping_sub(WRAP_OFFSET);
    }
    [
        ev.x as u8,
        ev.y as u8,
        (((t >> 16) & 0x7f) as u8) | ((ev.p & 1) << 7),
        (t >> 8) as u8,
        t as u8,
    ]
}

#[inline]
fn fits_layout(ev: &Event) -> bool {
    let t = if ev.y == WRAP_MARKER_Y { ev.t.wrapping_sub(WRAP_OFFSET) } else { ev.t };
    ev.x <= u8::MAX as u16 && ev.y <= u8::MAX as u16 && (0..=TS_MASK).contains(&t) && ev.p <= 1
}

/// Decodes AER records until EOF. A trailing partial record ends the stream
/// silently.
pub fn decode<R: Read>(mut reader: R) -> Result<EventStream> {
    let mut events = Vec::new();
    let mut buf = [0u8; RECORD_SIZE];
    let mut markers = 0usize;
    let (mut max_x, mut max_y) = (0u16, 0u16);

    let trailing = loop {
        let n = read_record(&mut reader, &mut buf)?;
        if n < RECORD_SIZE {
            break n;
        }
        let ev = decode_record(&buf);
        if ev.y == WRAP_MARKER_Y {
            markers += 1;
            continue;
        }
        max_x = max_x.max(ev.x);
        max_y = max_y.max(ev.y);
        events.push(ev);
    };

    debug!(
        events = events.len(),
        wrap_markers = markers,
        trailing_bytes = trailing,
        "decoded AER stream"
    );

    Ok(EventStream {
        events,
        width: max_x as usize + 1,
        height: max_y as usize + 1,
    })
}

/// Writes one record per event, in stream order, with no header.
pub fn encode<W: Write>(stream: &EventStream, mut writer: W) -> Result<()> {
    let mut truncated = 0usize;
    for ev in stream {
        if !fits_layout(ev) {
            truncated += 1;
        }
        writer.write_all(&encode_record(ev))?;
    }
    writer.flush()?;

    if truncated > 0 {
        warn!(
            truncated,
            total = stream.len(),
            "AER encode truncated events that do not fit the 8-bit address / 23-bit timestamp layout"
        );
    }
    debug!(events = stream.len(), "encoded AER stream");
    Ok(())
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<EventStream> {
    let file = File::open(path)?;
    decode(BufReader::new(file))
}

/// Creates (or truncates) `path` and writes `stream` to it.
pub fn write_file<P: AsRef<Path>>(path: P, stream: &EventStream) -> Result<()> {
    let file = File::create(path)?;
    encode(stream, BufWriter::new(file))
}

/// AER recording on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AerFile {
    pub path: PathBuf,
}

impl AerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Dataset for AerFile {
    fn read(&self) -> Result<EventStream> {
        read_file(&self.path)
    }

    fn write(&self, stream: &EventStream) -> Result<()> {
        write_file(&self.path, stream)
    }
}
