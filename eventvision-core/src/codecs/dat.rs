//! Prophesee DAT codec (N-CARS style recordings). Decode only.
//!
//! A file starts with text header lines beginning with `"% "`. The first
//! 2-byte pair that does not start a header line holds the event type and the
//! event record size in bytes. Records follow:
//!
//! - bytes 0-3: timestamp, little-endian u32 (microseconds)
//! - bytes 4-7: address, little-endian u32; bits 0-13 x, bits 14-27 y,
//!   bit 28 polarity
//!
//! See <https://docs.prophesee.ai/stable/data_formats/file_formats/dat.html>.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{read_record, Dataset};
use crate::error::{Error, Result};
use crate::events::{Event, EventStream};

/// Bytes of a record that carry the event; larger records are padded.
pub const EVENT_SIZE: usize = 8;

const HEADER_PREFIX: &[u8; 2] = b"% ";
const X_MASK: u32 = 0x0000_3FFF;
const Y_MASK: u32 = 0x0FFF_C000;
const P_MASK: u32 = 0x1000_0000;

fn format_error(reason: impl Into<String>) -> Error {
    Error::Format {
        format: "DAT",
        reason: reason.into(),
    }
}

/// Header of a DAT recording.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatHeader {
    /// Header lines with the `"% "` prefix and line ending removed.
    pub lines: Vec<String>,
    /// First byte of the footer marker.
    pub event_type: u8,
    /// Record size in bytes, second byte of the footer marker.
    pub event_size: u8,
}

impl DatHeader {
    /// Value of a `key value` header line, e.g. `field("Width")`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| {
            let (k, v) = line.split_once(char::is_whitespace)?;
            (k == key).then(|| v.trim())
        })
    }

    /// Sensor width declared in the header, if any.
    pub fn width(&self) -> Option<usize> {
        self.field("Width")?.parse().ok()
    }

    pub fn height(&self) -> Option<usize> {
        self.field("Height")?.parse().ok()
    }

    pub fn version(&self) -> Option<u32> {
        self.field("Version")?.parse().ok()
    }
}

#[inline]
pub fn decode_record(data: &[u8; EVENT_SIZE]) -> Event {
    let t = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as i64;
    let addr = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    Event {
        t,
        x: (addr & X_MASK) as u16,
        y: ((addr & Y_MASK) >> 14) as u16,
        p: ((addr & P_MASK) >> 28) as u8,
    }
}

fn read_header<R: BufRead>(reader: &mut R) -> Result<DatHeader> {
    let mut header = DatHeader::default();
    let mut pair = [0u8; 2];
    let mut line = Vec::new();

    loop {
        if read_record(reader, &mut pair)? < pair.len() {
            return Err(format_error("end of input before the end of the header"));
        }
        if &pair != HEADER_PREFIX {
            header.event_type = pair[0];
            header.event_size = pair[1];
            return Ok(header);
        }

        line.clear();
        reader.read_until(b'\n', &mut line)?;
        if line.last() != Some(&b'\n') {
            return Err(format_error("header line is not terminated by a newline"));
        }
        let text = String::from_utf8_lossy(&line);
        header.lines.push(text.trim_end_matches(['\r', '\n']).to_string());
    }
}

/// Decodes a DAT stream, discarding the header.
pub fn decode<R: Read>(reader: R) -> Result<EventStream> {
    decode_with_header(reader).map(|(_, stream)| stream)
}

/// Decodes a DAT stream and returns its parsed header alongside the events.
///
/// Bounds are max observed coordinate + 1, not the header's declared size.
pub fn decode_with_header<R: Read>(reader: R) -> Result<(DatHeader, EventStream)> {
    let mut reader = BufReader::new(reader);
    let header = read_header(&mut reader)?;

    let size = header.event_size as usize;
    if size < EVENT_SIZE {
        return Err(format_error(format!(
            "event size {size} is smaller than {EVENT_SIZE} bytes"
        )));
    }

    let mut buf = vec![0u8; size];
    let mut record = [0u8; EVENT_SIZE];
    let mut events = Vec::new();
    let (mut max_x, mut max_y) = (0u16, 0u16);

    let trailing = loop {
        let n = read_record(&mut reader, &mut buf)?;
        if n < size {
            break n;
        }
        record.copy_from_slice(&buf[..EVENT_SIZE]);
        let ev = decode_record(&record);
        max_x = max_x.max(ev.x);
        max_y = max_y.max(ev.y);
        events.push(ev);
    };

    debug!(
        events = events.len(),
        header_lines = header.lines.len(),
        event_type = header.event_type,
        event_size = header.event_size,
        trailing_bytes = trailing,
        "decoded DAT stream"
    );

    let stream = EventStream {
        events,
        width: max_x as usize + 1,
        height: max_y as usize + 1,
    };
    Ok((header, stream))
}

/// Always fails with [`Error::UnsupportedOperation`]; nothing is written.
pub fn encode<W: Write>(_stream: &EventStream, _writer: W) -> Result<()> {
    Err(Error::UnsupportedOperation("Prophesee DAT encoding"))
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<EventStream> {
    decode(File::open(path)?)
}

pub fn read_file_with_header<P: AsRef<Path>>(path: P) -> Result<(DatHeader, EventStream)> {
    decode_with_header(File::open(path)?)
}

/// DAT recording on disk. Writing is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatFile {
    pub path: PathBuf,
}

impl DatFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Dataset for DatFile {
    fn read(&self) -> Result<EventStream> {
        read_file(&self.path)
    }

    fn write(&self, stream: &EventStream) -> Result<()> {
        encode(stream, std::io::sink())
    }
}
