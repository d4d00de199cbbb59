//! Binary event-stream formats.
//!
//! - [`aer`]: ATIS AER, 5 bytes per event, no header. Read and write.
//! - [`dat`]: Prophesee DAT, `% ` text header then 8-byte records. Read only.
//!
//! Both formats are also exposed through the [`Dataset`] capability, bound to a
//! file path, so callers can pick a format without knowing its codec.

pub mod aer;
pub mod dat;

use std::io::{ErrorKind, Read};

use crate::error::Result;
use crate::events::EventStream;

pub use aer::AerFile;
pub use dat::DatFile;

/// A recording that can be read as, and written from, an [`EventStream`].
pub trait Dataset {
    fn read(&self) -> Result<EventStream>;
    fn write(&self, stream: &EventStream) -> Result<()>;
}

pub fn read_dataset<D: Dataset + ?Sized>(dataset: &D) -> Result<EventStream> {
    dataset.read()
}

pub fn write_dataset<D: Dataset + ?Sized>(dataset: &D, stream: &EventStream) -> Result<()> {
    dataset.write(stream)
}

/// Fills `buf` from `reader`, retrying partial reads.
///
/// Returns the number of bytes read; less than `buf.len()` only at EOF.
pub(crate) fn read_record<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Hands out at most `step` bytes per read, with an interrupt in between.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(ErrorKind::Interrupted, "again"));
            }
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_record_retries_partial_and_interrupted_reads() {
        let data = [1u8, 2, 3, 4, 5, 6, 7];
        let mut r = Trickle { data: &data, step: 2, interrupt: false };
        let mut buf = [0u8; 5];
        assert_eq!(read_record(&mut r, &mut buf).unwrap(), 5);
        assert_eq!(buf, [1, 2, 3, 4, 5]);
        assert_eq!(read_record(&mut r, &mut buf).unwrap(), 2);
        assert_eq!(read_record(&mut r, &mut buf).unwrap(), 0);
    }

    #[test]
    fn read_record_propagates_other_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::PermissionDenied, "nope"))
            }
        }
        let mut buf = [0u8; 5];
        let err = read_record(&mut Broken, &mut buf).unwrap_err();
        match err {
            crate::Error::Io(e) => assert_eq!(e.kind(), ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
