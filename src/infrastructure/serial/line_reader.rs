//! Newline framing over a byte stream with read timeouts

use std::io::{BufRead, BufReader, ErrorKind, Read};

use crate::application::ports::{LineReader, SerialError};

/// Splits a timed-out byte stream into lines.
///
/// Bytes of an unfinished line survive read timeouts and are completed by
/// later reads.
pub struct PortLineReader<R> {
    reader: BufReader<R>,
    pending: Vec<u8>,
}

impl<R: Read> PortLineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            pending: Vec::new(),
        }
    }

    fn take_line(&mut self) -> Result<String, SerialError> {
        let bytes = std::mem::take(&mut self.pending);
        let line = String::from_utf8(bytes).map_err(|e| SerialError::InvalidUtf8(e.to_string()))?;
        Ok(line.trim().to_string())
    }
}

impl<R: Read + Send> LineReader for PortLineReader<R> {
    fn read_line(&mut self) -> Result<Option<String>, SerialError> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) => Err(SerialError::Disconnected),
            // Also covers a tail cut off by EOF
            Ok(_) => self.take_line().map(Some),
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => Ok(None),
            Err(e) => Err(SerialError::Read(e.to_string())),
        }
    }
}
