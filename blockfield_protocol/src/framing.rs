// Newline-delimited message framing.
//
// Each message is one JSON document on its own line. `write_message` and
// `read_message` operate on raw bytes; the caller does JSON serialization
// separately, so this module does not care what the payload means. Compact
// `serde_json` output never contains a raw newline, which is what makes the
// newline a safe delimiter.
//
// `read_message` skips blank lines and returns `Ok(None)` on a clean EOF, so
// a reader loop is just `while let Some(line) = read_message(..)?`. A final
// line without a trailing newline is still delivered.
//
// `MAX_MESSAGE_SIZE` (16 MiB) bounds how much a single line may allocate.
// Layout arrays for a full field are the largest expected messages.

use std::io::{self, BufRead, Read, Write};
use thiserror::Error;

/// Maximum allowed message size (16 MiB), not counting the newline.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("message too large: {len} bytes (max {MAX_MESSAGE_SIZE})")]
    TooLarge { len: usize },
    #[error("message contains a raw newline")]
    EmbeddedNewline,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Write one message followed by `\n`, then flush.
pub fn write_message<W: Write>(writer: &mut W, msg: &[u8]) -> Result<(), FramingError> {
    if msg.len() > MAX_MESSAGE_SIZE {
        return Err(FramingError::TooLarge { len: msg.len() });
    }
    if msg.contains(&b'\n') {
        return Err(FramingError::EmbeddedNewline);
    }
    writer.write_all(msg)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read the next non-blank line, without its line ending.
///
/// Returns `Ok(None)` once the stream is exhausted. Returns `TooLarge` if a
/// line runs past `MAX_MESSAGE_SIZE` bytes.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, FramingError> {
    loop {
        let mut buf = Vec::new();
        // One byte over the limit so an exactly-full line still fits its '\n'.
        let limit = MAX_MESSAGE_SIZE as u64 + 1;
        let read = reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        } else if buf.len() > MAX_MESSAGE_SIZE {
            return Err(FramingError::TooLarge { len: buf.len() });
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        return Ok(Some(buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrip_simple_message() {
        let original = br#"{"type":"cancel"}"#;
        let mut buf = Vec::new();
        write_message(&mut buf, original).unwrap();
        assert_eq!(buf.last(), Some(&b'\n'));

        let mut cursor = Cursor::new(&buf);
        let recovered = read_message(&mut cursor).unwrap().unwrap();
        assert_eq!(recovered, original);
        assert!(read_message(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn empty_stream_is_eof() {
        let mut cursor = Cursor::new(Vec::new());
        assert!(read_message(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn skips_blank_lines_and_crlf() {
        let mut cursor = Cursor::new(b"\n  \r\nfirst\r\n\nsecond".to_vec());
        assert_eq!(read_message(&mut cursor).unwrap().unwrap(), b"first");
        assert_eq!(read_message(&mut cursor).unwrap().unwrap(), b"second");
        assert!(read_message(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn multiple_messages_in_sequence() {
        let messages: Vec<&[u8]> = vec![b"first", b"second", b"third"];
        let mut buf = Vec::new();
        for msg in &messages {
            write_message(&mut buf, msg).unwrap();
        }

        let mut cursor = Cursor::new(&buf);
        for expected in &messages {
            let recovered = read_message(&mut cursor).unwrap().unwrap();
            assert_eq!(recovered, *expected);
        }
    }

    #[test]
    fn rejects_embedded_newline() {
        let mut buf = Vec::new();
        let err = write_message(&mut buf, b"two\nlines").unwrap_err();
        assert!(matches!(err, FramingError::EmbeddedNewline));
        assert!(buf.is_empty());
    }

    #[test]
    fn rejects_oversized_write() {
        let big = vec![b'x'; MAX_MESSAGE_SIZE + 1];
        let mut buf = Vec::new();
        let err = write_message(&mut buf, &big).unwrap_err();
        assert!(matches!(err, FramingError::TooLarge { .. }));
    }

    #[test]
    fn rejects_oversized_read() {
        let big = vec![b'x'; MAX_MESSAGE_SIZE + 10];
        let mut cursor = Cursor::new(big);
        let err = read_message(&mut cursor).unwrap_err();
        assert!(matches!(err, FramingError::TooLarge { .. }));
    }

    #[test]
    fn accepts_line_at_the_limit() {
        let mut wire = vec![b'x'; MAX_MESSAGE_SIZE];
        wire.push(b'\n');
        let mut cursor = Cursor::new(wire);
        let recovered = read_message(&mut cursor).unwrap().unwrap();
        assert_eq!(recovered.len(), MAX_MESSAGE_SIZE);
    }
}
