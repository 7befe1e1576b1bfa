use crate::error::{Error, ErrorKind, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Reader that returns the lines of a seekable stream from the last one to the first one.
///
/// # Examples
///
/// ```
/// use chemu::BackwardLineReader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new("a\nbb\nccc\n");
/// let mut reader = BackwardLineReader::from_stream(cursor, "inline").unwrap();
///
/// assert_eq!(reader.previous_line().unwrap(), "ccc");
/// assert_eq!(reader.previous_line().unwrap(), "bb");
/// assert_eq!(reader.previous_line().unwrap(), "a");
///
/// // The first line has been returned, so the next call ends the traversal.
/// assert!(reader.previous_line().unwrap_err().is_end_of_data());
/// assert!(!reader.is_readable());
/// ```
///
/// The `BackwardLineReader` never loads the whole stream into memory. It probes one byte at a
/// time, seeking relative to the end of the stream, until it finds the newline that starts the
/// current line, then reads the line forward in a single call. The beginning of the stream is
/// found when seeking past it fails, so the length of the stream is never needed.
///
/// Only `\n` is a line delimiter. A `\r` before it is part of the returned line.
#[derive(Debug)]
pub struct BackwardLineReader<RS: Read + Seek> {
    inner: Option<RS>,
    path: String,
    // distance from the end of the next byte to probe
    cursor: i64,
    // distance from the end of the boundary that ends the next line
    end: i64,
    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Active,
    LastLineReturned,
    Closed,
}

impl BackwardLineReader<File> {
    /// Opens the file at `path` for backward reading.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Open` if the file does not exist or cannot be opened for reading, and
    /// `ErrorKind::Io` if probing its last byte fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chemu::BackwardLineReader;
    ///
    /// let mut reader = BackwardLineReader::open("./trajectory.log").unwrap();
    /// println!("{}", reader.previous_line().unwrap());
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            Error::new(ErrorKind::Open {
                path: path.to_path_buf(),
                source,
            })
        })?;
        debug!(path = %path.display(), "opened file for backward reading");
        BackwardLineReader::from_stream(file, path.display().to_string())
    }
}

impl<RS: Read + Seek> BackwardLineReader<RS> {
    /// Creates a new `BackwardLineReader` that takes ownership of a byte stream that implements
    /// `Read` and `Seek`. `label` names the stream in error messages.
    ///
    /// An empty stream is accepted; its first `previous_line` call reports end of data.
    ///
    /// # Examples
    ///
    /// ```
    /// use chemu::BackwardLineReader;
    /// use std::io::Cursor;
    ///
    /// let mut reader = BackwardLineReader::from_stream(Cursor::new(""), "empty").unwrap();
    /// assert!(reader.previous_line().unwrap_err().is_end_of_data());
    /// ```
    pub fn from_stream<S: Into<String>>(mut stream: RS, label: S) -> Result<Self> {
        let (cursor, end, state) = match probe(&mut stream, 1)? {
            None => (1, 0, State::LastLineReturned),
            // a trailing newline ends the last line, it does not start an empty one
            Some(b'\n') => (2, 1, State::Active),
            Some(_) => (1, 0, State::Active),
        };

        Ok(Self {
            inner: Some(stream),
            path: label.into(),
            cursor,
            end,
            state,
        })
    }

    /// Returns the label this reader uses in diagnostics, which is the path for opened files.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `false` once the reader has been closed.
    pub fn is_readable(&self) -> bool {
        self.state != State::Closed
    }

    /// Returns the line preceding the one returned by the previous call, without its newline.
    ///
    /// The first call returns the last line of the stream.
    ///
    /// # Errors
    ///
    /// - `ErrorKind::EndOfData` on the call after the first line was returned. The reader is
    ///   closed as a side effect.
    /// - `ErrorKind::NotReadable` if the reader is closed.
    /// - `ErrorKind::Io` if seeking or reading fails. The reader is closed as well.
    /// - `ErrorKind::Utf8` if the line is not valid UTF-8. The traversal can continue.
    pub fn previous_line(&mut self) -> Result<String> {
        let bytes = self.previous_line_bytes()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Same as [`previous_line`], but returns the raw bytes of the line.
    ///
    /// [`previous_line`]: #method.previous_line
    pub fn previous_line_bytes(&mut self) -> Result<Vec<u8>> {
        match self.state {
            State::Closed => {
                return Err(Error::new(ErrorKind::NotReadable {
                    path: self.path.clone(),
                }))
            }
            State::LastLineReturned => {
                self.close();
                return Err(Error::new(ErrorKind::EndOfData));
            }
            State::Active => {}
        }

        match self.scan() {
            Ok(line) => {
                trace!(path = %self.path, len = line.len(), "read previous line");
                Ok(line)
            }
            Err(err) => {
                warn!(path = %self.path, error = %err, "backward scan failed");
                self.close();
                Err(err.into())
            }
        }
    }

    /// Releases the underlying stream. Calling `close` on a closed reader does nothing.
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            debug!(path = %self.path, "closed backward reader");
        }
        self.state = State::Closed;
    }

    /// Turns this reader into an iterator over its lines, last line first.
    ///
    /// # Examples
    ///
    /// ```
    /// use chemu::BackwardLineReader;
    /// use std::io::Cursor;
    ///
    /// let reader = BackwardLineReader::from_stream(Cursor::new("1\n2\n3"), "inline").unwrap();
    /// let lines: Vec<String> = reader.into_lines().collect::<Result<_, _>>().unwrap();
    /// assert_eq!(lines, ["3", "2", "1"]);
    /// ```
    pub fn into_lines(self) -> RevLines<RS> {
        RevLines {
            reader: self,
            done: false,
        }
    }
}

impl<RS: Read + Seek> BackwardLineReader<RS> {
    fn scan(&mut self) -> io::Result<Vec<u8>> {
        let stream = match self.inner.as_mut() {
            Some(stream) => stream,
            None => return Err(io::Error::new(io::ErrorKind::Other, "stream already released")),
        };

        let mut reached_start = false;
        let start = loop {
            match probe(stream, self.cursor)? {
                Some(b'\n') => break self.cursor,
                Some(_) => self.cursor += 1,
                // the start of the stream acts as a newline right before the first byte
                None => {
                    reached_start = true;
                    break self.cursor;
                }
            }
        };

        let len = (start - self.end - 1) as usize;
        stream.seek(SeekFrom::End(-(start - 1)))?;
        let mut line = vec![0; len];
        stream.read_exact(&mut line)?;

        self.end = start;
        self.cursor = start + 1;
        if reached_start {
            debug!(path = %self.path, "reached the first line");
            self.state = State::LastLineReturned;
        }
        Ok(line)
    }
}

// Reads the byte `distance` bytes before the end of `stream`, or returns `None` if that lies
// before the start of the stream.
fn probe<RS: Read + Seek>(stream: &mut RS, distance: i64) -> io::Result<Option<u8>> {
    match stream.seek(SeekFrom::End(-distance)) {
        Ok(_) => {}
        Err(ref err) if err.kind() == io::ErrorKind::InvalidInput => return Ok(None),
        Err(err) => return Err(err),
    }
    let mut byte = [0; 1];
    stream.read_exact(&mut byte)?;
    Ok(Some(byte[0]))
}

/// An iterator over the lines of a [`BackwardLineReader`], last line first.
///
/// Created by [`BackwardLineReader::into_lines`]. The iterator stops at end of data, and after
/// an error that closed the reader.
///
/// [`BackwardLineReader`]: struct.BackwardLineReader.html
/// [`BackwardLineReader::into_lines`]: struct.BackwardLineReader.html#method.into_lines
#[derive(Debug)]
pub struct RevLines<RS: Read + Seek> {
    reader: BackwardLineReader<RS>,
    done: bool,
}

impl<RS: Read + Seek> Iterator for RevLines<RS> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.previous_line() {
            Ok(line) => Some(Ok(line)),
            Err(err) if err.is_end_of_data() => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = !self.reader.is_readable();
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(content: &str) -> BackwardLineReader<Cursor<Vec<u8>>> {
        BackwardLineReader::from_stream(Cursor::new(content.as_bytes().to_vec()), "test").unwrap()
    }

    fn drain(content: &str) -> Vec<String> {
        reader(content)
            .into_lines()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    // Fails every read after `reads` successful ones.
    struct FlakyStream {
        inner: Cursor<Vec<u8>>,
        reads: usize,
    }

    impl Read for FlakyStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.reads == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            self.reads -= 1;
            self.inner.read(buf)
        }
    }

    impl Seek for FlakyStream {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_probe() {
        let mut cursor = Cursor::new(b"ab\n".to_vec());
        assert_eq!(probe(&mut cursor, 1).unwrap(), Some(b'\n'));
        assert_eq!(probe(&mut cursor, 2).unwrap(), Some(b'b'));
        assert_eq!(probe(&mut cursor, 3).unwrap(), Some(b'a'));
        assert_eq!(probe(&mut cursor, 4).unwrap(), None);

        let mut empty = Cursor::new(Vec::new());
        assert_eq!(probe(&mut empty, 1).unwrap(), None);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(drain("a\nbb\nccc\n"), ["ccc", "bb", "a"]);
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(drain("a\nbb\nccc"), ["ccc", "bb", "a"]);
    }

    #[test]
    fn test_single_line() {
        let mut reader = reader("x");
        assert_eq!(reader.previous_line().unwrap(), "x");
        assert_eq!(reader.state, State::LastLineReturned);
        assert!(reader.previous_line().unwrap_err().is_end_of_data());
        assert_eq!(reader.state, State::Closed);
        assert!(reader.inner.is_none());
    }

    #[test]
    fn test_empty_stream() {
        let mut reader = reader("");
        assert!(reader.previous_line().unwrap_err().is_end_of_data());
        match *reader.previous_line().unwrap_err().kind() {
            ErrorKind::NotReadable { ref path } => assert_eq!(path, "test"),
            _ => assert!(false),
        }
    }

    #[test]
    fn test_only_newlines() {
        assert_eq!(drain("\n"), [""]);
        assert_eq!(drain("\n\n\n"), ["", "", ""]);
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(drain("\na\n\nb\n"), ["b", "", "a", ""]);
        assert_eq!(drain("a\n\n"), ["", "a"]);
    }

    #[test]
    fn test_carriage_return_kept() {
        assert_eq!(drain("a\r\nb\r\n"), ["b\r", "a\r"]);
    }

    #[test]
    fn test_cursor_only_grows() {
        let mut reader = reader("one\ntwo\nthree\n");
        let mut last = reader.cursor;
        while reader.previous_line().is_ok() {
            assert!(reader.cursor > last);
            last = reader.cursor;
        }
    }

    #[test]
    fn test_close_twice() {
        let mut reader = reader("a\nb\n");
        assert_eq!(reader.previous_line().unwrap(), "b");
        reader.close();
        reader.close();
        assert!(!reader.is_readable());
        match *reader.previous_line().unwrap_err().kind() {
            ErrorKind::NotReadable { .. } => assert!(true),
            _ => assert!(false),
        }
    }

    #[test]
    fn test_io_error_closes() {
        let stream = FlakyStream {
            inner: Cursor::new(b"abc\ndef\n".to_vec()),
            reads: 3,
        };
        let mut reader = BackwardLineReader::from_stream(stream, "flaky").unwrap();
        match *reader.previous_line().unwrap_err().kind() {
            ErrorKind::Io(ref err) => assert_eq!(err.kind(), io::ErrorKind::Other),
            _ => assert!(false),
        }
        assert!(!reader.is_readable());
        match *reader.previous_line().unwrap_err().kind() {
            ErrorKind::NotReadable { .. } => assert!(true),
            _ => assert!(false),
        }
    }

    #[test]
    fn test_invalid_utf8_continues() {
        let bytes = vec![b'o', b'k', b'\n', 0xff, 0xfe, b'\n'];
        let reader = BackwardLineReader::from_stream(Cursor::new(bytes), "bin").unwrap();
        let mut lines = reader.into_lines();
        match *lines.next().unwrap().unwrap_err().kind() {
            ErrorKind::Utf8(ref err) => assert_eq!(err.as_bytes(), &[0xff, 0xfe]),
            _ => assert!(false),
        }
        assert_eq!(lines.next().unwrap().unwrap(), "ok");
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_previous_line_bytes() {
        let mut reader = reader("ab\ncd");
        assert_eq!(reader.previous_line_bytes().unwrap(), b"cd");
        assert_eq!(reader.previous_line_bytes().unwrap(), b"ab");
        assert!(reader.previous_line_bytes().unwrap_err().is_end_of_data());
    }
}
