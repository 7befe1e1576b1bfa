use crate::error::{Error, ErrorKind, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Reader that returns the lines of a stream from the first one to the last one.
///
/// Unlike [`BufRead::lines`], reaching the end of the stream is reported as
/// `ErrorKind::EndOfData`, so a loop over `next_line` can tell it apart from a failing stream.
///
/// # Examples
///
/// ```
/// use chemu::ForwardLineReader;
///
/// let mut reader = ForwardLineReader::new("a\nbb\n".as_bytes());
/// assert_eq!(reader.next_line().unwrap(), "a");
/// assert_eq!(reader.next_line().unwrap(), "bb");
/// assert!(reader.next_line().unwrap_err().is_end_of_data());
/// ```
///
/// [`BufRead::lines`]: https://doc.rust-lang.org/std/io/trait.BufRead.html#method.lines
#[derive(Debug)]
pub struct ForwardLineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl ForwardLineReader<BufReader<File>> {
    /// Opens the file at `path` for forward reading.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Open` if the file does not exist or cannot be opened for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            Error::new(ErrorKind::Open {
                path: path.to_path_buf(),
                source,
            })
        })?;
        debug!(path = %path.display(), "opened file for forward reading");
        Ok(ForwardLineReader::with_capacity(file, DEFAULT_CAPACITY))
    }
}

impl<R: Read> ForwardLineReader<BufReader<R>> {
    /// Creates a new `ForwardLineReader` that buffers `stream` with an internal buffer of the
    /// given capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use chemu::ForwardLineReader;
    /// use std::io::Cursor;
    ///
    /// let mut reader = ForwardLineReader::with_capacity(Cursor::new("x"), 16);
    /// assert_eq!(reader.next_line().unwrap(), "x");
    /// ```
    pub fn with_capacity(stream: R, cap: usize) -> Self {
        ForwardLineReader::new(BufReader::with_capacity(cap, stream))
    }
}

impl<R: BufRead> ForwardLineReader<R> {
    /// Creates a new `ForwardLineReader` over an already buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            inner: reader,
            buf: Vec::new(),
        }
    }

    /// Returns the next line without its trailing newline.
    ///
    /// A last line that is not terminated by a newline is still returned.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::EndOfData` once every line has been read, `ErrorKind::Io` if the
    /// underlying reader fails and `ErrorKind::Utf8` if the line is not valid UTF-8.
    pub fn next_line(&mut self) -> Result<String> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Err(Error::new(ErrorKind::EndOfData));
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        Ok(String::from_utf8(self.buf.clone())?)
    }

    /// Unwraps this `ForwardLineReader`, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Iterator for ForwardLineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Err(ref err) if err.is_end_of_data() => None,
            line => Some(line),
        }
    }
}
