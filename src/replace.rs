use crate::error::{Error, ErrorKind, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Replaces every occurrence of `from` with `to` in the file at `path`, returning the number of
/// replacements.
///
/// The file is read forward one line at a time and written to a temporary file in the same
/// directory, which then replaces the original. Occurrences spanning a newline are not found.
///
/// # Errors
///
/// Returns `ErrorKind::EmptyPattern` if `from` is empty, `ErrorKind::Open` if `path` cannot be
/// opened and `ErrorKind::Io` if writing or renaming the temporary file fails. The original file
/// is untouched on error.
///
/// # Examples
///
/// ```no_run
/// let n = chemu::replace_in_file("./water.xyz", "OW", "O").unwrap();
/// println!("replaced {} names", n);
/// ```
pub fn replace_in_file<P: AsRef<Path>>(path: P, from: &str, to: &str) -> Result<usize> {
    if from.is_empty() {
        return Err(Error::new(ErrorKind::EmptyPattern));
    }

    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        Error::new(ErrorKind::Open {
            path: path.to_path_buf(),
            source,
        })
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut reader = BufReader::new(file);
    let tmp = NamedTempFile::new_in(dir)?;
    let mut writer = BufWriter::new(tmp);
    let mut count = 0;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let found = line.matches(from).count();
        if found == 0 {
            writer.write_all(line.as_bytes())?;
        } else {
            count += found;
            writer.write_all(line.replace(from, to).as_bytes())?;
        }
    }

    let tmp = writer.into_inner().map_err(|err| err.into_error())?;
    // the temporary file is created private, keep the original mode
    tmp.as_file()
        .set_permissions(reader.get_ref().metadata()?.permissions())?;
    tmp.persist(path).map_err(|err| err.error)?;
    debug!(path = %path.display(), count, "replaced occurrences");
    Ok(count)
}
