//! Whitespace-separated number parsing.

use crate::error::{Error, ErrorKind, Result};
use crate::forward::ForwardLineReader;
use std::path::Path;
use std::str::FromStr;

/// Parses every whitespace-separated token of `line` as an integer.
///
/// # Examples
///
/// ```
/// assert_eq!(chemu::parse_ints(" 3 1\t-4 ").unwrap(), vec![3, 1, -4]);
/// assert!(chemu::parse_ints("3 x").is_err());
/// ```
pub fn parse_ints(line: &str) -> Result<Vec<i64>> {
    parse_fields(line)
}

/// Parses every whitespace-separated token of `line` as a float.
///
/// # Examples
///
/// ```
/// assert_eq!(chemu::parse_floats("1.5 -2 3e2").unwrap(), vec![1.5, -2.0, 300.0]);
/// ```
pub fn parse_floats(line: &str) -> Result<Vec<f64>> {
    parse_fields(line)
}

/// Reads the first line of the file at `path` and parses it with [`parse_ints`].
///
/// Index files hold a single line of atom indexes. Any further lines are ignored.
///
/// # Errors
///
/// Returns `ErrorKind::Open` if the file cannot be opened, `ErrorKind::EndOfData` if it is
/// empty and `ErrorKind::Parse` if a token is not an integer.
///
/// [`parse_ints`]: fn.parse_ints.html
pub fn read_index_file<P: AsRef<Path>>(path: P) -> Result<Vec<i64>> {
    let mut reader = ForwardLineReader::open(path)?;
    parse_ints(&reader.next_line()?)
}

pub(crate) fn parse_field<T>(token: &str) -> Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    token.parse().map_err(|err: T::Err| {
        Error::new(ErrorKind::Parse {
            token: token.to_string(),
            reason: err.to_string(),
        })
    })
}

fn parse_fields<T>(line: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: ToString,
{
    line.split_whitespace().map(parse_field).collect()
}
