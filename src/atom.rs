use crate::error::{Error, ErrorKind, Result};
use crate::parse::parse_field;
use std::str::FromStr;

/// A single atom: its element symbol and Cartesian position.
///
/// Records are read from XYZ-style lines, `SYMBOL X Y Z`. Columns after `Z` are ignored.
///
/// # Examples
///
/// ```
/// use chemu::Atom;
///
/// let atom: Atom = "O 0.0 0.0 0.117".parse().unwrap();
/// assert_eq!(atom.symbol, "O");
/// assert_eq!(atom.position, [0.0, 0.0, 0.117]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    /// Element symbol or atom name.
    pub symbol: String,
    /// Cartesian coordinates.
    pub position: [f64; 3],
}

impl Atom {
    /// Creates a new `Atom`.
    pub fn new<S: Into<String>>(symbol: S, position: [f64; 3]) -> Self {
        Self {
            symbol: symbol.into(),
            position,
        }
    }

    /// Returns the Euclidean distance between two atoms.
    pub fn distance(&self, other: &Atom) -> f64 {
        let [x, y, z] = self.position;
        let [ox, oy, oz] = other.position;
        ((ox - x).powi(2) + (oy - y).powi(2) + (oz - z).powi(2)).sqrt()
    }
}

impl FromStr for Atom {
    type Err = Error;

    fn from_str(record: &str) -> Result<Atom> {
        let mut fields = record.split_whitespace();
        let symbol = match fields.next() {
            Some(symbol) => symbol,
            None => return Err(incomplete(record)),
        };
        let mut position = [0.0; 3];
        for coord in position.iter_mut() {
            match fields.next() {
                Some(token) => *coord = parse_field(token)?,
                None => return Err(incomplete(record)),
            }
        }
        Ok(Atom::new(symbol, position))
    }
}

/// Parses one [`Atom`] per non-blank line of `text`.
///
/// # Examples
///
/// ```
/// let atoms = chemu::parse_atoms("H 0 0 0\n\nH 0 0 0.74\n").unwrap();
/// assert_eq!(atoms.len(), 2);
/// assert!((atoms[0].distance(&atoms[1]) - 0.74).abs() < 1e-12);
/// ```
///
/// [`Atom`]: struct.Atom.html
pub fn parse_atoms(text: &str) -> Result<Vec<Atom>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}

fn incomplete(record: &str) -> Error {
    Error::new(ErrorKind::Parse {
        token: record.to_string(),
        reason: "expected a symbol followed by three coordinates".to_string(),
    })
}
