//! Small helpers for scientific code: reading text files line by line in either direction,
//! parsing whitespace-separated numbers and atom records, and slice membership tests.
//!
//! The centerpiece is [`BackwardLineReader`], which returns the lines of a file from the last
//! one to the first one without loading the file into memory.
//!
//! # Examples
//!
//! - Print the last frame marker of a log, scanning from its end.
//!
//! ```no_run
//! use chemu::{BackwardLineReader, Result};
//!
//! fn last_step(path: &str) -> Result<Option<String>> {
//!     let mut reader = BackwardLineReader::open(path)?;
//!     loop {
//!         match reader.previous_line() {
//!             Ok(line) if line.starts_with("step") => return Ok(Some(line)),
//!             Ok(_) => continue,
//!             Err(ref err) if err.is_end_of_data() => return Ok(None),
//!             Err(err) => return Err(err),
//!         }
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     println!("{:?}", last_step("./md.log")?);
//!     Ok(())
//! }
//! ```
//!
//! [`BackwardLineReader`]: struct.BackwardLineReader.html
#![deny(missing_docs)]

mod error;
pub use error::{Error, ErrorKind, Result};

mod backward;
pub use backward::{BackwardLineReader, RevLines};

mod forward;
pub use forward::ForwardLineReader;

mod parse;
pub use parse::{parse_floats, parse_ints, read_index_file};

mod atom;
pub use atom::{parse_atoms, Atom};

mod membership;
pub use membership::{contains, position, push_unique};

mod replace;
pub use replace::replace_in_file;
