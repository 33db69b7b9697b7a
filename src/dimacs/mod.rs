// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Reading and writing flow problems in DIMACS format.
//!
//! Both flow formats share the same line structure: every line starts
//! with a one-letter descriptor, `c` lines are comments and blank
//! lines are ignored. Node numbers in files are 1-based, all instances
//! returned by the readers use 0-based node indices.

pub mod max;
pub mod min;

use std::error;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::str::{FromStr, SplitWhitespace};

/// Error when reading a file in DIMACS format.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// The file does not follow the line syntax.
    Format { line: usize, msg: String },
    /// The line syntax is fine but the values are not.
    Data { line: usize, msg: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(fmt, "I/O error: {}", err),
            Error::Format { line, msg } => write!(fmt, "line {}: format error: {}", line, msg),
            Error::Data { line, msg } => write!(fmt, "line {}: invalid data: {}", line, msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        if let Error::Io(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

fn format_error<T>(line: usize, msg: String) -> Result<T> {
    Err(Error::Format { line, msg })
}

/// Line based reader skipping comments and empty lines.
pub struct DimacsReader<R: Read> {
    io: BufReader<R>,
    buf: String,
    line_number: usize,
}

impl<R: Read> DimacsReader<R> {
    pub fn new(reader: R) -> Self {
        DimacsReader {
            io: BufReader::new(reader),
            buf: String::new(),
            line_number: 0,
        }
    }

    /// The number of the most recently read line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    // Return the tokens of the next non-comment line.
    fn read_line(&mut self) -> Result<Option<Tokens>> {
        loop {
            self.buf.clear();
            if self.io.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let content = self.buf.trim_start();
            if !content.is_empty() && !content.starts_with('c') {
                break;
            }
        }

        Ok(Some(Tokens {
            it: self.buf.split_whitespace(),
            line: self.line_number,
        }))
    }

    // Read the next line, which must start with one of `descriptors`.
    //
    // Returns the descriptor and the remaining tokens, or `None` at the
    // end of the input.
    fn read_one_line_of(&mut self, descriptors: &[&str]) -> Result<Option<(&str, Tokens)>> {
        let mut toks = match self.read_line()? {
            Some(toks) => toks,
            None => return Ok(None),
        };
        let line = toks.line;
        match toks.it.next() {
            Some(d) if descriptors.iter().any(|&desc| desc == d) => Ok(Some((d, toks))),
            Some(d) => format_error(
                line,
                format!("expected a '{}' line, got '{}'", descriptors.join("' or '"), d),
            ),
            None => format_error(line, "empty line".to_string()),
        }
    }

    // Read the next line, which must start with `descriptor`.
    //
    // At the end of the input the error refers to the last line read.
    fn expect_line(&mut self, descriptor: &str) -> Result<Tokens> {
        let line = self.line_number;
        match self.read_one_line_of(&[descriptor])? {
            Some((_, toks)) => Ok(toks),
            None => format_error(line, format!("unexpected end of file, expected a '{}' line", descriptor)),
        }
    }

    // Read the problem line `p <kind> <nodes> <arcs>`.
    fn problem_line(&mut self, kind: &str) -> Result<(usize, usize)> {
        let mut toks = self.expect_line("p")?;
        let found = toks.str()?;
        if found != kind {
            return format_error(toks.line, format!("expected problem type '{}', got '{}'", kind, found));
        }
        let nnodes = toks.number()?;
        let narcs = toks.number()?;
        toks.end()?;
        Ok((nnodes, narcs))
    }
}

/// The remaining tokens of a line.
pub struct Tokens<'a> {
    it: SplitWhitespace<'a>,
    pub line: usize,
}

impl<'a> Tokens<'a> {
    /// Returns the next token as `&str`.
    pub fn str(&mut self) -> Result<&'a str> {
        match self.it.next() {
            Some(tok) => Ok(tok),
            None => format_error(self.line, "line too short".to_string()),
        }
    }

    /// Returns the next token converted to a number.
    pub fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let tok = self.str()?;
        tok.parse()
            .or_else(|e| format_error(self.line, format!("invalid number '{}': {}", tok, e)))
    }

    /// Ensures that there is no next token.
    pub fn end(&mut self) -> Result<()> {
        match self.it.next() {
            Some(tok) => format_error(self.line, format!("unexpected token '{}' at end of line", tok)),
            None => Ok(()),
        }
    }
}

// Check that a 1-based node number is valid and return its 0-based index.
fn node_index(u: usize, nnodes: usize, what: &str, line: usize) -> Result<usize> {
    if (1..=nnodes).contains(&u) {
        Ok(u - 1)
    } else {
        Err(Error::Data {
            line,
            msg: format!("invalid {} id {} (must be in 1..{})", what, u, nnodes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DimacsReader, Error};
    use std::io::Cursor;

    #[test]
    fn test_skip_comments() {
        let mut reader = DimacsReader::new(Cursor::new("c comment\n\n   \n  p min 3 2\n"));
        assert_eq!(reader.problem_line("min").unwrap(), (3, 2));
        assert_eq!(reader.line_number(), 4);
        assert!(reader.read_line().unwrap().is_none());
    }

    #[test]
    fn test_line_errors() {
        let mut reader = DimacsReader::new(Cursor::new("p min 3\n"));
        assert!(matches!(reader.problem_line("min"), Err(Error::Format { line: 1, .. })));

        let mut reader = DimacsReader::new(Cursor::new("p min 3 x\n"));
        assert!(matches!(reader.problem_line("min"), Err(Error::Format { line: 1, .. })));

        let mut reader = DimacsReader::new(Cursor::new("p max 2 0\nc no node lines\n"));
        reader.problem_line("max").unwrap();
        assert!(matches!(reader.expect_line("n"), Err(Error::Format { line: 1, .. })));

        let mut reader = DimacsReader::new(Cursor::new("a 1 2\n"));
        let mut toks = reader.expect_line("a").unwrap();
        assert_eq!(toks.number::<usize>().unwrap(), 1);
        assert!(matches!(toks.end(), Err(Error::Format { line: 1, .. })));
    }
}
