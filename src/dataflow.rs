/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! The "Data Flow" problem.
//!
//! A network of `n` computers (numbered `1..n`) is connected by
//! undirected links, each with a per-unit transfer cost. Every link
//! can carry at most `K` units of data in each direction. The task is
//! to send `D` units of data from computer `1` to computer `n` at
//! minimal cost, or to decide that this is impossible.
//!
//! The input consists of any number of instances until the end of
//! input. Each instance has the form
//!
//! ```text
//! n m
//! u_1 v_1 cost_1
//! ...
//! u_m v_m cost_m
//! D K
//! ```
//!
//! and all tokens may be separated by arbitrary whitespace. For each
//! instance one line is written, either the minimal cost or
//! `Impossible.`.
//!
//! Each link becomes a pair of opposite arcs of capacity `K`. An
//! artificial source `0` is connected to node `1` and node `n` to an
//! artificial sink `n+1`, both by arcs of capacity `D`. As with
//! [`DenseMinCostFlow::add_edge`], a later link between the same pair
//! of computers replaces an earlier one.
//!
//! # Example
//!
//! ```
//! use rs_mcmf::dataflow;
//! use std::io::Cursor;
//!
//! let input = "4 5\n1 4 1\n1 3 3\n3 4 4\n1 2 2\n2 4 5\n20 10\n\
//!              4 4\n1 3 3\n3 4 4\n1 2 2\n2 4 5\n20 1\n";
//! let mut output = Vec::new();
//! dataflow::solve::<_, _, i64>(Cursor::new(input), &mut output).unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "80\nImpossible.\n");
//! ```

use crate::mcf::{self, DenseMinCostFlow};
use crate::num::traits::{NumAssign, PrimInt, Signed};

use std::error;
use std::fmt::{self, Display};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Error when reading or solving a data flow instance.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Format { line: usize, msg: String },
    Data { line: usize, msg: String },
    Flow(mcf::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<mcf::Error> for Error {
    fn from(err: mcf::Error) -> Self {
        Error::Flow(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Io(err) => err.fmt(fmt),
            Format { line, msg } => write!(fmt, "Format error on line {}: {}", line, msg),
            Data { line, msg } => write!(fmt, "Data error on line {}: {}", line, msg),
            Flow(err) => write!(fmt, "Flow error: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Flow(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A data flow instance.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Instance<F> {
    /// The number of computers.
    pub num_nodes: usize,
    /// The links `(u, v, cost)` with `u, v` in `1..=num_nodes`.
    pub links: Vec<(usize, usize, F)>,
    /// The amount of data to be sent.
    pub demand: F,
    /// The capacity of each link in each direction.
    pub capacity: F,
}

/// The answer to a data flow instance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Outcome<F> {
    /// The demand cannot be routed.
    Impossible,
    /// The minimal cost of routing the demand.
    Cost(F),
}

impl<F: Display> Display for Outcome<F> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Outcome::Impossible => write!(fmt, "Impossible."),
            Outcome::Cost(c) => write!(fmt, "{}", c),
        }
    }
}

impl<F> Instance<F>
where
    F: PrimInt + Signed + NumAssign,
{
    /// Solve this instance.
    pub fn solve(&self) -> mcf::Result<Outcome<F>> {
        self.solve_with_flow().map(|(outcome, _)| outcome)
    }

    /// Solve this instance and also return the underlying flow.
    ///
    /// Node `0` of the returned solver is the artificial source and
    /// node `num_nodes + 1` the artificial sink.
    pub fn solve_with_flow(&self) -> mcf::Result<(Outcome<F>, DenseMinCostFlow<F>)> {
        let n = self.num_nodes;
        let mut mcf = DenseMinCostFlow::new(n + 2);

        for &(u, v, cost) in &self.links {
            mcf.add_edge(u, v, self.capacity, cost)?;
            mcf.add_edge(v, u, self.capacity, cost)?;
        }
        mcf.add_edge(0, 1, self.demand, F::zero())?;
        mcf.add_edge(n, n + 1, self.demand, F::zero())?;

        let (flow, cost) = mcf.solve(0, n + 1)?;
        let outcome = if flow != self.demand {
            Outcome::Impossible
        } else {
            Outcome::Cost(cost)
        };

        Ok((outcome, mcf))
    }
}

/// Reads data flow instances token by token.
pub struct Reader<R: Read> {
    io: BufReader<R>,

    line: String,
    pos: usize,
    line_number: usize,
}

impl<R: Read> Reader<R> {
    pub fn new(reader: R) -> Self {
        Reader {
            io: BufReader::new(reader),
            line: String::new(),
            pos: 0,
            line_number: 0,
        }
    }

    /// The number of the line read most recently.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    // Return the byte range of the next token in the current line.
    fn next_token(&mut self) -> Result<Option<(usize, usize)>> {
        loop {
            if let Some(i) = self.line[self.pos..].find(|c: char| !c.is_whitespace()) {
                let start = self.pos + i;
                let end = self.line[start..]
                    .find(char::is_whitespace)
                    .map_or(self.line.len(), |j| start + j);
                self.pos = end;
                return Ok(Some((start, end)));
            }

            self.line.clear();
            self.pos = 0;
            if self.io.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
        }
    }

    /// Return the next token converted to a number.
    ///
    /// Returns `None` at the end of the input.
    pub fn number<T>(&mut self) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.next_token()? {
            Some((start, end)) => self.line[start..end].parse().map(Some).map_err(|e| Error::Format {
                line: self.line_number,
                msg: format!("{}", e),
            }),
            None => Ok(None),
        }
    }

    fn expect_number<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.number()?.ok_or_else(|| Error::Format {
            line: self.line_number,
            msg: format!("unexpected end of input, expected {}", what),
        })
    }

    /// Read the next instance.
    ///
    /// Returns `None` if there is no further instance.
    pub fn read_instance<F>(&mut self) -> Result<Option<Instance<F>>>
    where
        F: FromStr + Signed,
        F::Err: Display,
    {
        let nnodes: usize = match self.number()? {
            Some(n) => n,
            None => return Ok(None),
        };
        if nnodes == 0 {
            return Err(Error::Data {
                line: self.line_number,
                msg: "number of computers must be positive".to_string(),
            });
        }
        let nlinks: usize = self.expect_number("number of links")?;

        let mut links = Vec::with_capacity(nlinks);
        for _ in 0..nlinks {
            let u: usize = self.expect_number("link source")?;
            let v: usize = self.expect_number("link sink")?;
            let c: F = self.expect_number("link cost")?;
            for &w in &[u, v] {
                if w < 1 || w > nnodes {
                    return Err(Error::Data {
                        line: self.line_number,
                        msg: format!("invalid computer {} (must be in 1..{})", w, nnodes),
                    });
                }
            }
            links.push((u, v, c));
        }

        let demand: F = self.expect_number("amount of data")?;
        let capacity: F = self.expect_number("link capacity")?;
        if demand.is_negative() || capacity.is_negative() {
            return Err(Error::Data {
                line: self.line_number,
                msg: "amount of data and link capacity must be non-negative".to_string(),
            });
        }

        Ok(Some(Instance {
            num_nodes: nnodes,
            links,
            demand,
            capacity,
        }))
    }
}

/// Read all instances.
pub fn read<R, F>(r: R) -> Result<Vec<Instance<F>>>
where
    R: Read,
    F: FromStr + Signed,
    F::Err: Display,
{
    let mut reader = Reader::new(r);
    let mut instances = vec![];
    while let Some(instance) = reader.read_instance()? {
        instances.push(instance);
    }
    Ok(instances)
}

/// Read all instances from a named file.
pub fn read_from_file<F>(filename: &str) -> Result<Vec<Instance<F>>>
where
    F: FromStr + Signed,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write an instance in the input format.
pub fn write<W, F>(mut w: W, instance: &Instance<F>) -> io::Result<()>
where
    W: Write,
    F: Display,
{
    writeln!(w, "{} {}", instance.num_nodes, instance.links.len())?;
    for (u, v, c) in &instance.links {
        writeln!(w, "{} {} {}", u, v, c)?;
    }
    writeln!(w, "{} {}", instance.demand, instance.capacity)
}

/// Solve all instances in `r` and write one answer per line to `w`.
///
/// Instances are solved one after another while reading.
pub fn solve<R, W, F>(r: R, mut w: W) -> Result<()>
where
    R: Read,
    W: Write,
    F: PrimInt + Signed + NumAssign + FromStr + Display,
    F::Err: Display,
{
    let mut reader = Reader::new(r);
    while let Some(instance) = reader.read_instance::<F>()? {
        writeln!(w, "{}", instance.solve()?)?;
    }
    Ok(())
}
