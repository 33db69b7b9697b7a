/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! This module implements a read function for the DIMACS min cost
//! flow format. A DIMACS file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p min <n> <m>`,
//!    where `<n>` is an integer > 0 denoting the number of nodes and
//!    `<m>` an integer > 0 denoting the number of arcs.
//! 4. after the problem line there must follow node lines of the form
//!    `n <node> <balance>` where `<node>` is the node number between
//!    `1..n` and `<balance>` is node's supply (if positive) or demand
//!    (if negative). Nodes that have balance 0 do not need to be
//!    specified.
//! 5. after the node lines there must be exactly `m` arc lines `a <u>
//!    <v> <lb> <ub> <c>` denoting the source and sink nodes of an arc
//!    as well as the arcs lower bound `<lb>`, upper bound `<ub>` and
//!    cost `<c>`.
//!
//! Loops are not allowed. Parallel arcs are accepted by the reader but
//! rejected by [`Instance::transshipment`], because the dense solver
//! stores at most one arc per pair of nodes.

use super::{node_index, DimacsReader, Error, Result};
use crate::mcf::{self, Transshipment};
use crate::num::traits::{NumAssign, PrimInt, Signed, Zero};
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

pub struct Instance<T> {
    /// The number of nodes.
    pub num_nodes: usize,
    /// The arcs as pairs of 0-based node indices.
    pub arcs: Vec<(usize, usize)>,
    /// The node balance.
    pub balances: Vec<T>,
    /// The lower bounds.
    pub lower: Vec<T>,
    /// The upper bounds.
    pub upper: Vec<T>,
    /// The arc costs.
    pub costs: Vec<T>,
}

impl<T> Instance<T>
where
    T: PrimInt + Signed + NumAssign,
{
    /// Create the min-cost flow problem of this instance.
    ///
    /// Arc `i` of the instance becomes arc `i` of the problem.
    pub fn transshipment(&self) -> mcf::Result<Transshipment<T>> {
        let mut spx = Transshipment::new(self.num_nodes);
        for (u, &b) in self.balances.iter().enumerate() {
            spx.set_balance(u, b)?;
        }
        for (i, &(u, v)) in self.arcs.iter().enumerate() {
            spx.add_arc(u, v, self.lower[i], self.upper[i], self.costs[i])?;
        }
        Ok(spx)
    }
}

pub fn read<R: Read, T>(r: R) -> Result<Instance<T>>
where
    T: FromStr + Zero + Clone,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);

    let (nnodes, nedges) = reader.problem_line("min")?;

    let mut balances = vec![T::zero(); nnodes];
    let mut arcs = Vec::with_capacity(nedges);
    let mut costs = Vec::with_capacity(nedges);
    let mut lower = Vec::with_capacity(nedges);
    let mut upper = Vec::with_capacity(nedges);

    while let Some((d, mut toks)) = reader.read_one_line_of(&["n", "a"])? {
        if d == "n" {
            let u = node_index(toks.number()?, nnodes, "node", toks.line)?;
            balances[u] = toks.number()?;
        } else {
            let u = node_index(toks.number()?, nnodes, "source node", toks.line)?;
            let v = node_index(toks.number()?, nnodes, "sink node", toks.line)?;
            let lb: T = toks.number()?;
            let ub: T = toks.number()?;
            let c: T = toks.number()?;

            if u == v {
                return Err(Error::Data {
                    line: toks.line,
                    msg: format!("invalid loop ({},{}) in edge", u + 1, u + 1),
                });
            }

            if arcs.len() == nedges {
                return Err(Error::Data {
                    line: toks.line,
                    msg: format!("unexpected 'a' line (expected exactly {} arcs)", nedges),
                });
            }

            arcs.push((u, v));
            lower.push(lb);
            upper.push(ub);
            costs.push(c);
        }

        toks.end()?;
    }

    if arcs.len() != nedges {
        return Err(Error::Format {
            line: reader.line_number(),
            msg: format!("expected {} arcs, got {}", nedges, arcs.len()),
        });
    }

    Ok(Instance {
        num_nodes: nnodes,
        arcs,
        balances,
        lower,
        upper,
        costs,
    })
}

pub fn read_from_file<T>(filename: &str) -> Result<Instance<T>>
where
    T: FromStr + Zero + Clone,
    T::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a min-cost-flow instance.
pub fn write<W, T>(mut w: W, instance: &Instance<T>) -> std::io::Result<()>
where
    W: Write,
    T: Zero + Display,
{
    writeln!(w, "p min {} {}", instance.num_nodes, instance.arcs.len())?;
    for (u, b) in instance.balances.iter().enumerate() {
        if !b.is_zero() {
            writeln!(w, "n {} {}", u + 1, b)?;
        }
    }
    for (i, &(u, v)) in instance.arcs.iter().enumerate() {
        writeln!(
            w,
            "a {} {} {} {} {}",
            u + 1,
            v + 1,
            instance.lower[i],
            instance.upper[i],
            instance.costs[i]
        )?;
    }

    Ok(())
}

/// Write a min-cost-flow instance to a named file.
pub fn write_to_file<T>(filename: &str, instance: &Instance<T>) -> std::io::Result<()>
where
    T: Zero + Display,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

/// Write a solution of a min-cost-flow problem.
///
/// `arcs` are the arcs of the instance, `flow` returns the flow on the
/// arc with the given index.
pub fn write_solution<W, T, Fs>(mut w: W, arcs: &[(usize, usize)], flow: Fs, value: T) -> std::io::Result<()>
where
    W: Write,
    T: Display + Zero,
    Fs: Fn(usize) -> T,
{
    writeln!(w, "s {}", value)?;
    for (i, &(u, v)) in arcs.iter().enumerate() {
        let fl = (flow)(i);
        if !fl.is_zero() {
            writeln!(w, "f {} {} {}", u + 1, v + 1, fl)?;
        }
    }

    Ok(())
}

/// Write a solution of a min-cost-flow problem to a named file.
pub fn write_solution_to_file<T, Fs>(filename: &str, arcs: &[(usize, usize)], flow: Fs, value: T) -> std::io::Result<()>
where
    T: Display + Zero,
    Fs: Fn(usize) -> T,
{
    write_solution(&mut std::fs::File::create(filename)?, arcs, flow, value)
}

/// Read a solution of a min-cost-flow problem.
///
/// Returns the solution value and the flows as `(u, v, flow)` with
/// 0-based node indices.
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<(usize, usize, T)>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let mut flows = vec![];
    let mut sol = None;

    while let Some((d, mut toks)) = reader.read_one_line_of(&["f", "s"])? {
        if d == "f" {
            let u: usize = toks.number()?;
            let v: usize = toks.number()?;
            if u < 1 || v < 1 {
                return Err(Error::Data {
                    line: toks.line,
                    msg: format!("invalid arc ({},{})", u, v),
                });
            }
            flows.push((u - 1, v - 1, toks.number()?));
        } else {
            if sol.is_some() {
                return Err(Error::Format {
                    line: toks.line,
                    msg: "The solution value must be specified exactly once".to_string(),
                });
            }
            sol = Some(toks.number()?);
        }
        toks.end()?;
    }

    Ok((
        sol.ok_or_else(|| Error::Format {
            line: 0,
            msg: "Missing solution value".to_string(),
        })?,
        flows,
    ))
}

/// Read a solution of a min-cost-flow problem from a named file.
pub fn read_solution_from_file<T>(filename: &str) -> Result<(T, Vec<(usize, usize, T)>)>
where
    T: FromStr,
    T::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}

#[cfg(test)]
mod tests {

    use crate::dimacs::{self, Error};
    use crate::mcf::{self, SolutionState};
    use std::io::{self, Cursor};

    fn diamond() -> dimacs::min::Instance<i64> {
        dimacs::min::Instance {
            num_nodes: 4,
            arcs: vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)],
            balances: vec![4, 0, 0, -4],
            lower: vec![0; 5],
            upper: vec![4, 2, 2, 3, 5],
            costs: vec![2, 2, 1, 3, 1],
        }
    }

    #[test]
    fn parse_file_test() {
        let file = "c this is a test file

p min 8 11
n 1 10
n 2 20
n 4 -5
n 7 -15
n 8 -10

c there might be empty lines

a 1 4 0 15 2
a 2 1 0 10 1
a 2 3 0 10 0
a 2 6 0 10 6
a 3 4 0 5 1
a 3 5 0 10 4
a 4 7 0 10 5
a 5 6 0 20 2
a 5 7 0 15 7
a 6 8 0 10 8
a 7 8 0 15 9

c end of the file
";
        let instance = dimacs::min::read::<_, isize>(io::Cursor::new(file)).unwrap();

        assert_eq!(instance.num_nodes, 8);
        assert_eq!(instance.arcs.len(), 11);
        assert_eq!(instance.balances, vec![10, 20, 0, -5, 0, 0, -15, -10]);
        assert_eq!(instance.lower, vec![0; 11]);
        assert_eq!(instance.upper, vec![15, 10, 10, 10, 5, 10, 10, 20, 15, 10, 15]);
        assert_eq!(instance.costs, vec![2, 1, 0, 6, 1, 4, 5, 2, 7, 8, 9]);
        assert_eq!(
            instance.arcs.iter().map(|&(u, v)| (u + 1, v + 1)).collect::<Vec<_>>(),
            vec![
                (1, 4),
                (2, 1),
                (2, 3),
                (2, 6),
                (3, 4),
                (3, 5),
                (4, 7),
                (5, 6),
                (5, 7),
                (6, 8),
                (7, 8),
            ]
        );
    }

    #[test]
    fn parse_errors() {
        let err = dimacs::min::read::<_, i64>(Cursor::new("p min 2 1\na 1 3 0 1 1\n")).err();
        assert!(matches!(err, Some(Error::Data { line: 2, .. })));

        let err = dimacs::min::read::<_, i64>(Cursor::new("p min 2 1\na 1 1 0 1 1\n")).err();
        assert!(matches!(err, Some(Error::Data { line: 2, .. })));

        let err = dimacs::min::read::<_, i64>(Cursor::new("p min 2 2\na 1 2 0 1 1\n")).err();
        assert!(matches!(err, Some(Error::Format { .. })));

        let err = dimacs::min::read::<_, i64>(Cursor::new("p max 2 1\na 1 2 0 1 1\n")).err();
        assert!(matches!(err, Some(Error::Format { line: 1, .. })));

        let err = dimacs::min::read::<_, i64>(Cursor::new("p min 2 1\nx 1 2\n")).err();
        assert!(matches!(err, Some(Error::Format { line: 2, .. })));
    }

    #[test]
    fn solve_instance() {
        let mut spx = diamond().transshipment().unwrap();
        assert_eq!(spx.solve(), Ok(SolutionState::Optimal));
        assert_eq!(spx.value(), 14);
    }

    #[test]
    fn parallel_arcs() {
        let instance = dimacs::min::read::<_, i64>(Cursor::new("p min 2 2\na 1 2 0 1 1\na 1 2 0 1 2\n")).unwrap();
        assert_eq!(
            instance.transshipment().err(),
            Some(mcf::Error::ParallelArc { src: 0, snk: 1 })
        );
    }

    #[test]
    fn write_test_file() {
        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write(&mut buf, &diamond()).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p min 4 5
n 1 4
n 4 -4
a 1 2 0 4 2
a 1 3 0 2 2
a 2 3 0 2 1
a 2 4 0 3 3
a 3 4 0 5 1
"
        );
    }

    #[test]
    fn write_solution_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let instance = diamond();
        let mut spx = instance.transshipment()?;
        spx.solve()?;

        let mut buf = Cursor::new(Vec::new());
        dimacs::min::write_solution(&mut buf, &instance.arcs, |a| spx.flow(a), spx.value())?;

        let soltxt = String::from_utf8(buf.into_inner())?;
        assert_eq!(
            soltxt,
            "s 14
f 1 2 2
f 1 3 2
f 2 3 2
f 3 4 4
"
        );

        let (value, flows) = dimacs::min::read_solution::<_, i64>(Cursor::new(soltxt))?;
        assert_eq!(value, 14);
        assert_eq!(flows, vec![(0, 1, 2), (0, 2, 2), (1, 2, 2), (2, 3, 4)]);

        Ok(())
    }
}
