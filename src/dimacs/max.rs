/*
 * Copyright (c) 2021 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! This module implements a read function for the famous DIMACS max
//! flow format. A DIMACS file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p max <n> <m>`,
//!    where `<n>` is an integer > 0 denoting the number of nodes and
//!    `<m>` an integer > 0 denoting the number of arcs.
//! 4. after the problem line there must follow exactly two node lines
//!    of the form `n <node> <type>` where `<node>` is the node number
//!    between `1..n` and `<type>` is either `s` (if this is the source
//!    node) or `t` (if this is the sink node).
//! 5. after the node lines there must be exactly `m` arc lines `a <u>
//!    <v> <c>` denoting the source and sink nodes of an arc as well as
//!    the arcs capacity `<c>` (an integer >= 0).
//!
//! Loops are not allowed. Parallel arcs are rejected when the instance
//! is turned into a [`DenseMinCostFlow`].

use super::{node_index, DimacsReader, Error, Result};
use crate::mcf::{self, DenseMinCostFlow};
use crate::num::traits::{NumAssign, PrimInt, Signed};
use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

pub struct Instance<T> {
    /// The number of nodes.
    pub num_nodes: usize,
    /// The source node (0-based).
    pub src: usize,
    /// The sink node (0-based).
    pub snk: usize,
    /// The arcs as pairs of 0-based node indices.
    pub arcs: Vec<(usize, usize)>,
    /// The upper bounds.
    pub upper: Vec<T>,
}

impl<T> Instance<T>
where
    T: PrimInt + Signed + NumAssign,
{
    /// Create a solver for the max-flow problem of this instance.
    ///
    /// All arcs get cost zero, so solving from `src` to `snk` computes
    /// a maximum flow.
    pub fn network(&self) -> mcf::Result<DenseMinCostFlow<T>> {
        let n = self.num_nodes;
        let mut seen = vec![false; n * n];
        let mut mcf = DenseMinCostFlow::new(n);
        for (&(u, v), &cap) in self.arcs.iter().zip(&self.upper) {
            if u < n && v < n {
                if seen[u * n + v] {
                    return Err(mcf::Error::ParallelArc { src: u, snk: v });
                }
                seen[u * n + v] = true;
            }
            mcf.add_edge(u, v, cap, T::zero())?;
        }
        Ok(mcf)
    }
}

pub fn read<R: Read, T>(r: R) -> Result<Instance<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let mut reader = DimacsReader::new(r);

    let (nnodes, nedges) = reader.problem_line("max")?;

    let mut src = None;
    let mut snk = None;

    for _ in 0..2 {
        let mut nline = reader.expect_line("n")?;
        let u = node_index(nline.number()?, nnodes, "node", nline.line)?;
        let what = nline.str()?;
        match what {
            "s" => {
                if src.is_some() {
                    return Err(Error::Format {
                        line: nline.line,
                        msg: "duplicate source node".to_string(),
                    });
                }
                src = Some(u);
            }
            "t" => {
                if snk.is_some() {
                    return Err(Error::Format {
                        line: nline.line,
                        msg: "duplicate sink node".to_string(),
                    });
                }
                snk = Some(u);
            }
            _ => {
                return Err(Error::Format {
                    line: nline.line,
                    msg: format!("invalid node type, must be 's' or 't', got: {}", what),
                });
            }
        }
        nline.end()?;
    }

    let mut arcs = Vec::with_capacity(nedges);
    let mut upper = Vec::with_capacity(nedges);
    for _ in 0..nedges {
        let mut aline = reader.expect_line("a")?;
        let u = node_index(aline.number()?, nnodes, "source node", aline.line)?;
        let v = node_index(aline.number()?, nnodes, "sink node", aline.line)?;
        let c: T = aline.number()?;

        if u == v {
            return Err(Error::Data {
                line: aline.line,
                msg: format!("invalid loop ({},{}) in edge", u + 1, u + 1),
            });
        }
        aline.end()?;

        arcs.push((u, v));
        upper.push(c);
    }

    if let Some(toks) = reader.read_line()? {
        return Err(Error::Format {
            line: toks.line,
            msg: format!(
                "unexpected line at the end of file (expected exactly {} 'a' lines)",
                nedges,
            ),
        });
    }

    match (src, snk) {
        (Some(src), Some(snk)) => Ok(Instance {
            num_nodes: nnodes,
            src,
            snk,
            arcs,
            upper,
        }),
        // two node lines have been read, so one of them must be missing
        _ => Err(Error::Format {
            line: reader.line_number(),
            msg: "source or sink node missing".to_string(),
        }),
    }
}

pub fn read_from_file<T>(filename: &str) -> Result<Instance<T>>
where
    T: FromStr,
    T::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a max-flow instance.
pub fn write<W, T>(mut w: W, instance: &Instance<T>) -> std::io::Result<()>
where
    W: Write,
    T: Display,
{
    writeln!(w, "p max {} {}", instance.num_nodes, instance.arcs.len())?;
    writeln!(w, "n {} s", instance.src + 1)?;
    writeln!(w, "n {} t", instance.snk + 1)?;
    for (&(u, v), c) in instance.arcs.iter().zip(&instance.upper) {
        writeln!(w, "a {} {} {}", u + 1, v + 1, c)?;
    }

    Ok(())
}

/// Write a max-flow instance to a named file.
pub fn write_to_file<T>(filename: &str, instance: &Instance<T>) -> std::io::Result<()>
where
    T: Display,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

#[cfg(test)]
mod tests {

    use crate::dimacs::{self, Error};
    use std::io::{self, Cursor};

    const FILE: &str = "c this is a test file

p max 6 9
n 5 s
n 6 t

c there might be empty lines

a 5 1 10
a 5 2 10
a 1 2 2
a 1 3 4
a 1 4 8
a 2 4 9
a 3 6 10
a 4 3 6
a 4 6 10

c end of the file
";

    #[test]
    fn parse_file_test() {
        let instance = dimacs::max::read::<_, i64>(io::Cursor::new(FILE)).unwrap();

        assert_eq!(instance.num_nodes, 6);
        assert_eq!(instance.arcs.len(), 9);
        assert_eq!(instance.src, 4);
        assert_eq!(instance.snk, 5);

        let mut arcs: Vec<_> = instance
            .arcs
            .iter()
            .zip(&instance.upper)
            .map(|(&(u, v), &c)| (u + 1, v + 1, c))
            .collect();

        arcs.sort();

        assert_eq!(
            arcs,
            vec![
                (1, 2, 2),
                (1, 3, 4),
                (1, 4, 8),
                (2, 4, 9),
                (3, 6, 10),
                (4, 3, 6),
                (4, 6, 10),
                (5, 1, 10),
                (5, 2, 10),
            ]
        );
    }

    #[test]
    fn solve_file_test() {
        let instance = dimacs::max::read::<_, i64>(io::Cursor::new(FILE)).unwrap();
        let mut mcf = instance.network().unwrap();
        assert_eq!(mcf.solve(instance.src, instance.snk), Ok((19, 0)));

        let mut mincut = mcf.mincut();
        mincut.sort();
        assert_eq!(mincut, vec![1, 4]);
    }

    #[test]
    fn parse_errors() {
        let err = dimacs::max::read::<_, i64>(Cursor::new("p max 2 1\nn 1 s\nn 1 s\na 1 2 1\n")).err();
        assert!(matches!(err, Some(Error::Format { line: 3, .. })));

        let err = dimacs::max::read::<_, i64>(Cursor::new("p max 2 1\nn 1 s\nn 2 t\na 1 2 1\na 2 1 1\n")).err();
        assert!(matches!(err, Some(Error::Format { line: 5, .. })));

        let err = dimacs::max::read::<_, i64>(Cursor::new("p max 2 1\nn 1 s\nn 2 x\na 1 2 1\n")).err();
        assert!(matches!(err, Some(Error::Format { line: 3, .. })));
    }

    #[test]
    fn write_test_file() {
        let mut buf = Cursor::new(Vec::new());
        dimacs::max::write(
            &mut buf,
            &dimacs::max::Instance {
                num_nodes: 4,
                src: 0,
                snk: 3,
                arcs: vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)],
                upper: vec![4, 2, 2, 3, 5],
            },
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p max 4 5
n 1 s
n 4 t
a 1 2 4
a 1 3 2
a 2 3 2
a 2 4 3
a 3 4 5
"
        );
    }
}
