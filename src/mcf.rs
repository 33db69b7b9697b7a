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

//! Minimum Cost Flow algorithms.
//!
//! The central piece is [`DenseMinCostFlow`], a successive shortest
//! path algorithm on a dense adjacency matrix. [`Transshipment`]
//! reduces min-cost flow problems with node balances and arc bounds
//! to it.

pub mod dense;
pub use self::dense::{mincostmaxflow, DenseMinCostFlow};

pub mod transshipment;
pub use self::transshipment::Transshipment;

use std::error;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SolutionState {
    /// Unknown state, the problem has not been solved, yet
    Unknown,
    /// The problem has been solved to optimality
    Optimal,
    /// The problem is infeasible
    Infeasible,
}

/// Error raised for invalid input to a flow algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// A node index is not in `0..num_nodes`.
    InvalidNode { node: usize, num_nodes: usize },
    /// An arc has been given a negative capacity.
    NegativeCapacity,
    /// An arc has been given a negative cost.
    NegativeCost,
    /// An arc cost exceeds `infinite / num_nodes`.
    CostTooLarge,
    /// Source and sink node are the same.
    SourceIsSink,
    /// The flow or cost value does not fit into the value type.
    Overflow,
    /// Loops `(u,u)` are not supported.
    Loop(usize),
    /// There is already an arc between these two nodes.
    ParallelArc { src: usize, snk: usize },
    /// The lower bound of an arc is negative or larger than its upper bound.
    InvalidBounds,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            InvalidNode { node, num_nodes } => write!(fmt, "invalid node {} (must be in 0..{})", node, num_nodes),
            NegativeCapacity => write!(fmt, "negative arc capacity"),
            NegativeCost => write!(fmt, "negative arc cost"),
            CostTooLarge => write!(fmt, "arc cost too large (must not exceed infinite / number of nodes)"),
            SourceIsSink => write!(fmt, "source and sink node must not be equal"),
            Overflow => write!(fmt, "flow value overflow"),
            Loop(u) => write!(fmt, "loop ({},{}) not allowed", u, u),
            ParallelArc { src, snk } => write!(fmt, "parallel arc ({},{}) not allowed", src, snk),
            InvalidBounds => write!(fmt, "invalid arc bounds"),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
