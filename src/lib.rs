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

#![forbid(unsafe_code)]

//! Min-cost max-flow on small dense graphs.
//!
//! The crate provides a successive shortest path algorithm working on
//! dense adjacency matrices ([`mcf::DenseMinCostFlow`]), a reduction
//! of min-cost flow problems with node balances to it
//! ([`mcf::Transshipment`]) and a solver for the "Data Flow" routing
//! problem ([`dataflow`]).

mod num {
    pub use num_traits as traits;
}

// # Algorithms

pub mod mcf;
pub use self::mcf::{DenseMinCostFlow, Transshipment};

// # Applications

pub mod dataflow;

#[cfg(any(feature = "dimacs"))]
pub mod dimacs;
