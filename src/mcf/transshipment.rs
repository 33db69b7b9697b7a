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

//! Min-cost flow problems with node balances.
//!
//! Each node $u$ has a balance $b_u$, which is its supply if positive
//! and its demand if negative. Each arc has a lower and an upper bound
//! on its flow and a non-negative cost. The problem is solved by
//! moving the lower bounds into the balances and computing a min-cost
//! max-flow with [`DenseMinCostFlow`] from an artificial source
//! connected to all supply nodes to an artificial sink connected to all
//! demand nodes. The problem is feasible iff this flow saturates all
//! supplies.
//!
//! # Example
//!
//! ```
//! use rs_mcmf::mcf::{SolutionState, Transshipment};
//!
//! let mut spx = Transshipment::<i64>::new(3);
//! spx.set_balance(0, 3).unwrap();
//! spx.set_balance(2, -3).unwrap();
//! let a = spx.add_arc(0, 1, 0, 3, 1).unwrap();
//! let b = spx.add_arc(1, 2, 0, 3, 1).unwrap();
//! let c = spx.add_arc(0, 2, 1, 3, 5).unwrap();
//!
//! assert_eq!(spx.solve().unwrap(), SolutionState::Optimal);
//! assert_eq!(spx.value(), 9);
//! assert_eq!((spx.flow(a), spx.flow(b), spx.flow(c)), (2, 2, 1));
//! ```

use super::dense::{cost_bound, default_infinite};
use super::{DenseMinCostFlow, Error, Result, SolutionState};
use crate::num::traits::{NumAssign, PrimInt, Signed};

struct Arc<F> {
    src: usize,
    snk: usize,
    lower: F,
    upper: F,
    cost: F,
}

/// A min-cost flow problem with node balances and arc bounds.
pub struct Transshipment<F> {
    n: usize,
    balances: Vec<F>,
    arcs: Vec<Arc<F>>,
    // arc id for each pair of nodes
    arcids: Vec<usize>,

    flows: Vec<F>,
    value: F,
    niter: usize,
    solution_state: SolutionState,
}

impl<F> Transshipment<F>
where
    F: PrimInt + Signed + NumAssign,
{
    /// Create an empty problem with `n` nodes.
    pub fn new(n: usize) -> Self {
        Transshipment {
            n,
            balances: vec![F::zero(); n],
            arcs: vec![],
            arcids: vec![usize::max_value(); n * n],
            flows: vec![],
            value: F::zero(),
            niter: 0,
            solution_state: SolutionState::Unknown,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    fn check_node(&self, u: usize) -> Result<()> {
        if u < self.n {
            Ok(())
        } else {
            Err(Error::InvalidNode {
                node: u,
                num_nodes: self.n,
            })
        }
    }

    /// The balance of node `u`.
    ///
    /// # Panics
    ///
    /// Panics if `u` is not a node.
    pub fn balance(&self, u: usize) -> F {
        self.balances[u]
    }

    pub fn set_balance(&mut self, u: usize, balance: F) -> Result<()> {
        self.check_node(u)?;
        self.solution_state = SolutionState::Unknown;
        self.balances[u] = balance;
        Ok(())
    }

    /// Add an arc `(u,v)` and return its index.
    ///
    /// There may be at most one arc for each ordered pair of nodes. The
    /// cost must not exceed [`max_cost`](Self::max_cost).
    pub fn add_arc(&mut self, u: usize, v: usize, lower: F, upper: F, cost: F) -> Result<usize> {
        self.check_node(u)?;
        self.check_node(v)?;
        if u == v {
            return Err(Error::Loop(u));
        }
        if self.arcids[u * self.n + v] != usize::max_value() {
            return Err(Error::ParallelArc { src: u, snk: v });
        }
        if lower.is_negative() || lower > upper {
            return Err(Error::InvalidBounds);
        }
        if cost.is_negative() {
            return Err(Error::NegativeCost);
        }
        if cost > self.max_cost() {
            return Err(Error::CostTooLarge);
        }

        self.solution_state = SolutionState::Unknown;
        let id = self.arcs.len();
        self.arcids[u * self.n + v] = id;
        self.arcs.push(Arc {
            src: u,
            snk: v,
            lower,
            upper,
            cost,
        });
        Ok(id)
    }

    /// The largest arc cost accepted by `add_arc`.
    ///
    /// The problem is solved on a network with two additional nodes, so
    /// this is slightly smaller than the bound of a [`DenseMinCostFlow`]
    /// with `num_nodes` nodes.
    pub fn max_cost(&self) -> F {
        cost_bound(default_infinite(), self.n + 2)
    }

    /// Return the flow on arc `a` of the latest solution.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not an arc.
    pub fn flow(&self, a: usize) -> F {
        self.flows[a]
    }

    /// Return the cost of the latest solution.
    pub fn value(&self) -> F {
        self.value
    }

    /// Number of augmentations done by the latest `solve`.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// Return the solution state of the latest computation.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    /// Solve the min-cost flow problem.
    pub fn solve(&mut self) -> Result<SolutionState> {
        let n = self.n;

        self.niter = 0;
        self.value = F::zero();
        self.flows = self.arcs.iter().map(|a| a.lower).collect();
        self.solution_state = SolutionState::Unknown;

        // move lower bounds into the balances
        let mut balances = self.balances.clone();
        let mut value = F::zero();
        for a in &self.arcs {
            balances[a.src] = balances[a.src].checked_sub(&a.lower).ok_or(Error::Overflow)?;
            balances[a.snk] = balances[a.snk].checked_add(&a.lower).ok_or(Error::Overflow)?;
            let c = a.lower.checked_mul(&a.cost).ok_or(Error::Overflow)?;
            value = value.checked_add(&c).ok_or(Error::Overflow)?;
        }

        let mut total = F::zero();
        for &b in &balances {
            total = total.checked_add(&b).ok_or(Error::Overflow)?;
        }
        if !total.is_zero() {
            self.solution_state = SolutionState::Infeasible;
            return Ok(self.solution_state);
        }

        let src = n;
        let snk = n + 1;
        let mut mcf = DenseMinCostFlow::new(n + 2);
        for a in &self.arcs {
            mcf.add_edge(a.src, a.snk, a.upper - a.lower, a.cost)?;
        }
        let mut supply = F::zero();
        for (u, &b) in balances.iter().enumerate() {
            if b.is_positive() {
                mcf.add_edge(src, u, b, F::zero())?;
                supply = supply.checked_add(&b).ok_or(Error::Overflow)?;
            } else if b.is_negative() {
                let demand = F::zero().checked_sub(&b).ok_or(Error::Overflow)?;
                mcf.add_edge(u, snk, demand, F::zero())?;
            }
        }

        let (flow, cost) = mcf.solve(src, snk)?;
        self.niter = mcf.num_iterations();

        if flow < supply {
            self.solution_state = SolutionState::Infeasible;
            return Ok(self.solution_state);
        }

        for (f, a) in self.flows.iter_mut().zip(&self.arcs) {
            *f += mcf.flow(a.src, a.snk);
        }
        self.value = value.checked_add(&cost).ok_or(Error::Overflow)?;
        self.solution_state = SolutionState::Optimal;

        Ok(self.solution_state)
    }
}

#[cfg(test)]
mod tests {
    use super::Transshipment;
    use crate::mcf::{Error, SolutionState};

    fn diamond() -> Transshipment<i64> {
        let mut spx = Transshipment::new(4);
        spx.set_balance(0, 4).unwrap();
        spx.set_balance(3, -4).unwrap();
        spx.add_arc(0, 1, 0, 4, 2).unwrap();
        spx.add_arc(0, 2, 0, 2, 2).unwrap();
        spx.add_arc(1, 2, 0, 2, 1).unwrap();
        spx.add_arc(1, 3, 0, 3, 3).unwrap();
        spx.add_arc(2, 3, 0, 5, 1).unwrap();
        spx
    }

    #[test]
    fn test_diamond() {
        let mut spx = diamond();
        assert_eq!(spx.solution_state(), SolutionState::Unknown);
        assert_eq!(spx.solve(), Ok(SolutionState::Optimal));
        assert_eq!(spx.value(), 14);
        let flows = (0..spx.num_arcs()).map(|a| spx.flow(a)).collect::<Vec<_>>();
        assert_eq!(flows, vec![2, 2, 2, 0, 4]);
    }

    #[test]
    fn test_modification_resets_state() {
        let mut spx = diamond();
        spx.solve().unwrap();
        assert_eq!(spx.solution_state(), SolutionState::Optimal);
        spx.set_balance(1, 0).unwrap();
        assert_eq!(spx.solution_state(), SolutionState::Unknown);
    }

    #[test]
    fn test_unbalanced() {
        let mut spx = diamond();
        spx.set_balance(3, -3).unwrap();
        assert_eq!(spx.solve(), Ok(SolutionState::Infeasible));
    }

    #[test]
    fn test_insufficient_capacity() {
        let mut spx = diamond();
        spx.set_balance(0, 9).unwrap();
        spx.set_balance(3, -9).unwrap();
        assert_eq!(spx.solve(), Ok(SolutionState::Infeasible));
    }

    #[test]
    fn test_lower_bounds() {
        // 2 units must go the expensive way
        let mut spx = Transshipment::<i64>::new(3);
        spx.set_balance(0, 2).unwrap();
        spx.set_balance(2, -2).unwrap();
        let a = spx.add_arc(0, 1, 0, 5, 1).unwrap();
        let b = spx.add_arc(1, 2, 0, 5, 1).unwrap();
        let c = spx.add_arc(0, 2, 2, 5, 10).unwrap();
        assert_eq!(spx.solve(), Ok(SolutionState::Optimal));
        assert_eq!((spx.flow(a), spx.flow(b), spx.flow(c)), (0, 0, 2));
        assert_eq!(spx.value(), 20);
    }

    #[test]
    fn test_circulation() {
        // no balances but a lower bound on a cycle
        let mut spx = Transshipment::<i64>::new(3);
        spx.add_arc(0, 1, 1, 2, 1).unwrap();
        spx.add_arc(1, 2, 0, 2, 2).unwrap();
        spx.add_arc(2, 0, 0, 2, 3).unwrap();
        assert_eq!(spx.solve(), Ok(SolutionState::Optimal));
        assert_eq!(spx.value(), 6);
        assert_eq!((0..3).map(|a| spx.flow(a)).collect::<Vec<_>>(), vec![1, 1, 1]);
    }

    #[test]
    fn test_supply_overflow() {
        // balances sum to zero, but the total supply does not fit
        let mut spx = Transshipment::<i32>::new(4);
        spx.set_balance(0, i32::max_value()).unwrap();
        spx.set_balance(1, -i32::max_value()).unwrap();
        spx.set_balance(2, 1).unwrap();
        spx.set_balance(3, -1).unwrap();
        assert_eq!(spx.solve(), Err(Error::Overflow));
    }

    #[test]
    fn test_demand_overflow() {
        let mut spx = Transshipment::<i32>::new(3);
        spx.set_balance(0, i32::min_value()).unwrap();
        spx.set_balance(1, i32::max_value()).unwrap();
        spx.set_balance(2, 1).unwrap();
        assert_eq!(spx.solve(), Err(Error::Overflow));
    }

    #[test]
    fn test_cost_bound() {
        let mut spx = Transshipment::<i32>::new(3);
        let c = spx.max_cost();
        assert_eq!(c, (i32::max_value() >> 2) / 5);
        assert_eq!(spx.add_arc(0, 1, 0, 1, c + 1), Err(Error::CostTooLarge));

        spx.set_balance(0, 1).unwrap();
        spx.set_balance(2, -1).unwrap();
        spx.add_arc(0, 1, 0, 1, c).unwrap();
        spx.add_arc(1, 2, 0, 1, c).unwrap();
        assert_eq!(spx.solve(), Ok(SolutionState::Optimal));
        assert_eq!(spx.value(), 2 * c);
    }

    #[test]
    fn test_invalid_arcs() {
        let mut spx = Transshipment::<i64>::new(3);
        spx.add_arc(0, 1, 0, 1, 1).unwrap();
        assert_eq!(spx.add_arc(0, 1, 0, 1, 1), Err(Error::ParallelArc { src: 0, snk: 1 }));
        assert_eq!(spx.add_arc(2, 2, 0, 1, 1), Err(Error::Loop(2)));
        assert_eq!(spx.add_arc(1, 2, 2, 1, 1), Err(Error::InvalidBounds));
        assert_eq!(spx.add_arc(1, 2, -1, 1, 1), Err(Error::InvalidBounds));
        assert_eq!(spx.add_arc(1, 2, 0, 1, -1), Err(Error::NegativeCost));
        assert_eq!(
            spx.set_balance(3, 1),
            Err(Error::InvalidNode { node: 3, num_nodes: 3 })
        );
        assert_eq!(spx.add_arc(1, 0, 0, 1, 1), Ok(1));
    }
}
