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

//! Successive shortest paths on a dense adjacency matrix.
//!
//! The algorithm computes a maximum flow of minimal cost from a source
//! node $s$ to a sink node $t$. In each iteration a shortest $s$-$t$-path
//! w.r.t. the reduced costs $c_{uv} + \pi_u - \pi_v$ is computed in the
//! residual network by an $O(n^2)$ variant of Dijkstra's algorithm and
//! the flow is augmented along this path. The node potentials $\pi$ are
//! updated by the shortest path distances afterwards, which keeps all
//! reduced costs of residual arcs non-negative although residual arcs
//! in backward direction have negative cost.
//!
//! Capacities, costs and flows are stored in $n \times n$ matrices, so
//! there can be at most one arc for each ordered pair of nodes and the
//! algorithm is only suitable for small graphs.
//!
//! # Example
//!
//! ```
//! use rs_mcmf::mcf::DenseMinCostFlow;
//!
//! let mut mcf = DenseMinCostFlow::<i64>::new(4);
//! mcf.add_edge(0, 1, 3, 1).unwrap();
//! mcf.add_edge(1, 3, 3, 1).unwrap();
//! mcf.add_edge(0, 2, 2, 5).unwrap();
//! mcf.add_edge(2, 3, 2, 5).unwrap();
//!
//! assert_eq!(mcf.solve(0, 3).unwrap(), (5, 26));
//! assert_eq!(mcf.flow(0, 1), 3);
//! assert_eq!(mcf.flow(2, 3), 2);
//!
//! // nothing left to augment
//! assert_eq!(mcf.solve(0, 3).unwrap(), (0, 0));
//!
//! let mut mincut = mcf.mincut();
//! mincut.sort();
//! assert_eq!(mincut, vec![0]);
//! ```

use super::{Error, Result};
use crate::num::traits::{NumAssign, NumCast, PrimInt, Signed};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Direction in which a residual arc has been used.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Dir {
    /// Along an arc `(u,v)`, i.e. increase its flow.
    Fwd,
    /// Against an arc `(v,u)`, i.e. cancel some of its flow.
    Bwd,
}

/// Min-cost max-flow solver on a dense graph.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct DenseMinCostFlow<F> {
    n: usize,

    caps: Vec<F>,
    costs: Vec<F>,
    flows: Vec<F>,
    potentials: Vec<F>,

    // Data of the latest shortest path search.
    #[cfg_attr(feature = "serialize", serde(skip))]
    visited: Vec<bool>,
    #[cfg_attr(feature = "serialize", serde(skip))]
    dist: Vec<F>,
    #[cfg_attr(feature = "serialize", serde(skip))]
    pred: Vec<(usize, Dir)>,
    #[cfg_attr(feature = "serialize", serde(skip))]
    width: Vec<F>,

    flow_value: F,
    cost_value: F,
    niter: usize,

    /// The infinite distance value.
    ///
    /// Must be large enough to exceed the length of every shortest
    /// path and small enough that a few of them can be added without
    /// overflow. The default is `F::max_value() / 4`. Arc costs must
    /// not exceed `infinite / num_nodes`, see [`max_cost`](Self::max_cost).
    pub infinite: F,
}

impl<F> DenseMinCostFlow<F>
where
    F: PrimInt + Signed + NumAssign,
{
    /// Create a new solver for a graph with `n` nodes and no arcs.
    pub fn new(n: usize) -> Self {
        DenseMinCostFlow {
            n,
            caps: vec![F::zero(); n * n],
            costs: vec![F::zero(); n * n],
            flows: vec![F::zero(); n * n],
            potentials: vec![F::zero(); n],

            visited: vec![false; n],
            dist: vec![F::zero(); n],
            pred: vec![(usize::max_value(), Dir::Fwd); n],
            width: vec![F::zero(); n],

            flow_value: F::zero(),
            cost_value: F::zero(),
            niter: 0,

            infinite: default_infinite(),
        }
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// The largest arc cost accepted by `add_edge`.
    ///
    /// A simple path has less than `num_nodes` arcs, so with this bound
    /// every shortest path distance stays below `infinite`.
    pub fn max_cost(&self) -> F {
        cost_bound(self.infinite, self.n)
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

    fn index(&self, u: usize, v: usize) -> usize {
        assert!(u < self.n && v < self.n, "Node out of range: ({},{})", u, v);
        u * self.n + v
    }

    /// Set capacity and cost of the arc `(u,v)`.
    ///
    /// An existing arc `(u,v)` is replaced. The reverse arc `(v,u)` is
    /// not touched, undirected edges must be added in both directions.
    ///
    /// Arcs should be added before the first call to `solve` (or after
    /// `reset`).
    pub fn add_edge(&mut self, u: usize, v: usize, cap: F, cost: F) -> Result<()> {
        self.check_node(u)?;
        self.check_node(v)?;
        if cap.is_negative() {
            return Err(Error::NegativeCapacity);
        }
        if cost.is_negative() {
            return Err(Error::NegativeCost);
        }
        if cost > self.max_cost() {
            return Err(Error::CostTooLarge);
        }

        let uv = self.index(u, v);
        self.caps[uv] = cap;
        self.costs[uv] = cost;
        Ok(())
    }

    /// The capacity of the arc `(u,v)` (zero if there is no arc).
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is not a node. The same holds for `cost`,
    /// `flow` and `residual`.
    pub fn capacity(&self, u: usize, v: usize) -> F {
        self.caps[self.index(u, v)]
    }

    /// The cost of the arc `(u,v)`.
    pub fn cost(&self, u: usize, v: usize) -> F {
        self.costs[self.index(u, v)]
    }

    /// The current flow on the arc `(u,v)`.
    pub fn flow(&self, u: usize, v: usize) -> F {
        self.flows[self.index(u, v)]
    }

    /// The residual capacity from `u` to `v`.
    ///
    /// This is the free capacity of `(u,v)` plus the flow on `(v,u)`
    /// that could be cancelled.
    pub fn residual(&self, u: usize, v: usize) -> F {
        let uv = self.index(u, v);
        let vu = self.index(v, u);
        self.caps[uv] - self.flows[uv] + self.flows[vu]
    }

    /// The current potential of node `u`.
    ///
    /// Nodes that are not reachable from the source in the residual
    /// network have potential `infinite`.
    ///
    /// # Panics
    ///
    /// Panics if `u` is not a node.
    pub fn potential(&self, u: usize) -> F {
        assert!(u < self.n, "Node out of range: {}", u);
        self.potentials[u]
    }

    /// Total flow value sent by all calls to `solve`.
    pub fn flow_value(&self) -> F {
        self.flow_value
    }

    /// Total cost of the current flow.
    pub fn cost_value(&self) -> F {
        self.cost_value
    }

    /// Number of augmentations done by all calls to `solve`.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// Remove all flow and reset the potentials.
    ///
    /// The arcs are kept.
    pub fn reset(&mut self) {
        self.flows.iter_mut().for_each(|f| *f = F::zero());
        self.potentials.iter_mut().for_each(|p| *p = F::zero());
        self.visited.iter_mut().for_each(|v| *v = false);
        self.flow_value = F::zero();
        self.cost_value = F::zero();
        self.niter = 0;
    }

    /// Compute a min-cost max-flow from `src` to `snk`.
    ///
    /// The flow is augmented starting from the current flow, so the
    /// returned pair `(flow, cost)` is the amount of flow *added* by
    /// this call and its cost. A second call without changing the
    /// network returns `(0, 0)`.
    pub fn solve(&mut self, src: usize, snk: usize) -> Result<(F, F)> {
        self.check_node(src)?;
        self.check_node(snk)?;
        if src == snk {
            return Err(Error::SourceIsSink);
        }
        // `infinite` may have been changed after the arcs were added
        let bound = self.max_cost();
        if self.costs.iter().any(|&c| c > bound) {
            return Err(Error::CostTooLarge);
        }

        let n = self.n;
        let mut flow = F::zero();
        let mut cost = F::zero();

        loop {
            let df = self.search(src, snk);
            if df <= F::zero() {
                break;
            }

            // compute cost of one unit along the path
            let mut unit = F::zero();
            let mut v = snk;
            while v != src {
                let (u, dir) = self.pred[v];
                unit = match dir {
                    Dir::Fwd => unit.checked_add(&self.costs[u * n + v]),
                    Dir::Bwd => unit.checked_sub(&self.costs[v * n + u]),
                }
                .ok_or(Error::Overflow)?;
                v = u;
            }

            let dc = unit.checked_mul(&df).ok_or(Error::Overflow)?;
            flow = flow.checked_add(&df).ok_or(Error::Overflow)?;
            cost = cost.checked_add(&dc).ok_or(Error::Overflow)?;

            // now augment the flow
            let mut v = snk;
            while v != src {
                let (u, dir) = self.pred[v];
                match dir {
                    Dir::Fwd => self.flows[u * n + v] += df,
                    Dir::Bwd => self.flows[v * n + u] -= df,
                }
                v = u;
            }

            self.niter += 1;
        }

        self.flow_value = self.flow_value.checked_add(&flow).ok_or(Error::Overflow)?;
        self.cost_value = self.cost_value.checked_add(&cost).ok_or(Error::Overflow)?;

        Ok((flow, cost))
    }

    /// Return the nodes on the source side of a minimal cut.
    ///
    /// These are the nodes reached by the latest shortest path search.
    /// After `solve` this is the source side of a minimum cut.
    pub fn mincut(&self) -> Vec<usize> {
        (0..self.n).filter(|&u| self.visited.get(u) == Some(&true)).collect()
    }

    /// Shortest path search in the residual network.
    ///
    /// Returns the residual capacity of the shortest path from `src`
    /// to `snk` or zero if `snk` is not reachable.
    fn search(&mut self, src: usize, snk: usize) -> F {
        let n = self.n;
        let inf = self.infinite;

        self.visited.clear();
        self.visited.resize(n, false);
        self.dist.clear();
        self.dist.resize(n, inf);
        self.pred.clear();
        self.pred.resize(n, (usize::max_value(), Dir::Fwd));
        self.width.clear();
        self.width.resize(n, F::zero());

        self.dist[src] = F::zero();
        self.width[src] = inf;

        let mut s = src;
        loop {
            self.visited[s] = true;
            let mut best: Option<usize> = None;
            for k in 0..n {
                if self.visited[k] {
                    continue;
                }
                let fwd = self.caps[s * n + k] - self.flows[s * n + k];
                let bwd = self.flows[k * n + s];
                self.relax(s, k, fwd, self.costs[s * n + k], Dir::Fwd);
                self.relax(s, k, bwd, -self.costs[k * n + s], Dir::Bwd);
                if best.map_or(true, |b| self.dist[k] < self.dist[b]) {
                    best = Some(k);
                }
            }

            match best {
                Some(k) if self.dist[k] < inf => s = k,
                _ => break,
            }
        }

        for k in 0..n {
            self.potentials[k] = (self.potentials[k] + self.dist[k]).min(inf);
        }

        self.width[snk]
    }

    fn relax(&mut self, s: usize, k: usize, cap: F, cost: F, dir: Dir) {
        if cap <= F::zero() {
            return;
        }
        let d = self.dist[s] + self.potentials[s] - self.potentials[k] + cost;
        if d < self.dist[k] {
            self.dist[k] = d;
            self.pred[k] = (s, dir);
            self.width[k] = cap.min(self.width[s]);
        }
    }
}

/// The default value of [`DenseMinCostFlow::infinite`].
pub(crate) fn default_infinite<F: PrimInt>() -> F {
    F::max_value() >> 2
}

/// The largest arc cost on a graph with `n` nodes such that no simple
/// path is longer than `inf`.
pub(crate) fn cost_bound<F>(inf: F, n: usize) -> F
where
    F: PrimInt,
{
    match <F as NumCast>::from(n.max(1)) {
        Some(n) => inf / n,
        None => F::zero(),
    }
}

/// Solve the min-cost max-flow problem on a dense graph.
///
/// The graph has `n` nodes and the arcs `(u, v, capacity, cost)`. The
/// function returns the flow value, its cost and the flow on all
/// arcs with non-zero flow.
///
/// # Example
///
/// ```
/// use rs_mcmf::mcf::mincostmaxflow;
///
/// let (value, cost, flows) = mincostmaxflow::<i64, _>(2, vec![(0, 1, 5, 2)], 0, 1).unwrap();
/// assert_eq!((value, cost), (5, 10));
/// assert_eq!(flows, vec![(0, 1, 5)]);
/// ```
pub fn mincostmaxflow<F, I>(n: usize, arcs: I, src: usize, snk: usize) -> Result<(F, F, Vec<(usize, usize, F)>)>
where
    F: PrimInt + Signed + NumAssign,
    I: IntoIterator<Item = (usize, usize, F, F)>,
{
    let mut mcf = DenseMinCostFlow::new(n);
    for (u, v, cap, cost) in arcs {
        mcf.add_edge(u, v, cap, cost)?;
    }
    let (value, cost) = mcf.solve(src, snk)?;

    let mut flows = vec![];
    for u in 0..n {
        for v in 0..n {
            let f = mcf.flow(u, v);
            if !f.is_zero() {
                flows.push((u, v, f));
            }
        }
    }

    Ok((value, cost, flows))
}
