/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use rustop::opts;
use time::OffsetDateTime;

use rs_mcmf::dimacs;

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let (args, _) = opts! {
        synopsis "Solve max-flow problem with dense successive shortest paths.";
        opt num:usize=1, desc:"Number of times the algorithm is repeated.";
        param file:String, desc:"Instance file name";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();
    let instance = dimacs::max::read::<_, i64>(zopen::read(&args.file)?)?;
    let (s, t) = (instance.src, instance.snk);
    let n = instance.num_nodes;

    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  number of nodes: {}", n);
    println!("  number of arcs: {}", instance.arcs.len());

    let mut mcf = instance.network()?;
    let tstart = OffsetDateTime::now_utc();
    for _ in 0..args.num {
        mcf.reset();
        mcf.solve(s, t)?;
    }
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("Flow: {}", mcf.flow_value());
    println!("Augmentations: {}", mcf.num_iterations());

    let outflow = |u: usize| (0..n).map(|v| mcf.flow(u, v)).sum::<i64>();
    let inflow = |u: usize| (0..n).map(|v| mcf.flow(v, u)).sum::<i64>();

    assert!(instance
        .arcs
        .iter()
        .zip(&instance.upper)
        .all(|(&(u, v), &c)| mcf.flow(u, v) >= 0 && mcf.flow(u, v) <= c));
    assert!((0..n).filter(|&u| u != s && u != t).all(|u| outflow(u) == inflow(u)));
    assert_eq!(outflow(s) - inflow(s), mcf.flow_value());

    Ok(())
}
