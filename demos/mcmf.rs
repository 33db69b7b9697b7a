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

use num_traits::{NumAssign, PrimInt, Signed};
use rs_mcmf::dimacs;
use rs_mcmf::mcf::SolutionState;
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use std::result::Result;
use std::str::FromStr;

use rustop::opts;
use time::OffsetDateTime;

fn run<F>(filename: &str) -> Result<(), Box<dyn Error>>
where
    F: PrimInt + Signed + NumAssign + FromStr + Display,
    F::Err: Display,
{
    let tstart = OffsetDateTime::now_utc();
    let instance = dimacs::min::read::<_, F>(zopen::read(filename)?)?;
    let tend = OffsetDateTime::now_utc();

    println!("Instance            : {}", filename);
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    println!("Value type          : {}", std::any::type_name::<F>());
    println!("Number of nodes     : {}", instance.num_nodes);
    println!("Number of arcs      : {}", instance.arcs.len());

    let mut spx = instance.transshipment()?;

    let tstart = OffsetDateTime::now_utc();
    let state = spx.solve()?;
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    println!();
    println!("Solution state      : {:?}", state);
    println!("Value               : {}", spx.value());
    println!("Time (seconds)      : {:.2}", soltime);
    println!("Augmentations       : {}", spx.num_iterations());

    if state != SolutionState::Optimal {
        return Ok(());
    }

    println!();
    println!("Write solution to   : {}.sol", filename);

    let solfile = PathBuf::from(format!("{}.sol", filename));
    let f = &mut std::fs::File::create(&solfile)?;
    let fname = solfile
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "".into());
    writeln!(f, "c Solved with dense successive shortest paths")?;
    writeln!(f, "c instance            : {}", fname)?;
    writeln!(f, "c solution time       : {:.2} seconds", soltime)?;
    writeln!(f, "c number of augmentations: {}", spx.num_iterations())?;
    dimacs::min::write_solution(f, &instance.arcs, |a| spx.flow(a), spx.value())?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let (args, _) = opts! {
        synopsis "Solve min-cost-flow problem with dense successive shortest paths.";
        param file:String, desc:"Instance file name";
        opt narrow:bool, desc:"Use 32 bit values";
    }
    .parse_or_exit();

    if args.narrow {
        run::<i32>(&args.file)
    } else {
        run::<i64>(&args.file)
    }
}
