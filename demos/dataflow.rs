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

use rs_mcmf::dataflow;

use std::error::Error;
use std::io::{self, Read};

use rustop::opts;
use time::OffsetDateTime;

fn main() -> Result<(), Box<dyn Error>> {
    let (args, _) = opts! {
        synopsis "Solve data flow instances (one answer per instance).";
        opt time:bool, desc:"Print the solution time to stderr.";
        param file:Option<String>, desc:"Instance file name (default: stdin)";
    }
    .parse_or_exit();

    let input: Box<dyn Read> = match &args.file {
        Some(file) => zopen::read(file)?,
        None => Box::new(io::stdin()),
    };

    let stdout = io::stdout();
    let tstart = OffsetDateTime::now_utc();
    dataflow::solve::<_, _, i64>(input, stdout.lock())?;
    let tend = OffsetDateTime::now_utc();

    if args.time {
        eprintln!("Time (seconds)      : {:.3}", (tend - tstart).as_seconds_f64());
    }

    Ok(())
}
