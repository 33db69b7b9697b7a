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

use std::error::Error;
use std::fs::{read_dir, read_to_string, File};
use std::path::Path;

use rs_mcmf::dataflow::{self, Outcome};

#[test]
fn test_dataflow_files() -> Result<(), Box<dyn Error>> {
    let mut nfiles = 0;
    for entry in read_dir(Path::new("tests/dataflow"))? {
        let path = entry?.path();
        if path.extension().map(|ext| ext == "in").unwrap_or(false) {
            let expected = read_to_string(path.with_extension("out"))?;

            let mut output = Vec::new();
            dataflow::solve::<_, _, i64>(File::open(&path)?, &mut output)?;
            assert_eq!(String::from_utf8(output)?, expected, "Instance: {:?}", path);

            nfiles += 1;
        }
    }

    assert!(nfiles > 0);

    Ok(())
}

#[test]
fn test_infeasible_demand() -> Result<(), Box<dyn Error>> {
    // two disjoint routes with 2 units each
    let instance = dataflow::Instance {
        num_nodes: 4,
        links: vec![(1, 2, 1), (2, 4, 1), (1, 3, 1), (3, 4, 1)],
        demand: 10i64,
        capacity: 2,
    };
    assert_eq!(instance.solve()?, Outcome::Impossible);

    let (_, mcf) = instance.solve_with_flow()?;
    assert_eq!(mcf.flow_value(), 4);

    let feasible = dataflow::Instance { demand: 4, ..instance };
    assert_eq!(feasible.solve()?, Outcome::Cost(8));

    Ok(())
}

#[test]
fn test_read_from_file() -> Result<(), Box<dyn Error>> {
    let instances = dataflow::read_from_file::<i64>("tests/dataflow/sample.in")?;
    assert_eq!(instances.len(), 3);
    assert_eq!(
        instances.iter().map(|i| (i.num_nodes, i.links.len())).collect::<Vec<_>>(),
        vec![(4, 5), (4, 4), (4, 4)]
    );
    assert_eq!(
        instances.iter().map(|i| (i.demand, i.capacity)).collect::<Vec<_>>(),
        vec![(20, 10), (20, 100), (20, 1)]
    );
    Ok(())
}
