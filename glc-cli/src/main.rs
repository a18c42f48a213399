/*
 * Copyright (C) 2022 Open Source Robotics Foundation
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
*/

use anyhow::Context;
use clap::Parser;
use glc::{
    export::{CellTable, TrajectoryTable, YamlFile},
    premade::CarScenario,
    Outcome, Solution,
};
use log::{info, warn};
use std::path::PathBuf;

/// Plan a path for a nonholonomic car around circular obstacles and export
/// the result.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// YAML file that describes the planning scenario
    #[arg(short, long, default_value = "glc-cli/config/nonholonomic_car.yaml")]
    config: PathBuf,

    /// Directory that receives the output files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of states in the exported trajectory table
    #[arg(long, default_value_t = 500)]
    samples: usize,

    /// Number of states printed to the console
    #[arg(long, default_value_t = 20)]
    print_samples: usize,
}

fn print_solution(solution: &Solution, count: usize) {
    println!("Solution (cost {:.4}, {} motions)", solution.cost, solution.inputs.len());
    println!("{:>10} {:>10} {:>10} {:>10}", "t", "x", "y", "heading");
    for (time, state) in solution.sample(count) {
        let values: Vec<String> = state.iter().map(|v| format!("{v:>10.4}")).collect();
        println!("{time:>10.4} {}", values.join(" "));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scenario = CarScenario::from_path(&args.config)
        .with_context(|| format!("Unable to load scenario [{}]", args.config.display()))?;
    let planner = scenario.planner()?;
    let discretization = planner.discretization();
    info!(
        "Planning with {} inputs, expansion time {:.4}, cell size {:.4}",
        planner.inputs().len(),
        discretization.expand_time,
        discretization.cell_size,
    );

    let output = planner.run(scenario.goal())?;
    info!(
        "Search finished after {} iterations with {} nodes in {} cells",
        output.iterations,
        output.nodes,
        output.cells.len(),
    );

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Unable to create output directory [{}]", args.output_dir.display())
    })?;

    match &output.outcome {
        Outcome::Succeeded(solution) => {
            info!("Found a solution with cost {:.4}", solution.cost);
            print_solution(solution, args.print_samples);
            let path = args.output_dir.join("nonholonomic_path_demo.yaml");
            TrajectoryTable::from_trajectory(&solution.trajectory, args.samples).write(&path)?;
            info!("Wrote trajectory to [{}]", path.display());
        }
        Outcome::Exhausted { incumbent } => match incumbent {
            Some(incumbent) => warn!(
                "The search was cut off before confirming its best solution (cost {:.4})",
                incumbent.cost,
            ),
            None => warn!("No solution was found"),
        },
    }

    let path = args.output_dir.join("nonholonomic_path_demo_nodes.yaml");
    CellTable::from_output(&output, discretization.cell_size).write(&path)?;
    info!("Wrote explored cells to [{}]", path.display());

    Ok(())
}
