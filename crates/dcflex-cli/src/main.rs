use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use clap_complete::generate;
use dcflex_algo::dispatch::{
    solve_pareto_with_config, solve_with_config, DispatchSolution, DispatchSolverConfig,
};
use dcflex_io::load_scenario;
use serde_json::json;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

mod cli;
use cli::{build_cli_command, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber")?;

    match cli.command {
        Commands::Solve {
            scenario,
            target,
            lp_solver,
            solver_log,
            out,
        } => {
            let config = solver_config(&lp_solver, solver_log)?;
            let scenario = load_scenario(&scenario)?;
            let target = target.unwrap_or(scenario.reliability.target);
            info!(
                scenario = %scenario.name,
                target,
                solver = config.solver.as_str(),
                "solving dispatch model"
            );
            let result = solve_with_config(&scenario, Some(target), &config)?;
            info!(cost = result.cost, reliability = result.reliability, "solve finished");
            write_document(&[result], out.as_deref())?;
        }
        Commands::Pareto {
            scenario,
            lp_solver,
            solver_log,
            out,
        } => {
            let config = solver_config(&lp_solver, solver_log)?;
            let scenario = load_scenario(&scenario)?;
            let targets = if scenario.reliability.sweep.is_empty() {
                vec![scenario.reliability.target]
            } else {
                scenario.reliability.sweep.clone()
            };
            info!(
                scenario = %scenario.name,
                points = targets.len(),
                solver = config.solver.as_str(),
                "solving Pareto sweep"
            );
            let results = solve_pareto_with_config(&scenario, &targets, &config)?;
            write_document(&results, out.as_deref())?;
        }
        Commands::Completions { shell, out } => {
            let mut cmd = build_cli_command();
            match out {
                Some(path) => {
                    let mut file = fs::File::create(&path).with_context(|| {
                        format!("creating completion file {}", path.display())
                    })?;
                    generate(shell, &mut cmd, "dcflex", &mut file);
                }
                None => generate(shell, &mut cmd, "dcflex", &mut io::stdout()),
            }
        }
    }

    Ok(())
}

fn solver_config(lp_solver: &str, verbose: bool) -> Result<DispatchSolverConfig> {
    let solver = lp_solver.parse()?;
    Ok(DispatchSolverConfig::default()
        .with_solver(solver)
        .with_verbose(verbose))
}

/// Render solve results as the JSON result document: one point per
/// reliability target, in solve order.
fn write_document(results: &[DispatchSolution], out: Option<&Path>) -> Result<()> {
    let points: Vec<serde_json::Value> = results
        .iter()
        .map(|result| {
            json!({
                "reliability": result.reliability,
                "cost": result.cost,
                "eue": result.eue,
                "lole": result.lole,
                "objective": result.objective,
                "dispatch": result.series,
            })
        })
        .collect();
    let document = json!({
        "points": points,
        "warnings": [],
    });

    let rendered = serde_json::to_string_pretty(&document)?;
    match out {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing result document {}", path.display()))?,
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
