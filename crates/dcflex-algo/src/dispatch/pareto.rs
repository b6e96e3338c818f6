//! Pareto sweep over reliability targets.

use dcflex_core::Scenario;

use super::config::DispatchSolverConfig;
use super::solution::DispatchSolution;
use super::solver::{solve_with_config, DispatchError};

/// Re-solve the full model once per reliability target, returning results
/// in input order. Costs are expected to be monotone non-decreasing in the
/// target. Errors are not swallowed: the first infeasible or failed target
/// aborts the sweep.
pub fn solve_pareto(
    scenario: &Scenario,
    targets: &[f64],
) -> Result<Vec<DispatchSolution>, DispatchError> {
    solve_pareto_with_config(scenario, targets, &DispatchSolverConfig::default())
}

/// [`solve_pareto`] with an explicit backend configuration.
pub fn solve_pareto_with_config(
    scenario: &Scenario,
    targets: &[f64],
    config: &DispatchSolverConfig,
) -> Result<Vec<DispatchSolution>, DispatchError> {
    let mut results = Vec::with_capacity(targets.len());
    for &target in targets {
        results.push(solve_with_config(scenario, Some(target), config)?);
    }
    Ok(results)
}
