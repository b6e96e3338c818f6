//! Dispatch solve driver.
//!
//! Builds the MILP, hands it to the selected backend, and reads the
//! solution back. The driver does not distinguish proven-optimal from
//! feasible terminations; any usable solution is extracted. Infeasibility
//! can only originate from the workload or reliability constraints because
//! the power balance carries a free slack.

use std::time::Instant;

#[cfg(feature = "solver-coin_cbc")]
use good_lp::solvers::coin_cbc::coin_cbc as coin_cbc_solver;
use good_lp::solvers::highs::highs as highs_solver;
use good_lp::{ResolutionError, Solution, SolverModel};

use dcflex_core::{DcflexError, Scenario};

use super::aggregate::aggregate;
use super::builder::{build_model, ModelParts};
use super::config::{DispatchSolverConfig, MilpSolverKind};
use super::solution::DispatchSolution;

/// Dispatch solver errors.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// Scenario failed validation before any constraint was emitted.
    Validation(String),
    /// The model has no feasible solution.
    Infeasible(String),
    /// Backend failure unrelated to infeasibility.
    SolverFailed(String),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::Validation(msg) => write!(f, "Scenario validation error: {}", msg),
            DispatchError::Infeasible(msg) => write!(f, "Problem infeasible: {}", msg),
            DispatchError::SolverFailed(msg) => write!(f, "Solver failed: {}", msg),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<DispatchError> for DcflexError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Validation(msg) => DcflexError::Validation(msg),
            DispatchError::Infeasible(msg) => DcflexError::Infeasible(msg),
            DispatchError::SolverFailed(msg) => DcflexError::Solver(msg),
        }
    }
}

fn map_resolution_error(err: ResolutionError) -> DispatchError {
    match err {
        ResolutionError::Infeasible => {
            DispatchError::Infeasible("solver reported an infeasible model".into())
        }
        other => DispatchError::SolverFailed(format!("{:?}", other)),
    }
}

/// Solve the dispatch model with the default backend.
///
/// `reliability_target` of `Some(1.0)` forces zero expected unserved
/// energy; `None` leaves reliability unconstrained.
///
/// # Example
///
/// ```ignore
/// use dcflex_algo::dispatch::solve;
///
/// let scenario = load_scenario("site.json")?;
/// let result = solve(&scenario, Some(0.999))?;
/// println!("{}", result.summary());
/// ```
pub fn solve(
    scenario: &Scenario,
    reliability_target: Option<f64>,
) -> Result<DispatchSolution, DispatchError> {
    solve_with_config(scenario, reliability_target, &DispatchSolverConfig::default())
}

/// Solve the dispatch model with an explicit backend configuration.
pub fn solve_with_config(
    scenario: &Scenario,
    reliability_target: Option<f64>,
    config: &DispatchSolverConfig,
) -> Result<DispatchSolution, DispatchError> {
    let start = Instant::now();

    let ModelParts {
        vars,
        objective,
        constraints,
        handles,
    } = build_model(scenario, reliability_target)?;

    let solution: Box<dyn Solution> = match config.solver {
        MilpSolverKind::Highs => {
            let mut model = vars.minimise(objective).using(highs_solver);
            model.set_verbose(config.verbose);
            for c in constraints {
                model = model.with(c);
            }
            Box::new(model.solve().map_err(map_resolution_error)?)
        }
        #[cfg(feature = "solver-coin_cbc")]
        MilpSolverKind::CoinCbc => {
            let mut model = vars.minimise(objective).using(coin_cbc_solver);
            if !config.verbose {
                model.set_parameter("logLevel", "0");
            }
            for c in constraints {
                model = model.with(c);
            }
            Box::new(model.solve().map_err(map_resolution_error)?)
        }
    };

    let mut result = aggregate(scenario, &handles, solution.as_ref());
    result.solve_time = start.elapsed();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::Infeasible("hard SLA cannot be met".into());
        assert!(err.to_string().contains("infeasible"));
        let err = DispatchError::Validation("price length".into());
        assert!(err.to_string().contains("validation"));
    }

    #[test]
    fn test_error_converts_to_core_error() {
        let err: DcflexError = DispatchError::SolverFailed("numerical trouble".into()).into();
        assert!(matches!(err, DcflexError::Solver(_)));
    }

    #[test]
    fn test_resolution_error_mapping() {
        assert!(matches!(
            map_resolution_error(ResolutionError::Infeasible),
            DispatchError::Infeasible(_)
        ));
        assert!(matches!(
            map_resolution_error(ResolutionError::Unbounded),
            DispatchError::SolverFailed(_)
        ));
    }
}
