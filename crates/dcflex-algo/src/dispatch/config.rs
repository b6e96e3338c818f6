//! Solver backend selection and solve configuration.

use std::str::FromStr;

use anyhow::anyhow;

/// MILP backend used to solve the dispatch model.
///
/// The formulation carries binary exclusion variables, so every listed
/// backend must support branch-and-bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MilpSolverKind {
    #[default]
    Highs,
    #[cfg(feature = "solver-coin_cbc")]
    CoinCbc,
}

impl MilpSolverKind {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_MILP_SOLVERS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MilpSolverKind::Highs => "highs",
            #[cfg(feature = "solver-coin_cbc")]
            MilpSolverKind::CoinCbc => "coin_cbc",
        }
    }
}

const AVAILABLE_MILP_SOLVERS: &[&str] = &[
    "highs",
    #[cfg(feature = "solver-coin_cbc")]
    "coin_cbc",
];

fn unknown_solver_error(label: &str) -> anyhow::Error {
    anyhow!(
        "unknown milp solver '{}'; supported values: {}",
        label,
        MilpSolverKind::available().join(", ")
    )
}

impl FromStr for MilpSolverKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_ascii_lowercase();
        match normalized.as_str() {
            "highs" => Ok(MilpSolverKind::Highs),
            "coin_cbc" | "cbc" => {
                #[cfg(feature = "solver-coin_cbc")]
                {
                    Ok(MilpSolverKind::CoinCbc)
                }
                #[cfg(not(feature = "solver-coin_cbc"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            other => Err(unknown_solver_error(other)),
        }
    }
}

/// Configuration for a dispatch solve.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchSolverConfig {
    /// Backend to invoke.
    pub solver: MilpSolverKind,
    /// Let the backend print its own log; suppressed by default.
    pub verbose: bool,
}

impl DispatchSolverConfig {
    pub fn with_solver(mut self, solver: MilpSolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_solver() {
        assert_eq!("highs".parse::<MilpSolverKind>().unwrap(), MilpSolverKind::Highs);
        assert_eq!("HIGHS".parse::<MilpSolverKind>().unwrap(), MilpSolverKind::Highs);
    }

    #[test]
    fn test_parse_unknown_solver_lists_supported() {
        let err = "gurobi".parse::<MilpSolverKind>().unwrap_err();
        assert!(err.to_string().contains("supported values"));
        assert!(err.to_string().contains("highs"));
    }

    #[test]
    fn test_default_config() {
        let config = DispatchSolverConfig::default();
        assert_eq!(config.solver, MilpSolverKind::Highs);
        assert!(!config.verbose);
    }
}
