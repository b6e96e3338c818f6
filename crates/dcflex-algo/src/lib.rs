//! # dcflex-algo: Dispatch Optimization for Data-Center Sites
//!
//! This crate provides the stochastic dispatch MILP for sites that pair
//! flexible compute workloads with battery storage, on-site generation, and
//! a grid interconnect.
//!
//! The [`dispatch`] module holds the full pipeline:
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | Model construction + solve | [`dispatch::solve`], [`dispatch::solve_with_config`] |
//! | Cost-reliability frontier | [`dispatch::solve_pareto`] |
//! | Backend selection | [`dispatch::MilpSolverKind`] |
//!
//! Each solve owns a fresh model; variables and constraints are discarded
//! after value extraction, and the Pareto sweep rebuilds from scratch per
//! target.
//!
//! ## Example
//!
//! ```ignore
//! use dcflex_algo::dispatch::{solve, solve_pareto};
//! use dcflex_io::load_scenario;
//!
//! let scenario = load_scenario("site.json")?;
//! let result = solve(&scenario, Some(scenario.reliability.target))?;
//! println!("{}", result.summary());
//!
//! let frontier = solve_pareto(&scenario, &scenario.reliability.sweep)?;
//! for point in &frontier {
//!     println!("{:.3} -> ${:.2}", point.reliability, point.cost);
//! }
//! ```

pub mod dispatch;

pub use dispatch::{
    solve, solve_pareto, DispatchError, DispatchSeries, DispatchSolution, DispatchSolverConfig,
    MilpSolverKind,
};
