//! # dcflex-core: Scenario Model for Data-Center Site Dispatch
//!
//! Core domain types shared across the dcflex workspace: the validated
//! [`Scenario`] input record (site load, prices, workload SLA, BESS,
//! generators, grid interconnect, stochastic operating cases) and the
//! unified [`DcflexError`] type.
//!
//! Optimization lives in `dcflex-algo`; file loading lives in `dcflex-io`.

pub mod error;
pub mod scenario;

pub use error::{DcflexError, DcflexResult};
pub use scenario::{
    BessSpec, GeneratorSpec, GridSpec, OperatingCase, PiecewisePoint, ReliabilitySpec, Scenario,
    WorkloadSpec,
};
