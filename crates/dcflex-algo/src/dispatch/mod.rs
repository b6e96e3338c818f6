//! Stochastic site dispatch (MILP)
//!
//! This module implements a two-stage stochastic Mixed-Integer Linear
//! Programming formulation for joint data-center dispatch and BESS sizing.
//!
//! ## Problem Overview
//!
//! The site pairs a deadline-constrained compute workload with a battery,
//! on-site generators, and a grid interconnect. The solver commits a single
//! compute plan before the operating case is known, then dispatches storage,
//! generation, and the grid per case.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STOCHASTIC SITE DISPATCH                                                │
//! │  ────────────────────────                                                │
//! │                                                                          │
//! │  Given:                                                                  │
//! │    • Base load and price series over a fixed horizon                    │
//! │    • Workload arrivals with a deadline SLA and a power/work curve       │
//! │    • BESS ratings (fixed or sizable), generators, grid limits           │
//! │    • Weighted operating cases (import caps, generator derates)          │
//! │                                                                          │
//! │  Decide:                                                                 │
//! │    • Compute power and work served per step (shared across cases)       │
//! │    • Charge/discharge, import/export, generation per case               │
//! │    • Optional BESS power/energy sizing                                  │
//! │                                                                          │
//! │  Minimize:                                                               │
//! │    Capex + expected energy, generation, and cycling cost + SLA penalty  │
//! │                                                                          │
//! │  Subject to:                                                             │
//! │    • Power balance at every step of every case                          │
//! │    • SOC recursion and capacity, charge/discharge exclusion             │
//! │    • Import/export exclusion, per-case import caps, derated gen caps    │
//! │    • Deadline queue aging and service accounting                        │
//! │    • Expected-unserved-energy cap at the reliability target             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## MILP Formulation
//!
//! ```text
//! minimize    capexP·P + capexE·E
//!           + Σ_s π_s Σ_t Δt·( price_t·(imp_st − exp_st) + Σ_g c_g·gen_gst
//!                              + c_deg·(ch_st + dis_st) )
//!           + penalty · Σ_t unmet_t
//!
//! subject to:
//!   Σ_k λ_tk = 1,  pc_t = Σ_k P_k λ_tk,  x_t = Σ_k W_k λ_tk   Performance curve
//!   q_{t,L} = arrivals_t                                       Queue seeding
//!   q_{t,a} = q_{t-1,a+1} − served_{t-1,a+1}   (a < L, t ≥ 1)  Queue aging
//!   Σ_a served_{t,a} = x_t,  served_{t,a} ≤ q_{t,a}            Service accounting
//!   unmet_t = q_{t,0} − served_{t,0}  (soft SLA)               Deadline bucket
//!   served_{t,0} = q_{t,0},  unmet_t = 0  (hard SLA)
//!   Σ_t x_t ≥ (1 − curtailmentCap) · Σ_t arrivals_t            Throughput floor
//!   soc_st = soc_{s,t-1} + ηc·Δt·ch_st − Δt/ηd·dis_st          SOC recursion
//!   soc_st ≤ E,  ch_st ≤ P,  dis_st ≤ P                        Sizing caps
//!   ch_st ≤ Pmax·b_st,  dis_st ≤ Pmax·(1 − b_st)               Charge exclusion
//!   imp_st ≤ cap_s·g_st,  exp_st ≤ expMax·(1 − g_st)           Grid exclusion
//!   Σ_g gen_gst + dis_st − ch_st + imp_st − exp_st + z_st
//!        = baseLoad_t + pc_t                                   Power balance
//!   Σ_s π_s Σ_t Δt·z_st ≤ (1 − target)·Σ_t Δt·baseLoad_t       Reliability (EUE)
//!   b_st, g_st ∈ {0,1}
//! ```
//!
//! The compute-side variables are first stage (identical across cases);
//! dispatch is recourse. The balance slack `z` keeps every case feasible in
//! energy terms, so infeasibility can only come from the workload or
//! reliability constraints. The state of charge starts empty and carries no
//! end-of-horizon tie-back; cycling is discouraged by the degradation term
//! alone.
//!
//! ## Charge/discharge exclusion
//!
//! The exclusion binary is combined with the *input* power cap, not the
//! sizing variable, to keep the model linear:
//! - `ch ≤ P` bounds charging by the sized rating,
//! - `ch ≤ Pmax·b` switches it off when the binary is cleared.
//!
//! Since `P ≤ Pmax`, the pair is equivalent to the disjunction "charge at
//! most `P`, or not at all". This requires `Pmax` to be finite, which the
//! scenario's `powerMaxMW` bound supplies.

mod aggregate;
mod builder;
mod config;
mod pareto;
mod solution;
mod solver;

pub use config::{DispatchSolverConfig, MilpSolverKind};
pub use pareto::{solve_pareto, solve_pareto_with_config};
pub use solution::{CaseDispatch, DispatchSeries, DispatchSolution};
pub use solver::{solve, solve_with_config, DispatchError};
