//! Scenario data model for site dispatch optimization.
//!
//! A [`Scenario`] describes one data-center site over a finite horizon: the
//! inflexible base load and grid price series, the flexible compute workload
//! with its deadline SLA, the battery system, on-site generators, the grid
//! interconnect, and a set of weighted stochastic operating cases. The wire
//! format is camelCase JSON (`timeStepHours`, `baseLoadMW`, ...); unknown
//! fields are ignored so scenario files may carry extra metadata.

use serde::{Deserialize, Serialize};

use crate::error::{DcflexError, DcflexResult};

/// One breakpoint of the compute performance curve: power drawn (MW) vs
/// work units delivered per step. Interior operating points are reached by
/// convex combination of breakpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiecewisePoint {
    #[serde(rename = "powerMW")]
    pub power_mw: f64,
    pub work_units: f64,
}

/// Deadline-constrained compute workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
    /// Work units arriving at each step; must match the horizon length.
    pub arrivals: Vec<f64>,
    /// Maximum number of steps a work unit may wait before it is due.
    pub deadline_hours: usize,
    /// Soft SLA: missed deadlines are penalized. Hard SLA: the due bucket
    /// must be fully served each step.
    pub soft_sla: bool,
    /// Penalty per work unit that misses its deadline ($/unit, soft SLA).
    #[serde(default)]
    pub penalty_deadline: f64,
    /// Fraction of total arrivals that may be dropped, in [0, 1].
    #[serde(default)]
    pub curtailment_cap: f64,
    /// Performance curve breakpoints; at least two required.
    pub piecewise: Vec<PiecewisePoint>,
    /// Floor on compute power draw at every step (MW).
    #[serde(rename = "minComputeMW", default)]
    pub min_compute_mw: f64,
}

/// Battery energy storage system parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BessSpec {
    /// Power rating cap (MW). Also the upper bound on the sizing variable.
    #[serde(rename = "powerMaxMW")]
    pub power_max_mw: f64,
    /// Energy capacity cap (MWh). Also the upper bound on the sizing variable.
    #[serde(rename = "energyMaxMWh")]
    pub energy_max_mwh: f64,
    /// When true, power and energy ratings become decision variables bounded
    /// by the caps above; when false they are fixed to the caps.
    #[serde(default)]
    pub optimize_sizing: bool,
    /// Capex per MW of power rating ($).
    #[serde(default)]
    pub capex_power: f64,
    /// Capex per MWh of energy capacity ($).
    #[serde(default)]
    pub capex_energy: f64,
    /// Charge efficiency in (0, 1].
    #[serde(default = "default_efficiency")]
    pub efficiency_charge: f64,
    /// Discharge efficiency in (0, 1].
    #[serde(default = "default_efficiency")]
    pub efficiency_discharge: f64,
    /// Cycling cost per MWh of charge plus discharge throughput ($/MWh).
    #[serde(default)]
    pub degradation_cost: f64,
}

fn default_efficiency() -> f64 {
    1.0
}

impl Default for BessSpec {
    fn default() -> Self {
        Self {
            power_max_mw: 0.0,
            energy_max_mwh: 0.0,
            optimize_sizing: false,
            capex_power: 0.0,
            capex_energy: 0.0,
            efficiency_charge: default_efficiency(),
            efficiency_discharge: default_efficiency(),
            degradation_cost: 0.0,
        }
    }
}

/// Grid interconnect limits. Import caps are per operating case; only the
/// export limit is site-wide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    /// Maximum export to the grid (MW).
    #[serde(rename = "exportMaxMW", default)]
    pub export_max_mw: f64,
}

/// On-site generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSpec {
    #[serde(default)]
    pub name: String,
    /// Nameplate output limit (MW).
    pub p_max: f64,
    /// Marginal cost of generation ($/MWh).
    pub marginal_cost: f64,
    /// Unavailable generators are modeled with zero output capability.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl GeneratorSpec {
    /// Output limit accounting for availability.
    pub fn effective_p_max(&self) -> f64 {
        if self.available {
            self.p_max
        } else {
            0.0
        }
    }
}

/// One stochastic operating case: a probability-weighted realization of grid
/// and generator availability. Probabilities across all cases sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingCase {
    #[serde(default)]
    pub name: String,
    pub probability: f64,
    /// Grid import limit in this case (MW); 0 models an interconnect outage.
    pub grid_import_cap: f64,
    /// Generator capability multiplier in [0, 1]; 0 models a fleet outage.
    #[serde(default = "default_derate")]
    pub generator_derate: f64,
}

fn default_derate() -> f64 {
    1.0
}

/// Reliability target configuration.
///
/// `target` drives a single solve; `sweep` lists the targets for a Pareto
/// sweep over the cost-reliability frontier. A target of 1.0 forces zero
/// expected unserved energy; 0.0 imposes no reliability constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliabilitySpec {
    #[serde(default = "default_target")]
    pub target: f64,
    #[serde(default)]
    pub sweep: Vec<f64>,
}

fn default_target() -> f64 {
    1.0
}

impl Default for ReliabilitySpec {
    fn default() -> Self {
        Self {
            target: default_target(),
            sweep: Vec::new(),
        }
    }
}

/// A complete site scenario: the immutable input to one dispatch solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Step length in hours; scales every energy and cost term.
    pub time_step_hours: f64,
    /// Inflexible site load per step (MW); its length defines the horizon.
    #[serde(rename = "baseLoadMW")]
    pub base_load_mw: Vec<f64>,
    /// Grid energy price per step ($/MWh, signed).
    pub price: Vec<f64>,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub bess: BessSpec,
    #[serde(default)]
    pub generators: Vec<GeneratorSpec>,
    pub workload: WorkloadSpec,
    #[serde(default)]
    pub reliability: ReliabilitySpec,
    /// Stochastic operating cases ("scenarios" on the wire).
    #[serde(rename = "scenarios")]
    pub cases: Vec<OperatingCase>,
}

/// Tolerance on the probability-sum invariant.
const PROBABILITY_TOL: f64 = 1e-6;

impl Scenario {
    /// Number of time steps modeled.
    pub fn horizon(&self) -> usize {
        self.base_load_mw.len()
    }

    /// Total work arriving over the horizon (units).
    pub fn total_arrivals(&self) -> f64 {
        self.workload.arrivals.iter().sum()
    }

    /// Total base-load energy demand over the horizon (MWh).
    pub fn total_demand_mwh(&self) -> f64 {
        self.base_load_mw.iter().sum::<f64>() * self.time_step_hours
    }

    /// Check every structural invariant of the scenario.
    ///
    /// The loader calls this after deserialization and the model builder
    /// re-asserts it before emitting any constraint, so a hand-constructed
    /// scenario cannot silently produce a malformed model.
    pub fn validate(&self) -> DcflexResult<()> {
        let h = self.horizon();
        if h == 0 {
            return Err(validation("baseLoadMW must not be empty"));
        }
        if self.time_step_hours <= 0.0 {
            return Err(validation("timeStepHours must be positive"));
        }
        if self.price.len() != h {
            return Err(validation(format!(
                "price length {} does not match horizon {}",
                self.price.len(),
                h
            )));
        }
        if self.workload.arrivals.len() != h {
            return Err(validation(format!(
                "workload.arrivals length {} does not match horizon {}",
                self.workload.arrivals.len(),
                h
            )));
        }
        if self.base_load_mw.iter().any(|&v| v < 0.0 || !v.is_finite()) {
            return Err(validation("baseLoadMW entries must be finite and non-negative"));
        }
        if self.price.iter().any(|v| !v.is_finite()) {
            return Err(validation("price entries must be finite"));
        }

        self.validate_workload()?;
        self.validate_bess()?;

        if self.grid.export_max_mw < 0.0 {
            return Err(validation("grid.exportMaxMW must be non-negative"));
        }
        for (i, gen) in self.generators.iter().enumerate() {
            if gen.p_max < 0.0 {
                return Err(validation(format!("generator {i} pMax must be non-negative")));
            }
            if gen.marginal_cost < 0.0 {
                return Err(validation(format!(
                    "generator {i} marginalCost must be non-negative"
                )));
            }
        }

        if self.cases.is_empty() {
            return Err(validation("at least one operating case is required"));
        }
        let mut prob_sum = 0.0;
        for (i, case) in self.cases.iter().enumerate() {
            if case.probability < 0.0 {
                return Err(validation(format!("case {i} probability must be non-negative")));
            }
            if case.grid_import_cap < 0.0 {
                return Err(validation(format!(
                    "case {i} gridImportCap must be non-negative"
                )));
            }
            if !(0.0..=1.0).contains(&case.generator_derate) {
                return Err(validation(format!(
                    "case {i} generatorDerate must lie in [0, 1]"
                )));
            }
            prob_sum += case.probability;
        }
        if (prob_sum - 1.0).abs() > PROBABILITY_TOL {
            return Err(validation(format!(
                "case probabilities sum to {prob_sum}, expected 1"
            )));
        }

        Ok(())
    }

    fn validate_workload(&self) -> DcflexResult<()> {
        let w = &self.workload;
        if w.arrivals.iter().any(|&v| v < 0.0 || !v.is_finite()) {
            return Err(validation("workload.arrivals must be finite and non-negative"));
        }
        if w.piecewise.len() < 2 {
            return Err(validation(
                "workload.piecewise needs at least two breakpoints",
            ));
        }
        for (i, pt) in w.piecewise.iter().enumerate() {
            if pt.power_mw < 0.0 || !pt.power_mw.is_finite() {
                return Err(validation(format!(
                    "piecewise point {i} powerMW must be finite and non-negative"
                )));
            }
            if pt.work_units < 0.0 || !pt.work_units.is_finite() {
                return Err(validation(format!(
                    "piecewise point {i} workUnits must be finite and non-negative"
                )));
            }
        }
        if !(0.0..=1.0).contains(&w.curtailment_cap) {
            return Err(validation("workload.curtailmentCap must lie in [0, 1]"));
        }
        if w.penalty_deadline < 0.0 {
            return Err(validation("workload.penaltyDeadline must be non-negative"));
        }
        if w.min_compute_mw < 0.0 {
            return Err(validation("workload.minComputeMW must be non-negative"));
        }
        Ok(())
    }

    fn validate_bess(&self) -> DcflexResult<()> {
        let b = &self.bess;
        if b.power_max_mw < 0.0 || b.energy_max_mwh < 0.0 {
            return Err(validation("bess power and energy caps must be non-negative"));
        }
        if !(b.efficiency_charge > 0.0 && b.efficiency_charge <= 1.0) {
            return Err(validation("bess.efficiencyCharge must lie in (0, 1]"));
        }
        if !(b.efficiency_discharge > 0.0 && b.efficiency_discharge <= 1.0) {
            return Err(validation("bess.efficiencyDischarge must lie in (0, 1]"));
        }
        if b.capex_power < 0.0 || b.capex_energy < 0.0 {
            return Err(validation("bess capex terms must be non-negative"));
        }
        if b.degradation_cost < 0.0 {
            return Err(validation("bess.degradationCost must be non-negative"));
        }
        Ok(())
    }
}

fn validation(msg: impl Into<String>) -> DcflexError {
    DcflexError::Validation(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_scenario() -> Scenario {
        Scenario {
            name: "Toy".into(),
            time_step_hours: 1.0,
            base_load_mw: vec![5.0; 4],
            price: vec![10.0; 4],
            grid: GridSpec { export_max_mw: 0.0 },
            bess: BessSpec::default(),
            generators: Vec::new(),
            workload: WorkloadSpec {
                arrivals: vec![0.0; 4],
                deadline_hours: 2,
                soft_sla: true,
                penalty_deadline: 0.0,
                curtailment_cap: 0.0,
                piecewise: vec![
                    PiecewisePoint { power_mw: 0.0, work_units: 0.0 },
                    PiecewisePoint { power_mw: 1.0, work_units: 1.0 },
                ],
                min_compute_mw: 0.0,
            },
            reliability: ReliabilitySpec::default(),
            cases: vec![OperatingCase {
                name: "Base".into(),
                probability: 1.0,
                grid_import_cap: 20.0,
                generator_derate: 1.0,
            }],
        }
    }

    #[test]
    fn test_valid_scenario_passes() {
        toy_scenario().validate().unwrap();
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut s = toy_scenario();
        s.price.pop();
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("price length"));
    }

    #[test]
    fn test_probability_sum_rejected() {
        let mut s = toy_scenario();
        s.cases[0].probability = 0.9;
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("probabilities sum"));
    }

    #[test]
    fn test_single_breakpoint_rejected() {
        let mut s = toy_scenario();
        s.workload.piecewise.truncate(1);
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_curtailment_cap_range_enforced() {
        let mut s = toy_scenario();
        s.workload.curtailment_cap = 1.5;
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("curtailmentCap"));
    }

    #[test]
    fn test_efficiency_range_enforced() {
        let mut s = toy_scenario();
        s.bess.efficiency_charge = 0.0;
        assert!(s.validate().is_err());
        let mut s = toy_scenario();
        s.bess.efficiency_discharge = 1.2;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_unavailable_generator_has_zero_capability() {
        let gen = GeneratorSpec {
            name: "diesel-1".into(),
            p_max: 12.0,
            marginal_cost: 180.0,
            available: false,
        };
        assert_eq!(gen.effective_p_max(), 0.0);
    }

    #[test]
    fn test_wire_format_field_names() {
        let json = r#"{
            "name": "Site A",
            "timeStepHours": 0.5,
            "baseLoadMW": [5, 6],
            "price": [10, -2],
            "iso": "ERCOT",
            "grid": {"importMaxMW": 20, "exportMaxMW": 3},
            "bess": {
                "powerMaxMW": 2,
                "energyMaxMWh": 4,
                "optimizeSizing": true,
                "capexPower": 100,
                "capexEnergy": 50,
                "efficiencyCharge": 0.95,
                "efficiencyDischarge": 0.9,
                "degradationCost": 1.5
            },
            "generators": [
                {"name": "g1", "pMax": 8, "marginalCost": 120}
            ],
            "workload": {
                "arrivals": [1, 0],
                "deadlineHours": 1,
                "softSla": false,
                "penaltyDeadline": 500,
                "curtailmentCap": 0.1,
                "piecewise": [
                    {"powerMW": 0, "workUnits": 0},
                    {"powerMW": 5, "workUnits": 4}
                ],
                "minComputeMW": 0.5
            },
            "reliability": {"metric": "EnergyReliability", "target": 0.99, "sweep": [0.9, 1.0]},
            "scenarios": [
                {"name": "base", "probability": 0.8, "gridImportCap": 20},
                {"name": "outage", "probability": 0.2, "gridImportCap": 0, "generatorDerate": 0.5}
            ]
        }"#;

        let s: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(s.horizon(), 2);
        assert_eq!(s.time_step_hours, 0.5);
        assert_eq!(s.grid.export_max_mw, 3.0);
        assert!(s.bess.optimize_sizing);
        assert_eq!(s.generators[0].p_max, 8.0);
        assert!(s.generators[0].available);
        assert!(!s.workload.soft_sla);
        assert_eq!(s.workload.min_compute_mw, 0.5);
        assert_eq!(s.reliability.sweep, vec![0.9, 1.0]);
        assert_eq!(s.cases.len(), 2);
        assert_eq!(s.cases[1].generator_derate, 0.5);
        // Defaults fill in what the file omits.
        assert_eq!(s.cases[0].generator_derate, 1.0);
        s.validate().unwrap();
    }

    #[test]
    fn test_round_trip_preserves_wire_names() {
        let s = toy_scenario();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"timeStepHours\""));
        assert!(json.contains("\"baseLoadMW\""));
        assert!(json.contains("\"scenarios\""));
        let back: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back.horizon(), s.horizon());
    }
}
