//! Dispatch solution data structures.
//!
//! Defines the output of a dispatch solve: scalar cost and reliability
//! metrics, the expected per-step trajectories, and the raw per-case
//! trajectories for invariant checking.

use std::time::Duration;

use serde::Serialize;

/// Expected per-step trajectories, probability-weighted across cases.
/// Serialized with the wire key names consumed by downstream tooling.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSeries {
    pub time: Vec<usize>,
    pub grid_import: Vec<f64>,
    pub grid_export: Vec<f64>,
    pub compute_power: Vec<f64>,
    pub base_load: Vec<f64>,
    pub soc: Vec<f64>,
    /// Work due this step before service (queue head, bucket 0).
    pub queue: Vec<f64>,
    /// Expected unserved energy per step (MW).
    pub unserved: Vec<f64>,
    pub charge: Vec<f64>,
    pub discharge: Vec<f64>,
    /// Work units that missed their deadline per step.
    pub unmet: Vec<f64>,
}

/// Raw dispatch trajectory of a single operating case.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDispatch {
    pub name: String,
    pub probability: f64,
    pub grid_import: Vec<f64>,
    pub grid_export: Vec<f64>,
    pub charge: Vec<f64>,
    pub discharge: Vec<f64>,
    pub soc: Vec<f64>,
    pub unserved: Vec<f64>,
}

/// Complete solution to a dispatch solve.
#[derive(Debug, Clone, Default)]
pub struct DispatchSolution {
    /// Optimal objective value.
    pub objective: f64,
    /// Total cost; equal to the objective.
    pub cost: f64,
    /// 1 − EUE / total base-load energy (1.0 when demand is zero).
    pub reliability: f64,
    /// Expected unserved energy over the horizon (MWh).
    pub eue: f64,
    /// Steps whose expected unserved energy exceeds the reporting threshold.
    pub lole: f64,
    /// BESS power rating chosen by the solve; equals the input cap when
    /// sizing is fixed.
    pub bess_power_mw: f64,
    /// BESS energy capacity chosen by the solve.
    pub bess_energy_mwh: f64,
    /// Capex component of the objective.
    pub capex_cost: f64,
    /// Expected grid energy cost (imports minus export revenue).
    pub energy_cost: f64,
    /// Expected generation cost.
    pub generation_cost: f64,
    /// Expected battery cycling cost.
    pub degradation_cost: f64,
    /// Deadline penalty total (not probability weighted).
    pub sla_penalty: f64,
    /// Work units served over the horizon.
    pub work_served: f64,
    /// Work units that missed their deadline over the horizon.
    pub work_unmet: f64,
    /// Work still queued (not yet due) when the horizon ends. Together with
    /// the served and unmet totals this accounts for every arrival.
    pub work_backlog: f64,
    /// Expected per-step trajectories.
    pub series: DispatchSeries,
    /// Per-case raw trajectories.
    pub cases: Vec<CaseDispatch>,
    /// Wall-clock solve time.
    pub solve_time: Duration,
}

impl DispatchSolution {
    /// Format a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Dispatch Solution Summary\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Total Cost: ${:.2}\n", self.cost));
        s.push_str(&format!("  Capex: ${:.2}\n", self.capex_cost));
        s.push_str(&format!("  Energy: ${:.2}\n", self.energy_cost));
        s.push_str(&format!("  Generation: ${:.2}\n", self.generation_cost));
        s.push_str(&format!("  Degradation: ${:.2}\n", self.degradation_cost));
        s.push_str(&format!("  SLA Penalty: ${:.2}\n", self.sla_penalty));
        s.push_str(&format!(
            "Reliability: {:.4} (EUE {:.3} MWh, LOLE {:.0} steps)\n",
            self.reliability, self.eue, self.lole
        ));
        s.push_str(&format!(
            "BESS: {:.2} MW / {:.2} MWh\n",
            self.bess_power_mw, self.bess_energy_mwh
        ));
        s.push_str(&format!(
            "Workload: {:.2} served, {:.2} unmet, {:.2} backlog\n",
            self.work_served, self.work_unmet, self.work_backlog
        ));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_summary() {
        let solution = DispatchSolution {
            objective: 1234.5,
            cost: 1234.5,
            reliability: 0.995,
            eue: 0.1,
            lole: 2.0,
            bess_power_mw: 2.0,
            bess_energy_mwh: 4.0,
            energy_cost: 1200.5,
            generation_cost: 34.0,
            ..DispatchSolution::default()
        };

        let summary = solution.summary();
        assert!(summary.contains("Total Cost: $1234.50"));
        assert!(summary.contains("Reliability: 0.9950"));
        assert!(summary.contains("BESS: 2.00 MW / 4.00 MWh"));
    }

    #[test]
    fn test_series_wire_keys() {
        let series = DispatchSeries {
            time: vec![0, 1],
            grid_import: vec![5.0, 5.0],
            ..DispatchSeries::default()
        };
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.contains("\"gridImport\""));
        assert!(json.contains("\"computePower\""));
        assert!(json.contains("\"baseLoad\""));
    }
}
