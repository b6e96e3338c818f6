//! MILP construction for the dispatch model.
//!
//! `build_model` turns a validated [`Scenario`] into variables, constraints,
//! and an objective, plus a handle map naming every decision variable group
//! so the aggregator can read values back after the solve. The formulation
//! is documented in the [module docs](super).

use dcflex_core::Scenario;
use good_lp::{constraint, variable, variables, Constraint, Expression, ProblemVariables, Variable};

use super::solver::DispatchError;

/// Handles to every variable group, in the index order used throughout:
/// `[t]` per step, `[t][a]` per step and remaining-slack bucket,
/// `[s][t]` per case and step, `[g][s][t]` per generator, case, and step.
pub(crate) struct VariableHandles {
    pub p_bess: Variable,
    pub e_bess: Variable,
    pub p_compute: Vec<Variable>,
    pub work: Vec<Variable>,
    pub queue: Vec<Vec<Variable>>,
    pub served: Vec<Vec<Variable>>,
    pub unmet: Vec<Variable>,
    pub charge: Vec<Vec<Variable>>,
    pub discharge: Vec<Vec<Variable>>,
    pub soc: Vec<Vec<Variable>>,
    pub grid_import: Vec<Vec<Variable>>,
    pub grid_export: Vec<Vec<Variable>>,
    pub unserved: Vec<Vec<Variable>>,
    pub gen_output: Vec<Vec<Vec<Variable>>>,
}

/// A fully built but not yet solved model.
pub(crate) struct ModelParts {
    pub vars: ProblemVariables,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
    pub handles: VariableHandles,
}

/// Build the dispatch MILP for one scenario and an optional reliability
/// target. Validation runs first so no constraint is emitted for a
/// malformed scenario.
pub(crate) fn build_model(
    scenario: &Scenario,
    reliability_target: Option<f64>,
) -> Result<ModelParts, DispatchError> {
    scenario
        .validate()
        .map_err(|e| DispatchError::Validation(e.to_string()))?;

    let h = scenario.horizon();
    let dt = scenario.time_step_hours;
    let workload = &scenario.workload;
    let bess = &scenario.bess;
    let deadline = workload.deadline_hours;
    let buckets = deadline + 1;
    let n_points = workload.piecewise.len();
    let n_cases = scenario.cases.len();
    let n_gens = scenario.generators.len();

    let mut vars = variables!();
    let mut constraints: Vec<Constraint> = Vec::new();

    // === Sizing ===
    // The input caps double as upper bounds on the sizing variables; with
    // sizing disabled the ratings are pinned to the caps.
    let p_bess = vars.add(variable().min(0.0).max(bess.power_max_mw));
    let e_bess = vars.add(variable().min(0.0).max(bess.energy_max_mwh));
    if !bess.optimize_sizing {
        constraints.push(constraint!(p_bess == bess.power_max_mw));
        constraints.push(constraint!(e_bess == bess.energy_max_mwh));
    }

    // === First stage: workload plan (shared across cases) ===
    let mut lambda: Vec<Vec<Variable>> = Vec::with_capacity(h);
    let mut p_compute: Vec<Variable> = Vec::with_capacity(h);
    let mut work: Vec<Variable> = Vec::with_capacity(h);
    let mut queue: Vec<Vec<Variable>> = Vec::with_capacity(h);
    let mut served: Vec<Vec<Variable>> = Vec::with_capacity(h);
    let mut unmet: Vec<Variable> = Vec::with_capacity(h);
    for _ in 0..h {
        lambda.push(
            (0..n_points)
                .map(|_| vars.add(variable().min(0.0).max(1.0)))
                .collect(),
        );
        p_compute.push(vars.add(variable().min(0.0)));
        work.push(vars.add(variable().min(0.0)));
        queue.push((0..buckets).map(|_| vars.add(variable().min(0.0))).collect());
        served.push((0..buckets).map(|_| vars.add(variable().min(0.0))).collect());
        unmet.push(vars.add(variable().min(0.0)));
    }

    for t in 0..h {
        // Convex combination over the performance curve breakpoints.
        let mut weight_sum = Expression::from(0.0);
        let mut power_expr = Expression::from(0.0);
        let mut work_expr = Expression::from(0.0);
        for (point, &lam) in workload.piecewise.iter().zip(&lambda[t]) {
            weight_sum += lam;
            power_expr += point.power_mw * lam;
            work_expr += point.work_units * lam;
        }
        let pc = p_compute[t];
        let x = work[t];
        constraints.push(constraint!(weight_sum == 1.0));
        constraints.push(constraint!(pc == power_expr));
        constraints.push(constraint!(x == work_expr));
        constraints.push(constraint!(pc >= workload.min_compute_mw));

        // Work served this step is drawn from the queue buckets.
        let mut served_sum = Expression::from(0.0);
        for a in 0..buckets {
            let s_ta = served[t][a];
            let q_ta = queue[t][a];
            served_sum += s_ta;
            constraints.push(constraint!(s_ta <= q_ta));
        }
        constraints.push(constraint!(served_sum == x));
    }

    // Queue seeding and aging. New work enters at the top bucket `deadline`
    // and moves down one slack bucket per step; bucket 0 is due this step.
    for t in 0..h {
        for a in 0..buckets {
            let q_ta = queue[t][a];
            if a == deadline {
                constraints.push(constraint!(q_ta == workload.arrivals[t]));
            } else if t == 0 {
                constraints.push(constraint!(q_ta == 0.0));
            } else {
                let q_prev = queue[t - 1][a + 1];
                let s_prev = served[t - 1][a + 1];
                constraints.push(constraint!(q_ta == q_prev - s_prev));
            }
        }

        let unmet_t = unmet[t];
        let due = queue[t][0];
        let served_due = served[t][0];
        if workload.soft_sla {
            constraints.push(constraint!(unmet_t == due - served_due));
        } else {
            // Hard SLA: the due bucket must clear every step.
            constraints.push(constraint!(unmet_t == 0.0));
            constraints.push(constraint!(served_due == due));
        }
    }

    // Throughput floor: at most `curtailmentCap` of all arrivals may be dropped.
    let mut total_work = Expression::from(0.0);
    for t in 0..h {
        total_work += work[t];
    }
    let floor = (1.0 - workload.curtailment_cap) * scenario.total_arrivals();
    constraints.push(constraint!(total_work >= floor));

    // === Second stage: per-case dispatch ===
    let mut charge: Vec<Vec<Variable>> = Vec::with_capacity(n_cases);
    let mut discharge: Vec<Vec<Variable>> = Vec::with_capacity(n_cases);
    let mut soc: Vec<Vec<Variable>> = Vec::with_capacity(n_cases);
    let mut grid_import: Vec<Vec<Variable>> = Vec::with_capacity(n_cases);
    let mut grid_export: Vec<Vec<Variable>> = Vec::with_capacity(n_cases);
    let mut unserved: Vec<Vec<Variable>> = Vec::with_capacity(n_cases);
    let mut gen_output: Vec<Vec<Vec<Variable>>> = vec![Vec::with_capacity(n_cases); n_gens];

    let charge_gain = bess.efficiency_charge * dt;
    let discharge_draw = dt / bess.efficiency_discharge;

    for (s, case) in scenario.cases.iter().enumerate() {
        charge.push((0..h).map(|_| vars.add(variable().min(0.0))).collect());
        discharge.push((0..h).map(|_| vars.add(variable().min(0.0))).collect());
        soc.push((0..h).map(|_| vars.add(variable().min(0.0))).collect());
        grid_import.push((0..h).map(|_| vars.add(variable().min(0.0))).collect());
        grid_export.push((0..h).map(|_| vars.add(variable().min(0.0))).collect());
        unserved.push((0..h).map(|_| vars.add(variable().min(0.0))).collect());
        for gen_vars in gen_output.iter_mut() {
            gen_vars.push((0..h).map(|_| vars.add(variable().min(0.0))).collect());
        }
        let charge_bin: Vec<Variable> = (0..h).map(|_| vars.add(variable().binary())).collect();
        let grid_bin: Vec<Variable> = (0..h).map(|_| vars.add(variable().binary())).collect();

        for t in 0..h {
            let ch = charge[s][t];
            let dis = discharge[s][t];
            let imp = grid_import[s][t];
            let exp = grid_export[s][t];
            let z = unserved[s][t];
            let b = charge_bin[t];
            let g = grid_bin[t];

            // Charge/discharge exclusion: sized rating caps the magnitude,
            // the binary switches each direction off. Pmax is the big-M.
            constraints.push(constraint!(ch <= p_bess));
            constraints.push(constraint!(ch <= bess.power_max_mw * b));
            constraints.push(constraint!(dis <= p_bess));
            constraints.push(constraint!(dis <= bess.power_max_mw * (1.0 - b)));

            // Import/export exclusion with the per-case import cap.
            constraints.push(constraint!(imp <= case.grid_import_cap * g));
            constraints.push(constraint!(exp <= scenario.grid.export_max_mw * (1.0 - g)));

            // SOC recursion, starting empty.
            let soc_t = soc[s][t];
            if t == 0 {
                constraints.push(constraint!(soc_t == charge_gain * ch - discharge_draw * dis));
            } else {
                let soc_prev = soc[s][t - 1];
                constraints
                    .push(constraint!(soc_t == soc_prev + charge_gain * ch - discharge_draw * dis));
            }
            constraints.push(constraint!(soc_t <= e_bess));

            // Power balance; `z` absorbs any shortfall so the balance itself
            // never renders the model infeasible.
            let mut supply = Expression::from(0.0);
            for gen_vars in gen_output.iter() {
                supply += gen_vars[s][t];
            }
            supply += dis;
            supply -= ch;
            supply += imp;
            supply -= exp;
            supply += z;
            let pc = p_compute[t];
            constraints.push(constraint!(supply == scenario.base_load_mw[t] + pc));

            // Derated generator caps; unavailable units contribute nothing.
            for (g_idx, gen) in scenario.generators.iter().enumerate() {
                let pg = gen_output[g_idx][s][t];
                let cap = gen.effective_p_max() * case.generator_derate;
                constraints.push(constraint!(pg <= cap));
            }
        }
    }

    // === Reliability: expected unserved energy ===
    let mut eue = Expression::from(0.0);
    for (s, case) in scenario.cases.iter().enumerate() {
        for t in 0..h {
            eue += case.probability * dt * unserved[s][t];
        }
    }
    if let Some(target) = reliability_target {
        let allowance = (1.0 - target) * scenario.total_demand_mwh();
        constraints.push(constraint!(eue <= allowance));
    }

    // === Objective ===
    let mut objective = Expression::from(0.0);
    objective += bess.capex_power * p_bess;
    objective += bess.capex_energy * e_bess;
    for (s, case) in scenario.cases.iter().enumerate() {
        let weight = case.probability * dt;
        for t in 0..h {
            objective += weight * scenario.price[t] * grid_import[s][t];
            objective -= weight * scenario.price[t] * grid_export[s][t];
            for (g_idx, gen) in scenario.generators.iter().enumerate() {
                objective += weight * gen.marginal_cost * gen_output[g_idx][s][t];
            }
            objective += weight * bess.degradation_cost * (charge[s][t] + discharge[s][t]);
        }
    }
    // The workload plan is shared across cases, so the SLA penalty is not
    // probability weighted.
    for t in 0..h {
        objective += workload.penalty_deadline * unmet[t];
    }

    Ok(ModelParts {
        vars,
        objective,
        constraints,
        handles: VariableHandles {
            p_bess,
            e_bess,
            p_compute,
            work,
            queue,
            served,
            unmet,
            charge,
            discharge,
            soc,
            grid_import,
            grid_export,
            unserved,
            gen_output,
        },
    })
}
