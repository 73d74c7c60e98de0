use crate::ordering::{pair_costs, pair_index};
use crate::scc::Component;
use crate::solver;
use itertools::Itertools;

/// Numerical tolerance for fractional cut values and dual activity.
pub const EPS: f64 = 1e-8;

/// Result of the linear relaxation of the total-order formulation.
///
/// `cuts[i]` is the fractional cut of `component.arcs[i]`; `cost` is the
/// true-weight objective and a certified lower bound on the integer optimum;
/// `mass` is the total fractional cut. `tight` lists the diagnostic triangle
/// triples whose transitivity constraint is binding although none of the
/// implied cycle's arcs is individually fully cut, and `complements` the
/// directed pairs of those triples that carry (near) zero cut. These surface
/// near-violated structure for inspection; they are never fed back into the
/// objective.
pub struct Relaxation {
    pub cuts: Vec<f64>,
    pub cost: f64,
    pub mass: f64,
    pub tight: Vec<(usize, usize, usize)>,
    pub complements: Vec<(usize, usize)>,
}

/// Solves the triangle-inequality relaxation of the linear-ordering polytope
/// with a single LP solve: the pair variables become continuous in [0, 1] and
/// the rows `0 <= p_ab + p_bc - p_ac <= 1` replace the exact disjunctions.
/// Convexity makes the certified optimum reachable without iteration.
pub fn solve(component: &Component, scale: u64) -> Relaxation {
    let mut problem = highs::RowProblem::new();
    let cols = pair_costs(component)
        .into_iter()
        .map(|w| problem.add_column(w, 0..=1))
        .collect_vec();
    let triples = (0..component.n).tuple_combinations().collect_vec();
    for &(a, b, c) in &triples {
        problem.add_row(
            0..=1,
            &[
                (cols[pair_index(a, b)], 1.0),
                (cols[pair_index(b, c)], 1.0),
                (cols[pair_index(a, c)], -1.0),
            ],
        );
    }

    let solution = solver::minimize_relaxed(problem).get_solution();
    let values = solution.columns().to_vec();
    let duals = solution.dual_rows().to_vec();
    let cut_value = |u: usize, v: usize| {
        if u < v {
            1.0 - values[pair_index(u, v)]
        } else {
            values[pair_index(v, u)]
        }
    };

    let mut cuts = Vec::with_capacity(component.arcs.len());
    let mut cost = 0.0;
    let mut mass = 0.0;
    for &(u, v, w) in &component.arcs {
        let cut = cut_value(u, v);
        cuts.push(cut);
        cost += cut * (w / scale) as f64;
        mass += cut;
    }

    let mut tight = Vec::new();
    let mut complements = Vec::new();
    for (row, &(a, b, c)) in triples.iter().enumerate() {
        if duals[row].abs() < EPS {
            continue;
        }
        // which bound binds decides which of the two cyclic rotations is the
        // near-violated one
        let activity = values[pair_index(a, b)] + values[pair_index(b, c)] - values[pair_index(a, c)];
        let cycle = if activity > 0.5 {
            [(a, b), (b, c), (c, a)]
        } else {
            [(a, c), (c, b), (b, a)]
        };
        if cycle.iter().any(|&(u, v)| cut_value(u, v) >= 1.0 - EPS) {
            continue;
        }
        log::info!(
            "tight triangle {} {} {}",
            component.members[a],
            component.members[b],
            component.members[c]
        );
        tight.push((a, b, c));
        for &(u, v) in &cycle {
            if cut_value(u, v) < EPS {
                complements.push((u, v));
            }
        }
    }

    Relaxation { cuts, cost, mass, tight, complements }
}
