use highs::{HighsModelStatus, RowProblem, Sense, SolvedModel};

// Thin adapter around the highs optimization oracle. The cutting-plane and
// order formulations rely on every solve being proven optimal, so any other
// terminal status aborts the run instead of being retried.

/// Solves a (mixed-integer) minimization problem to proven optimality.
pub fn minimize(problem: RowProblem) -> SolvedModel {
    run(problem, "choose")
}

/// Solves a continuous minimization problem to proven optimality with the
/// interior-point method, which lands in the analytic center of the optimal
/// face instead of an arbitrary vertex. Crossover is kept off: snapping to a
/// vertex would turn the symmetric 0.5/0.5 precedence of antiparallel pairs
/// into an arbitrary 1/0 pick.
pub fn minimize_relaxed(problem: RowProblem) -> SolvedModel {
    run(problem, "ipm")
}

fn run(problem: RowProblem, solver: &str) -> SolvedModel {
    let mut model = problem.optimise(Sense::Minimise);
    model.set_option("output_flag", false);
    model.set_option("solver", solver);
    if solver == "ipm" {
        model.set_option("run_crossover", "off");
    }
    model.set_option("parallel", "off");
    model.set_option("threads", 1);

    let solved = model.solve();
    let status = solved.status();
    assert_eq!(
        status,
        HighsModelStatus::Optimal,
        "oracle returned {:?} instead of a proven optimum",
        status
    );
    log::trace!("oracle solve finished");
    solved
}

#[cfg(test)]
mod tests {
    use super::*;
    use highs::RowProblem;

    #[test]
    fn solves_a_trivial_covering_problem() {
        let mut problem = RowProblem::new();
        let x = problem.add_integer_column(2.0, 0..=1);
        let y = problem.add_integer_column(3.0, 0..=1);
        problem.add_row(1.., &[(x, 1.0), (y, 1.0)]);
        let solution = minimize(problem).get_solution();
        assert_eq!(solution.columns()[0].round() as i64, 1);
        assert_eq!(solution.columns()[1].round() as i64, 0);
    }
}
