use crate::relaxation::Relaxation;
use crate::scc::Component;
use crate::{cutting_plane, ordering, relaxation};
use std::str::FromStr;

/// An exact cut of one component: the selected arc ids and the scale-encoded
/// objective value.
pub struct Cut {
    pub arcs: Vec<usize>,
    pub score: u64,
}

/// Per-component solution, exact or fractional depending on the strategy.
pub enum ComponentSolution {
    Exact(Cut),
    Fractional(Relaxation),
}

/// The three interchangeable ways of solving a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exact, via lazily generated cycle constraints.
    LazyCut,
    /// Exact, via the complete upfront total-order formulation.
    CompleteOrder,
    /// Fractional lower bound, via the triangle-inequality LP.
    Relaxed,
}

impl Strategy {
    pub fn is_fractional(&self) -> bool {
        *self == Strategy::Relaxed
    }

    pub fn solve(&self, component: &Component, scale: u64) -> ComponentSolution {
        match self {
            Strategy::LazyCut => ComponentSolution::Exact(cutting_plane::solve(component)),
            Strategy::CompleteOrder => ComponentSolution::Exact(ordering::solve(component)),
            Strategy::Relaxed => {
                ComponentSolution::Fractional(relaxation::solve(component, scale))
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Strategy, String> {
        match s {
            "lazy" => Ok(Strategy::LazyCut),
            "order" => Ok(Strategy::CompleteOrder),
            "relaxed" => Ok(Strategy::Relaxed),
            _ => Err(format!("unknown strategy '{}', expected lazy, order or relaxed", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_names() {
        assert_eq!("lazy".parse::<Strategy>().unwrap(), Strategy::LazyCut);
        assert_eq!("order".parse::<Strategy>().unwrap(), Strategy::CompleteOrder);
        assert_eq!("relaxed".parse::<Strategy>().unwrap(), Strategy::Relaxed);
        assert!("exact".parse::<Strategy>().is_err());
    }

    #[test]
    fn strategies_agree_on_a_two_cycle() {
        let c = crate::Component::new(vec![0, 1], vec![(0, 1, 3), (1, 0, 3)]);
        for strategy in [Strategy::LazyCut, Strategy::CompleteOrder] {
            match strategy.solve(&c, 3) {
                ComponentSolution::Exact(cut) => assert_eq!(cut.score, 3),
                ComponentSolution::Fractional(_) => unreachable!(),
            }
        }
    }
}
