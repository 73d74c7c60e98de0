use crate::aggregate::WeightedGraph;
use crate::relaxation::{Relaxation, EPS};
use crate::scc::Component;
use crate::strategy::{ComponentSolution, Cut, Strategy};
use std::collections::BTreeMap;
use std::io::{self, Write};

// Accumulates per-component results into the combined score and renders the
// selected output. Self-loops never reach a formulator; both report kinds
// account for them at construction time.

pub enum Report<'a> {
    Exact(ExactReport<'a>),
    Relaxed(RelaxedReport<'a>),
}

impl<'a> Report<'a> {
    pub fn new(graph: &'a WeightedGraph, strategy: &Strategy) -> Report<'a> {
        if strategy.is_fractional() {
            Report::Relaxed(RelaxedReport::new(graph))
        } else {
            Report::Exact(ExactReport::new(graph))
        }
    }

    pub fn add(&mut self, component: &Component, solution: ComponentSolution) {
        match (self, solution) {
            (Report::Exact(report), ComponentSolution::Exact(cut)) => {
                report.add(component, &cut)
            }
            (Report::Relaxed(report), ComponentSolution::Fractional(relaxation)) => {
                report.add(component, &relaxation)
            }
            _ => unreachable!("report and solution built from different strategies"),
        }
    }

    pub fn write<W: Write>(&self, out: W) -> io::Result<()> {
        match self {
            Report::Exact(report) => report.write(out),
            Report::Relaxed(report) => report.write_dot(out),
        }
    }

    /// Trailing diagnostic line of the relaxed output.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Report::Exact(_) => None,
            Report::Relaxed(report) => Some(format!("{} {}", report.cost, report.mass)),
        }
    }
}

/// Cut edge list plus a `<total_weight> <total_count>` summary, decoded from
/// the running scale-encoded score via divmod.
pub struct ExactReport<'a> {
    graph: &'a WeightedGraph,
    total: u64,
    arcs: Vec<(usize, usize, u64)>,
}

impl<'a> ExactReport<'a> {
    fn new(graph: &'a WeightedGraph) -> ExactReport<'a> {
        let mut report = ExactReport { graph, total: 0, arcs: Vec::new() };
        for (&v, w) in &graph.loops {
            report.total += w.encoded(graph.scale);
            report.arcs.push((v, v, w.weight));
        }
        report
    }

    fn add(&mut self, component: &Component, cut: &Cut) {
        self.total += cut.score;
        for &id in &cut.arcs {
            let (u, v, w) = component.arcs[id];
            self.arcs
                .push((component.members[u], component.members[v], w / self.graph.scale));
        }
    }

    fn write<W: Write>(&self, mut out: W) -> io::Result<()> {
        for &(u, v, w) in &self.arcs {
            writeln!(out, "{} {} {}", self.graph.vertices[u], self.graph.vertices[v], w)?;
        }
        writeln!(out, "{} {}", self.total / self.graph.scale, self.total % self.graph.scale)
    }
}

/// Graph-description (dot) rendering of the fractional cut, with the two
/// running sums of the relaxation: weighted cost and total cut mass.
pub struct RelaxedReport<'a> {
    graph: &'a WeightedGraph,
    cost: f64,
    mass: f64,
    edges: BTreeMap<(String, String), f64>,
}

impl<'a> RelaxedReport<'a> {
    fn new(graph: &'a WeightedGraph) -> RelaxedReport<'a> {
        let mut edges = BTreeMap::new();
        // seed the structural complements of antiparallel pairs, so a cut arc
        // is always rendered next to its uncut partner
        for &(u, v) in graph.arcs.keys() {
            if graph.arcs.contains_key(&(v, u)) {
                edges.insert((graph.vertices[u].clone(), graph.vertices[v].clone()), 0.0);
            }
        }
        let mut report = RelaxedReport { graph, cost: 0.0, mass: 0.0, edges };
        for (&v, w) in &graph.loops {
            log::info!("self-loop {} cut with weight {}", graph.vertices[v], w.weight);
            report.cost += w.weight as f64;
            report.mass += 1.0;
            report
                .edges
                .insert((graph.vertices[v].clone(), graph.vertices[v].clone()), 1.0);
        }
        report
    }

    fn name(&self, component: &Component, local: usize) -> String {
        self.graph.vertices[component.members[local]].clone()
    }

    fn add(&mut self, component: &Component, relaxation: &Relaxation) {
        self.cost += relaxation.cost;
        self.mass += relaxation.mass;
        for (id, &(u, v, _)) in component.arcs.iter().enumerate() {
            if relaxation.cuts[id] >= EPS {
                self.edges
                    .insert((self.name(component, u), self.name(component, v)), relaxation.cuts[id]);
            }
        }
        for &(u, v) in &relaxation.complements {
            self.edges
                .entry((self.name(component, u), self.name(component, v)))
                .or_insert(0.0);
        }
    }

    fn write_dot<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "digraph {{")?;
        writeln!(out, "  newrank=true")?;
        for ((a, b), &cut) in &self.edges {
            if cut > 0.0 {
                let extra = if cut > 1.0 - EPS {
                    String::new()
                } else {
                    format!(
                        ",style=\"dashed\",fontcolor=\"red\",label=\"{}\"",
                        (cut * 1000.0).round() / 1000.0
                    )
                };
                writeln!(out, "  \"{}\" -> \"{}\" [color=\"red\",dir=back{}]", b, a, extra)?;
            } else {
                writeln!(out, "  \"{}\" -> \"{}\"", a, b)?;
            }
        }
        writeln!(out, "}}")
    }
}
