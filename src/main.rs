use arccut::output::Report;
use arccut::{aggregate, scc, Strategy, WeightedGraph};
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::error::Error;
use std::fs::File;
use std::io::{stdin, stdout, BufReader};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "arccut",
    about = "Computes a minimum-weight feedback arc set of a directed graph."
)]
struct Opt {
    /// Input file with one `<source> <target> [<weight>]` arc per line.
    /// `stdin` if not specified.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Formulation: 'lazy' (cutting planes), 'order' (upfront total-order
    /// program) or 'relaxed' (fractional LP bound).
    #[structopt(short, long, default_value = "lazy")]
    strategy: Strategy,

    /// Verbose mode (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn init_logger(verbosity: usize) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let env = Env::default().default_filter_or(level.as_str());
    Builder::from_env(env).format_timestamp(None).init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();
    init_logger(opt.verbose);

    let raw = match &opt.input {
        Some(path) => aggregate::read_arcs(BufReader::new(File::open(path)?))?,
        None => aggregate::read_arcs(stdin().lock())?,
    };
    let graph = WeightedGraph::aggregate(&raw);

    let mut report = Report::new(&graph, &opt.strategy);
    for component in scc::decompose(&graph) {
        log::info!(
            "component of {} vertices and {} arcs",
            component.n,
            component.arcs.len()
        );
        report.add(&component, opt.strategy.solve(&component, graph.scale));
    }

    report.write(stdout().lock())?;
    if let Some(diagnostic) = report.diagnostic() {
        eprintln!("{}", diagnostic);
    }
    Ok(())
}
