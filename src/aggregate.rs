use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::error::Error;
use std::io::BufRead;

/// Aggregated weight of all parallel raw arcs between one ordered vertex pair.
///
/// `weight` is the sum of the supplied weights and acts as the primary
/// objective; `merged` counts the raw arcs beyond the first and acts as a
/// tie-break. For the solver both are packed into a single integer via
/// [`ArcWeight::encoded`], which `divmod` by the scale recovers exactly as
/// long as `merged < scale` (asserted during aggregation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcWeight {
    pub weight: u64,
    pub merged: u64,
}

impl ArcWeight {
    pub fn encoded(&self, scale: u64) -> u64 {
        // a silent wrap would alias the two encoded fields
        self.weight
            .checked_mul(scale)
            .and_then(|scaled| scaled.checked_add(self.merged))
            .expect("scaled weight overflows the divmod encoding")
    }
}

/// The pruned, aggregated input graph.
///
/// Only vertices that appear at least once as a source and at least once as a
/// target survive; everything else can never lie on a cycle. Self-loops are
/// split out of `arcs` at construction time: they belong to every cycle
/// through their vertex and are always fully cut, so no formulation ever
/// sees them.
pub struct WeightedGraph {
    pub vertices: Vec<String>,
    pub index: HashMap<String, usize>,
    pub scale: u64,
    pub arcs: BTreeMap<(usize, usize), ArcWeight>,
    pub loops: BTreeMap<usize, ArcWeight>,
}

/// Reads whitespace-delimited arcs, one per line: `<source> <target>` with an
/// implicit weight of 1, or `<source> <target> <weight>` with a non-negative
/// integer weight. Empty lines are skipped; anything else aborts the run.
pub fn read_arcs<R: BufRead>(reader: R) -> Result<Vec<(String, String, u64)>, Box<dyn Error>> {
    let mut raw = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            [a, b] => raw.push((a.to_string(), b.to_string(), 1)),
            [a, b, w] => raw.push((a.to_string(), b.to_string(), w.parse::<u64>()?)),
            _ => return Err(From::from(format!("expected 2 or 3 tokens, got: {:?}", line))),
        }
    }
    Ok(raw)
}

impl WeightedGraph {
    /// Prunes vertices that cannot lie on a cycle and merges parallel arcs.
    pub fn aggregate(raw: &[(String, String, u64)]) -> WeightedGraph {
        let sources: HashSet<&str> = raw.iter().map(|(a, _, _)| a.as_str()).collect();
        let targets: HashSet<&str> = raw.iter().map(|(_, b, _)| b.as_str()).collect();
        let mut vertices: Vec<String> = sources
            .intersection(&targets)
            .map(|v| v.to_string())
            .collect();
        vertices.sort();
        let index: HashMap<String, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        let scale = vertices.len() as u64 + 1;

        let mut arcs: BTreeMap<(usize, usize), ArcWeight> = BTreeMap::new();
        let mut loops: BTreeMap<usize, ArcWeight> = BTreeMap::new();
        for (a, b, w) in raw {
            let (u, v) = match (index.get(a), index.get(b)) {
                (Some(&u), Some(&v)) => (u, v),
                _ => continue, // an endpoint was pruned, the arc cannot be cyclic
            };
            if u == v {
                merge(loops.entry(u), *w, scale);
            } else {
                merge(arcs.entry((u, v)), *w, scale);
            }
        }
        log::info!(
            "{} of {} distinct endpoint names survive pruning, scale {}",
            vertices.len(),
            sources.union(&targets).count(),
            scale
        );

        WeightedGraph { vertices, index, scale, arcs, loops }
    }
}

fn merge<K: Ord>(entry: Entry<'_, K, ArcWeight>, w: u64, scale: u64) {
    let agg = entry
        .and_modify(|agg| {
            agg.weight += w;
            agg.merged += 1;
        })
        .or_insert(ArcWeight { weight: w, merged: 0 });
    // the divmod encoding aliases the two components if this ever fails
    assert!(
        agg.merged < scale,
        "more than {} parallel arcs for one pair, encoding would overflow",
        scale
    );
}
