use crate::aggregate::WeightedGraph;
use crate::graph;

/// One strongly connected component of the pruned graph, with its own local
/// vertex indexing and induced arc list. Arcs carry the scale-encoded weight;
/// `out[u]` lists the ids (indices into `arcs`) of the arcs leaving local
/// vertex `u`.
pub struct Component {
    pub n: usize,
    pub members: Vec<usize>,
    pub arcs: Vec<(usize, usize, u64)>,
    pub out: Vec<Vec<usize>>,
}

impl Component {
    pub fn new(members: Vec<usize>, arcs: Vec<(usize, usize, u64)>) -> Component {
        let n = members.len();
        let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (id, &(u, _, _)) in arcs.iter().enumerate() {
            out[u].push(id);
        }
        Component { n, members, arcs, out }
    }
}

/// Partitions the pruned graph into strongly connected components and their
/// induced arc lists. Singleton components require zero cut weight and are
/// dropped; cross-component arcs are never candidates for cutting.
pub fn decompose(g: &WeightedGraph) -> Vec<Component> {
    let n = g.vertices.len();
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in g.arcs.keys() {
        adj[u].push(v);
    }

    let mut sccs = graph::strongly_connected(&adj);
    let mut label = vec![0; n];
    let mut local = vec![0; n];
    for (i, scc) in sccs.iter_mut().enumerate() {
        scc.sort();
        for (pos, &v) in scc.iter().enumerate() {
            label[v] = i;
            local[v] = pos;
        }
    }

    let mut induced: Vec<Vec<(usize, usize, u64)>> = vec![Vec::new(); sccs.len()];
    for (&(u, v), w) in &g.arcs {
        if label[u] == label[v] {
            induced[label[u]].push((local[u], local[v], w.encoded(g.scale)));
        }
    }

    let components: Vec<Component> = sccs
        .into_iter()
        .zip(induced)
        .filter(|(members, _)| members.len() > 1)
        .map(|(members, arcs)| Component::new(members, arcs))
        .collect();
    log::info!(
        "{} non-trivial components among {} surviving vertices",
        components.len(),
        n
    );
    components
}
