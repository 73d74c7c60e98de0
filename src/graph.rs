// Pure graph functionality on adjacency lists (Vec<Vec<usize>>).

/// Returns the strongly connected components of the graph, each as a list of
/// vertex ids. Two-pass (Kosaraju-class) decomposition, linear in
/// vertices + arcs.
pub fn strongly_connected(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adj.len();
    let mut seen = vec![false; n];
    let mut order: Vec<usize> = Vec::with_capacity(n);
    for v in 0..n {
        finish_order(adj, v, &mut seen, &mut order);
    }
    let mut rev: Vec<Vec<usize>> = vec![Vec::new(); n];
    for u in 0..n {
        for &v in &adj[u] {
            rev[v].push(u);
        }
    }
    let mut label = vec![usize::MAX; n];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for &v in order.iter().rev() {
        if label[v] == usize::MAX {
            let mut members = Vec::new();
            collect(&rev, v, components.len(), &mut label, &mut members);
            components.push(members);
        }
    }
    components
}

fn finish_order(adj: &[Vec<usize>], u: usize, seen: &mut Vec<bool>, order: &mut Vec<usize>) {
    if seen[u] {
        return;
    }
    seen[u] = true;
    for &v in &adj[u] {
        finish_order(adj, v, seen, order);
    }
    order.push(u);
}

fn collect(rev: &[Vec<usize>], u: usize, id: usize, label: &mut Vec<usize>, members: &mut Vec<usize>) {
    if label[u] != usize::MAX {
        return;
    }
    label[u] = id;
    members.push(u);
    for &v in &rev[u] {
        collect(rev, v, id, label, members);
    }
}

/// Checks whether the graph contains no directed cycle.
pub fn is_acyclic(adj: &[Vec<usize>]) -> bool {
    strongly_connected(adj).iter().all(|c| c.len() == 1) && (0..adj.len()).all(|u| !adj[u].contains(&u))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_two_cycles_and_a_bridge() {
        // 0 <-> 1, 2 <-> 3, bridge 1 -> 2
        let adj = vec![vec![1], vec![0, 2], vec![3], vec![2]];
        let mut sccs = strongly_connected(&adj);
        for c in &mut sccs {
            c.sort();
        }
        sccs.sort();
        assert_eq!(sccs, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn singletons_on_a_dag() {
        let adj = vec![vec![1, 2], vec![2], vec![]];
        assert_eq!(strongly_connected(&adj).len(), 3);
        assert!(is_acyclic(&adj));
    }

    #[test]
    fn detects_cycles() {
        assert!(!is_acyclic(&[vec![1], vec![2], vec![0]]));
        assert!(!is_acyclic(&[vec![0]])); // self-loop
        assert!(is_acyclic(&[]));
    }
}
