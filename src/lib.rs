pub mod aggregate;
pub mod graph;
pub mod scc;
pub mod solver;
pub mod cutting_plane;
pub mod ordering;
pub mod relaxation;
pub mod strategy;
pub mod output;

// Re-exports to flatten the crate.
pub use aggregate::WeightedGraph as WeightedGraph;
pub use scc::Component as Component;
pub use strategy::Strategy as Strategy;
