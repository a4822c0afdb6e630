//! Graph core and canonical labelling (spec §4.J). No teacher counterpart —
//! `inputlayer-inputlayer` has no graph module — so this is built fresh from
//! `original_source/include/mimir/graphs/**`, with the static graph's
//! adjacency layout styled after a forward-star (CSR) index, the idiomatic
//! Rust shape `other_examples/manifests/vigna-webgraph-rs` uses for the same
//! problem.

pub mod color_refinement;
pub mod k_fwl;
pub mod nauty_bridge;
pub mod static_graph;

pub use color_refinement::{refine_colors, ColorCertificate};
pub use k_fwl::{k_fwl_certificate, KFwlCertificate};
pub use nauty_bridge::{BruteForceNauty, NautyBridge};
pub use static_graph::{Direction, StaticGraph};
