pub mod filter;
pub mod project;
pub mod ring;
pub mod state;

pub use filter::{FilterMode, FilterSelection, PatternFilter, RingFilter};
pub use project::{project, ProjectedGraph, ProjectedLink, ProjectedNode};
pub use ring::{resolve_ring, ring_transactions, RingDetail};
pub use state::SessionState;
