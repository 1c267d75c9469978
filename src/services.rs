pub mod centrality;
pub mod loader;
pub mod path;
pub mod search;
pub mod statistics;

pub use centrality::{compute_centrality, CentralityGroup, CentralityMetric, CentralityResult};
pub use loader::{load_extents, load_network, query_extents, ExtentSource};
pub use path::{describe_path, path_segments, shortest_path};
pub use search::best_match;
pub use statistics::{extremal_station, Compass, NetworkSummary};
