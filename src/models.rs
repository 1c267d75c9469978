mod extents;
mod line;
mod network;
mod station;
mod tunnel;

pub use extents::Extents;
pub use line::MetroLine;
pub use network::SubwayNetwork;
pub use station::{Station, StationAttributes, StationId};
pub use tunnel::{SegmentKey, TunnelSegment};
