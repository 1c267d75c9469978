use serde::{Deserialize, Serialize};

use super::{MetroLine, StationId};

/// Composite identity of a tunnel segment.
///
/// The station pair is unordered, so the smaller id is always stored first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SegmentKey {
    pub a: StationId,
    pub b: StationId,
    pub line: MetroLine,
}

impl SegmentKey {
    #[must_use]
    pub fn new(first: StationId, second: StationId, line: MetroLine) -> Self {
        if first <= second {
            Self { a: first, b: second, line }
        } else {
            Self { a: second, b: first, line }
        }
    }
}

/// A route relation between two stations on one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TunnelSegment {
    pub key: SegmentKey,
}

impl TunnelSegment {
    #[must_use]
    pub fn line(&self) -> MetroLine {
        self.key.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_key_is_unordered() {
        let forward = SegmentKey::new("V1".into(), "V2".into(), MetroLine::M1);
        let backward = SegmentKey::new("V2".into(), "V1".into(), MetroLine::M1);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_segment_key_distinguishes_lines() {
        let m1 = SegmentKey::new("V1".into(), "V2".into(), MetroLine::M1);
        let m4 = SegmentKey::new("V1".into(), "V2".into(), MetroLine::M4);
        assert_ne!(m1, m4);
        assert_eq!((&m1.a, &m1.b), (&m4.a, &m4.b));
    }
}
