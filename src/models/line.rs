use serde::{Deserialize, Serialize};
use std::fmt;

/// The lines of the Paris métro.
///
/// Route relations in the store carry a free-text `station_ligne` label; it is
/// parsed into this type once, at load time, so an unknown label is reported
/// before anything is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetroLine {
    M1,
    M2,
    M3,
    M3Bis,
    M4,
    M5,
    M6,
    M7,
    M7Bis,
    M8,
    M9,
    M10,
    M11,
    M12,
    M13,
    M14,
}

impl MetroLine {
    pub const ALL: [MetroLine; 16] = [
        MetroLine::M1,
        MetroLine::M2,
        MetroLine::M3,
        MetroLine::M3Bis,
        MetroLine::M4,
        MetroLine::M5,
        MetroLine::M6,
        MetroLine::M7,
        MetroLine::M7Bis,
        MetroLine::M8,
        MetroLine::M9,
        MetroLine::M10,
        MetroLine::M11,
        MetroLine::M12,
        MetroLine::M13,
        MetroLine::M14,
    ];

    /// Parse a line label as found in the store.
    ///
    /// The source data spells the "bis" lines several ways ("M3 bis", "M3b",
    /// "3 bis"), all of which are accepted.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_uppercase().replace(' ', "");
        let line = match normalized.as_str() {
            "M1" => Self::M1,
            "M2" => Self::M2,
            "M3" => Self::M3,
            "M3BIS" | "M3B" | "3BIS" => Self::M3Bis,
            "M4" => Self::M4,
            "M5" => Self::M5,
            "M6" => Self::M6,
            "M7" => Self::M7,
            "M7BIS" | "M7B" | "7BIS" => Self::M7Bis,
            "M8" => Self::M8,
            "M9" => Self::M9,
            "M10" => Self::M10,
            "M11" => Self::M11,
            "M12" => Self::M12,
            "M13" => Self::M13,
            "M14" => Self::M14,
            _ => return None,
        };
        Some(line)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M2 => "M2",
            Self::M3 => "M3",
            Self::M3Bis => "M3 bis",
            Self::M4 => "M4",
            Self::M5 => "M5",
            Self::M6 => "M6",
            Self::M7 => "M7",
            Self::M7Bis => "M7 bis",
            Self::M8 => "M8",
            Self::M9 => "M9",
            Self::M10 => "M10",
            Self::M11 => "M11",
            Self::M12 => "M12",
            Self::M13 => "M13",
            Self::M14 => "M14",
        }
    }

    /// Official line colour
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::M1 => "#FFCD00",
            Self::M2 => "#003CA6",
            Self::M3 => "#837902",
            Self::M3Bis | Self::M13 => "#6EC4E8",
            Self::M4 => "#CF009E",
            Self::M5 => "#FF7E2E",
            Self::M6 | Self::M7Bis => "#6ECA97",
            Self::M7 => "#FA9ABA",
            Self::M8 => "#E19BDF",
            Self::M9 => "#B6BD00",
            Self::M10 => "#C9910D",
            Self::M11 => "#704B1C",
            Self::M12 => "#007852",
            Self::M14 => "#62259D",
        }
    }
}

impl fmt::Display for MetroLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_plain_lines() {
        assert_eq!(MetroLine::from_label("M1"), Some(MetroLine::M1));
        assert_eq!(MetroLine::from_label("M14"), Some(MetroLine::M14));
        assert_eq!(MetroLine::from_label(" m4 "), Some(MetroLine::M4));
    }

    #[test]
    fn test_from_label_bis_spellings() {
        for label in ["M3 bis", "M3b", "3 bis", "M3bis"] {
            assert_eq!(MetroLine::from_label(label), Some(MetroLine::M3Bis), "{label}");
        }
        for label in ["M7 bis", "M7b", "7 bis"] {
            assert_eq!(MetroLine::from_label(label), Some(MetroLine::M7Bis), "{label}");
        }
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(MetroLine::from_label("RER A"), None);
        assert_eq!(MetroLine::from_label(""), None);
        assert_eq!(MetroLine::from_label("M15"), None);
    }

    #[test]
    fn test_label_round_trips_through_parser() {
        for line in MetroLine::ALL {
            assert_eq!(MetroLine::from_label(line.label()), Some(line));
        }
    }

    #[test]
    fn test_colors_are_hex() {
        for line in MetroLine::ALL {
            let color = line.color();
            assert!(color.starts_with('#') && color.len() == 7, "{line}: {color}");
        }
    }
}
