use serde::{Deserialize, Serialize};

/// Closed set of expense categories. Declaration order doubles as the
/// tie-break order for category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub(crate) enum Category {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Bills,
    Other,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup. Unknown names are rejected rather than
    /// mapped to `Other`.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().to_lowercase() == lower)
    }

    pub(crate) fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transportation,
            Self::Entertainment,
            Self::Shopping,
            Self::Bills,
            Self::Other,
        ]
    }

    pub(crate) fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transportation => "🚗",
            Self::Entertainment => "🎬",
            Self::Shopping => "🛍️",
            Self::Bills => "📄",
            Self::Other => "📌",
        }
    }

    /// Display color as an RGB triple.
    pub(crate) fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Food => (0x10, 0xb9, 0x81),
            Self::Transportation => (0x3b, 0x82, 0xf6),
            Self::Entertainment => (0xf5, 0x9e, 0x0b),
            Self::Shopping => (0xec, 0x48, 0x99),
            Self::Bills => (0xef, 0x44, 0x44),
            Self::Other => (0x6b, 0x72, 0x80),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
