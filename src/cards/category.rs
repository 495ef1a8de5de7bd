//! Development-card categories.

use serde::{Deserialize, Serialize};

/// The four development-card categories, one per tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardCategory {
    Territory,
    Character,
    Building,
    Venture,
}

impl CardCategory {
    /// All categories in tower order. Effect scans follow this order too.
    pub const ALL: [CardCategory; 4] = [
        CardCategory::Territory,
        CardCategory::Character,
        CardCategory::Building,
        CardCategory::Venture,
    ];

    /// Position in [`CardCategory::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            CardCategory::Territory => 0,
            CardCategory::Character => 1,
            CardCategory::Building => 2,
            CardCategory::Venture => 3,
        }
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardCategory::Territory => "territory",
            CardCategory::Character => "character",
            CardCategory::Building => "building",
            CardCategory::Venture => "venture",
        };
        f.write_str(name)
    }
}
