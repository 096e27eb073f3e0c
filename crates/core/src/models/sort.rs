use serde::{Deserialize, Serialize};

/// Column the market table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    Rank,
    Name,
    Price,
    Change24h,
    MarketCap,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Current table ordering. Ephemeral UI state, changed only by [`SortSpec::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Market cap, largest first.
    fn default() -> Self {
        Self {
            key: SortKey::MarketCap,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Result of the user clicking the `key` column header.
    ///
    /// Descending only when `key` is already the active key and is ascending;
    /// every other click yields ascending.
    #[must_use]
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }
}
