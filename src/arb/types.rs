use std::fmt::{self, Display};

/// Type alias for a pool address, represented as a lowercase hex string.
pub type PoolAddress = String;

/// Type alias for a token address, represented as a lowercase hex string.
pub type TokenAddress = String;

/// Normalizes an address for use as a map key.
///
/// Addresses arrive from the store in whatever casing the ingester wrote them
/// (checksummed or not), so every lookup goes through this.
#[must_use]
pub fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// A closed walk that starts and ends at the anchor token.
///
/// `tokens` always holds one more entry than `pools`: `pools[i]` is the pool
/// used to go from `tokens[i]` to `tokens[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cycle {
    /// Visited tokens, anchor first and last
    pub tokens: Vec<TokenAddress>,
    /// Pools traversed between consecutive tokens
    pub pools: Vec<PoolAddress>,
}

impl Cycle {
    /// Number of swaps in the cycle
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether the cycle has no swaps at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Iterates over `(step_index, pool, from_token, to_token)` in traversal order
    pub fn steps(&self) -> impl Iterator<Item = (usize, &str, &str, &str)> + '_ {
        self.pools
            .iter()
            .zip(self.tokens.windows(2))
            .enumerate()
            .map(|(index, (pool, pair))| (index, pool.as_str(), pair[0].as_str(), pair[1].as_str()))
    }
}

impl Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cycle({})", self.tokens.join(" > "))
    }
}
