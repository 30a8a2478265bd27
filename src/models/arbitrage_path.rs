use diesel::{Insertable, Queryable, Selectable};

/// A stored arbitrage path
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schemas::arbitrage_paths)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ArbitragePath {
    /// Store assigned id
    pub id: i32,
    /// Number of swaps
    pub length: i32,
    /// Symbols joined by the swap path separator, e.g. `WETH -> USDC -> DAI -> WETH`
    pub swap_path: String,
}

/// A path row waiting for its id
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schemas::arbitrage_paths)]
pub struct NewArbitragePath {
    /// Number of swaps
    pub length: i32,
    /// Human readable route
    pub swap_path: String,
}

/// A stored swap step of a path
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schemas::arbitrage_steps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ArbitrageStep {
    /// Store assigned id
    pub id: i32,
    /// FK - `arbitrage_paths.id`
    pub path_id: i32,
    /// Zero based position inside the path
    pub step_index: i32,
    /// Pool used for the hop
    pub pool_address: String,
    /// Token sold
    pub from_token: String,
    /// Token bought
    pub to_token: String,
    /// Whether the hop follows the pool's `token0 -> token1` orientation
    pub is_forward: bool,
}

/// A swap step derived from a cycle, before its parent path has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDraft {
    /// Zero based position inside the path
    pub step_index: i32,
    /// Pool used for the hop
    pub pool_address: String,
    /// Token sold
    pub from_token: String,
    /// Token bought
    pub to_token: String,
    /// Whether the hop follows the pool's `token0 -> token1` orientation
    pub is_forward: bool,
}

impl StepDraft {
    /// Binds the draft to the id the store assigned to its parent path
    #[must_use]
    pub fn for_path(&self, path_id: i32) -> NewArbitrageStep<'_> {
        NewArbitrageStep {
            path_id,
            step_index: self.step_index,
            pool_address: &self.pool_address,
            from_token: &self.from_token,
            to_token: &self.to_token,
            is_forward: self.is_forward,
        }
    }
}

/// A step row ready for insertion
#[derive(Insertable, Debug, Clone, Copy, PartialEq, Eq)]
#[diesel(table_name = crate::schemas::arbitrage_steps)]
pub struct NewArbitrageStep<'a> {
    /// FK - `arbitrage_paths.id`
    pub path_id: i32,
    /// Zero based position inside the path
    pub step_index: i32,
    /// Pool used for the hop
    pub pool_address: &'a str,
    /// Token sold
    pub from_token: &'a str,
    /// Token bought
    pub to_token: &'a str,
    /// Whether the hop follows the pool's `token0 -> token1` orientation
    pub is_forward: bool,
}

/// Everything a flush writes for one discovered cycle: the path row and its
/// steps. The store inserts the path, then binds the steps to the returned id
/// inside the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    /// The path row
    pub path: NewArbitragePath,
    /// Steps in traversal order
    pub steps: Vec<StepDraft>,
}
