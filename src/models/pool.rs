use diesel::{Queryable, Selectable};

/// A two-token liquidity pool as written by the ingester.
///
/// `token0`/`token1` carry no direction on their own; they only fix the
/// orientation used for the `is_forward` flag of a step.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schemas::pools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Pool {
    /// Pool contract address (primary key)
    pub address: String,
    /// DEX family tag, e.g. `uniswap_v2`
    pub dex_type: String,
    /// Fee tier in hundredths of a bip, if the DEX has tiers
    pub fee_tier: Option<i32>,
    /// First token of the pool
    pub token0: String,
    /// Second token of the pool
    pub token1: String,
}
