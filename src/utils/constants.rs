/// WETH address on Base
pub const WETH: &str = "0x4200000000000000000000000000000000000006";
/// Symbol used to find the anchor when its address is not in the token set
pub const DEFAULT_ANCHOR_SYMBOL: &str = "WETH";
/// Separator between symbols in a stored swap path
pub const SWAP_PATH_SEPARATOR: &str = " -> ";
/// Cycles queued between the search and the flush task before the search blocks
pub const CYCLE_CHANNEL_CAPACITY: usize = 10_000;
/// Maximum number of pooled database connections
pub const DB_POOL_SIZE: usize = 15;
