/// Discovered arbitrage paths and their swap steps
pub mod arbitrage_path;
/// Liquidity pools
pub mod pool;
/// ERC20 tokens
pub mod token;
