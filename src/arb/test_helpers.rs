use super::types::Cycle;
use crate::models::pool::Pool;
use crate::models::token::Token;

#[allow(dead_code)]
pub fn token(address: &str, symbol: &str) -> Token {
    Token {
        address: address.to_string(),
        name: Some(format!("{symbol} token")),
        symbol: Some(symbol.to_string()),
        decimals: 18,
    }
}

#[allow(dead_code)]
pub fn tokens(token_args: &[(&str, &str)]) -> Vec<Token> {
    token_args
        .iter()
        .map(|(address, symbol)| token(address, symbol))
        .collect()
}

#[allow(dead_code)]
pub fn pool(address: &str, token0: &str, token1: &str) -> Pool {
    Pool {
        address: address.to_string(),
        dex_type: "uniswap_v2".to_string(),
        fee_tier: Some(3000),
        token0: token0.to_string(),
        token1: token1.to_string(),
    }
}

#[allow(dead_code)]
pub fn pools(pool_args: &[(&str, &str, &str)]) -> Vec<Pool> {
    pool_args
        .iter()
        .map(|(address, token0, token1)| pool(address, token0, token1))
        .collect()
}

#[allow(dead_code)]
pub fn cycle(tokens: &[&str], pools: &[&str]) -> Cycle {
    Cycle {
        tokens: tokens.iter().map(ToString::to_string).collect(),
        pools: pools.iter().map(ToString::to_string).collect(),
    }
}
