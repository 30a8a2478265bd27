//! Locates the anchor token every cycle starts and ends at.

use log::{debug, info};

use super::graph::{TokenGraph, TokenIndex};
use crate::error::DiscoveryError;
use crate::models::token::Token;

/// Finds the anchor token.
///
/// Resolution order:
/// 1. case-insensitive match on `address`
/// 2. case-insensitive match on `symbol`, first token in input order wins
///
/// # Errors
/// * `AnchorNotFound` if neither lookup matches
pub fn resolve_anchor<'a>(
    tokens: &'a [Token],
    address: &str,
    symbol: &str,
) -> Result<&'a Token, DiscoveryError> {
    let address = address.trim();
    if let Some(token) = tokens
        .iter()
        .find(|token| token.address.trim().eq_ignore_ascii_case(address))
    {
        info!("anchor::resolve: Anchor {} found by address", token.address);
        return Ok(token);
    }

    debug!("anchor::resolve: {address} not in token set, trying symbol {symbol}");
    let by_symbol = tokens.iter().find(|token| {
        token
            .symbol
            .as_deref()
            .is_some_and(|candidate| candidate.trim().eq_ignore_ascii_case(symbol.trim()))
    });

    match by_symbol {
        Some(token) => {
            info!(
                "anchor::resolve: Anchor {} found by symbol {symbol}",
                token.address
            );
            Ok(token)
        }
        None => Err(DiscoveryError::AnchorNotFound {
            address: address.to_string(),
            symbol: symbol.to_string(),
        }),
    }
}

/// Confirms the anchor has at least one pool and returns its graph index.
///
/// # Errors
/// * `AnchorDisconnected` if no pool references the anchor
pub fn ensure_connected(graph: &TokenGraph, anchor: &Token) -> Result<TokenIndex, DiscoveryError> {
    graph
        .token_index(&anchor.address)
        .filter(|&index| !graph.edges(index).is_empty())
        .ok_or_else(|| DiscoveryError::AnchorDisconnected(anchor.address.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arb::test_helpers::*;

    #[test]
    fn test_resolve_by_address_ignores_case() {
        let tokens = tokens(&[("0xAAA", "USDC"), ("0xBbB", "WETH")]);
        let anchor = resolve_anchor(&tokens, "0xbbb", "NONE").unwrap();
        assert_eq!(anchor.address, "0xBbB");
    }

    #[test]
    fn test_address_wins_over_symbol() {
        let tokens = tokens(&[("0xAAA", "WETH"), ("0xBBB", "OTHER")]);
        let anchor = resolve_anchor(&tokens, "0xbbb", "WETH").unwrap();
        assert_eq!(anchor.address, "0xBBB");
    }

    #[test]
    fn test_symbol_fallback_ignores_case() {
        let tokens = tokens(&[("0xAAA", "USDC"), ("0xBBB", "weth"), ("0xCCC", "WETH")]);
        let anchor = resolve_anchor(&tokens, "0x4200000000000000000000000000000000000006", "WETH")
            .unwrap();
        assert_eq!(anchor.address, "0xBBB");
    }

    #[test]
    fn test_not_found() {
        let tokens = tokens(&[("0xAAA", "USDC")]);
        let err = resolve_anchor(&tokens, "0xBBB", "WETH").unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::AnchorNotFound { ref address, ref symbol }
                if address == "0xBBB" && symbol == "WETH"
        ));
    }

    #[test]
    fn test_token_without_symbol_is_skipped() {
        let mut tokens = tokens(&[("0xAAA", "WETH")]);
        tokens[0].symbol = None;
        assert!(resolve_anchor(&tokens, "0xBBB", "WETH").is_err());
    }

    #[test]
    fn test_connected_anchor() {
        let tokens = tokens(&[("WETH", "WETH"), ("A", "A")]);
        let graph = TokenGraph::new(&pools(&[("P1", "WETH", "A")]));
        let index = ensure_connected(&graph, &tokens[0]).unwrap();
        assert_eq!(graph.token(index), "weth");
    }

    #[test]
    fn test_disconnected_anchor() {
        let tokens = tokens(&[("WETH", "WETH"), ("A", "A"), ("B", "B")]);
        let graph = TokenGraph::new(&pools(&[("P1", "A", "B")]));
        let err = ensure_connected(&graph, &tokens[0]).unwrap_err();
        assert!(matches!(err, DiscoveryError::AnchorDisconnected(ref address) if address == "WETH"));
    }
}
