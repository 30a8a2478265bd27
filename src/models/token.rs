use diesel::{Queryable, Selectable};

/// An ingested token. Read-only during a discovery run.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schemas::tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Token {
    /// Token contract address (primary key)
    pub address: String,
    /// Human readable name
    pub name: Option<String>,
    /// Display symbol, e.g. `WETH`
    pub symbol: Option<String>,
    /// Decimal precision
    pub decimals: i32,
}
