use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::{GraphSource, PathStore};
use crate::error::StoreError;
use crate::models::arbitrage_path::{NewArbitrageStep, PathRecord};
use crate::models::pool::Pool;
use crate::models::token::Token;
use crate::schemas::{arbitrage_paths, arbitrage_steps, pools, tokens};
use crate::utils::db_connect::DbPool;

/// Postgres backed [`GraphSource`] and [`PathStore`]
#[derive(Clone)]
pub struct PgStore {
    /// Connection pool
    db: DbPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    #[must_use]
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GraphSource for PgStore {
    async fn load_tokens(&self) -> Result<Vec<Token>, StoreError> {
        let mut conn = self.db.get().await?;
        let rows = tokens::table
            .select(Token::as_select())
            .order(tokens::address.asc())
            .load::<Token>(&mut conn)
            .await?;
        Ok(rows)
    }

    async fn load_pools(&self) -> Result<Vec<Pool>, StoreError> {
        let mut conn = self.db.get().await?;
        let rows = pools::table
            .select(Pool::as_select())
            .order(pools::address.asc())
            .load::<Pool>(&mut conn)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl PathStore for PgStore {
    async fn insert_batch(&self, batch: &[PathRecord]) -> Result<Vec<i32>, StoreError> {
        let mut conn = self.db.get().await?;

        let ids = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let mut ids = Vec::with_capacity(batch.len());
                    for record in batch {
                        let path_id: i32 = diesel::insert_into(arbitrage_paths::table)
                            .values(&record.path)
                            .returning(arbitrage_paths::id)
                            .get_result(conn)
                            .await?;

                        let steps: Vec<NewArbitrageStep<'_>> = record
                            .steps
                            .iter()
                            .map(|step| step.for_path(path_id))
                            .collect();
                        if !steps.is_empty() {
                            diesel::insert_into(arbitrage_steps::table)
                                .values(&steps)
                                .execute(conn)
                                .await?;
                        }
                        ids.push(path_id);
                    }
                    Ok(ids)
                }
                .scope_boxed()
            })
            .await?;

        Ok(ids)
    }

    async fn clear_paths(&self) -> Result<usize, StoreError> {
        let mut conn = self.db.get().await?;

        let removed = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(arbitrage_steps::table).execute(conn).await?;
                    diesel::delete(arbitrage_paths::table).execute(conn).await
                }
                .scope_boxed()
            })
            .await?;

        Ok(removed)
    }

    async fn path_summary(&self) -> Result<Vec<(i32, i64)>, StoreError> {
        let mut conn = self.db.get().await?;
        let rows = arbitrage_paths::table
            .group_by(arbitrage_paths::length)
            .select((arbitrage_paths::length, count_star()))
            .order(arbitrage_paths::length.asc())
            .load::<(i32, i64)>(&mut conn)
            .await?;
        Ok(rows)
    }
}
