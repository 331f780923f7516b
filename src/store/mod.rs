// region:    --- Imports
use crate::auction::model::{Auction, AuctionRow, AuctionStatus};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, info};

#[cfg(test)]
use mockall::automock;

mod memory;
pub mod queries;

pub use memory::MemoryAuctionStore;

// endregion: --- Imports

// region:    --- Auction Store Trait
/// 경매 저장소 트레이트
///
/// `update_status`는 completed 상태를 되돌리지 않으며, 이미 completed인 경매에
/// 다시 호출해도 성공을 반환해야 한다.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError>;

    async fn update_status(
        &self,
        id: &str,
        status: AuctionStatus,
        ends_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Auction, StoreError>;

    async fn list(&self, status: Option<AuctionStatus>) -> Result<Vec<Auction>, StoreError>;
}
// endregion: --- Auction Store Trait

// region:    --- Postgres Auction Store
/// 경매 저장소 구현체 (PostgreSQL)
pub struct PostgresAuctionStore {
    pool: Arc<PgPool>,
}

impl PostgresAuctionStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuctionStore for PostgresAuctionStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_AUCTION)
            .bind(&auction.id)
            .bind(&auction.product_name)
            .bind(&auction.category)
            .bind(&auction.description)
            .bind(auction.condition.as_str())
            .bind(auction.status.as_str())
            .bind(auction.timestamp)
            .bind(auction.ends_at)
            .execute(&*self.pool)
            .await
            .map_err(|e| {
                // 기본 키 충돌
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return StoreError::Duplicate(auction.id.clone());
                    }
                }
                StoreError::Database(e)
            })?;

        info!("{:<12} --> 경매 저장 id: {}", "Store", auction.id);
        Ok(())
    }

    async fn update_status(
        &self,
        id: &str,
        status: AuctionStatus,
        ends_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(queries::UPDATE_AUCTION_STATUS)
            .bind(id)
            .bind(status.as_str())
            .bind(ends_at)
            .execute(&*self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!(
                "{:<12} --> 변경된 경매 없음 (이미 종료되었거나 없는 경매) id: {}",
                "Store", id
            );
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Auction, StoreError> {
        let row = sqlx::query_as::<_, AuctionRow>(queries::GET_AUCTION)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        Auction::try_from(row).map_err(StoreError::Corrupt)
    }

    async fn list(&self, status: Option<AuctionStatus>) -> Result<Vec<Auction>, StoreError> {
        let rows = sqlx::query_as::<_, AuctionRow>(queries::LIST_AUCTIONS)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&*self.pool)
            .await?;

        rows.into_iter()
            .map(|row| Auction::try_from(row).map_err(StoreError::Corrupt))
            .collect()
    }
}
// endregion: --- Postgres Auction Store
