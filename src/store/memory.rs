use super::AuctionStore;
use crate::auction::model::{Auction, AuctionStatus};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// 메모리 경매 저장소 (DATABASE_URL 미설정 시 및 테스트용)
#[derive(Default)]
pub struct MemoryAuctionStore {
    auctions: RwLock<HashMap<String, Auction>>,
}

impl MemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuctionStore for MemoryAuctionStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&auction.id) {
            return Err(StoreError::Duplicate(auction.id.clone()));
        }
        auctions.insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: &str,
        status: AuctionStatus,
        ends_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut auctions = self.auctions.write().await;
        match auctions.get_mut(id) {
            Some(auction) if auction.status != AuctionStatus::Completed => {
                auction.status = status;
                auction.ends_at = Some(ends_at);
            }
            // 이미 종료되었거나 없는 경매
            _ => {}
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Auction, StoreError> {
        self.auctions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self, status: Option<AuctionStatus>) -> Result<Vec<Auction>, StoreError> {
        let mut auctions: Vec<Auction> = self
            .auctions
            .read()
            .await
            .values()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        auctions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(auctions)
    }
}
