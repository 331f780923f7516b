// region:    --- Imports
use crate::auction::model::{Auction, AuctionStatus};
use crate::error::AuctionError;
use crate::store::AuctionStore;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 경매 조회
pub async fn get_auction(
    store: &dyn AuctionStore,
    auction_id: &str,
) -> Result<Auction, AuctionError> {
    info!("{:<12} --> 경매 조회 id: {}", "Query", auction_id);
    Ok(store.find_by_id(auction_id).await?)
}

/// 경매 목록 조회
pub async fn list_auctions(
    store: &dyn AuctionStore,
    status: Option<AuctionStatus>,
) -> Result<Vec<Auction>, AuctionError> {
    info!("{:<12} --> 경매 목록 조회 status: {:?}", "Query", status);
    Ok(store.list(status).await?)
}

// endregion: --- Query Handlers

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MockAuctionStore;

    #[tokio::test]
    async fn test_missing_auction_maps_to_not_found() {
        let mut store = MockAuctionStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Err(StoreError::NotFound(id.to_string())));

        let result = get_auction(&store, "nope").await;
        assert!(matches!(result, Err(AuctionError::NotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn test_list_passes_status_filter() {
        let mut store = MockAuctionStore::new();
        store
            .expect_list()
            .withf(|status| status == &Some(AuctionStatus::Completed))
            .times(1)
            .returning(|_| Ok(vec![]));

        let auctions = list_auctions(&store, Some(AuctionStatus::Completed))
            .await
            .unwrap();
        assert!(auctions.is_empty());
    }
}
