/// 경매 관련 커맨드 처리
/// 1. 경매 생성 (저장 후 만료 예약)
// region:    --- Imports
use crate::auction::model::{Auction, AuctionStatus, ProductCondition};
use crate::error::AuctionError;
use crate::scheduler::ExpiryScheduler;
use crate::store::AuctionStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;
// endregion: --- Imports

// region:    --- Commands
/// 경매 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateAuctionCommand {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

impl CreateAuctionCommand {
    fn validate(&self) -> Result<(), AuctionError> {
        if self.product_name.trim().chars().count() <= 1 {
            return Err(AuctionError::Validation(
                "상품명은 2자 이상이어야 합니다.".to_string(),
            ));
        }
        if self.category.trim().chars().count() <= 2 {
            return Err(AuctionError::Validation(
                "카테고리는 3자 이상이어야 합니다.".to_string(),
            ));
        }
        if self.description.trim().chars().count() <= 10 {
            return Err(AuctionError::Validation(
                "설명은 11자 이상이어야 합니다.".to_string(),
            ));
        }
        Ok(())
    }
}

/// 1. 경매 생성
/// 저장에 성공한 경우에만 만료를 예약한다.
pub async fn create_auction(
    cmd: CreateAuctionCommand,
    store: &dyn AuctionStore,
    scheduler: &ExpiryScheduler,
) -> Result<Auction, AuctionError> {
    info!("{:<12} --> 경매 생성 요청 처리 시작: {:?}", "Command", cmd);
    cmd.validate()?;

    let auction = Auction {
        id: Uuid::new_v4().to_string(),
        product_name: cmd.product_name,
        category: cmd.category,
        description: cmd.description,
        condition: cmd.condition,
        status: AuctionStatus::Active,
        timestamp: Utc::now(),
        ends_at: None,
    };

    if let Err(e) = store.insert(&auction).await {
        error!("{:<12} --> 경매 저장 실패: {:?}", "Command", e);
        return Err(AuctionError::Store(e));
    }

    scheduler.schedule(&auction.id);
    info!("{:<12} --> 경매 생성 완료 id: {}", "Command", auction.id);

    Ok(auction)
}
// endregion: --- Commands

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::scheduler::ExpirySettings;
    use crate::store::{MemoryAuctionStore, MockAuctionStore};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    fn command() -> CreateAuctionCommand {
        CreateAuctionCommand {
            product_name: "Mechanical keyboard".to_string(),
            category: "Electronics".to_string(),
            description: "Tenkeyless, brown switches, barely used".to_string(),
            condition: ProductCondition::Used,
        }
    }

    fn scheduler(store: Arc<dyn AuctionStore>) -> ExpiryScheduler {
        ExpiryScheduler::new(
            store,
            Arc::new(Mutex::new(())),
            ExpirySettings {
                duration: Duration::from_secs(60),
                update_timeout: Duration::from_secs(1),
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_auction_inserts_active_and_schedules() {
        let store = Arc::new(MemoryAuctionStore::new());
        let scheduler = scheduler(store.clone());

        let auction = create_auction(command(), store.as_ref(), &scheduler)
            .await
            .unwrap();

        assert_eq!(auction.status, AuctionStatus::Active);
        assert!(auction.ends_at.is_none());
        assert!(Uuid::parse_str(&auction.id).is_ok());
        assert_eq!(store.find_by_id(&auction.id).await.unwrap(), auction);
        assert_eq!(scheduler.pending(), 1);

        assert!(scheduler.shutdown(Duration::from_secs(120)).await);
        let stored = store.find_by_id(&auction.id).await.unwrap();
        assert_eq!(stored.status, AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_insert_failure_skips_scheduling() {
        let mut store = MockAuctionStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));
        store.expect_update_status().never();
        let store: Arc<dyn AuctionStore> = Arc::new(store);
        let scheduler = scheduler(Arc::clone(&store));

        let result = create_auction(command(), store.as_ref(), &scheduler).await;

        assert!(matches!(result, Err(AuctionError::Store(_))));
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_invalid_command_is_rejected_before_insert() {
        let mut store = MockAuctionStore::new();
        store.expect_insert().never();
        let store: Arc<dyn AuctionStore> = Arc::new(store);
        let scheduler = scheduler(Arc::clone(&store));

        let mut cmd = command();
        cmd.description = "too short".to_string();

        let result = create_auction(cmd, store.as_ref(), &scheduler).await;
        assert!(matches!(result, Err(AuctionError::Validation(_))));
    }
}
