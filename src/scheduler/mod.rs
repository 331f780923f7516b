/// 경매 만료 스케줄러
/// 경매가 저장된 직후 `schedule`이 호출되면, 설정된 시간이 지난 뒤 경매를 completed로 변경한다.
/// 만료 시 상태 업데이트는 하나의 락으로 직렬화되며, 실패해도 재시도하지 않는다.
// region:    --- Imports
use crate::auction::model::AuctionStatus;
use crate::config;
use crate::store::AuctionStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, timeout};
use tokio_util::task::TaskTracker;
use tracing::{error, info, warn};

// endregion: --- Imports

// region:    --- Expiry Settings
#[derive(Debug, Clone, Copy)]
pub struct ExpirySettings {
    /// 경매 진행 시간
    pub duration: Duration,
    /// 만료 시 저장소 업데이트 한 번에 허용되는 시간 (락 대기 시간은 제외)
    pub update_timeout: Duration,
}

impl Default for ExpirySettings {
    fn default() -> Self {
        Self {
            duration: config::DEFAULT_AUCTION_DURATION,
            update_timeout: config::DEFAULT_UPDATE_TIMEOUT,
        }
    }
}

impl From<&config::Config> for ExpirySettings {
    fn from(config: &config::Config) -> Self {
        Self {
            duration: config.auction_duration,
            update_timeout: config.update_timeout,
        }
    }
}
// endregion: --- Expiry Settings

// region:    --- Expiry Scheduler
/// 경매 만료 스케줄러
#[derive(Clone)]
pub struct ExpiryScheduler {
    store: Arc<dyn AuctionStore>,
    update_lock: Arc<Mutex<()>>,
    settings: ExpirySettings,
    task_tracker: TaskTracker,
}

impl ExpiryScheduler {
    /// 만료 스케줄러 생성
    /// `update_lock`은 이 스케줄러의 모든 만료 업데이트를 직렬화한다.
    pub fn new(
        store: Arc<dyn AuctionStore>,
        update_lock: Arc<Mutex<()>>,
        settings: ExpirySettings,
    ) -> Self {
        Self {
            store,
            update_lock,
            settings,
            task_tracker: TaskTracker::new(),
        }
    }

    /// 아직 만료 처리가 끝나지 않은 경매 수
    pub fn pending(&self) -> usize {
        self.task_tracker.len()
    }

    /// 경매 만료 예약
    /// 타이머만 등록하고 바로 반환한다. 등록된 타이머는 취소할 수 없다.
    pub fn schedule(&self, auction_id: &str) {
        let auction_id = auction_id.to_string();
        let store = Arc::clone(&self.store);
        let update_lock = Arc::clone(&self.update_lock);
        let settings = self.settings;

        info!(
            "{:<12} --> 경매 만료 예약 id: {}, {:?} 후 종료",
            "Scheduler", auction_id, settings.duration
        );

        self.task_tracker.spawn(async move {
            sleep(settings.duration).await;
            Self::expire(
                store.as_ref(),
                &update_lock,
                &auction_id,
                settings.update_timeout,
            )
            .await;
        });
    }

    /// 만료 처리: 상태를 completed로, ends_at을 현재 시각으로 변경
    /// 결과와 상관없이 한 번만 시도한다.
    async fn expire(
        store: &dyn AuctionStore,
        update_lock: &Mutex<()>,
        auction_id: &str,
        update_timeout: Duration,
    ) {
        let _guard = update_lock.lock().await;
        let ends_at = Utc::now();

        match timeout(
            update_timeout,
            store.update_status(auction_id, AuctionStatus::Completed, ends_at),
        )
        .await
        {
            Ok(Ok(())) => info!("{:<12} --> 경매 종료 id: {}", "Scheduler", auction_id),
            Ok(Err(e)) => error!(
                "{:<12} --> 경매 종료 실패 id: {}: {:?}",
                "Scheduler", auction_id, e
            ),
            Err(_) => error!(
                "{:<12} --> 경매 종료 시간 초과 id: {} ({:?})",
                "Scheduler", auction_id, update_timeout
            ),
        }
    }

    /// 스케줄러 종료
    /// 진행 중인 만료 작업을 `grace` 동안 기다린다. 모두 끝나면 true,
    /// 남은 작업을 포기하면 false를 반환한다.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.task_tracker.close();
        if timeout(grace, self.task_tracker.wait()).await.is_ok() {
            info!("{:<12} --> 모든 만료 작업 완료", "Scheduler");
            return true;
        }
        warn!(
            "{:<12} --> 종료 대기 시간 초과, 만료 작업 {}개 포기",
            "Scheduler",
            self.task_tracker.len()
        );
        false
    }
}
// endregion: --- Expiry Scheduler
