// region:    --- Imports
use auction_expiry_service::config::Config;
use auction_expiry_service::database::DatabaseManager;
use auction_expiry_service::handlers;
use auction_expiry_service::scheduler::{ExpiryScheduler, ExpirySettings};
use auction_expiry_service::store::{AuctionStore, MemoryAuctionStore, PostgresAuctionStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env();
    info!(
        "{:<12} --> 경매 진행 시간: {:?}, 업데이트 제한 시간: {:?}",
        "Main", config.auction_duration, config.update_timeout
    );

    // 저장소 생성 (DATABASE_URL이 없으면 메모리 저장소)
    let store: Arc<dyn AuctionStore> = match &config.database_url {
        Some(url) => {
            let db_manager = DatabaseManager::new(url).await?;
            if let Err(e) = db_manager.initialize_database().await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
            Arc::new(PostgresAuctionStore::new(db_manager.get_pool()))
        }
        None => {
            warn!(
                "{:<12} --> DATABASE_URL 미설정, 메모리 저장소 사용 (재시작 시 데이터 유실)",
                "Main"
            );
            Arc::new(MemoryAuctionStore::new())
        }
    };

    // 경매 만료 스케줄러
    let scheduler = ExpiryScheduler::new(
        Arc::clone(&store),
        Arc::new(Mutex::new(())),
        ExpirySettings::from(&config),
    );

    let routes_all = handlers::routes((store, scheduler.clone()));

    // 리스너 생성
    let listener = TcpListener::bind(&config.server_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행 (Ctrl+C 시 종료)
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }

    // 진행 중인 만료 작업 대기
    scheduler.shutdown(config.shutdown_grace).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("{:<12} --> 종료 신호 수신 실패: {:?}", "Main", e);
        std::future::pending::<()>().await;
    }
    info!("{:<12} --> 종료 신호 수신", "Main");
}
// endregion: --- Main
