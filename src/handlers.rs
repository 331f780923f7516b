// region:    --- Imports
use crate::auction::commands::{create_auction, CreateAuctionCommand};
use crate::auction::model::AuctionStatus;
use crate::error::AuctionError;
use crate::query;
use crate::scheduler::ExpiryScheduler;
use crate::store::AuctionStore;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

// endregion: --- Imports

/// 라우터 공유 상태
pub type AppState = (Arc<dyn AuctionStore>, ExpiryScheduler);

// region:    --- Router
/// 라우터 설정
pub fn routes(state: AppState) -> Router {
    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auction", post(handle_create_auction))
        .route("/auction/:id", get(handle_get_auction))
        .route("/auctions", get(handle_list_auctions))
        .layer(cors)
        .with_state(state)
}
// endregion: --- Router

// region:    --- Error Response
impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuctionError::Validation(_) => StatusCode::BAD_REQUEST,
            AuctionError::NotFound(_) => StatusCode::NOT_FOUND,
            AuctionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
// endregion: --- Error Response

// region:    --- Command Handlers

/// 경매 생성 요청 처리
pub async fn handle_create_auction(
    State((store, scheduler)): State<AppState>,
    payload: Result<Json<CreateAuctionCommand>, JsonRejection>,
) -> impl IntoResponse {
    let Json(cmd) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("{:<12} --> 잘못된 요청 본문: {}", "Handler", rejection.body_text());
            return AuctionError::Validation(rejection.body_text()).into_response();
        }
    };
    info!("{:<12} --> 경매 생성 요청: {:?}", "Handler", cmd);
    match create_auction(cmd, store.as_ref(), &scheduler).await {
        Ok(auction) => (StatusCode::CREATED, Json(auction)).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

#[derive(Debug, Deserialize)]
pub struct ListAuctionsParams {
    pub status: Option<AuctionStatus>,
}

/// 경매 조회
pub async fn handle_get_auction(
    State((store, _)): State<AppState>,
    Path(auction_id): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 조회 id: {}", "HandlerQuery", auction_id);
    match query::handlers::get_auction(store.as_ref(), &auction_id).await {
        Ok(auction) => Json(auction).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 경매 목록 조회
pub async fn handle_list_auctions(
    State((store, _)): State<AppState>,
    params: Result<Query<ListAuctionsParams>, QueryRejection>,
) -> impl IntoResponse {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            warn!("{:<12} --> 잘못된 조회 조건: {}", "HandlerQuery", rejection.body_text());
            return AuctionError::Validation(rejection.body_text()).into_response();
        }
    };
    info!("{:<12} --> 경매 목록 조회: {:?}", "HandlerQuery", params);
    match query::handlers::list_auctions(store.as_ref(), params.status).await {
        Ok(auctions) => Json(auctions).into_response(),
        Err(e) => e.into_response(),
    }
}

// endregion: --- Query Handlers
