use thiserror::Error;

/// 경매 저장소 오류
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] sqlx::Error),
    #[error("경매를 찾을 수 없습니다: {0}")]
    NotFound(String),
    #[error("저장된 경매 데이터가 올바르지 않습니다: {0}")]
    Corrupt(String),
    #[error("이미 존재하는 경매입니다: {0}")]
    Duplicate(String),
}

/// 경매 생성/조회 유스케이스 오류
#[derive(Debug, Error)]
pub enum AuctionError {
    #[error("잘못된 경매 요청: {0}")]
    Validation(String),
    #[error("경매를 찾을 수 없습니다: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuctionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => AuctionError::NotFound(id),
            other => AuctionError::Store(other),
        }
    }
}

impl AuctionError {
    /// 응답 코드 문자열
    pub fn code(&self) -> &'static str {
        match self {
            AuctionError::Validation(_) => "INVALID_AUCTION",
            AuctionError::NotFound(_) => "NOT_FOUND",
            AuctionError::Store(_) => "STORE_ERROR",
        }
    }
}
