/// 경매 생성
pub const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (id, product_name, category, description, condition, status, timestamp, ends_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

/// 경매 상태 변경 (completed 이후에는 변경하지 않음)
pub const UPDATE_AUCTION_STATUS: &str =
    "UPDATE auctions SET status = $2, ends_at = $3 WHERE id = $1 AND status <> 'completed'";

/// 경매 조회
pub const GET_AUCTION: &str = "SELECT id, product_name, category, description, condition, status, timestamp, ends_at FROM auctions WHERE id = $1";

/// 경매 목록 조회 (상태 필터 선택)
pub const LIST_AUCTIONS: &str = r#"
    SELECT id, product_name, category, description, condition, status, timestamp, ends_at
    FROM auctions
    WHERE ($1::TEXT IS NULL OR status = $1)
    ORDER BY timestamp DESC
"#;
