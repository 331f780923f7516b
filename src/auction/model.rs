use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// region:    --- Enums
/// 상품 상태
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
}

/// 경매 상태 (active -> completed 단방향)
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "new",
            ProductCondition::Used => "used",
        }
    }
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Active => "active",
            AuctionStatus::Completed => "completed",
        }
    }
}

impl FromStr for ProductCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ProductCondition::New),
            "used" => Ok(ProductCondition::Used),
            other => Err(format!("알 수 없는 상품 상태: {}", other)),
        }
    }
}

impl FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AuctionStatus::Active),
            "completed" => Ok(AuctionStatus::Completed),
            other => Err(format!("알 수 없는 경매 상태: {}", other)),
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
// endregion: --- Enums

// region:    --- Auction
/// 경매 모델
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Auction {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    pub timestamp: DateTime<Utc>,
    // 만료 시점에 스케줄러가 설정
    pub ends_at: Option<DateTime<Utc>>,
}

/// 데이터베이스 행
#[derive(sqlx::FromRow)]
pub struct AuctionRow {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl TryFrom<AuctionRow> for Auction {
    type Error = String;

    fn try_from(row: AuctionRow) -> Result<Self, Self::Error> {
        Ok(Auction {
            condition: row.condition.parse()?,
            status: row.status.parse()?,
            id: row.id,
            product_name: row.product_name,
            category: row.category,
            description: row.description,
            timestamp: row.timestamp,
            ends_at: row.ends_at,
        })
    }
}
// endregion: --- Auction
