use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Concert {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub artist: String,
    pub genre: String,
    pub image_url: Option<String>,
    pub event_date: DateTime<Utc>,
    pub base_price: Decimal,
    pub available_tickets: i32,
    pub total_tickets: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Concert joined with its venue, as shown in listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConcertListing {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub image_url: Option<String>,
    pub event_date: DateTime<Utc>,
    pub base_price: Decimal,
    pub available_tickets: i32,
    pub total_tickets: i32,
    pub venue_name: String,
    pub venue_city: String,
}

/// Detail view: the concert, its venue, and how much of the house is left.
#[derive(Debug, Clone, Serialize)]
pub struct ConcertDetails {
    #[serde(flatten)]
    pub concert: Concert,
    pub venue: super::venue::Venue,
    pub availability_percent: Decimal,
}

impl ConcertDetails {
    pub fn availability_percent(available: i32, total: i32) -> Decimal {
        if total <= 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(available) / Decimal::from(total) * Decimal::from(100)).round_dp(1)
    }
}

/// Payload for admin concert create/update.
#[derive(Debug, Clone, Deserialize)]
pub struct ConcertInput {
    pub venue_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub artist: String,
    pub genre: String,
    pub image_url: Option<String>,
    pub event_date: DateTime<Utc>,
    pub base_price: Decimal,
    pub available_tickets: i32,
    pub total_tickets: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_percent_rounds_to_one_decimal() {
        assert_eq!(
            ConcertDetails::availability_percent(1, 3),
            Decimal::new(333, 1)
        );
        assert_eq!(
            ConcertDetails::availability_percent(50, 200),
            Decimal::from(25)
        );
    }

    #[test]
    fn availability_percent_handles_empty_house() {
        assert_eq!(ConcertDetails::availability_percent(0, 0), Decimal::ZERO);
    }
}
