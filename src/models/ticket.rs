use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Pricing tier for a single admission unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    General,
    #[serde(rename = "VIP")]
    Vip,
    #[serde(rename = "VVIP")]
    Vvip,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::General => "General",
            TicketType::Vip => "VIP",
            TicketType::Vvip => "VVIP",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "General" => Ok(TicketType::General),
            "VIP" => Ok(TicketType::Vip),
            "VVIP" => Ok(TicketType::Vvip),
            other => Err(format!("Unknown ticket type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub ticket_number: String,
    pub concert_id: Uuid,
    pub order_id: Uuid,
    pub ticket_type: String,
    pub price: Decimal,
    pub status: String,
    pub qr_code: String,
    pub purchased_at: DateTime<Utc>,
}

/// Ticket joined with its concert, venue and order, for "my tickets" views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TicketView {
    pub id: Uuid,
    pub ticket_number: String,
    pub ticket_type: String,
    pub price: Decimal,
    pub status: String,
    pub qr_code: String,
    pub purchased_at: DateTime<Utc>,
    pub concert_title: String,
    pub artist: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: String,
    pub order_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_type_round_trips_through_strings() {
        for tt in [TicketType::General, TicketType::Vip, TicketType::Vvip] {
            assert_eq!(tt.as_str().parse::<TicketType>(), Ok(tt));
        }
    }

    #[test]
    fn unknown_ticket_type_is_rejected() {
        assert!("Premium".parse::<TicketType>().is_err());
        assert!("vip".parse::<TicketType>().is_err());
    }
}
