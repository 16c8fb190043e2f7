use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;

/// Whether checkout charges the price snapshot captured when a line was
/// added to the cart, or recomputes each line from the concert's current
/// base price. Snapshot pricing is the default; revalidation is opt-in
/// via `PRICE_POLICY=revalidate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricePolicy {
    #[default]
    Snapshot,
    Revalidate,
}

impl PricePolicy {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("revalidate") => PricePolicy::Revalidate,
            Some("snapshot") | None => PricePolicy::Snapshot,
            Some(other) => {
                tracing::warn!(
                    "Unknown PRICE_POLICY '{}', falling back to snapshot pricing",
                    other
                );
                PricePolicy::Snapshot
            }
        }
    }

    pub fn from_env() -> Self {
        Self::parse(env::var("PRICE_POLICY").ok().as_deref())
    }
}

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub price_policy: PricePolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/stagepass".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            price_policy: PricePolicy::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_policy_defaults_to_snapshot() {
        assert_eq!(PricePolicy::parse(None), PricePolicy::Snapshot);
        assert_eq!(PricePolicy::parse(Some("snapshot")), PricePolicy::Snapshot);
    }

    #[test]
    fn price_policy_accepts_revalidate() {
        assert_eq!(
            PricePolicy::parse(Some("revalidate")),
            PricePolicy::Revalidate
        );
    }

    #[test]
    fn unknown_price_policy_falls_back_to_snapshot() {
        assert_eq!(PricePolicy::parse(Some("dynamic")), PricePolicy::Snapshot);
    }
}
