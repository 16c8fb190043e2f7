//! Read access to the concert catalog plus the admin-facing CRUD.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::concert::{Concert, ConcertDetails, ConcertInput, ConcertListing};
use crate::models::venue::{Venue, VenueInput};
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct CatalogStore {
    pool: PgPool,
}

impl CatalogStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active concerts with venue info, optionally narrowed by genre and a
    /// title/artist substring search, soonest event first.
    pub async fn list_concerts(
        &self,
        genre: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<ConcertListing>, AppError> {
        let listings = sqlx::query_as::<_, ConcertListing>(
            r#"
            SELECT c.id, c.title, c.artist, c.genre, c.image_url, c.event_date,
                   c.base_price, c.available_tickets, c.total_tickets,
                   v.name AS venue_name, v.city AS venue_city
            FROM concerts c
            JOIN venues v ON v.id = c.venue_id
            WHERE c.is_active
              AND ($1::text IS NULL OR c.genre = $1)
              AND ($2::text IS NULL OR c.title ILIKE '%' || $2 || '%'
                                    OR c.artist ILIKE '%' || $2 || '%')
            ORDER BY c.event_date
            "#,
        )
        .bind(genre)
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    /// Distinct genres across active concerts, for the filter dropdown.
    pub async fn list_genres(&self) -> Result<Vec<String>, AppError> {
        let genres = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT genre FROM concerts WHERE is_active ORDER BY genre",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    pub async fn get_concert(&self, concert_id: Uuid) -> Result<Concert, AppError> {
        sqlx::query_as::<_, Concert>("SELECT * FROM concerts WHERE id = $1")
            .bind(concert_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Concert {} was not found", concert_id)))
    }

    pub async fn get_details(&self, concert_id: Uuid) -> Result<ConcertDetails, AppError> {
        let concert = self.get_concert(concert_id).await?;

        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(concert.venue_id)
            .fetch_one(&self.pool)
            .await?;

        let availability_percent =
            ConcertDetails::availability_percent(concert.available_tickets, concert.total_tickets);

        Ok(ConcertDetails {
            concert,
            venue,
            availability_percent,
        })
    }

    /// Every concert regardless of active flag, newest first (admin view).
    pub async fn list_all_concerts(&self) -> Result<Vec<Concert>, AppError> {
        let concerts =
            sqlx::query_as::<_, Concert>("SELECT * FROM concerts ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(concerts)
    }

    pub async fn create_concert(&self, input: ConcertInput) -> Result<Concert, AppError> {
        validate_concert_input(&input)?;
        self.require_venue(input.venue_id).await?;

        let concert = Concert {
            id: Uuid::new_v4(),
            venue_id: input.venue_id,
            title: input.title,
            description: input.description,
            artist: input.artist,
            genre: input.genre,
            image_url: input.image_url,
            event_date: input.event_date,
            base_price: input.base_price,
            available_tickets: input.available_tickets,
            total_tickets: input.total_tickets,
            is_active: input.is_active,
            created_at: Utc::now(),
            updated_at: None,
        };

        sqlx::query(
            r#"
            INSERT INTO concerts
                (id, venue_id, title, description, artist, genre, image_url,
                 event_date, base_price, available_tickets, total_tickets,
                 is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(concert.id)
        .bind(concert.venue_id)
        .bind(&concert.title)
        .bind(&concert.description)
        .bind(&concert.artist)
        .bind(&concert.genre)
        .bind(&concert.image_url)
        .bind(concert.event_date)
        .bind(concert.base_price)
        .bind(concert.available_tickets)
        .bind(concert.total_tickets)
        .bind(concert.is_active)
        .bind(concert.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(concert_id = %concert.id, title = %concert.title, "Concert created");
        Ok(concert)
    }

    pub async fn update_concert(
        &self,
        concert_id: Uuid,
        input: ConcertInput,
    ) -> Result<Concert, AppError> {
        validate_concert_input(&input)?;
        self.require_venue(input.venue_id).await?;

        let mut concert = self.get_concert(concert_id).await?;
        concert.venue_id = input.venue_id;
        concert.title = input.title;
        concert.description = input.description;
        concert.artist = input.artist;
        concert.genre = input.genre;
        concert.image_url = input.image_url;
        concert.event_date = input.event_date;
        concert.base_price = input.base_price;
        concert.available_tickets = input.available_tickets;
        concert.total_tickets = input.total_tickets;
        concert.is_active = input.is_active;
        concert.updated_at = Some(Utc::now());

        sqlx::query(
            r#"
            UPDATE concerts
            SET venue_id = $2, title = $3, description = $4, artist = $5,
                genre = $6, image_url = $7, event_date = $8, base_price = $9,
                available_tickets = $10, total_tickets = $11, is_active = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(concert.id)
        .bind(concert.venue_id)
        .bind(&concert.title)
        .bind(&concert.description)
        .bind(&concert.artist)
        .bind(&concert.genre)
        .bind(&concert.image_url)
        .bind(concert.event_date)
        .bind(concert.base_price)
        .bind(concert.available_tickets)
        .bind(concert.total_tickets)
        .bind(concert.is_active)
        .bind(concert.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(concert)
    }

    pub async fn delete_concert(&self, concert_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM concerts WHERE id = $1")
            .bind(concert_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Concert {} was not found",
                concert_id
            )));
        }

        tracing::info!(concert_id = %concert_id, "Concert deleted");
        Ok(())
    }

    pub async fn list_venues(&self) -> Result<Vec<Venue>, AppError> {
        let venues = sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(venues)
    }

    pub async fn create_venue(&self, input: VenueInput) -> Result<Venue, AppError> {
        validate_venue_input(&input)?;

        let venue = Venue {
            id: Uuid::new_v4(),
            name: input.name,
            address: input.address,
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
            capacity: input.capacity,
            phone: input.phone,
            image_url: input.image_url,
            is_active: input.is_active,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO venues
                (id, name, address, city, state, postal_code, country,
                 capacity, phone, image_url, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.postal_code)
        .bind(&venue.country)
        .bind(venue.capacity)
        .bind(&venue.phone)
        .bind(&venue.image_url)
        .bind(venue.is_active)
        .bind(venue.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(venue_id = %venue.id, name = %venue.name, "Venue created");
        Ok(venue)
    }

    pub async fn update_venue(&self, venue_id: Uuid, input: VenueInput) -> Result<Venue, AppError> {
        validate_venue_input(&input)?;

        let existing = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(venue_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} was not found", venue_id)))?;

        let venue = Venue {
            id: existing.id,
            name: input.name,
            address: input.address,
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
            capacity: input.capacity,
            phone: input.phone,
            image_url: input.image_url,
            is_active: input.is_active,
            created_at: existing.created_at,
        };

        sqlx::query(
            r#"
            UPDATE venues
            SET name = $2, address = $3, city = $4, state = $5,
                postal_code = $6, country = $7, capacity = $8, phone = $9,
                image_url = $10, is_active = $11
            WHERE id = $1
            "#,
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.postal_code)
        .bind(&venue.country)
        .bind(venue.capacity)
        .bind(&venue.phone)
        .bind(&venue.image_url)
        .bind(venue.is_active)
        .execute(&self.pool)
        .await?;

        Ok(venue)
    }

    async fn require_venue(&self, venue_id: Uuid) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM venues WHERE id = $1)")
            .bind(venue_id)
            .fetch_one(&self.pool)
            .await?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Venue {} was not found",
                venue_id
            )));
        }
        Ok(())
    }
}

fn validate_concert_input(input: &ConcertInput) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::ValidationError("Title is required".to_string()));
    }
    if input.artist.trim().is_empty() {
        return Err(AppError::ValidationError("Artist is required".to_string()));
    }
    if input.genre.trim().is_empty() {
        return Err(AppError::ValidationError("Genre is required".to_string()));
    }
    if input.base_price <= Decimal::ZERO {
        return Err(AppError::ValidationError(
            "Base price must be greater than zero".to_string(),
        ));
    }
    if input.total_tickets < 0 || input.available_tickets < 0 {
        return Err(AppError::ValidationError(
            "Ticket counts cannot be negative".to_string(),
        ));
    }
    if input.available_tickets > input.total_tickets {
        return Err(AppError::ValidationError(
            "Available tickets cannot exceed total tickets".to_string(),
        ));
    }
    Ok(())
}

fn validate_venue_input(input: &VenueInput) -> Result<(), AppError> {
    for (value, field) in [
        (&input.name, "Name"),
        (&input.address, "Address"),
        (&input.city, "City"),
        (&input.state, "State"),
        (&input.postal_code, "Postal code"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!("{} is required", field)));
        }
    }
    if input.capacity <= 0 {
        return Err(AppError::ValidationError(
            "Capacity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn concert_input() -> ConcertInput {
        ConcertInput {
            venue_id: Uuid::new_v4(),
            title: "Harbour Lights".to_string(),
            description: None,
            artist: "Nadia Rahim".to_string(),
            genre: "Pop".to_string(),
            image_url: None,
            event_date: Utc::now(),
            base_price: Decimal::new(8900, 2),
            available_tickets: 150,
            total_tickets: 200,
            is_active: true,
        }
    }

    #[test]
    fn valid_concert_input_passes() {
        assert!(validate_concert_input(&concert_input()).is_ok());
    }

    #[test]
    fn concert_input_rejects_inverted_inventory() {
        let mut input = concert_input();
        input.available_tickets = 300;
        assert!(matches!(
            validate_concert_input(&input),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn concert_input_rejects_free_tickets() {
        let mut input = concert_input();
        input.base_price = Decimal::ZERO;
        assert!(validate_concert_input(&input).is_err());
    }

    #[test]
    fn venue_input_requires_capacity() {
        let input = VenueInput {
            name: "Riverside Hall".to_string(),
            address: "1 Quay Lane".to_string(),
            city: "George Town".to_string(),
            state: "Pulau Pinang".to_string(),
            postal_code: "10200".to_string(),
            country: "Malaysia".to_string(),
            capacity: 0,
            phone: None,
            image_url: None,
            is_active: true,
        };
        assert!(validate_venue_input(&input).is_err());
    }
}
