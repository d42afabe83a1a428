use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::{Booking, PriceBreakdown, SeatSelection, SeatState, Show, Theatre};

use super::error::BookingError;

/// Show-side persistence: catalog reads plus the optimistic write of
/// the seat state document.
pub trait ShowStore: Clone + Send + Sync {
    fn load_show(&self, show_id: i64) -> impl std::future::Future<Output = Result<Show, BookingError>> + Send;

    fn load_theatre(
        &self,
        theatre_id: i64,
    ) -> impl std::future::Future<Output = Result<Theatre, BookingError>> + Send;

    /// Compare-and-set write of the seat state. Returns `Ok(false)` when
    /// the stored version no longer matches `expected_version`; the
    /// caller re-reads and retries.
    fn store_seat_state(
        &self,
        show_id: i64,
        state: &SeatState,
        expected_version: i64,
    ) -> impl std::future::Future<Output = Result<bool, BookingError>> + Send;
}

/// Booking-side persistence backing the ledger.
pub trait BookingStore: Clone + Send + Sync {
    fn insert_booking(
        &self,
        booking: &Booking,
    ) -> impl std::future::Future<Output = Result<(), BookingError>> + Send;

    fn fetch_booking(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Booking, BookingError>> + Send;

    /// Newest first.
    fn bookings_by_user(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, BookingError>> + Send;

    fn set_cancelled(
        &self,
        id: Uuid,
        cancelled: bool,
    ) -> impl std::future::Future<Output = Result<(), BookingError>> + Send;

    /// Removes a tentative booking whose seat write lost the race.
    fn delete_booking(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<(), BookingError>> + Send;
}

/* ---------- Postgres ---------- */

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[derive(FromRow)]
struct ShowRow {
    id: i64,
    movie_id: i64,
    theatre_id: i64,
    starts_at: DateTime<Utc>,
    seat_state: Json<SeatState>,
    version: i64,
}

impl From<ShowRow> for Show {
    fn from(row: ShowRow) -> Self {
        Show {
            id: row.id,
            movie_id: row.movie_id,
            theatre_id: row.theatre_id,
            starts_at: row.starts_at,
            seat_state: row.seat_state.0,
            version: row.version,
        }
    }
}

#[derive(FromRow)]
struct BookingRow {
    id: Uuid,
    show_id: i64,
    user_id: i64,
    user_email: String,
    seats: Json<SeatSelection>,
    subtotals: Json<PriceBreakdown>,
    total: i64,
    created_at: DateTime<Utc>,
    cancelled: bool,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            show_id: row.show_id,
            user_id: row.user_id,
            user_email: row.user_email,
            seats: row.seats.0,
            subtotals: row.subtotals.0,
            total: row.total,
            created_at: row.created_at,
            cancelled: row.cancelled,
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

impl ShowStore for PgStore {
    async fn load_show(&self, show_id: i64) -> Result<Show, BookingError> {
        let row = sqlx::query_as::<_, ShowRow>(
            "SELECT id, movie_id, theatre_id, starts_at, seat_state, version
             FROM shows WHERE id = $1",
        )
        .bind(show_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Show::from).ok_or(BookingError::NotFound)
    }

    async fn load_theatre(&self, theatre_id: i64) -> Result<Theatre, BookingError> {
        let row = sqlx::query_as::<_, Theatre>(
            "SELECT id, name, location,
                    balcony_seats, balcony_seat_price,
                    middle_seats, middle_seat_price,
                    lower_seats, lower_seat_price
             FROM theatres WHERE id = $1",
        )
        .bind(theatre_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(BookingError::NotFound)
    }

    async fn store_seat_state(
        &self,
        show_id: i64,
        state: &SeatState,
        expected_version: i64,
    ) -> Result<bool, BookingError> {
        let result = sqlx::query(
            "UPDATE shows SET seat_state = $2, version = version + 1
             WHERE id = $1 AND version = $3",
        )
        .bind(show_id)
        .bind(Json(state))
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl BookingStore for PgStore {
    async fn insert_booking(&self, booking: &Booking) -> Result<(), BookingError> {
        let result = sqlx::query(
            "INSERT INTO bookings
                (id, show_id, user_id, user_email, seats, subtotals, total, created_at, cancelled)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(booking.id)
        .bind(booking.show_id)
        .bind(booking.user_id)
        .bind(&booking.user_email)
        .bind(Json(&booking.seats))
        .bind(Json(&booking.subtotals))
        .bind(booking.total)
        .bind(booking.created_at)
        .bind(booking.cancelled)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(BookingError::DuplicateBooking(booking.id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_booking(&self, id: Uuid) -> Result<Booking, BookingError> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT id, show_id, user_id, user_email, seats, subtotals, total, created_at, cancelled
             FROM bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::from).ok_or(BookingError::NotFound)
    }

    async fn bookings_by_user(&self, user_id: i64) -> Result<Vec<Booking>, BookingError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, show_id, user_id, user_email, seats, subtotals, total, created_at, cancelled
             FROM bookings WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn set_cancelled(&self, id: Uuid, cancelled: bool) -> Result<(), BookingError> {
        let result = sqlx::query("UPDATE bookings SET cancelled = $2 WHERE id = $1")
            .bind(id)
            .bind(cancelled)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookingError::NotFound);
        }
        Ok(())
    }

    async fn delete_booking(&self, id: Uuid) -> Result<(), BookingError> {
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/* ---------- in-memory store for tests ---------- */

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct Inner {
        theatres: HashMap<i64, Theatre>,
        shows: HashMap<i64, Show>,
        bookings: HashMap<Uuid, Booking>,
    }

    /// Backs the coordinator and ledger tests. Version handling mirrors
    /// the Postgres CAS exactly.
    #[derive(Clone, Default)]
    pub(crate) struct MemoryStore {
        inner: Arc<Mutex<Inner>>,
    }

    impl MemoryStore {
        pub(crate) fn add_theatre(&self, theatre: Theatre) {
            self.inner.lock().unwrap().theatres.insert(theatre.id, theatre);
        }

        pub(crate) fn add_show(&self, show: Show) {
            self.inner.lock().unwrap().shows.insert(show.id, show);
        }

        pub(crate) fn seat_state(&self, show_id: i64) -> SeatState {
            self.inner.lock().unwrap().shows[&show_id].seat_state.clone()
        }

        pub(crate) fn booking_count(&self) -> usize {
            self.inner.lock().unwrap().bookings.len()
        }
    }

    impl ShowStore for MemoryStore {
        async fn load_show(&self, show_id: i64) -> Result<Show, BookingError> {
            self.inner
                .lock()
                .unwrap()
                .shows
                .get(&show_id)
                .cloned()
                .ok_or(BookingError::NotFound)
        }

        async fn load_theatre(&self, theatre_id: i64) -> Result<Theatre, BookingError> {
            self.inner
                .lock()
                .unwrap()
                .theatres
                .get(&theatre_id)
                .cloned()
                .ok_or(BookingError::NotFound)
        }

        async fn store_seat_state(
            &self,
            show_id: i64,
            state: &SeatState,
            expected_version: i64,
        ) -> Result<bool, BookingError> {
            let mut inner = self.inner.lock().unwrap();
            let show = inner.shows.get_mut(&show_id).ok_or(BookingError::NotFound)?;
            if show.version != expected_version {
                return Ok(false);
            }
            show.seat_state = state.clone();
            show.version += 1;
            Ok(true)
        }
    }

    impl BookingStore for MemoryStore {
        async fn insert_booking(&self, booking: &Booking) -> Result<(), BookingError> {
            let mut inner = self.inner.lock().unwrap();
            if inner.bookings.contains_key(&booking.id) {
                return Err(BookingError::DuplicateBooking(booking.id));
            }
            inner.bookings.insert(booking.id, booking.clone());
            Ok(())
        }

        async fn fetch_booking(&self, id: Uuid) -> Result<Booking, BookingError> {
            self.inner
                .lock()
                .unwrap()
                .bookings
                .get(&id)
                .cloned()
                .ok_or(BookingError::NotFound)
        }

        async fn bookings_by_user(&self, user_id: i64) -> Result<Vec<Booking>, BookingError> {
            let mut bookings: Vec<Booking> = self
                .inner
                .lock()
                .unwrap()
                .bookings
                .values()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect();
            bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(bookings)
        }

        async fn set_cancelled(&self, id: Uuid, cancelled: bool) -> Result<(), BookingError> {
            let mut inner = self.inner.lock().unwrap();
            let booking = inner.bookings.get_mut(&id).ok_or(BookingError::NotFound)?;
            booking.cancelled = cancelled;
            Ok(())
        }

        async fn delete_booking(&self, id: Uuid) -> Result<(), BookingError> {
            self.inner.lock().unwrap().bookings.remove(&id);
            Ok(())
        }
    }
}
