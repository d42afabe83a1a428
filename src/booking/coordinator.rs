use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::BookingConfig;
use crate::middleware::AuthUser;
use crate::models::{Booking, SeatHold, SeatSelection};

use super::error::BookingError;
use super::ledger::BookingLedger;
use super::pricing::price_selection;
use super::seat_map::SeatMap;
use super::store::{BookingStore, ShowStore};
use super::validator::validate;

/// One async mutex per show id. Seat mutation for a show is serialized
/// in-process; the version CAS on the seat state document is the
/// backstop across processes. Different shows never contend.
#[derive(Clone, Default)]
struct ShowLocks {
    inner: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>,
}

impl ShowLocks {
    async fn acquire(&self, show_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap();
            // Entries nobody holds or waits on can go; guards and
            // waiters keep a second strong reference.
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(show_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

/// A booking attempt as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationRequest {
    pub show_id: i64,
    /// Caller-supplied idempotency id; generated server-side if absent.
    #[serde(default)]
    pub booking_id: Option<Uuid>,
    #[serde(default)]
    pub seats: SeatSelection,
}

/// Orchestrates validate -> persist -> occupy and the inverse for
/// cancellation. Owns the consistency contract between the booking
/// ledger and the per-show seat state.
#[derive(Clone)]
pub struct ReservationCoordinator<S> {
    shows: S,
    ledger: BookingLedger<S>,
    locks: ShowLocks,
    config: BookingConfig,
}

impl<S: ShowStore + BookingStore> ReservationCoordinator<S> {
    pub fn new(store: S, config: BookingConfig) -> Self {
        ReservationCoordinator {
            shows: store.clone(),
            ledger: BookingLedger::new(store),
            locks: ShowLocks::default(),
            config,
        }
    }

    /// Requested -> Validated -> Committed, or Requested -> Rejected.
    ///
    /// The ledger write is tentative until the seat state CAS lands: on
    /// a version miss the booking is discarded and the whole attempt is
    /// replayed against a fresh snapshot, up to the retry budget.
    pub async fn create_booking(
        &self,
        user: &AuthUser,
        request: &ReservationRequest,
    ) -> Result<Booking, BookingError> {
        let booking_id = request.booking_id.unwrap_or_else(Uuid::new_v4);
        let _guard = self.locks.acquire(request.show_id).await;

        let mut attempt = 0;
        loop {
            let show = self.shows.load_show(request.show_id).await?;
            let theatre = self.shows.load_theatre(show.theatre_id).await?;
            let mut map = SeatMap::new(show.seat_state, &theatre);

            // Rejection is terminal and mutates nothing.
            let selection = validate(&request.seats, &map, self.config.tier_seat_cap)?;
            let subtotals = price_selection(&selection, &theatre);

            let booking = Booking::new(
                booking_id,
                show.id,
                user.user_id,
                user.email.clone(),
                selection.clone(),
                subtotals,
            );
            let hold = SeatHold {
                booking_id,
                user_email: user.email.clone(),
            };
            for (tier, seats) in selection.tiers() {
                map.occupy(tier, seats, &hold)?;
            }

            // Tentative ledger write, then the seat document CAS. Both
            // land together or the booking is discarded.
            let booking = self.ledger.create(booking).await?;
            match self
                .shows
                .store_seat_state(show.id, map.state(), show.version)
                .await
            {
                Ok(true) => {
                    debug!(
                        booking_id = %booking.id,
                        show_id = show.id,
                        seats = booking.seats.total_seats(),
                        total = booking.total,
                        "booking committed"
                    );
                    return Ok(booking);
                }
                Ok(false) => {
                    self.roll_back_booking(booking.id).await?;
                    attempt += 1;
                    if attempt >= self.config.max_cas_retries {
                        warn!(show_id = show.id, "seat state contention, retries exhausted");
                        return Err(BookingError::Contention);
                    }
                    debug!(show_id = show.id, attempt, "seat state version moved, retrying");
                }
                Err(e) => {
                    // Roll the tentative booking back before surfacing
                    // the storage failure.
                    let _ = self.roll_back_booking(booking.id).await;
                    return Err(e);
                }
            }
        }
    }

    /// Committed -> Cancelled. Only the owner may cancel, and only
    /// while the show has not started.
    pub async fn cancel_booking(
        &self,
        user: &AuthUser,
        booking_id: Uuid,
    ) -> Result<Booking, BookingError> {
        let booking = self.ledger.get(booking_id).await?;
        if booking.user_id != user.user_id {
            return Err(BookingError::Forbidden);
        }
        if booking.cancelled {
            return Err(BookingError::AlreadyCancelled);
        }

        let show = self.shows.load_show(booking.show_id).await?;
        if show.has_started(Utc::now()) {
            return Err(BookingError::CancellationWindowClosed);
        }

        let _guard = self.locks.acquire(booking.show_id).await;
        let cancelled = self.ledger.cancel(booking_id).await?;

        let mut attempt = 0;
        loop {
            let show = self.shows.load_show(booking.show_id).await?;
            let theatre = self.shows.load_theatre(show.theatre_id).await?;
            let mut map = SeatMap::new(show.seat_state, &theatre);
            for (tier, seats) in cancelled.seats.tiers() {
                map.release(tier, seats);
            }

            match self
                .shows
                .store_seat_state(show.id, map.state(), show.version)
                .await
            {
                Ok(true) => {
                    debug!(booking_id = %booking_id, show_id = show.id, "booking cancelled");
                    return Ok(cancelled);
                }
                Ok(false) => {
                    attempt += 1;
                    if attempt >= self.config.max_cas_retries {
                        self.reinstate_cancellation(booking_id).await?;
                        warn!(show_id = show.id, "seat release contention, retries exhausted");
                        return Err(BookingError::Contention);
                    }
                }
                Err(e) => {
                    let _ = self.reinstate_cancellation(booking_id).await;
                    return Err(e);
                }
            }
        }
    }

    /// Compensation for a seat write that never landed. A failure here
    /// leaves a booking row with no seat hold behind, so it is loud.
    async fn roll_back_booking(&self, id: Uuid) -> Result<(), BookingError> {
        if let Err(e) = self.ledger.discard(id).await {
            error!(
                booking_id = %id,
                error = ?e,
                "failed to discard tentative booking, row left without a seat hold"
            );
            return Err(e);
        }
        Ok(())
    }

    /// Compensation for a seat release that never landed: the booking
    /// goes back to Committed so its seats stay accounted for.
    async fn reinstate_cancellation(&self, id: Uuid) -> Result<(), BookingError> {
        if let Err(e) = self.ledger.reinstate(id).await {
            error!(
                booking_id = %id,
                error = ?e,
                "failed to reinstate cancelled booking, seats still held in the seat map"
            );
            return Err(e);
        }
        Ok(())
    }

    /// Owner-scoped single lookup.
    pub async fn booking_for(&self, user: &AuthUser, id: Uuid) -> Result<Booking, BookingError> {
        let booking = self.ledger.get(id).await?;
        if booking.user_id != user.user_id {
            return Err(BookingError::Forbidden);
        }
        Ok(booking)
    }

    pub async fn bookings_for(&self, user: &AuthUser) -> Result<Vec<Booking>, BookingError> {
        self.ledger.list_by_user(user.user_id).await
    }
}
