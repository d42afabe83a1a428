use uuid::Uuid;

use crate::models::Booking;

use super::error::BookingError;
use super::store::BookingStore;

/// Durable record-keeping for bookings. The ledger never touches the
/// seat map; pairing a cancellation with the seat release is the
/// coordinator's contract.
#[derive(Clone)]
pub struct BookingLedger<S> {
    store: S,
}

impl<S: BookingStore> BookingLedger<S> {
    pub fn new(store: S) -> Self {
        BookingLedger { store }
    }

    /// Persists a new booking. Fails with DuplicateBooking if the id is
    /// already taken.
    pub async fn create(&self, booking: Booking) -> Result<Booking, BookingError> {
        self.store.insert_booking(&booking).await?;
        Ok(booking)
    }

    pub async fn get(&self, id: Uuid) -> Result<Booking, BookingError> {
        self.store.fetch_booking(id).await
    }

    /// The user's bookings, newest first. Unbounded by design.
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>, BookingError> {
        self.store.bookings_by_user(user_id).await
    }

    /// Flips the cancellation flag and returns the updated record.
    pub async fn cancel(&self, id: Uuid) -> Result<Booking, BookingError> {
        let mut booking = self.store.fetch_booking(id).await?;
        if booking.cancelled {
            return Err(BookingError::AlreadyCancelled);
        }
        self.store.set_cancelled(id, true).await?;
        booking.cancelled = true;
        Ok(booking)
    }

    /// Compensating action: puts a cancellation back when the seat
    /// release could not be committed.
    pub(crate) async fn reinstate(&self, id: Uuid) -> Result<(), BookingError> {
        self.store.set_cancelled(id, false).await
    }

    /// Compensating action: removes a tentative booking whose seat
    /// occupy lost the race.
    pub(crate) async fn discard(&self, id: Uuid) -> Result<(), BookingError> {
        self.store.delete_booking(id).await
    }
}
