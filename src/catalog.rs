use crate::booking::store::{PgStore, ShowStore};
use crate::booking::BookingError;
use crate::models::{Show, Theatre};

/// Read-only access to theatre and show metadata. Admin CRUD over the
/// catalog lives elsewhere; this service never writes it.
#[derive(Clone)]
pub struct Catalog {
    store: PgStore,
}

impl Catalog {
    pub fn new(store: PgStore) -> Self {
        Catalog { store }
    }

    pub async fn show(&self, show_id: i64) -> Result<Show, BookingError> {
        self.store.load_show(show_id).await
    }

    pub async fn theatre(&self, theatre_id: i64) -> Result<Theatre, BookingError> {
        self.store.load_theatre(theatre_id).await
    }
}
