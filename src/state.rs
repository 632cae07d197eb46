use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::admission::BookingAdmission;
use crate::services::ledger::SqliteLedger;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub ledger: SqliteLedger,
    pub admission: BookingAdmission,
}

impl AppState {
    pub fn new(conn: Connection, config: AppConfig) -> Self {
        let db = Arc::new(Mutex::new(conn));
        Self {
            ledger: SqliteLedger::new(Arc::clone(&db)),
            db,
            config,
            admission: BookingAdmission::new(),
        }
    }
}
