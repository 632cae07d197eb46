pub mod admission;
pub mod availability;
pub mod bookings;
pub mod ledger;
pub mod slots;
