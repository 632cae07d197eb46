pub mod booking;
pub mod opening_hours;
pub mod review;
pub mod salon;
pub mod service;
pub mod slot;
pub mod time_format;

pub use booking::{Booking, BookingStatus};
pub use opening_hours::{OpeningHours, OpeningInterval};
pub use review::{Review, ReviewSummary};
pub use salon::{Salon, SalonDetails, SalonSearch, SalonStatus};
pub use service::{SalonService, Service};
pub use slot::{Slot, SlotAvailability};
