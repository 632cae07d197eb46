use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::opening_hours::weekday_from_index;
use crate::models::time_format::{format_time, parse_time};
use crate::models::{
    Booking, BookingStatus, OpeningHours, OpeningInterval, Review, ReviewSummary, Salon,
    SalonDetails, SalonSearch, SalonService, SalonStatus, Service,
};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn now_str() -> String {
    Utc::now().naive_utc().format(DATETIME_FORMAT).to_string()
}

fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}

// ── Salons ──

const SALON_COLUMNS: &str = "id, name, city, region, phone, email, website, street, door, postal_code, \
                             country, latitude, longitude, status, created_at";

pub fn create_salon(conn: &Connection, name: &str, details: &SalonDetails) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO salons (name, city, region, phone, email, website, street, door, postal_code, country, latitude, longitude, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            name,
            details.city,
            details.region,
            details.phone,
            details.email,
            details.website,
            details.street,
            details.door,
            details.postal_code,
            details.country,
            details.latitude,
            details.longitude,
            SalonStatus::Active.as_str(),
            now_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Only the fields present in `details` (and `name`, if given) change.
pub fn update_salon(
    conn: &Connection,
    id: i64,
    name: Option<&str>,
    details: &SalonDetails,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE salons SET
           name = COALESCE(?2, name),
           city = COALESCE(?3, city),
           region = COALESCE(?4, region),
           phone = COALESCE(?5, phone),
           email = COALESCE(?6, email),
           website = COALESCE(?7, website),
           street = COALESCE(?8, street),
           door = COALESCE(?9, door),
           postal_code = COALESCE(?10, postal_code),
           country = COALESCE(?11, country),
           latitude = COALESCE(?12, latitude),
           longitude = COALESCE(?13, longitude)
         WHERE id = ?1",
        params![
            id,
            name,
            details.city,
            details.region,
            details.phone,
            details.email,
            details.website,
            details.street,
            details.door,
            details.postal_code,
            details.country,
            details.latitude,
            details.longitude,
        ],
    )?;
    Ok(count > 0)
}

pub fn get_salon(conn: &Connection, id: i64) -> anyhow::Result<Option<Salon>> {
    let sql = format!("SELECT {SALON_COLUMNS} FROM salons WHERE id = ?1");
    let salon = conn
        .query_row(&sql, params![id], parse_salon_row)
        .optional()?;
    Ok(salon)
}

pub fn set_salon_status(conn: &Connection, id: i64, status: SalonStatus) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE salons SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

/// Every salon, inactive ones included, ordered by name.
pub fn list_all_salons(conn: &Connection) -> anyhow::Result<Vec<Salon>> {
    let sql = format!("SELECT {SALON_COLUMNS} FROM salons ORDER BY name ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], parse_salon_row)?;

    let mut salons = vec![];
    for row in rows {
        salons.push(row?);
    }
    Ok(salons)
}

pub fn salon_exists(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM salons WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Active salons matching every given filter (case-insensitive substring),
/// ordered by name, plus the total match count for pagination.
pub fn search_salons(conn: &Connection, search: &SalonSearch) -> anyhow::Result<(Vec<Salon>, i64)> {
    let filter = "status = 'active'
                  AND (?1 IS NULL OR city LIKE '%' || ?1 || '%')
                  AND (?2 IS NULL OR region LIKE '%' || ?2 || '%')
                  AND (?3 IS NULL OR name LIKE '%' || ?3 || '%')";

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM salons WHERE {filter}"),
        params![search.city, search.region, search.name],
        |row| row.get(0),
    )?;

    let sql = format!(
        "SELECT {SALON_COLUMNS} FROM salons WHERE {filter} ORDER BY name ASC, id ASC LIMIT ?4 OFFSET ?5"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![
            search.city,
            search.region,
            search.name,
            search.per_page,
            search.offset()
        ],
        parse_salon_row,
    )?;

    let mut salons = vec![];
    for row in rows {
        salons.push(row?);
    }
    Ok((salons, total))
}

fn parse_salon_row(row: &rusqlite::Row) -> rusqlite::Result<Salon> {
    let status: String = row.get(13)?;
    let created_at: String = row.get(14)?;
    Ok(Salon {
        id: row.get(0)?,
        name: row.get(1)?,
        details: SalonDetails {
            city: row.get(2)?,
            region: row.get(3)?,
            phone: row.get(4)?,
            email: row.get(5)?,
            website: row.get(6)?,
            street: row.get(7)?,
            door: row.get(8)?,
            postal_code: row.get(9)?,
            country: row.get(10)?,
            latitude: row.get(11)?,
            longitude: row.get(12)?,
        },
        status: SalonStatus::parse(&status),
        created_at: parse_datetime(&created_at),
    })
}

// ── Service catalog ──

pub fn list_services(conn: &Connection, bio_diamond_only: bool) -> anyhow::Result<Vec<Service>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, description, is_bio_diamond FROM services
         WHERE (?1 = 0 OR is_bio_diamond = 1) ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![bio_diamond_only], |row| {
        Ok(Service {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            description: row.get(3)?,
            is_bio_diamond: row.get(4)?,
        })
    })?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

pub fn service_exists(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM services WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ── Salon services ──

const SALON_SERVICE_SELECT: &str = "SELECT ss.id, ss.salon_id, ss.service_id, s.name, s.category, s.description, \
                                    s.is_bio_diamond, ss.price, ss.duration_minutes \
                                    FROM salon_services ss JOIN services s ON s.id = ss.service_id";

pub fn list_salon_services(conn: &Connection, salon_id: i64) -> anyhow::Result<Vec<SalonService>> {
    let sql = format!("{SALON_SERVICE_SELECT} WHERE ss.salon_id = ?1 ORDER BY ss.id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![salon_id], parse_salon_service_row)?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

/// Looks up an offering by the catalog service id, as bookings reference it.
pub fn get_salon_service(
    conn: &Connection,
    salon_id: i64,
    service_id: i64,
) -> anyhow::Result<Option<SalonService>> {
    let sql = format!("{SALON_SERVICE_SELECT} WHERE ss.salon_id = ?1 AND ss.service_id = ?2");
    let service = conn
        .query_row(&sql, params![salon_id, service_id], parse_salon_service_row)
        .optional()?;
    Ok(service)
}

/// Looks up an offering by its own id, as the manager API references it.
pub fn get_salon_offering(
    conn: &Connection,
    salon_id: i64,
    offering_id: i64,
) -> anyhow::Result<Option<SalonService>> {
    let sql = format!("{SALON_SERVICE_SELECT} WHERE ss.salon_id = ?1 AND ss.id = ?2");
    let service = conn
        .query_row(&sql, params![salon_id, offering_id], parse_salon_service_row)
        .optional()?;
    Ok(service)
}

pub fn add_salon_service(
    conn: &Connection,
    salon_id: i64,
    service_id: i64,
    price: f64,
    duration_minutes: u32,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO salon_services (salon_id, service_id, price, duration_minutes) VALUES (?1, ?2, ?3, ?4)",
        params![salon_id, service_id, price, duration_minutes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_salon_service(
    conn: &Connection,
    salon_id: i64,
    offering_id: i64,
    price: Option<f64>,
    duration_minutes: Option<u32>,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE salon_services SET
           price = COALESCE(?3, price),
           duration_minutes = COALESCE(?4, duration_minutes)
         WHERE salon_id = ?1 AND id = ?2",
        params![salon_id, offering_id, price, duration_minutes],
    )?;
    Ok(count > 0)
}

pub fn delete_salon_service(conn: &Connection, salon_id: i64, offering_id: i64) -> anyhow::Result<bool> {
    let count = conn.execute(
        "DELETE FROM salon_services WHERE salon_id = ?1 AND id = ?2",
        params![salon_id, offering_id],
    )?;
    Ok(count > 0)
}

fn parse_salon_service_row(row: &rusqlite::Row) -> rusqlite::Result<SalonService> {
    Ok(SalonService {
        id: row.get(0)?,
        salon_id: row.get(1)?,
        service_id: row.get(2)?,
        name: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        is_bio_diamond: row.get(6)?,
        price: row.get(7)?,
        duration_minutes: row.get(8)?,
    })
}

// ── Opening hours ──

pub fn get_opening_hours(conn: &Connection, salon_id: i64) -> anyhow::Result<OpeningHours> {
    let mut stmt = conn.prepare(
        "SELECT weekday, open_time, close_time FROM opening_hours WHERE salon_id = ?1 ORDER BY weekday ASC",
    )?;
    let rows = stmt.query_map(params![salon_id], |row| {
        Ok((
            row.get::<_, u8>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut hours = OpeningHours::closed();
    for row in rows {
        let (weekday, open, close) = row?;
        let Some(day) = weekday_from_index(weekday) else {
            tracing::warn!(salon_id, weekday, "ignoring opening hours with unknown weekday");
            continue;
        };
        hours.set(day, Some(OpeningInterval::parse(&open, &close)?));
    }
    Ok(hours)
}

/// Replaces the whole week; days that are `None` end up closed.
pub fn replace_opening_hours(conn: &Connection, salon_id: i64, hours: &OpeningHours) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM opening_hours WHERE salon_id = ?1", params![salon_id])?;
    for (day, interval) in hours.iter() {
        if let Some(interval) = interval {
            tx.execute(
                "INSERT INTO opening_hours (salon_id, weekday, open_time, close_time) VALUES (?1, ?2, ?3, ?4)",
                params![
                    salon_id,
                    day.num_days_from_monday(),
                    format_time(&interval.open),
                    format_time(&interval.close),
                ],
            )?;
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Bookings ──

const BOOKING_COLUMNS: &str = "id, salon_id, service_id, customer_name, customer_email, customer_phone, \
                               booking_date, booking_time, duration_minutes, status, created_at";

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let created_at = booking.created_at.format(DATETIME_FORMAT).to_string();

    conn.execute(
        "INSERT INTO bookings (id, salon_id, service_id, customer_name, customer_email, customer_phone, booking_date, booking_time, duration_minutes, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
        params![
            booking.id,
            booking.salon_id,
            booking.service_id,
            booking.customer_name,
            booking.customer_email,
            booking.customer_phone,
            booking.booking_date.format(DATE_FORMAT).to_string(),
            format_time(&booking.booking_time),
            booking.duration_minutes,
            booking.status.as_str(),
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
    let result = conn
        .query_row(&sql, params![id], |row| Ok(parse_booking_row(row)))
        .optional()?;

    match result {
        Some(booking) => Ok(Some(booking?)),
        None => Ok(None),
    }
}

/// Bookings that still hold their window on `date`, earliest first.
pub fn get_active_bookings_on(
    conn: &Connection,
    salon_id: i64,
    date: NaiveDate,
) -> anyhow::Result<Vec<Booking>> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE salon_id = ?1 AND booking_date = ?2 AND status != 'cancelled'
         ORDER BY booking_time ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![salon_id, date.format(DATE_FORMAT).to_string()],
        |row| Ok(parse_booking_row(row)),
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Every booking of a salon regardless of status, latest date first.
pub fn get_salon_bookings(conn: &Connection, salon_id: i64) -> anyhow::Result<Vec<Booking>> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE salon_id = ?1
         ORDER BY booking_date DESC, booking_time DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![salon_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now_str(), id],
    )?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let booking_date: String = row.get(6)?;
    let booking_time: String = row.get(7)?;
    let status: String = row.get(9)?;
    let created_at: String = row.get(10)?;

    Ok(Booking {
        id: row.get(0)?,
        salon_id: row.get(1)?,
        service_id: row.get(2)?,
        customer_name: row.get(3)?,
        customer_email: row.get(4)?,
        customer_phone: row.get(5)?,
        booking_date: NaiveDate::parse_from_str(&booking_date, DATE_FORMAT)?,
        booking_time: parse_time(&booking_time)?,
        duration_minutes: row.get(8)?,
        status: BookingStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("unknown booking status: {status}"))?,
        created_at: parse_datetime(&created_at),
    })
}

// ── Reviews ──

pub struct NewReview<'a> {
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub rating: u8,
    pub title: Option<&'a str>,
    pub comment: Option<&'a str>,
}

const REVIEW_COLUMNS: &str =
    "id, salon_id, customer_name, customer_email, rating, title, comment, is_verified, created_at";

pub fn create_review(conn: &Connection, salon_id: i64, review: &NewReview) -> anyhow::Result<Review> {
    conn.execute(
        "INSERT INTO reviews (salon_id, customer_name, customer_email, rating, title, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            salon_id,
            review.customer_name,
            review.customer_email,
            review.rating,
            review.title,
            review.comment,
            now_str(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], parse_review_row)?)
}

/// Newest first.
pub fn list_reviews(
    conn: &Connection,
    salon_id: i64,
    limit: u32,
    offset: i64,
) -> anyhow::Result<Vec<Review>> {
    let sql = format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE salon_id = ?1
         ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![salon_id, limit, offset], parse_review_row)?;

    let mut reviews = vec![];
    for row in rows {
        reviews.push(row?);
    }
    Ok(reviews)
}

pub fn review_summary(conn: &Connection, salon_id: i64) -> anyhow::Result<ReviewSummary> {
    let (sum, count): (i64, i64) = conn.query_row(
        "SELECT COALESCE(SUM(rating), 0), COUNT(*) FROM reviews WHERE salon_id = ?1",
        params![salon_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(ReviewSummary::from_totals(sum, count))
}

fn parse_review_row(row: &rusqlite::Row) -> rusqlite::Result<Review> {
    let created_at: String = row.get(8)?;
    Ok(Review {
        id: row.get(0)?,
        salon_id: row.get(1)?,
        customer_name: row.get(2)?,
        customer_email: row.get(3)?,
        rating: row.get(4)?,
        title: row.get(5)?,
        comment: row.get(6)?,
        is_verified: row.get(7)?,
        created_at: parse_datetime(&created_at),
    })
}
