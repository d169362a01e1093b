//! Service layer over the in-memory cities store.
//! - `store` owns the seeded city list for the process lifetime.
//! - `points_of_interest` and `cities` implement the read/write operations.
//! - `mail` is the notification sink used on deletion.

pub mod errors;
pub mod store;
pub mod mail;
pub mod cities;
pub mod points_of_interest;
#[cfg(test)]
pub mod test_support;
