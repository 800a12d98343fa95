//! Bookings placed from configuration at startup.

use restaurant_tables::{AllocationCoordinator, BookingSeed, ReservationBook};

/// Place every configured booking
///
/// Bookings the book refuses are logged and skipped.
///
/// # Returns
///
/// * `usize` - Number of bookings placed
pub fn place<B: ReservationBook>(
    coordinator: &mut AllocationCoordinator<B>,
    seeds: &[BookingSeed],
) -> usize {
    let mut placed = 0;
    for seed in seeds {
        match coordinator.add_reservation(seed.pax, seed.customer.clone(), seed.slot) {
            Ok(_) => placed += 1,
            Err(e) => log::warn!("Skipping configured booking {}: {}", seed, e),
        }
    }
    placed
}
