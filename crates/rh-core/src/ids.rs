//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so rows
//! and reports can read the raw value directly.
//!
//! Ride, driver and rider ids are 1-based (the first ride is `RideId(1)`).
//! `ZoneId` is a 0-based index into a [`ZoneSet`](crate::ZoneSet).

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Monotonic, 1-based ride identifier.  One per generated record, never reused.
    pub struct RideId(u32);
}

typed_id! {
    /// Driver drawn from the configured driver pool (`1..=driver_pool_size`).
    pub struct DriverId(u32);
}

typed_id! {
    /// Rider drawn from the configured rider pool (`1..=rider_pool_size`).
    pub struct RiderId(u32);
}

typed_id! {
    /// Index of a zone label in the run's [`ZoneSet`](crate::ZoneSet).
    pub struct ZoneId(u16);
}

impl RideId {
    pub const FIRST: RideId = RideId(1);

    /// The identifier that follows `self`.
    #[inline]
    pub fn next(self) -> RideId {
        RideId(self.0 + 1)
    }
}

impl ZoneId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
