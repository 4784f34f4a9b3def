pub mod booking;
pub mod lenient;
pub mod raw;
pub mod snapshot;

pub use booking::{BookingConfirmation, NewBooking};
pub use raw::{RawRestaurant, RawSnapshot, RawTable};
pub use snapshot::{
    BookingSnapshot, EntityId, Order, OrderStatus, Reservation, ReservationStatus,
    RestaurantInfo, TableState,
};
