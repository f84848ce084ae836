mod event;
mod room;
mod room_booking;
mod user;

pub use event::*;
pub use room::*;
pub use room_booking::*;
pub use user::*;
