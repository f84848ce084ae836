mod booking_repository;
mod event_repository;
mod room_repository;
mod user_repository;

pub use booking_repository::BookingRepository;
pub use event_repository::EventRepository;
pub use room_repository::RoomRepository;
pub use user_repository::UserRepository;
