pub mod approvals;
pub mod events;
pub mod profile;
pub mod rooms;
pub mod users;
