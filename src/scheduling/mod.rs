mod clash;
mod overlap;

pub use clash::{available_rooms, find_event_clashes, find_room_clashes};
pub use overlap::overlaps;
