use uuid::Uuid;

use crate::db::error::StoreError;
use crate::db::models::Room;
use crate::db::store::Collections;

pub struct RoomRepository;

impl RoomRepository {
    /// Inserts a room, enforcing name uniqueness.
    pub fn insert(col: &mut Collections, room: Room) -> Result<(), StoreError> {
        if Self::name_taken(col, &room.name, None) {
            return Err(StoreError::Duplicate(format!(
                "room name '{}'",
                room.name
            )));
        }
        col.rooms.insert(room.id, room);
        Ok(())
    }

    pub fn get(col: &Collections, room_id: Uuid) -> Option<&Room> {
        col.rooms.get(&room_id)
    }

    pub fn get_mut(col: &mut Collections, room_id: Uuid) -> Option<&mut Room> {
        col.rooms.get_mut(&room_id)
    }

    pub fn remove(col: &mut Collections, room_id: Uuid) -> Option<Room> {
        col.rooms.remove(&room_id)
    }

    pub fn all(col: &Collections) -> impl Iterator<Item = &Room> {
        col.rooms.values()
    }

    pub fn all_by_name(col: &Collections) -> Vec<&Room> {
        let mut rooms: Vec<&Room> = col.rooms.values().collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }

    pub fn name_taken(col: &Collections, name: &str, exclude_room_id: Option<Uuid>) -> bool {
        col.rooms
            .values()
            .any(|r| r.name == name && Some(r.id) != exclude_room_id)
    }
}
