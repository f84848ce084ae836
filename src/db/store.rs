use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use uuid::Uuid;

use super::models::{Event, Room, RoomBooking, User};

/// In-process document store backing the service layer.
///
/// A single lock covers every collection. Mutating operations take the
/// exclusive guard for their whole check-then-write sequence (clash check +
/// booking insert, capacity check + registration, status guard + conclude),
/// so two concurrent requests cannot interleave between a check and the
/// write it admits.
#[derive(Default)]
pub struct Store {
    inner: RwLock<Collections>,
}

#[derive(Default)]
pub struct Collections {
    pub events: HashMap<Uuid, Event>,
    pub rooms: HashMap<Uuid, Room>,
    pub bookings: HashMap<Uuid, RoomBooking>,
    pub users: HashMap<Uuid, User>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write()
    }
}
