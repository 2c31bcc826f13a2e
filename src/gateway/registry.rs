use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::events::{chat_line, status_line, ROOM_CAPACITY};
use super::session::{ConnectionId, Occupant};
use crate::error::RegistryError;

pub type RoomId = String;

/// Upper bound (exclusive) for numeric room identifiers.
const ROOM_ID_RANGE: u32 = 1_000_000;

#[derive(Debug, Default)]
struct Room {
    /// Join order. Never longer than `ROOM_CAPACITY`.
    occupants: Vec<Occupant>,
}

impl Room {
    fn is_full(&self) -> bool {
        self.occupants.len() >= ROOM_CAPACITY
    }

    /// Push one line to every occupant. A closed recipient is logged and
    /// skipped. Returns how many occupants accepted the line.
    fn push_line(&self, room_id: &str, line: &str) -> usize {
        let mut delivered = 0;
        for occupant in &self.occupants {
            match occupant.tx.send(line.to_string()) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    tracing::warn!(
                        room_id,
                        connection_id = %occupant.connection_id,
                        "occupant channel closed, line dropped"
                    );
                }
            }
        }
        delivered
    }

    fn announce(&self, room_id: &str) {
        self.push_line(room_id, &status_line(self.occupants.len()));
    }
}

/// The map itself. Every method here assumes the registry lock is held.
#[derive(Debug, Default)]
struct Rooms {
    rooms: HashMap<RoomId, Room>,
}

impl Rooms {
    fn generate_room_id(&self) -> RoomId {
        let mut rng = rand::thread_rng();
        loop {
            let id = rng.gen_range(0..ROOM_ID_RANGE).to_string();
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }

    fn find_or_create(&mut self) -> RoomId {
        if let Some(id) = self
            .rooms
            .iter()
            .find(|(_, room)| !room.is_full())
            .map(|(id, _)| id.clone())
        {
            return id;
        }

        let id = self.generate_room_id();
        self.rooms.insert(id.clone(), Room::default());
        tracing::debug!(room_id = %id, "created room");
        id
    }

    /// Capacity-checked append followed by an occupancy announcement.
    fn admit(&mut self, room_id: &str, occupant: Occupant) -> Result<usize, RegistryError> {
        // A room emptied and reclaimed since lookup is simply recreated.
        let room = self.rooms.entry(room_id.to_string()).or_default();
        if room.is_full() {
            return Err(RegistryError::RoomFull {
                room_id: room_id.to_string(),
            });
        }

        room.occupants.push(occupant);
        room.announce(room_id);
        Ok(room.occupants.len())
    }

    fn remove(&mut self, room_id: &str, connection_id: ConnectionId) -> Option<usize> {
        let room = self.rooms.get_mut(room_id)?;
        let index = room
            .occupants
            .iter()
            .position(|o| o.connection_id == connection_id)?;
        room.occupants.remove(index);

        let remaining = room.occupants.len();
        if remaining == 0 {
            self.rooms.remove(room_id);
            tracing::debug!(room_id, "reclaimed empty room");
        } else {
            room.announce(room_id);
        }
        Some(remaining)
    }
}

/// Point-in-time counts, served by `/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub rooms: usize,
    pub occupants: usize,
    /// Rooms with a single occupant waiting for a partner.
    pub waiting: usize,
}

/// All live rooms and their occupants.
///
/// One mutex guards everything. It is never held across an `.await`: the
/// only "I/O" done while holding it is pushing onto unbounded channels, so a
/// stalled peer cannot hold up other rooms.
#[derive(Debug, Default)]
pub struct Registry {
    inner: Mutex<Rooms>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Rooms> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the first room with a free slot, creating one if there is none.
    pub fn find_or_create_room(&self) -> RoomId {
        self.lock().find_or_create()
    }

    /// Seat `occupant` in a specific room. Fails with `RoomFull` if the room
    /// already has two occupants; the occupant is then not registered.
    pub fn join_room(&self, room_id: &str, occupant: Occupant) -> Result<usize, RegistryError> {
        self.lock().admit(room_id, occupant)
    }

    /// Pick a room and seat `occupant` in it within one critical section.
    /// Returns the room and its occupant count after the join.
    pub fn join(&self, occupant: Occupant) -> Result<(RoomId, usize), RegistryError> {
        let mut rooms = self.lock();
        let room_id = rooms.find_or_create();
        match rooms.admit(&room_id, occupant) {
            Ok(count) => Ok((room_id, count)),
            Err(RegistryError::RoomFull { room_id }) => {
                let occupants = rooms
                    .rooms
                    .get(&room_id)
                    .map(|r| r.occupants.len())
                    .unwrap_or_default();
                tracing::error!(
                    room_id = %room_id,
                    occupants,
                    "room selected as under-full is full, dropping join"
                );
                Err(RegistryError::CapacityExceeded { room_id, occupants })
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a connection from its room. Returns the remaining count, or
    /// `None` if the room or the connection was already gone.
    pub fn remove_occupant(&self, room_id: &str, connection_id: ConnectionId) -> Option<usize> {
        self.lock().remove(room_id, connection_id)
    }

    /// Relay `payload` as `chat:<sender_tag>: <payload>` to everyone in the
    /// room, sender included. Returns the number of occupants reached.
    pub fn broadcast(&self, room_id: &str, sender_tag: &str, payload: &str) -> usize {
        let rooms = self.lock();
        match rooms.rooms.get(room_id) {
            Some(room) => room.push_line(room_id, &chat_line(sender_tag, payload)),
            None => {
                tracing::debug!(room_id, "broadcast to unknown room ignored");
                0
            }
        }
    }

    pub fn occupant_count(&self, room_id: &str) -> usize {
        self.lock()
            .rooms
            .get(room_id)
            .map(|r| r.occupants.len())
            .unwrap_or(0)
    }

    pub fn stats(&self) -> RegistryStats {
        let rooms = self.lock();
        let mut stats = RegistryStats {
            rooms: rooms.rooms.len(),
            occupants: 0,
            waiting: 0,
        };
        for room in rooms.rooms.values() {
            stats.occupants += room.occupants.len();
            if room.occupants.len() == 1 {
                stats.waiting += 1;
            }
        }
        stats
    }
}
