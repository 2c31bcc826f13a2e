use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The target room already holds its maximum number of occupants.
    RoomFull { room_id: String },
    /// A room picked as under-full turned out to be full while the lock was
    /// held. This can only come from a bug in the registry.
    CapacityExceeded { room_id: String, occupants: usize },
}

impl RegistryError {
    pub fn room_id(&self) -> &str {
        match self {
            RegistryError::RoomFull { room_id } => room_id,
            RegistryError::CapacityExceeded { room_id, .. } => room_id,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::RoomFull { room_id } => write!(f, "room {room_id} is full"),
            RegistryError::CapacityExceeded { room_id, occupants } => write!(
                f,
                "room {room_id} selected for join already holds {occupants} occupants"
            ),
        }
    }
}

impl std::error::Error for RegistryError {}
