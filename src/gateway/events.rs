//! Text lines the gateway writes to clients.
//!
//! There is no envelope: every websocket text frame is exactly one of a chat
//! line, a status line or the room-full notice.

/// Maximum number of occupants a room can hold.
pub const ROOM_CAPACITY: usize = 2;

/// Sent once to a client that could not be seated, right before the close.
pub const ROOM_FULL_NOTICE: &str = "Room is full. Try again later.";

/// Line prefixes.
pub mod prefix {
    pub const CHAT: &str = "chat:";
    pub const STATUS: &str = "status:";
}

/// `chat:<tag>: <payload>`
pub fn chat_line(sender_tag: &str, payload: &str) -> String {
    format!("{}{sender_tag}: {payload}", prefix::CHAT)
}

/// `status:<count> user(s) in the room`, singular only for exactly one.
pub fn status_line(count: usize) -> String {
    let noun = if count == 1 { "user" } else { "users" };
    format!("{}{count} {noun} in the room", prefix::STATUS)
}
