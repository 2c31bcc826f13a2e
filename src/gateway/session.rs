use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Random display label prefixed to relayed messages. Not unique.
pub fn generate_tag() -> String {
    rand::thread_rng().gen_range(0..1_000_000u32).to_string()
}

/// A seated connection as the registry sees it.
///
/// The session task owns the socket and the receiving end of `tx`; rooms
/// only ever hold clones of this handle to push lines at it.
#[derive(Debug, Clone)]
pub struct Occupant {
    pub connection_id: ConnectionId,
    pub tag: String,
    pub tx: mpsc::UnboundedSender<String>,
}

impl Occupant {
    /// Build an occupant with a fresh id and tag, returning the receiver the
    /// session drains into its socket.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::with_tag(generate_tag())
    }

    pub fn with_tag(tag: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                connection_id: ConnectionId::next(),
                tag: tag.into(),
                tx,
            },
            rx,
        )
    }
}
