/// Global commands the analyzer sends to the server
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// /join ROOMID
    JoinRoom(String),
}

impl ClientMessage {
    /// A `/join` directive for a room
    pub fn join(room: &str) -> Self {
        Self::JoinRoom(room.to_string())
    }

    /// Serialize to wire format. Global commands carry no room prefix: |TEXT
    pub fn to_wire_format(&self) -> String {
        match self {
            Self::JoinRoom(room) => format!("|/join {}", room),
        }
    }
}
