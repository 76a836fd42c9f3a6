use thiserror::Error;

/// Reasons a session ends without a battle outcome or cancellation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid room id: {0:?}")]
    InvalidRoom(String),

    #[error("Failed to join {room}: {reason}")]
    JoinFailed { room: String, reason: String },

    #[error("Connection lost after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: usize, last_error: String },
}
