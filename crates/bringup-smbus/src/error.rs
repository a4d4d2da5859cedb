use thiserror::Error;

pub type Result<T> = std::result::Result<T, SmbusError>;

/// Failure of a single SMBus transaction. Nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SmbusError {
    /// The completion poll ran out of budget while the controller still reported busy.
    #[error("SMBus transaction timed out")]
    Timeout,

    /// Stale status bits would not clear before a transaction could start.
    #[error("SMBus controller not ready")]
    NotReady,

    /// The controller finished but did not flag the transaction as valid.
    #[error("SMBus transaction failed (status {status:#04x})")]
    Protocol { status: u8 },
}

impl SmbusError {
    /// The signed status code firmware callers of this controller historically compare against.
    pub const fn legacy_code(self) -> i32 {
        match self {
            SmbusError::Protocol { .. } => -1,
            SmbusError::NotReady => -2,
            SmbusError::Timeout => -3,
        }
    }
}

/// Coarse outcome of one protocol exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Success,
    Timeout,
    ProtocolError(u8),
}

impl TransactionStatus {
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => TransactionStatus::Success,
            Err(err) => TransactionStatus::from(*err),
        }
    }
}

impl From<SmbusError> for TransactionStatus {
    fn from(err: SmbusError) -> Self {
        match err {
            // Both are an exhausted poll budget.
            SmbusError::Timeout | SmbusError::NotReady => TransactionStatus::Timeout,
            SmbusError::Protocol { status } => TransactionStatus::ProtocolError(status),
        }
    }
}
