use thiserror::Error;

pub type Result<T> = std::result::Result<T, PirqError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PirqError {
    #[error("routing table truncated: {len} bytes, need at least {needed}")]
    Truncated { len: usize, needed: usize },

    #[error("bad routing table signature {0:#010x}")]
    BadSignature(u32),

    #[error("routing table size {0} is not a 32-byte header plus whole 16-byte slots")]
    BadTableSize(u16),
}
