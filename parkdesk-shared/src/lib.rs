pub mod pii;
pub mod timestamp;

pub use pii::Masked;
pub use timestamp::RawTimestamp;
