mod blob;
mod timestamp;

pub use blob::Blob;
pub use timestamp::Timestamp;
