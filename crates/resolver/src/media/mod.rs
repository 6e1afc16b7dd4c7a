pub mod raw;
pub mod stream_record;

pub use raw::{AdaptiveFormat, RawPlatformResponse};
pub use stream_record::{AudioStream, StreamRecord};
