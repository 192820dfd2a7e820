//! Reading panel geometry back from the host

mod sampler;

pub use sampler::{parse_px, sample_rect, sample_transform};
