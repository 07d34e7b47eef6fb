//! Core application primitives (clock, pipeline, HTTP surface)

pub mod clock;
pub mod http;
pub mod pipeline;

pub use clock::{Clock, FixedClock, SystemClock};
pub use http::*;
pub use pipeline::*;
