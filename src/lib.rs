#![warn(
    clippy::all,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::correctness,
    clippy::suspicious
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::multiple_crate_versions
)]

pub mod codec;
pub mod config;
pub mod epoch;
pub mod error;
pub mod instant;
pub mod pg_timestamp;
pub mod wire;

pub use codec::{TargetShape, TimestampCodec, TimestampValue};
pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use instant::Instant;
pub use pg_timestamp::PgTimestamp;
