pub mod config;
pub mod elapsed;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod output;
pub mod pacer;
pub mod stream;

pub use config::{FixtureConfig, LogConfig, TIME_UNIT};
pub use error::{FixtureError, RunnerError};
pub use pacer::Pacer;
pub use stream::{is_terminal, StdStream, StdStreamWriter};
