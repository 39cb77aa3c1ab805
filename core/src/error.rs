use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to write to {stream}")]
    Write {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to close {stream}")]
    Close {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin")]
    Read(#[source] std::io::Error),
}

impl FixtureError {
    pub fn write(stream: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| FixtureError::Write { stream, source }
    }

    pub fn close(stream: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| FixtureError::Close { stream, source }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn process: {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error while streaming: {stream}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for process")]
    Wait(#[source] std::io::Error),
}

impl RunnerError {
    /// Shell conventions: 127 for a missing program, 126 for one that could
    /// not be executed, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerError::Spawn { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                127
            }
            RunnerError::Spawn { .. } => 126,
            _ => 1,
        }
    }

    pub(crate) fn stream(stream: &'static str) -> impl Fn(std::io::Error) -> Self {
        move |source| RunnerError::StreamIo { stream, source }
    }
}
