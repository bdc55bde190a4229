use thiserror::Error;

pub type GazeResult<T> = Result<T, GazeError>;

#[derive(Debug, Error)]
pub enum GazeError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("timestamps must be ascending: sample {index} is older than its predecessor")]
    UnorderedTimestamps { index: usize },

    #[error("invalid timestamp `{value}`")]
    InvalidTimestamp { value: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
