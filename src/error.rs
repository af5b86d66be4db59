use thiserror::Error;

/// Fatal errors. Recoverable outcomes (a full tile, no prey, nothing to mutate)
/// are reported as `bool` / `Option` by the operations themselves.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("tile index out of bounds: ({x}, {y})")]
    OutOfBounds { x: usize, y: usize },

    #[error("invalid map: {0}")]
    InvalidMap(String),

    #[error("unknown tile symbol: {0:?}")]
    UnknownTile(char),

    #[error("unknown gene: {0}")]
    UnknownGene(String),

    #[error("invalid spawn bias: {0}")]
    InvalidBias(String),

    #[error("unknown creature: {0}")]
    UnknownCreature(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
