use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A record-store query failed. Aborts the current snapshot or trigger
    /// run as a unit; never a partial result.
    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid schedule expression '{expr}': {source}")]
    InvalidSchedule {
        expr: String,
        #[source]
        source: cron::error::Error,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
