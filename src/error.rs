//! Failures of the engine itself.
//!
//! Errors that travel through a stream are the stream's own `Err` type; this
//! enum only covers what goes wrong around the streams, such as an executor
//! refusing to run a scheduled task.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RxError {
  #[error("failed to spawn a task on the executor: {0}")]
  Spawn(#[from] futures::task::SpawnError),
}
