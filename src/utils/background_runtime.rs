use std::future::Future;
use std::sync::mpsc as std_mpsc;
use std::thread;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

type Job = BoxFuture<'static, ()>;

#[derive(Error, Debug)]
pub enum BackgroundRuntimeError {
    #[error("failed to start background worker '{name}': {reason}")]
    Startup { name: String, reason: String },

    #[error("background worker '{0}' is not running")]
    Stopped(String),
}

/// A dedicated worker thread driving a single-threaded tokio runtime.
///
/// Synchronous callers submit futures with [`BackgroundRuntime::block_on`]
/// and block until their own future resolves. Submissions from concurrent
/// callers queue on the task channel and run interleaved on the worker
/// thread; each caller only ever receives the output of the future it
/// submitted.
pub struct BackgroundRuntime {
    name: String,
    sender: mpsc::UnboundedSender<Job>,
}

impl BackgroundRuntime {
    /// Spawn the worker thread and wait until its runtime is up.
    pub fn new(name: &str) -> Result<Self, BackgroundRuntimeError> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<Result<(), String>>(1);

        let startup_error = |reason: String| BackgroundRuntimeError::Startup {
            name: name.to_string(),
            reason,
        };

        let worker_name = name.to_string();
        thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                // The runtime is built and dropped on this thread only
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                runtime.block_on(async move {
                    while let Some(job) = receiver.recv().await {
                        tokio::spawn(job);
                    }
                });
                debug!("Background worker '{}' stopped", worker_name);
            })
            .map_err(|e| startup_error(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                debug!("Background worker '{}' started", name);
                Ok(Self {
                    name: name.to_string(),
                    sender,
                })
            }
            Ok(Err(reason)) => Err(startup_error(reason)),
            Err(_) => Err(startup_error("worker exited during startup".to_string())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `future` on the worker and block the calling thread until it completes.
    ///
    /// Must not be called from a thread that is itself driving async tasks;
    /// async callers go through `tokio::task::spawn_blocking`.
    pub fn block_on<F, T>(&self, future: F) -> Result<T, BackgroundRuntimeError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = std_mpsc::sync_channel(1);
        let job: Job = Box::pin(async move {
            let _ = result_tx.send(future.await);
        });

        self.sender
            .send(job)
            .map_err(|_| BackgroundRuntimeError::Stopped(self.name.clone()))?;

        result_rx
            .recv()
            .map_err(|_| BackgroundRuntimeError::Stopped(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_block_on_returns_future_output() {
        let runtime = BackgroundRuntime::new("test-worker").unwrap();
        let value = runtime.block_on(async { 40 + 2 }).unwrap();
        assert_eq!(value, 42);
        assert_eq!(runtime.name(), "test-worker");
    }

    #[test]
    fn test_futures_can_use_tokio_timers() {
        let runtime = BackgroundRuntime::new("timer-worker").unwrap();
        let value = runtime
            .block_on(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                "done"
            })
            .unwrap();
        assert_eq!(value, "done");
    }

    #[test]
    fn test_concurrent_callers_get_their_own_results() {
        let runtime = Arc::new(BackgroundRuntime::new("shared-worker").unwrap());

        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                let runtime = runtime.clone();
                thread::spawn(move || {
                    runtime
                        .block_on(async move {
                            // Later submissions finish first
                            tokio::time::sleep(Duration::from_millis(40 - i * 5)).await;
                            i * 10
                        })
                        .unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), i as u64 * 10);
        }
    }
}
