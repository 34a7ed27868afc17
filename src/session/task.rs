use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// An outstanding gateway request owned by a view.
///
/// Dropping the handle aborts the task, so a result can never be applied to
/// a view that has already been torn down.
#[derive(Debug)]
pub struct RequestHandle<T> {
    inner: Option<JoinHandle<T>>,
}

/// Spawns `future` on the current tokio runtime.
pub fn spawn_request<F>(future: F) -> RequestHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    RequestHandle {
        inner: Some(tokio::spawn(future)),
    }
}

impl<T> RequestHandle<T> {
    pub fn cancel(&mut self) {
        if let Some(handle) = self.inner.take() {
            debug!("Cancelling outstanding request");
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_none()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Waits for the result. `None` if the request was cancelled or panicked.
    /// Dropping the returned future before it resolves aborts the task.
    pub async fn join(mut self) -> Option<T> {
        let result = self.inner.as_mut()?.await;
        self.inner = None;
        result.ok()
    }
}

impl<T> Drop for RequestHandle<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_returns_result() {
        let handle = spawn_request(async { 7 });
        assert_eq!(handle.join().await, Some(7));
    }

    #[tokio::test]
    async fn test_cancelled_request_yields_none() {
        let mut handle = spawn_request(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "late"
        });
        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(handle.join().await, None);
    }

    #[tokio::test]
    async fn test_abandoned_join_aborts_task() {
        let applied = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&applied);
        let handle = spawn_request(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
        });

        tokio::select! {
            _ = handle.join() => panic!("request should not finish first"),
            () = tokio::time::sleep(Duration::from_millis(5)) => {}
        }

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!applied.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let applied = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&applied);
        let handle = spawn_request(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
        });
        drop(handle);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!applied.load(Ordering::SeqCst));
    }
}
