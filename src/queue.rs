//! Strictly sequential execution of async tasks.
//!
//! A task is a zero-argument capability that produces a pending result. Tasks
//! run one at a time in submission order: each is invoked only after the
//! previous one has resolved. The first failure ends the run and is returned
//! unchanged; tasks after it are never invoked. Control returns to the
//! executor after every task, so other pending work can interleave.

use futures::future::BoxFuture;
use std::future::Future;

/// Results of a successful run, in submission order.
pub type ResultLog<T> = Vec<T>;

/// A zero-argument async producer.
///
/// Implemented for every `Fn() -> impl Future<Output = Result<T, E>>`, so plain
/// closures returning `async move` blocks can be queued directly.
pub trait Task<T, E>: Send + Sync {
    fn invoke(&self) -> BoxFuture<'_, Result<T, E>>;
}

impl<F, Fut, T, E> Task<T, E> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    fn invoke(&self) -> BoxFuture<'_, Result<T, E>> {
        Box::pin(self())
    }
}

/// Run `tasks` one after another, collecting every result.
///
/// An empty list resolves to an empty log.
pub async fn run_sequential<T, E, I>(tasks: I) -> Result<ResultLog<T>, E>
where
    I: IntoIterator,
    I::Item: Task<T, E>,
{
    let tasks: Vec<I::Item> = tasks.into_iter().collect();
    drive(tasks.iter().map(|task| task.invoke())).await
}

/// Await each pending result in turn, yielding after every one.
///
/// Futures are pulled from `pending` lazily, so a task is only invoked once
/// the one before it has resolved.
async fn drive<'a, T, E>(
    pending: impl Iterator<Item = BoxFuture<'a, Result<T, E>>>,
) -> Result<ResultLog<T>, E> {
    let (lower, _) = pending.size_hint();
    let mut log = ResultLog::with_capacity(lower);
    for result in pending {
        log.push(result.await?);
        tokio::task::yield_now().await;
    }
    Ok(log)
}

/// An owned, ordered list of heterogeneous tasks, run exactly once.
pub struct TaskQueue<T, E> {
    tasks: Vec<Box<dyn Task<T, E>>>,
}

impl<T, E> TaskQueue<T, E> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a task to the end of the queue.
    pub fn push(&mut self, task: impl Task<T, E> + 'static) -> &mut Self {
        self.tasks.push(Box::new(task));
        self
    }

    /// Builder-style `push`.
    pub fn with_task(mut self, task: impl Task<T, E> + 'static) -> Self {
        self.push(task);
        self
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task in order. See [`run_sequential`].
    pub async fn run(self) -> Result<ResultLog<T>, E> {
        drive(self.tasks.iter().map(|task| task.invoke())).await
    }
}

impl<T, E> Default for TaskQueue<T, E> {
    fn default() -> Self {
        Self::new()
    }
}
