mod inmemory;
mod postgres;

pub use inmemory::InMemoryStatusTransitionRepo;
pub use postgres::PostgresStatusTransitionRepo;
use wellness_scheduler_domain::StatusTransition;

#[async_trait::async_trait]
pub trait IStatusTransitionRepo: Send + Sync {
    /// Persists `transitions` as one grouped write stamped with `ts` and
    /// returns the ones that were applied.
    ///
    /// A document that no longer has the expected `from` status was already
    /// advanced by another lifecycle run and is skipped. A missing document
    /// fails the whole group and nothing is written.
    async fn apply_all(
        &self,
        transitions: &[StatusTransition],
        ts: i64,
    ) -> anyhow::Result<Vec<StatusTransition>>;
}
