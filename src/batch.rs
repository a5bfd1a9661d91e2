//! Bounded fan-out over a roster: assembles every entry concurrently,
//! keeps results in input order, and never lets one entry's failure
//! abort its siblings.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::assembler::{AssemblyError, RecordAssembler};
use crate::catalog::FetchError;
use crate::state::{CreatureRecord, RosterEntry};

pub const DEFAULT_CONCURRENCY: usize = 8;

pub struct BatchLoader {
    assembler: Arc<RecordAssembler>,
    concurrency: usize,
}

impl BatchLoader {
    pub fn new(assembler: Arc<RecordAssembler>) -> Self {
        Self::with_concurrency(assembler, DEFAULT_CONCURRENCY)
    }

    pub fn with_concurrency(assembler: Arc<RecordAssembler>, concurrency: usize) -> Self {
        Self {
            assembler,
            concurrency: concurrency.max(1),
        }
    }

    /// One result per input entry, index-aligned with the input.
    /// Entries beyond the concurrency bound queue until a permit
    /// frees; completion order does not affect output order.
    pub async fn assemble_all(
        &self,
        entries: &[RosterEntry],
    ) -> Vec<Result<CreatureRecord, AssemblyError>> {
        if entries.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut join_set = JoinSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let assembler = self.assembler.clone();
            let semaphore = semaphore.clone();
            let name = entry.name.clone();
            join_set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (index, Err(task_failure("semaphore closed"))),
                };
                (index, assembler.assemble(&name).await)
            });
        }

        let mut slots: Vec<Option<Result<CreatureRecord, AssemblyError>>> =
            (0..entries.len()).map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            if let Ok((index, result)) = joined {
                slots[index] = Some(result);
            }
        }

        // A panicked task never reported its slot; count it as a
        // failed entry rather than dropping the slot.
        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Err(task_failure("assembly task failed"))))
            .collect()
    }
}

fn task_failure(reason: &str) -> AssemblyError {
    AssemblyError::DetailUnavailable(FetchError::Network(reason.to_string()))
}
