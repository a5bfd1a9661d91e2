//! Per-generation roster cache. Each generation's listing is fetched at
//! most once per process; concurrent first calls for the same
//! generation collapse into a single underlying request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::catalog::{CatalogFetch, FetchError, API_BASE};
use crate::state::{Generation, RosterEntry};

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<ListResult>,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResult {
    name: String,
    url: String,
}

type RosterCell = Arc<OnceCell<Vec<RosterEntry>>>;

/// Process-lifetime memo of generation rosters. Owned by the
/// application root and passed by reference to callers; never
/// invalidated or evicted (the dataset is small and static).
pub struct RosterCache {
    catalog: Arc<dyn CatalogFetch>,
    cells: Mutex<HashMap<Generation, RosterCell>>,
}

impl RosterCache {
    pub fn new(catalog: Arc<dyn CatalogFetch>) -> Self {
        Self {
            catalog,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// The roster for one generation. The first caller per generation
    /// performs the fetch; concurrent callers await that in-flight
    /// request instead of issuing a duplicate. A failed fetch leaves
    /// the slot empty so a later call may retry.
    pub async fn roster_for(&self, generation: Generation) -> Result<Vec<RosterEntry>, FetchError> {
        let cell = self.cell_for(generation);
        let roster = cell
            .get_or_try_init(|| self.fetch_roster(generation))
            .await?;
        Ok(roster.clone())
    }

    fn cell_for(&self, generation: Generation) -> RosterCell {
        let mut cells = self.cells.lock().unwrap_or_else(|err| err.into_inner());
        cells.entry(generation).or_default().clone()
    }

    async fn fetch_roster(&self, generation: Generation) -> Result<Vec<RosterEntry>, FetchError> {
        let range = generation.range();
        let url = format!(
            "{API_BASE}/pokemon?limit={}&offset={}",
            range.limit, range.offset
        );
        let value = self.catalog.get(&url).await?;
        let response: ListResponse =
            serde_json::from_value(value).map_err(|err| FetchError::Decode(err.to_string()))?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| RosterEntry {
                name: entry.name,
                detail_url: entry.url,
            })
            .collect())
    }
}
