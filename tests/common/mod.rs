//! Shared test helpers: an in-memory catalog with canned JSON
//! responses, a call log, and optional per-request latency.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use pokedex::catalog::{CatalogFetch, FetchError, API_BASE};

pub struct FakeCatalog {
    responses: Mutex<HashMap<String, Result<Value, FetchError>>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    /// Hold every request open for `delay`, so tests can overlap
    /// in-flight calls deterministically.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    pub fn insert(&self, url: &str, value: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(value));
    }

    pub fn fail(&self, url: &str, error: FetchError) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(error));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|called| called.as_str() == url)
            .count()
    }

    /// High-water mark of simultaneously in-flight requests.
    pub fn max_in_flight(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogFetch for FakeCatalog {
    async fn get(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        let responses = self.responses.lock().unwrap();
        match responses.get(url) {
            Some(result) => result.clone(),
            None => Err(FetchError::HttpStatus(404)),
        }
    }
}

pub fn detail_url(identifier: &str) -> String {
    format!("{API_BASE}/pokemon/{identifier}")
}

pub fn species_url(id: u32) -> String {
    format!("{API_BASE}/pokemon-species/{id}/")
}

pub fn chain_url(id: u32) -> String {
    format!("{API_BASE}/evolution-chain/{id}/")
}

pub fn roster_url(limit: u32, offset: u32) -> String {
    format!("{API_BASE}/pokemon?limit={limit}&offset={offset}")
}

pub fn pokemon_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "sprites": {
            "front_default": format!("https://sprites.example/{id}.png"),
            "front_shiny": format!("https://sprites.example/shiny/{id}.png"),
        },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": format!("{API_BASE}/type/12/") } },
            { "slot": 2, "type": { "name": "poison", "url": format!("{API_BASE}/type/4/") } },
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": format!("{API_BASE}/ability/65/") } },
        ],
        "stats": [
            { "base_stat": 45, "stat": { "name": "hp", "url": format!("{API_BASE}/stat/1/") } },
            { "base_stat": 49, "stat": { "name": "attack", "url": format!("{API_BASE}/stat/2/") } },
            { "base_stat": 49, "stat": { "name": "defense", "url": format!("{API_BASE}/stat/3/") } },
            { "base_stat": 65, "stat": { "name": "special-attack", "url": format!("{API_BASE}/stat/4/") } },
            { "base_stat": 65, "stat": { "name": "special-defense", "url": format!("{API_BASE}/stat/5/") } },
            { "base_stat": 45, "stat": { "name": "speed", "url": format!("{API_BASE}/stat/6/") } },
        ],
        "species": { "url": species_url(id) },
    })
}

pub fn species_json(flavor_text: &str, language: &str, chain_id: u32) -> Value {
    json!({
        "flavor_text_entries": [
            { "flavor_text": flavor_text, "language": { "name": language, "url": "" } },
        ],
        "evolution_chain": { "url": chain_url(chain_id) },
    })
}

pub fn chain_link(name: &str, id: u32, children: Vec<Value>) -> Value {
    json!({
        "species": { "name": name, "url": species_url(id) },
        "evolves_to": children,
    })
}

pub fn chain_json(root: Value) -> Value {
    json!({ "chain": root })
}

pub fn roster_json(names: &[&str]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .map(|name| json!({ "name": name, "url": detail_url(name) }))
        .collect();
    json!({ "count": results.len(), "results": results })
}

/// Canned three-stage line: bulbasaur → ivysaur → venusaur.
pub fn seed_bulbasaur(catalog: &FakeCatalog) {
    catalog.insert(&detail_url("bulbasaur"), pokemon_json(1, "bulbasaur"));
    catalog.insert(
        &species_url(1),
        species_json("Bulbasaur\n can be seen   napping.", "en", 1),
    );
    catalog.insert(
        &chain_url(1),
        chain_json(chain_link(
            "bulbasaur",
            1,
            vec![chain_link(
                "ivysaur",
                2,
                vec![chain_link("venusaur", 3, vec![])],
            )],
        )),
    );
}
