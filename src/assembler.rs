//! Record assembly: one creature identifier in, one complete
//! `CreatureRecord` out. The three catalog fetches are strictly
//! sequential; each step's URL comes from the prior response.

use std::sync::Arc;

use serde::Deserialize;

use crate::catalog::{CatalogFetch, FetchError, API_BASE};
use crate::state::{BaseStats, CreatureDetail, CreatureRecord, EvolutionNode};

/// Species URLs look like `/api/v2/pokemon-species/{id}/`; the id is
/// zero-indexed path segment 6, a fixed convention of the catalog.
const SPECIES_ID_SEGMENT: usize = 6;

/// Assembly-layer failure taxonomy. Assembly stops at the first failing
/// step; no partial record is ever produced.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    #[error("identifier is empty")]
    InvalidIdentifier,
    #[error("creature detail unavailable: {0}")]
    DetailUnavailable(FetchError),
    #[error("species info unavailable: {0}")]
    SpeciesUnavailable(FetchError),
    #[error("no English flavor text entry")]
    NoFlavorText,
    #[error("evolution chain unavailable: {0}")]
    EvolutionUnavailable(FetchError),
    #[error("malformed evolution chain: {0}")]
    MalformedChain(String),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    sprites: serde_json::Value,
    types: Vec<PokemonTypeSlot>,
    abilities: Vec<PokemonAbilitySlot>,
    stats: Vec<PokemonStatSlot>,
    species: ApiResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
    evolution_chain: ApiResource,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    evolves_to: Vec<ChainLink>,
}

/// Orchestrates the detail → species → evolution-chain fetch sequence.
pub struct RecordAssembler {
    catalog: Arc<dyn CatalogFetch>,
}

impl RecordAssembler {
    pub fn new(catalog: Arc<dyn CatalogFetch>) -> Self {
        Self { catalog }
    }

    /// Assemble the display-ready record for one creature, by name or
    /// numeric id. Fails as a unit at the first step that cannot
    /// complete; no further catalog calls are made after a failure.
    pub async fn assemble(&self, identifier: &str) -> Result<CreatureRecord, AssemblyError> {
        let identifier = normalize_identifier(identifier)?;

        let url = format!("{API_BASE}/pokemon/{identifier}");
        let detail: PokemonResponse = self
            .fetch(&url)
            .await
            .map_err(AssemblyError::DetailUnavailable)?;

        let species: SpeciesResponse = self
            .fetch(&detail.species.url)
            .await
            .map_err(AssemblyError::SpeciesUnavailable)?;

        let flavor_text = english_flavor_text(&species.flavor_text_entries)
            .ok_or(AssemblyError::NoFlavorText)?;

        let chain: EvolutionChainResponse = self
            .fetch(&species.evolution_chain.url)
            .await
            .map_err(AssemblyError::EvolutionUnavailable)?;
        let evolution_tree = build_evolution_node(&chain.chain)?;

        Ok(CreatureRecord {
            detail: into_detail(detail),
            flavor_text,
            evolution_tree,
        })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let value = self.catalog.get(url).await?;
        serde_json::from_value(value).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

fn normalize_identifier(raw: &str) -> Result<String, AssemblyError> {
    let identifier = raw.trim().to_lowercase();
    if identifier.is_empty() {
        return Err(AssemblyError::InvalidIdentifier);
    }
    Ok(identifier)
}

/// First English flavor-text entry, with whitespace runs (including
/// newlines and form feeds) collapsed to single spaces and ends
/// trimmed. Absence of an English entry is a hard failure upstream;
/// other languages are never substituted.
fn english_flavor_text(entries: &[FlavorTextEntry]) -> Option<String> {
    entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| collapse_whitespace(&entry.flavor_text))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Walk the chain depth-first, keeping every `evolves_to` branch. A
/// node may have zero, one, or several children; all are preserved.
fn build_evolution_node(link: &ChainLink) -> Result<EvolutionNode, AssemblyError> {
    let species_id = species_id_from_url(&link.species.url)
        .ok_or_else(|| AssemblyError::MalformedChain(link.species.url.clone()))?;
    let children = link
        .evolves_to
        .iter()
        .map(build_evolution_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(EvolutionNode {
        species_name: link.species.name.clone(),
        species_id,
        children,
    })
}

fn species_id_from_url(url: &str) -> Option<u32> {
    url.split('/').nth(SPECIES_ID_SEGMENT)?.parse().ok()
}

fn into_detail(response: PokemonResponse) -> CreatureDetail {
    let stat = |name: &str| -> u16 {
        response
            .stats
            .iter()
            .find(|slot| slot.stat.name == name)
            .map(|slot| slot.base_stat)
            .unwrap_or_default()
    };
    let base_stats = BaseStats {
        hp: stat("hp"),
        attack: stat("attack"),
        defense: stat("defense"),
        special_attack: stat("special-attack"),
        special_defense: stat("special-defense"),
        speed: stat("speed"),
    };

    CreatureDetail {
        id: response.id,
        name: response.name,
        sprite_front: pointer_string(&response.sprites, "/front_default"),
        sprite_shiny: pointer_string(&response.sprites, "/front_shiny"),
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        base_stats,
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}
