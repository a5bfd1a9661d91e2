use serde::{Deserialize, Serialize};

/// Raw sprite repository used for evolution-chain members; the detail
/// response only carries sprites for the queried creature itself.
pub const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// One entry of a generation roster listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub detail_url: String,
}

/// The six base stats as delivered by the catalog (each 0..=255).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureDetail {
    pub id: u32,
    pub name: String,
    pub sprite_front: Option<String>,
    pub sprite_shiny: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub base_stats: BaseStats,
}

/// One node of an evolution chain. Arity is unbounded: branching
/// evolutions keep every child, not just the first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionNode {
    pub species_name: String,
    pub species_id: u32,
    pub children: Vec<EvolutionNode>,
}

impl EvolutionNode {
    /// Sprite URL for this evolution stage, from the fixed template.
    pub fn sprite_url(&self) -> String {
        format!("{SPRITE_BASE}/{}.png", self.species_id)
    }

    /// Every node of the subtree, depth-first. The gallery renders the
    /// chain as a flat list.
    pub fn flatten(&self) -> Vec<&EvolutionNode> {
        let mut nodes = Vec::new();
        self.collect(&mut nodes);
        nodes
    }

    fn collect<'a>(&'a self, nodes: &mut Vec<&'a EvolutionNode>) {
        nodes.push(self);
        for child in &self.children {
            child.collect(nodes);
        }
    }

    pub fn contains_species(&self, name: &str) -> bool {
        self.flatten().iter().any(|node| node.species_name == name)
    }
}

/// The assembled, display-ready aggregate. Never partially populated:
/// assembly either produces all three parts or fails as a unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub detail: CreatureDetail,
    pub flavor_text: String,
    pub evolution_tree: EvolutionNode,
}

/// Offset/limit window into the catalog's flat numeric id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRange {
    pub offset: u32,
    pub limit: u32,
}

/// Supported generations. Ranges are contiguous and non-overlapping in
/// increasing generation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    Gen1,
    Gen2,
    Gen3,
}

impl Generation {
    pub const ALL: [Generation; 3] = [Generation::Gen1, Generation::Gen2, Generation::Gen3];

    pub fn key(&self) -> &'static str {
        match self {
            Generation::Gen1 => "gen1",
            Generation::Gen2 => "gen2",
            Generation::Gen3 => "gen3",
        }
    }

    pub fn from_key(key: &str) -> Option<Generation> {
        Generation::ALL
            .into_iter()
            .find(|generation| generation.key() == key)
    }

    pub fn range(&self) -> RosterRange {
        match self {
            Generation::Gen1 => RosterRange {
                offset: 0,
                limit: 151,
            },
            Generation::Gen2 => RosterRange {
                offset: 151,
                limit: 100,
            },
            Generation::Gen3 => RosterRange {
                offset: 251,
                limit: 135,
            },
        }
    }
}
