use std::sync::Arc;

use clap::{Parser, Subcommand};

use pokedex::assembler::RecordAssembler;
use pokedex::batch::{BatchLoader, DEFAULT_CONCURRENCY};
use pokedex::catalog::CatalogClient;
use pokedex::roster::RosterCache;
use pokedex::settings;
use pokedex::state::{CreatureRecord, Generation};

/// Pokedex gallery data core
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Look up creatures from the PokeAPI catalog")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble and print one creature record by name or id
    Lookup { identifier: String },
    /// Print a generation roster (gen1, gen2, gen3)
    Roster { generation: String },
    /// Assemble a whole generation; failed entries are dropped from
    /// display but counted
    Gallery {
        generation: String,
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
    /// Cycle the saved display theme
    Theme,
    /// Toggle the saved mute flag
    Mute,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), String> {
    match args.command {
        Command::Lookup { identifier } => {
            let assembler = assembler()?;
            let record = assembler
                .assemble(&identifier)
                .await
                .map_err(|err| format!("{identifier} not found: {err}"))?;
            print_record(&record);
        }
        Command::Roster { generation } => {
            let generation = parse_generation(&generation)?;
            let cache = RosterCache::new(catalog()?);
            let roster = cache
                .roster_for(generation)
                .await
                .map_err(|err| err.to_string())?;
            for entry in &roster {
                println!("{}", entry.name);
            }
        }
        Command::Gallery {
            generation,
            concurrency,
        } => {
            let generation = parse_generation(&generation)?;
            let catalog = catalog()?;
            let cache = RosterCache::new(catalog.clone());
            let roster = cache
                .roster_for(generation)
                .await
                .map_err(|err| err.to_string())?;
            let loader =
                BatchLoader::with_concurrency(Arc::new(RecordAssembler::new(catalog)), concurrency);
            let results = loader.assemble_all(&roster).await;

            let total = results.len();
            let records: Vec<CreatureRecord> =
                results.into_iter().filter_map(|result| result.ok()).collect();
            for record in &records {
                println!("#{:<4} {}", record.detail.id, record.detail.name);
            }
            let failed = total - records.len();
            if failed > 0 {
                eprintln!("{failed} of {total} entries failed to load");
            }
        }
        Command::Theme => {
            let path = settings::default_path();
            let mut settings = settings::load(&path).await;
            settings.cycle_theme();
            settings::save(&path, &settings).await?;
            println!("theme: {}", settings.theme);
        }
        Command::Mute => {
            let path = settings::default_path();
            let mut settings = settings::load(&path).await;
            settings.toggle_mute();
            settings::save(&path, &settings).await?;
            println!("muted: {}", settings.muted);
        }
    }
    Ok(())
}

fn catalog() -> Result<Arc<CatalogClient>, String> {
    CatalogClient::new()
        .map(Arc::new)
        .map_err(|err| err.to_string())
}

fn assembler() -> Result<RecordAssembler, String> {
    Ok(RecordAssembler::new(catalog()?))
}

fn parse_generation(key: &str) -> Result<Generation, String> {
    Generation::from_key(key).ok_or_else(|| {
        let known: Vec<&str> = Generation::ALL.iter().map(|gen| gen.key()).collect();
        format!("unknown generation {key:?}; expected one of {}", known.join(", "))
    })
}

fn print_record(record: &CreatureRecord) {
    let detail = &record.detail;
    println!("#{} {}", detail.id, detail.name);
    println!("  types:     {}", detail.types.join(", "));
    println!("  abilities: {}", detail.abilities.join(", "));
    let stats = &detail.base_stats;
    println!(
        "  stats:     hp {} / atk {} / def {} / spa {} / spd {} / spe {}",
        stats.hp, stats.attack, stats.defense, stats.special_attack, stats.special_defense,
        stats.speed
    );
    if let Some(sprite) = &detail.sprite_front {
        println!("  sprite:    {sprite}");
    }
    println!("  dex entry: {}", record.flavor_text);
    println!("  evolution line:");
    for node in record.evolution_tree.flatten() {
        println!("    {} ({})", node.species_name, node.sprite_url());
    }
}
