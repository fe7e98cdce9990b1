//! Subcommands

use anyhow::{bail, Context};
use clap::{Subcommand, ValueEnum};
use ecclesia_sdk::display::entity_card;
use ecclesia_sdk::{DataService, DioceseFilter, EntityFilter, EntityKind, Jurisdiction};
use serde::Serialize;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List entities, optionally filtered
    Entities {
        /// State abbreviation (e.g. SP)
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Kind token or label (e.g. Catedral, Paroquia)
        #[arg(long)]
        kind: Option<String>,
        /// Diocese id
        #[arg(long)]
        diocese: Option<i64>,
        /// Jurisdiction token or label
        #[arg(long)]
        jurisdiction: Option<String>,
    },
    /// Show one entity
    Entity {
        id: i64,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Search entities by name, city or address
    Search { term: String },
    /// List dioceses
    Dioceses {
        #[arg(long)]
        jurisdiction: Option<String>,
    },
    /// Show one diocese
    Diocese { id: i64 },
    /// List clergy
    Clergy,
    /// Show one clergy member
    Cleric { id: i64 },
    /// List the photos of an entity
    Photos { entity_id: i64 },
    /// States with at least one entity
    States,
    /// Cities with at least one entity
    Cities {
        #[arg(long)]
        state: Option<String>,
    },
    /// Entity kinds
    Kinds,
    /// Jurisdictions
    Jurisdictions,
    /// Catalog totals
    Stats,
    /// Backend reachability
    Health,
}

/// Output format for single entities
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Text,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_kind(value: &str) -> anyhow::Result<EntityKind> {
    let kind = EntityKind::parse(value);
    if !kind.is_known() {
        bail!("unknown entity kind: {}", value);
    }
    Ok(kind)
}

fn parse_jurisdiction(value: &str) -> anyhow::Result<Jurisdiction> {
    let jurisdiction = Jurisdiction::from_api(value);
    if !jurisdiction.is_known() {
        bail!("unknown jurisdiction: {}", value);
    }
    Ok(jurisdiction)
}

/// Run one subcommand, writing its result to stdout
pub async fn run(service: &DataService, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Entities {
            state,
            city,
            kind,
            diocese,
            jurisdiction,
        } => {
            let filter = EntityFilter {
                state,
                city,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                diocese_id: diocese,
                jurisdiction: jurisdiction.as_deref().map(parse_jurisdiction).transpose()?,
            };
            print_json(&service.list_entities(&filter).await?)
        }
        Command::Entity { id, format } => {
            let entity = service
                .get_entity(id)
                .await?
                .with_context(|| format!("entity {} not found", id))?;
            match format {
                Format::Json => print_json(&entity),
                Format::Text => {
                    print!("{}", entity_card(&entity));
                    Ok(())
                }
            }
        }
        Command::Search { term } => print_json(&service.search_entities(&term).await?),
        Command::Dioceses { jurisdiction } => {
            let filter = DioceseFilter {
                jurisdiction: jurisdiction.as_deref().map(parse_jurisdiction).transpose()?,
            };
            print_json(&service.list_dioceses(&filter).await?)
        }
        Command::Diocese { id } => {
            let diocese = service
                .get_diocese(id)
                .await?
                .with_context(|| format!("diocese {} not found", id))?;
            print_json(&diocese)
        }
        Command::Clergy => print_json(&service.list_clergy().await?),
        Command::Cleric { id } => {
            let clergy = service
                .get_clergy(id)
                .await?
                .with_context(|| format!("clergy member {} not found", id))?;
            print_json(&clergy)
        }
        Command::Photos { entity_id } => print_json(&service.list_photos(entity_id).await?),
        Command::States => print_json(&service.list_states().await?),
        Command::Cities { state } => print_json(&service.list_cities(state.as_deref()).await?),
        Command::Kinds => {
            for kind in service.list_kinds().await? {
                println!("{}\t{}", kind.token(), kind.label());
            }
            Ok(())
        }
        Command::Jurisdictions => {
            for jurisdiction in service.list_jurisdictions().await? {
                println!("{}\t{}", jurisdiction.token(), jurisdiction.label());
            }
            Ok(())
        }
        Command::Stats => print_json(&service.stats().await?),
        Command::Health => {
            let report = service.health().await;
            print_json(&report)?;
            if !report.is_healthy() {
                bail!("no backend is reachable");
            }
            Ok(())
        }
    }
}
