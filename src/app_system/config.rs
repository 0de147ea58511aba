use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::StartupError;
use crate::actor_framework::Entity;
use crate::domain::{Dish, Order};
use crate::pipeline::Request;
use crate::store::MemoryStore;

/// Command-line and environment configuration.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "In-memory dishes and orders REST API", long_about = None)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "GRUBDASH_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Capacity of each resource actor's request channel
    #[arg(long, env = "GRUBDASH_BUFFER_SIZE", default_value_t = 32)]
    pub buffer_size: usize,

    /// JSON file with initial `dishes` and `orders`
    #[arg(long, env = "GRUBDASH_SEED")]
    pub seed: Option<PathBuf>,
}

/// Initial contents of the stores.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Seed {
    pub fn from_json(path: PathBuf, raw: &str) -> Result<Self, StartupError> {
        let seed: Self = serde_json::from_str(raw).map_err(|source| StartupError::SeedParse {
            path: path.clone(),
            source,
        })?;
        seed.validate()
            .map_err(|reason| StartupError::SeedInvalid { path, reason })?;
        Ok(seed)
    }

    /// Holds seeded entities to the rules a create request must pass, and
    /// rejects ids that appear twice in one collection.
    pub fn validate(&self) -> Result<(), String> {
        check_seeded(&self.dishes)?;
        check_seeded(&self.orders)
    }
}

fn check_seeded<T: Entity>(items: &[T]) -> Result<(), String> {
    let create = T::pipelines().create;
    let empty = MemoryStore::<T>::new();
    let mut seen = HashSet::new();

    for item in items {
        let id = item.id();
        let invalid = |reason: String| format!("{} {id}: {reason}", T::KIND);
        if id.is_empty() {
            return Err(format!("{} with an empty id", T::KIND));
        }
        if !seen.insert(id) {
            return Err(invalid("duplicate id".to_string()));
        }
        let data = match serde_json::to_value(item) {
            Ok(Value::Object(data)) => data,
            Ok(_) => return Err(invalid("not a JSON object".to_string())),
            Err(e) => return Err(invalid(e.to_string())),
        };
        create
            .run(&Request::new(None, &data), &empty)
            .map_err(|e| invalid(e.to_string()))?;
        T::parse_draft(&data).map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}

impl Config {
    pub fn load_seed(&self) -> Result<Seed, StartupError> {
        let Some(path) = &self.seed else {
            return Ok(Seed::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| StartupError::SeedRead {
            path: path.clone(),
            source,
        })?;
        let seed = Seed::from_json(path.clone(), &raw)?;
        info!(
            path = %path.display(),
            dishes = seed.dishes.len(),
            orders = seed.orders.len(),
            "Loaded seed data"
        );
        Ok(seed)
    }
}
