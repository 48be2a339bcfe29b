use std::collections::HashMap;

use crate::docker::{DockerCli, is_shell_safe_id};
use crate::error::AppError;
use crate::model::{Image, Inventory};
use crate::parser::{HistoryLayer, parse_history_row, table_rows};
use crate::report::ScanStats;
use crate::shell::CommandRunner;

/// Resolves the images recorded in another image's layer history.
///
/// History output is fetched once per image ID and reused for the rest of the run.
pub struct AncestryResolver<'a, R> {
    docker: &'a DockerCli<R>,
    inventory: &'a Inventory,
    cache: HashMap<String, Vec<&'a Image>>,
}

impl<'a, R: CommandRunner> AncestryResolver<'a, R> {
    pub fn new(docker: &'a DockerCli<R>, inventory: &'a Inventory) -> Self {
        Self { docker, inventory, cache: HashMap::new() }
    }

    /// Inventory images listed in `image`'s history, in history order.
    ///
    /// `<missing>` layers and IDs unknown to the inventory are dropped.
    /// Repeated IDs are kept.
    pub fn ancestors(
        &mut self,
        image: &Image,
        stats: &mut ScanStats,
    ) -> Result<Vec<&'a Image>, AppError> {
        if let Some(cached) = self.cache.get(&image.id) {
            tracing::debug!(image = %image.id, "history cache hit");
            stats.history_cache_hits += 1;
            return Ok(cached.clone());
        }

        let related = if is_shell_safe_id(&image.id) {
            stats.history_calls += 1;
            let output = self.docker.history(&image.id)?;
            self.resolve(image, &output, stats)
        } else {
            tracing::warn!(image = %image.id, "image ID is not shell-safe; skipping its history");
            Vec::new()
        };

        self.cache.insert(image.id.clone(), related.clone());
        Ok(related)
    }

    fn resolve(&self, image: &Image, history: &str, stats: &mut ScanStats) -> Vec<&'a Image> {
        let inventory = self.inventory;
        let mut related = Vec::new();
        for line in table_rows(history) {
            match parse_history_row(line) {
                Some(HistoryLayer::Image(id)) => match inventory.find_by_id(id) {
                    Some(found) => related.push(found),
                    None => {
                        tracing::debug!(layer = id, "ancestor not present in inventory");
                        stats.unknown_ancestors += 1;
                    }
                },
                Some(HistoryLayer::Missing) => {
                    tracing::debug!(image = %image.id, "missing layer");
                    stats.missing_layers += 1;
                }
                None => {}
            }
        }
        related
    }
}
