use globset::GlobSet;

use crate::ancestry::AncestryResolver;
use crate::docker::DockerCli;
use crate::error::AppError;
use crate::inventory::load_inventory;
use crate::model::Image;
use crate::report::{ScanStats, estimate_reclaimable, find_unused};
use crate::shell::CommandRunner;
use crate::usage::collect_used_images;

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub unused: Vec<Image>,
    pub stats: ScanStats,
}

/// Inventory, usage resolution and set difference, in that order.
///
/// Any failing runtime command aborts the whole scan.
pub fn find_unused_images<R: CommandRunner>(
    docker: &DockerCli<R>,
    exclude: Option<&GlobSet>,
) -> Result<ScanOutcome, AppError> {
    let mut stats = ScanStats::default();

    let inventory = load_inventory(docker, &mut stats)?;
    let mut resolver = AncestryResolver::new(docker, &inventory);
    let used = collect_used_images(&inventory, &mut resolver, &mut stats)?;
    let unused = find_unused(&inventory, &used, exclude, &mut stats);
    stats.reclaimable_bytes = estimate_reclaimable(&unused);

    Ok(ScanOutcome { unused, stats })
}
