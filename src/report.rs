use std::collections::HashSet;
use std::fmt::Write;

use byte_unit::Byte;
use globset::GlobSet;

use crate::model::{Image, Inventory};
use crate::usage::UsedImages;

pub const REPORT_HEADER: &str = "unused images";

/// Counters gathered along the pipeline, mostly for soft skips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub images: usize,
    pub containers: usize,
    pub skipped_rows: usize,
    pub unresolved_containers: usize,
    pub missing_layers: usize,
    pub unknown_ancestors: usize,
    pub history_calls: usize,
    pub history_cache_hits: usize,
    pub excluded: usize,
    pub unused: usize,
    /// Best-effort byte total of the unused images' reported sizes.
    pub reclaimable_bytes: u64,
}

/// Inventory images whose ID is absent from `used`, in inventory order.
///
/// Images whose name matches `exclude` are left out and counted instead.
pub fn find_unused(
    inventory: &Inventory,
    used: &UsedImages<'_>,
    exclude: Option<&GlobSet>,
    stats: &mut ScanStats,
) -> Vec<Image> {
    let used_ids = used.ids();
    let mut unused = Vec::new();
    for image in inventory.images() {
        if used_ids.contains(image.id.as_str()) {
            continue;
        }
        if exclude.is_some_and(|set| set.is_match(&image.name)) {
            tracing::debug!(image = %image.name, "excluded by configuration");
            stats.excluded += 1;
            continue;
        }
        unused.push(image.clone());
    }
    stats.unused = unused.len();
    unused
}

pub fn render(unused: &[Image]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{REPORT_HEADER}");
    for image in unused {
        let _ = writeln!(out, "{image}");
    }
    out
}

/// Sum of the sizes that parse as byte quantities; others are ignored.
///
/// Rows sharing an ID are counted once.
pub fn estimate_reclaimable(unused: &[Image]) -> u64 {
    let mut seen = HashSet::new();
    unused
        .iter()
        .filter(|image| seen.insert(image.id.as_str()))
        .filter_map(|image| parse_size(&image.size))
        .fold(0u64, u64::saturating_add)
}

fn parse_size(value: &str) -> Option<u64> {
    let byte = Byte::parse_str(value.trim(), false).ok()?;
    u64::try_from(byte.as_u128()).ok()
}
