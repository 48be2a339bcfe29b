use std::collections::HashSet;

use crate::ancestry::AncestryResolver;
use crate::error::AppError;
use crate::model::{Image, Inventory};
use crate::report::ScanStats;
use crate::shell::CommandRunner;

/// Every image a container depends on, directly or through its history.
///
/// Entries are not deduplicated; only membership matters downstream.
#[derive(Debug, Default)]
pub struct UsedImages<'a> {
    pub direct: Vec<&'a Image>,
    pub ancestors: Vec<&'a Image>,
}

impl<'a> UsedImages<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Image> + '_ {
        self.direct.iter().chain(self.ancestors.iter()).copied()
    }

    pub fn ids(&self) -> HashSet<&'a str> {
        self.iter().map(|image| image.id.as_str()).collect()
    }
}

/// Collects containers' images, then the history of each of them.
///
/// History is queried once per directly used image; the runtime already
/// reports the whole chain, so no recursion is needed.
pub fn collect_used_images<'a, R: CommandRunner>(
    inventory: &'a Inventory,
    resolver: &mut AncestryResolver<'a, R>,
    stats: &mut ScanStats,
) -> Result<UsedImages<'a>, AppError> {
    let direct: Vec<&'a Image> = inventory
        .containers()
        .iter()
        .filter_map(|container| inventory.container_image(container))
        .collect();

    let mut ancestors = Vec::new();
    for image in &direct {
        ancestors.extend(resolver.ancestors(image, stats)?);
    }

    Ok(UsedImages { direct, ancestors })
}
