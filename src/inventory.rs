use crate::docker::DockerCli;
use crate::error::AppError;
use crate::model::{Image, Inventory};
use crate::parser::{parse_container_image, parse_image_row, table_rows};
use crate::report::ScanStats;
use crate::shell::CommandRunner;

/// Lists images, then containers, and resolves each container's image by name.
///
/// A failing listing command aborts the load. Rows with too few columns are
/// skipped and counted in `stats.skipped_rows`.
pub fn load_inventory<R: CommandRunner>(
    docker: &DockerCli<R>,
    stats: &mut ScanStats,
) -> Result<Inventory, AppError> {
    let images_output = docker.images()?;
    let images = parse_images(&images_output, stats);

    let containers_output = docker.containers()?;
    let mut inventory = Inventory::new(images);
    for line in table_rows(&containers_output) {
        let Some(image_ref) = parse_container_image(line) else {
            tracing::warn!(row = line, "skipping malformed container row");
            stats.skipped_rows += 1;
            continue;
        };
        if inventory.add_container(image_ref).image_id.is_none() {
            tracing::debug!(image = image_ref, "container image not found in inventory");
            stats.unresolved_containers += 1;
        }
    }

    stats.images = inventory.images().len();
    stats.containers = inventory.containers().len();
    Ok(inventory)
}

fn parse_images(output: &str, stats: &mut ScanStats) -> Vec<Image> {
    let mut images = Vec::new();
    for line in table_rows(output) {
        match parse_image_row(line) {
            Some(row) => images.push(Image::from(row)),
            None => {
                tracing::warn!(row = line, "skipping malformed image row");
                stats.skipped_rows += 1;
            }
        }
    }
    images
}
