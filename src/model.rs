use std::fmt;
use std::hash::{Hash, Hasher};

use crate::parser::ImageRow;

const LATEST_TAG: &str = "latest";

/// One row of the image inventory. Identity is the runtime-assigned ID alone.
#[derive(Debug, Clone, Eq)]
pub struct Image {
    pub id: String,
    pub name: String,
    /// Size exactly as the runtime printed it, unit suffix included.
    pub size: String,
}

impl Image {
    pub fn new(repository: &str, tag: &str, id: &str, size: &str) -> Self {
        Image { id: id.to_string(), name: image_name(repository, tag), size: size.to_string() }
    }
}

impl From<ImageRow<'_>> for Image {
    fn from(row: ImageRow<'_>) -> Self {
        Image::new(row.repository, row.tag, row.id, row.size)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Image {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{} name:{} size:{}", self.id, self.name, self.size)
    }
}

/// `repository` for the `latest` tag, `repository:tag` otherwise.
pub fn image_name(repository: &str, tag: &str) -> String {
    if tag == LATEST_TAG { repository.to_string() } else { format!("{repository}:{tag}") }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Image reference exactly as listed by `ps -a`.
    pub image_ref: String,
    /// ID of the inventory image whose name matched `image_ref`, if any.
    pub image_id: Option<String>,
}

/// Images and containers as listed once at startup. Read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    images: Vec<Image>,
    containers: Vec<Container>,
}

impl Inventory {
    pub fn new(images: Vec<Image>) -> Self {
        Inventory { images, containers: Vec::new() }
    }

    /// Registers a container, resolving its image by name against the images.
    pub fn add_container(&mut self, image_ref: &str) -> &Container {
        let image_id = self.find_by_name(image_ref).map(|image| image.id.clone());
        self.containers.push(Container { image_ref: image_ref.to_string(), image_id });
        &self.containers[self.containers.len() - 1]
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Image> {
        self.images.iter().find(|image| image.name == name)
    }

    pub fn container_image(&self, container: &Container) -> Option<&Image> {
        container.image_id.as_deref().and_then(|id| self.find_by_id(id))
    }
}
