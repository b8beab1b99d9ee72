pub mod database;
pub mod inline;
pub mod render;
pub mod sanitize;
pub mod writer;

pub use database::node::Node;
pub use database::{GuideDatabase, MAIN_NODE, canonical_name};
pub use inline::Construct;
pub use render::{RenderWarning, Renderer, WarningKind};
pub use writer::{to_bytes, write_guide};

/// Render `source` into the node called `name`, creating the node if needed.
///
/// `file_id` tags any warnings so they can be reported against the right file.
pub fn render_document(
    database: &mut GuideDatabase,
    name: &str,
    source: &str,
    file_id: usize,
) -> Vec<RenderWarning> {
    let node = database.get_or_create(name);
    Renderer::new(source, file_id).render(node)
}
