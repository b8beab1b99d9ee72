use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use guide::{
    GuideDatabase, MAIN_NODE, RenderWarning, Renderer, WarningKind, canonical_name, write_guide,
};
use tracing::{info, warn};

use crate::error::ConvertError;
use crate::source::SourceDocument;

/// Turns a set of source documents into one guide database.
#[derive(Debug, Clone)]
pub struct Converter {
    database_name: String,
    /// Document name that becomes the MAIN node (case-insensitive).
    main: String,
}

/// Result of a conversion run.
#[derive(Debug)]
pub struct Conversion {
    pub database: GuideDatabase,
    pub warnings: Vec<RenderWarning>,
}

impl Converter {
    pub fn new(database_name: impl Into<String>) -> Self {
        Converter {
            database_name: database_name.into(),
            main: MAIN_NODE.to_string(),
        }
    }

    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.main = main.into();
        self
    }

    /// The node a document with this name is rendered into.
    pub fn node_name(&self, document_name: &str) -> String {
        let name = canonical_name(document_name);
        if name == canonical_name(&self.main) {
            MAIN_NODE.to_string()
        } else {
            name
        }
    }

    /// Render every document in order. The position of a document in
    /// `sources` is its file id in the returned warnings.
    pub fn convert(&self, sources: &[SourceDocument]) -> Conversion {
        let mut database = GuideDatabase::new(self.database_name.clone());
        let mut warnings = Vec::new();

        for (file_id, source) in sources.iter().enumerate() {
            let name = self.node_name(&source.name);
            let renderer = Renderer::new(&source.text, file_id);

            if database.contains(&name) {
                warn!(file = %source.label(), node = %name, "node already defined, appending");
                warnings.push(RenderWarning::new(
                    WarningKind::DuplicateNode(name.clone()),
                    renderer.title_span(),
                    file_id,
                ));
            }

            let node = database.get_or_create(&name);
            warnings.extend(renderer.render(node));

            info!(file = %source.label(), node = %node.name(), title = %node.title, "rendered");
        }

        Conversion { database, warnings }
    }
}

/// Write the database to `path` in guide format.
pub fn save(database: &GuideDatabase, path: &Path) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_guide(database, &mut out).map_err(|e| ConvertError::io(path, e))?;
    info!(path = %path.display(), nodes = database.len(), "saved");
    Ok(())
}
