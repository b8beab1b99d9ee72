use crate::database::paragraph::Paragraph;

/// A named, titled page of the guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    pub title: String,
    pub paragraphs: Vec<Paragraph>,
}

impl Node {
    pub(crate) fn new(name: String) -> Self {
        Node {
            name,
            title: String::new(),
            paragraphs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start a new paragraph and return it.
    pub fn paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// The paragraph currently being written, opening one if there is none.
    pub fn current(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            return self.paragraph();
        }
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(Paragraph::is_empty)
    }
}
