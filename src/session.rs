use crate::ast::Tree;
use crate::error::GrammarError;
use crate::parser;
use crate::renderer::{RenderOptions, Renderer};
use tracing::debug;

/// Holds the most recently parsed tree between `parse` and `render`.
///
/// Each session owns its tree; run one session per thread.
#[derive(Debug, Default)]
pub struct Session {
    renderer: Renderer,
    tree: Option<Tree>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            renderer: Renderer::with_options(options),
            tree: None,
        }
    }

    /// Parses `notation` and makes it the current tree. On failure the
    /// session is left without a tree.
    pub fn parse(&mut self, notation: &str) -> Result<&Tree, GrammarError> {
        self.tree = None;
        match parser::parse(notation) {
            Ok(tree) => Ok(self.tree.insert(tree)),
            Err(err) => {
                debug!(error = %err, "notation rejected");
                Err(err)
            }
        }
    }

    /// Renders the current tree, or returns an empty string if there is none.
    pub fn render(&self) -> String {
        match &self.tree {
            Some(tree) => self.renderer.render(tree),
            None => String::new(),
        }
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }
}
