use crate::ast::Tree;
use serde::Serialize;

/// JSON envelope handed to the Python and wasm bindings.
#[derive(Debug, Serialize, Clone)]
pub struct StagOutput {
    pub text: String,
    pub tree: Tree,
}
