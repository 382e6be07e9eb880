use crate::ast::{Node, NodeKind, Role, Tree};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complement literal marking a slot that only hosts oblique phrases.
pub const OBLIQUE_PLACEHOLDER: &str = "^";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrepositionPlacement {
    /// modifiers, preposition, head: "on the throne king"
    #[default]
    BeforeHead,
    /// modifiers, head, preposition: "king on the throne"
    AfterHead,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub preposition_placement: PrepositionPlacement,
    pub elide_oblique_placeholder: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preposition_placement: PrepositionPlacement::BeforeHead,
            elide_oblique_placeholder: true,
        }
    }
}

impl RenderOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Linearizes the tree: subject, verb, then complement.
    pub fn render(&self, tree: &Tree) -> String {
        let mut out: Vec<&str> = Vec::new();
        self.render_node(tree.root(), &mut out);
        debug!(words = out.len(), "rendered notation tree");
        out.join(" ")
    }

    fn render_node<'t>(&self, node: &'t Node, out: &mut Vec<&'t str>) {
        match node.kind {
            NodeKind::Root => {
                for role in [Role::Subject, Role::Verb, Role::Complement] {
                    if let Some(head) = node.children.iter().find(|n| n.role == role) {
                        self.render_node(head, out);
                    }
                }
            }
            NodeKind::Bar if node.role == Role::Verb => {
                push_word(out, &node.value);
                self.render_children(node, out);
                self.render_slot(node, out);
            }
            NodeKind::Bar | NodeKind::Modifier => {
                self.render_children(node, out);
                let head = self.literal(node);
                match self.options.preposition_placement {
                    PrepositionPlacement::BeforeHead => {
                        self.render_slot(node, out);
                        push_word(out, head);
                    }
                    PrepositionPlacement::AfterHead => {
                        push_word(out, head);
                        self.render_slot(node, out);
                    }
                }
            }
            NodeKind::Preposition => {
                let (preposition, head) = node.preposition_pair();
                push_word(out, preposition);
                self.render_children(node, out);
                match self.options.preposition_placement {
                    PrepositionPlacement::BeforeHead => {
                        self.render_slot(node, out);
                        push_word(out, head);
                    }
                    PrepositionPlacement::AfterHead => {
                        push_word(out, head);
                        self.render_slot(node, out);
                    }
                }
            }
        }
    }

    fn render_children<'t>(&self, node: &'t Node, out: &mut Vec<&'t str>) {
        for child in &node.children {
            self.render_node(child, out);
        }
    }

    fn render_slot<'t>(&self, node: &'t Node, out: &mut Vec<&'t str>) {
        if let Some(prep) = &node.preposition {
            self.render_node(prep, out);
        }
    }

    fn literal<'t>(&self, node: &'t Node) -> &'t str {
        let placeholder = node.kind == NodeKind::Bar
            && node.role == Role::Complement
            && node.value == OBLIQUE_PLACEHOLDER;
        if placeholder && self.options.elide_oblique_placeholder {
            ""
        } else {
            &node.value
        }
    }
}

fn push_word<'t>(out: &mut Vec<&'t str>, word: &'t str) {
    if !word.is_empty() {
        out.push(word);
    }
}

/// Renders with default options.
pub fn render(tree: &Tree) -> String {
    Renderer::new().render(tree)
}
