use crate::error::GrammarError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Bar,         // subject / verb / complement head
    Modifier,    // single attached word
    Preposition, // "preposition;head" pair
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Root,
    Subject,
    Verb,
    Complement,
    Object,
    Oblique, // [^]
}

impl Role {
    /// Decodes the letter inside a `[x]` modifier tag.
    pub fn from_tag_letter(letter: char) -> Option<Role> {
        match letter.to_ascii_lowercase() {
            's' => Some(Role::Subject),
            'v' => Some(Role::Verb),
            'c' => Some(Role::Complement),
            'o' => Some(Role::Object),
            '^' => Some(Role::Oblique),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Role::Root => "r",
            Role::Subject => "s",
            Role::Verb => "v",
            Role::Complement => "c",
            Role::Object => "o",
            Role::Oblique => "^",
        }
    }

    /// The root-level head a top-level modifier of this role attaches to.
    ///
    /// Oblique phrases hang off the complement slot (`king|is\^ [^] ...`);
    /// objects have no top-level head.
    pub fn head_role(self) -> Option<Role> {
        match self {
            Role::Subject | Role::Verb | Role::Complement => Some(self),
            Role::Oblique => Some(Role::Complement),
            Role::Root | Role::Object => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Root => "root",
            Role::Subject => "subject",
            Role::Verb => "verb",
            Role::Complement => "complement",
            Role::Object => "object",
            Role::Oblique => "oblique",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub role: Role,
    pub value: String, // "preposition;head" for Preposition nodes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preposition: Option<Box<Node>>,
}

impl Node {
    fn new(kind: NodeKind, role: Role, value: String) -> Self {
        Self {
            kind,
            role,
            value,
            children: Vec::new(),
            preposition: None,
        }
    }

    pub fn root(heads: Vec<Node>) -> Self {
        let mut root = Self::new(NodeKind::Root, Role::Root, String::new());
        root.children = heads;
        root
    }

    pub fn bar(role: Role, value: impl Into<String>) -> Self {
        Self::new(NodeKind::Bar, role, value.into())
    }

    pub fn modifier(role: Role, value: impl Into<String>) -> Self {
        Self::new(NodeKind::Modifier, role, value.into())
    }

    pub fn preposition(role: Role, preposition: &str, head: &str) -> Self {
        Self::new(
            NodeKind::Preposition,
            role,
            format!("{};{}", preposition, head),
        )
    }

    /// Splits a Preposition node's value into `(preposition, head)`.
    pub fn preposition_pair(&self) -> (&str, &str) {
        debug_assert!(
            self.value.contains(';'),
            "preposition node without `;`: {}",
            self.value
        );
        self.value.split_once(';').unwrap_or(("", self.value.as_str()))
    }

    /// Adds `child` below this node. Preposition children go into the
    /// dedicated slot, of which there is only one.
    pub fn attach(&mut self, child: Node) -> Result<(), GrammarError> {
        if child.kind != NodeKind::Preposition {
            self.children.push(child);
            return Ok(());
        }
        if self.preposition.is_some() {
            return Err(GrammarError::DuplicatePreposition {
                role: self.role,
                head: self.value.clone(),
            });
        }
        self.preposition = Some(Box::new(child));
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}:{:?}", self.role.tag(), self.value, self.kind)
    }
}

/// A parsed notation. Only the parser builds trees, so the root always has
/// a subject and a verb head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub(crate) fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn head(&self, role: Role) -> Option<&Node> {
        self.root.children.iter().find(|n| n.role == role)
    }

    pub fn subject(&self) -> Option<&Node> {
        self.head(Role::Subject)
    }

    pub fn verb(&self) -> Option<&Node> {
        self.head(Role::Verb)
    }

    pub fn complement(&self) -> Option<&Node> {
        self.head(Role::Complement)
    }
}
