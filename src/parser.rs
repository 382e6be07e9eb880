use crate::ast::{Node, Role, Tree};
use crate::error::GrammarError;
use crate::lexer::{tokenize, Token};
use tracing::{debug, trace};

/// Parses compact notation into a tree.
///
/// ```text
/// notation           := subject "|" verb ["\" complement] {modifier}
/// modifier           := "[" role-tag "]" (word | preposition-clause)
/// preposition-clause := "prep:" ( pair | "{" pair {modifier} "}" )
/// pair               := [preposition] ";" head
/// ```
pub fn parse(input: &str) -> Result<Tree, GrammarError> {
    let tokens = tokenize(input);
    debug!(tokens = tokens.len(), "tokenized notation");

    let mut builder = TreeBuilder::new(&tokens);
    let mut root = builder.parse_heads()?;
    for modifier in builder.parse_modifiers()? {
        attach_to_head(&mut root, modifier)?;
    }

    if let Some(other) = builder.peek() {
        return Err(GrammarError::ExpectedModifierTag {
            found: other.to_string(),
        });
    }

    debug!(heads = root.children.len(), "built notation tree");
    Ok(Tree::new(root))
}

// Top-level modifiers go under the head sharing their role, never under root.
fn attach_to_head(root: &mut Node, node: Node) -> Result<(), GrammarError> {
    let target = node
        .role
        .head_role()
        .and_then(|role| root.children.iter_mut().find(|head| head.role == role));

    match target {
        Some(head) => {
            trace!(head = %head, modifier = %node, "attaching modifier");
            head.attach(node)
        }
        None => Err(GrammarError::NoMatchingHead {
            role: node.role,
            value: node.value,
        }),
    }
}

struct TreeBuilder<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TreeBuilder<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Joins tokens with single spaces until `stop` matches or input ends.
    fn consume_until(&mut self, stop: impl Fn(&Token) -> bool) -> String {
        let mut words = Vec::new();
        while let Some(token) = self.peek() {
            if stop(token) {
                break;
            }
            words.push(token.to_string());
            self.pos += 1;
        }
        words.join(" ")
    }

    fn head_text(
        &mut self,
        role: Role,
        expected: &'static str,
        stop: impl Fn(&Token) -> bool,
    ) -> Result<String, GrammarError> {
        let text = self.consume_until(stop);
        if !text.is_empty() {
            return Ok(text);
        }
        if self.at_end() {
            Err(GrammarError::UnexpectedEndOfInput { expected })
        } else {
            Err(GrammarError::EmptyHead { role })
        }
    }

    // subject|verb
    // subject|verb\complement
    fn parse_heads(&mut self) -> Result<Node, GrammarError> {
        let subject = self.consume_until(|t| *t == Token::Pipe);
        if !self.eat(&Token::Pipe) {
            return Err(GrammarError::UnexpectedEndOfInput {
                expected: "`|` between subject and verb",
            });
        }
        if subject.is_empty() {
            return Err(GrammarError::EmptyHead {
                role: Role::Subject,
            });
        }

        let verb = self.head_text(Role::Verb, "a verb", |t| {
            *t == Token::Backslash || t.is_tag()
        })?;

        let complement = if self.eat(&Token::Backslash) {
            Some(self.head_text(Role::Complement, "a complement", Token::is_tag)?)
        } else {
            None
        };

        let mut heads = vec![
            Node::bar(Role::Subject, subject),
            Node::bar(Role::Verb, verb),
        ];
        if let Some(complement) = complement {
            heads.push(Node::bar(Role::Complement, complement));
        }
        Ok(Node::root(heads))
    }

    // [x] word
    // [x] prep: ...
    fn parse_modifiers(&mut self) -> Result<Vec<Node>, GrammarError> {
        let mut modifiers = Vec::new();
        while let Some(token) = self.peek() {
            let role = match token {
                Token::Tag(role) => *role,
                Token::UnknownTag(_) => {
                    return Err(GrammarError::UnknownRoleTag {
                        found: token.to_string(),
                    })
                }
                _ => break,
            };
            self.pos += 1;
            modifiers.push(self.parse_modifier(role)?);
        }
        Ok(modifiers)
    }

    fn parse_modifier(&mut self, role: Role) -> Result<Node, GrammarError> {
        const EXPECTED: &str = "a modifier word or `prep:`";
        match self.next() {
            Some(Token::Word(word)) => Ok(Node::modifier(role, word.as_str())),
            Some(Token::Prep) => self.parse_preposition(role),
            Some(other) => Err(GrammarError::UnexpectedToken {
                expected: EXPECTED,
                found: other.to_string(),
            }),
            None => Err(GrammarError::UnexpectedEndOfInput { expected: EXPECTED }),
        }
    }

    // { prep;head [x] ... }
    // { ;head [x] ... }
    // prep;head
    // ;head
    fn parse_preposition(&mut self, role: Role) -> Result<Node, GrammarError> {
        if !self.eat(&Token::OpenGroup) {
            return self.parse_pair(role);
        }

        let mut node = self.parse_pair(role)?;
        for modifier in self.parse_modifiers()? {
            trace!(head = %node, modifier = %modifier, "attaching modifier");
            node.attach(modifier)?;
        }

        match self.next() {
            Some(Token::CloseGroup) => Ok(node),
            found => Err(GrammarError::UnterminatedPrepositionGroup {
                pair: node.value,
                found: found
                    .map(|t| format!("`{}`", t))
                    .unwrap_or_else(|| "end of input".to_string()),
            }),
        }
    }

    fn parse_pair(&mut self, role: Role) -> Result<Node, GrammarError> {
        const SEPARATOR: &str = "`;` between preposition and head";
        const HEAD: &str = "a preposition head";

        let mut words: Vec<&str> = Vec::new();
        loop {
            match self.next() {
                Some(Token::Semicolon) => break,
                Some(Token::Word(word)) => words.push(word.as_str()),
                Some(other) => {
                    return Err(GrammarError::UnexpectedToken {
                        expected: SEPARATOR,
                        found: other.to_string(),
                    })
                }
                None => {
                    return Err(GrammarError::UnexpectedEndOfInput {
                        expected: SEPARATOR,
                    })
                }
            }
        }

        match self.next() {
            Some(Token::Word(head)) => Ok(Node::preposition(role, &words.join(" "), head)),
            Some(other) => Err(GrammarError::UnexpectedToken {
                expected: HEAD,
                found: other.to_string(),
            }),
            None => Err(GrammarError::UnexpectedEndOfInput { expected: HEAD }),
        }
    }
}
