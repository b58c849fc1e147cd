// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for tinytalk.
//!
//! The AST represents the structure of a program after parsing. Every node
//! carries a [`Span`] so callers can point back into the source.
//!
//! # Message Sending
//!
//! tinytalk follows Smalltalk's message precedence:
//!
//! 1. **Unary messages**: `object message` (highest precedence)
//! 2. **Binary messages**: `3 + 4 * 2` (strictly left to right)
//! 3. **Keyword messages**: `array at: 1 put: 'x'` (lowest precedence)
//!
//! Every send is one [`MessageSend`] holding exactly one [`Message`]; a chain
//! such as `x foo bar` nests sends through the receiver.
//!
//! Parenthesized expressions leave no trace in the tree.
//!
//! # Example
//!
//! ```ignore
//! // Source: x := 3 + 4
//! Program {
//!     statements: vec![
//!         Statement::Assignment {
//!             target: Identifier { name: "x".into(), span: ... },
//!             value: Expression::MessageSend(MessageSend {
//!                 receiver: Box::new(Expression::Literal(Literal::Integer(3), ...)),
//!                 message: Message::Binary {
//!                     selector: "+".into(),
//!                     argument: Box::new(Expression::Literal(Literal::Integer(4), ...)),
//!                     span: ...
//!                 },
//!                 span: ...
//!             }),
//!             span: ...
//!         }
//!     ],
//!     span: ...
//! }
//! ```

use ecow::EcoString;

use crate::source_analysis::Span;

/// The root of a parsed program.
///
/// A program holds at least one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The statements, in source order.
    pub statements: Vec<Statement>,
    /// Source location spanning every statement.
    pub span: Span,
}

impl Program {
    /// Creates a new program with the given statements and span.
    #[must_use]
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }
}

/// A statement: one entry of a program or block body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its value or effect.
    Expression(Expression),

    /// Assignment to a variable: `x := 3`.
    Assignment {
        /// The variable being assigned.
        target: Identifier,
        /// The value expression.
        value: Expression,
        /// Source location from target to end of value.
        span: Span,
    },

    /// Early return: `^ value`.
    Return {
        /// The returned expression.
        value: Expression,
        /// Source location from `^` to end of value.
        span: Span,
    },

    /// Temporary variable declaration: `| x y z |`.
    ///
    /// Always declares at least one name.
    Declaration {
        /// The declared names, in source order.
        names: Vec<Identifier>,
        /// Source location from the opening to the closing `|`.
        span: Span,
    },

    /// A block literal used as a whole statement, with no message sent to it.
    Block(Block),
}

impl Statement {
    /// Returns the source span of this statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression(expression) => expression.span(),
            Self::Assignment { span, .. }
            | Self::Return { span, .. }
            | Self::Declaration { span, .. } => *span,
            Self::Block(block) => block.span,
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value.
    Literal(Literal, Span),

    /// A variable reference.
    Variable(Identifier),

    /// A block (closure).
    Block(Block),

    /// A single message sent to a receiver.
    MessageSend(MessageSend),

    /// Several messages sent to the same receiver: `x foo; bar`.
    Cascade(Cascade),
}

impl Expression {
    /// Returns the source span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(_, span) => *span,
            Self::Variable(identifier) => identifier.span,
            Self::Block(block) => block.span,
            Self::MessageSend(send) => send.span,
            Self::Cascade(cascade) => cascade.span,
        }
    }

    /// Returns the message send if this expression is one.
    #[must_use]
    pub fn as_message_send(&self) -> Option<&MessageSend> {
        match self {
            Self::MessageSend(send) => Some(send),
            _ => None,
        }
    }
}

/// A name with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// The name.
    pub name: EcoString,
    /// Source location.
    pub span: Span,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A message sent to a receiver: `receiver message`.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSend {
    /// The receiver of the message.
    pub receiver: Box<Expression>,
    /// The message.
    pub message: Message,
    /// Source location from receiver to end of message.
    pub span: Span,
}

impl MessageSend {
    /// Creates a message send spanning receiver and message.
    #[must_use]
    pub fn new(receiver: Expression, message: Message) -> Self {
        let span = receiver.span().merge(message.span());
        Self {
            receiver: Box::new(receiver),
            message,
            span,
        }
    }
}

/// A message: selector plus arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A unary message: `size`.
    Unary(Identifier),

    /// A binary message: `+ 4`.
    Binary {
        /// The operator.
        selector: EcoString,
        /// The single argument.
        argument: Box<Expression>,
        /// Source location from operator to end of argument.
        span: Span,
    },

    /// A keyword message: `at: 1 put: 2`.
    ///
    /// Always has at least one part.
    Keyword(Vec<KeywordPart>),
}

impl Message {
    /// Returns the full selector.
    ///
    /// For keyword messages this is the concatenation of every part:
    /// `at: 1 put: 2` has selector `at:put:`.
    #[must_use]
    pub fn selector(&self) -> EcoString {
        match self {
            Self::Unary(name) => name.name.clone(),
            Self::Binary { selector, .. } => selector.clone(),
            Self::Keyword(parts) => {
                let mut selector = EcoString::new();
                for part in parts {
                    selector.push_str(&part.keyword);
                }
                selector
            }
        }
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 0,
            Self::Binary { .. } => 1,
            Self::Keyword(parts) => parts.len(),
        }
    }

    /// Returns the arguments in order.
    #[must_use]
    pub fn arguments(&self) -> Vec<&Expression> {
        let mut arguments = Vec::with_capacity(self.arity());
        match self {
            Self::Unary(_) => {}
            Self::Binary { argument, .. } => arguments.push(argument.as_ref()),
            Self::Keyword(parts) => arguments.extend(parts.iter().map(|p| &p.argument)),
        }
        arguments
    }

    /// Returns the source span of the message, excluding the receiver.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Unary(name) => name.span,
            Self::Binary { span, .. } => *span,
            Self::Keyword(parts) => parts
                .iter()
                .map(|p| p.span)
                .reduce(Span::merge)
                .unwrap_or_default(),
        }
    }
}

/// One `keyword: argument` pair of a keyword message.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordPart {
    /// The keyword, including its trailing colon: `at:`.
    pub keyword: EcoString,
    /// The argument.
    pub argument: Expression,
    /// Source location from keyword to end of argument.
    pub span: Span,
}

impl KeywordPart {
    /// Creates a new keyword part.
    #[must_use]
    pub fn new(keyword: impl Into<EcoString>, argument: Expression, span: Span) -> Self {
        Self {
            keyword: keyword.into(),
            argument,
            span,
        }
    }
}

/// A cascade: `Transcript show: 'a'; show: 'b'; cr`.
///
/// `first` is the initial send; each entry of `messages` goes to the same
/// receiver as `first`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    /// The first send, which fixes the receiver.
    pub first: MessageSend,
    /// The cascaded messages, at least one.
    pub messages: Vec<Message>,
    /// Source location of the whole cascade.
    pub span: Span,
}

impl Cascade {
    /// Returns the receiver every message of the cascade is sent to.
    #[must_use]
    pub fn receiver(&self) -> &Expression {
        &self.first.receiver
    }
}

/// A block literal: `[:x :y | x + y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Parameter names, in order.
    pub parameters: Vec<Identifier>,
    /// The block body.
    pub body: BlockBody,
    /// Source location from `[` to `]`.
    pub span: Span,
}

/// The body of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    /// Zero or more statements.
    Statements(Vec<Statement>),
    /// A body that is exactly one `^ expr`.
    ReturnOnly(Box<Expression>),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal: `42`, `-17`.
    Integer(i64),
    /// Float literal: `3.14`.
    Float(f64),
    /// String literal body, escapes kept as written: `'hello'`.
    String(EcoString),
    /// Character literal: `$a`.
    Character(char),
    /// Symbol literal name: `#foo` holds `foo`.
    Symbol(EcoString),
    /// Brace array: `{1. 2. 3}`.
    Array(Vec<Expression>),
    /// Brace literal whose every element is an association:
    /// `{#a -> 1. #b -> 2}`.
    Dictionary(Vec<DictEntry>),
}

/// One `key -> value` entry of a dictionary literal.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    /// The key expression.
    pub key: Expression,
    /// The value expression.
    pub value: Expression,
    /// Source location of the whole entry.
    pub span: Span,
}
