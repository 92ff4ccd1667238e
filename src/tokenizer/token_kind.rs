use std::fmt::{self, Display};

/// Kinds of tokens produced by a [`Tokenizer`].
///
/// [`Tokenizer`]: crate::Tokenizer
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    True,
    False,
    Null,
    /// Not a token: the buffered input is insufficient to determine the next token.
    /// The driver should feed more input and retry.
    NotAvailable,
}

impl TokenKind {
    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::StartObject | TokenKind::EndObject | TokenKind::StartArray | TokenKind::EndArray
        )
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TokenKind::Int32 | TokenKind::Int64 | TokenKind::Float32 | TokenKind::Float64
        )
    }

    #[inline]
    pub fn is_scalar(self) -> bool {
        !self.is_structural() && self != TokenKind::NotAvailable
    }

    /// Fixed textual rendering of the token, if it has one.
    pub(crate) fn literal(self) -> Option<&'static str> {
        match self {
            TokenKind::StartObject => Some("{"),
            TokenKind::EndObject => Some("}"),
            TokenKind::StartArray => Some("["),
            TokenKind::EndArray => Some("]"),
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Null => Some("null"),
            _ => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::StartObject => "START_OBJECT",
            TokenKind::EndObject => "END_OBJECT",
            TokenKind::StartArray => "START_ARRAY",
            TokenKind::EndArray => "END_ARRAY",
            TokenKind::String => "STRING",
            TokenKind::Int32 => "INTEGER",
            TokenKind::Int64 => "LONG",
            TokenKind::Float32 => "FLOAT",
            TokenKind::Float64 => "DOUBLE",
            TokenKind::True => "BOOL_TRUE",
            TokenKind::False => "BOOL_FALSE",
            TokenKind::Null => "NULL",
            TokenKind::NotAvailable => "NOT_AVAILABLE",
        })
    }
}

/// Containers that can be open in the token stream.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) enum Container {
    Object,
    Array,
}

impl Container {
    #[inline]
    pub fn opened_by(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::StartObject => Some(Container::Object),
            TokenKind::StartArray => Some(Container::Array),
            _ => None,
        }
    }

    #[inline]
    pub fn closed_by(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::EndObject => Some(Container::Object),
            TokenKind::EndArray => Some(Container::Array),
            _ => None,
        }
    }
}
