//! Error types shared by the layout primitives, the generated schemas and the account resolver.
//!
//! Encoding and decoding errors carry a [`FieldPath`] that generated code extends on the way out
//! of each nested field, so the caller sees exactly which field failed.

use std::{
    borrow::Cow,
    fmt,
};

use thiserror::Error;

/// The path from the root value to the field that failed, e.g. `fee_recipients_params[2].shares`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Cow<'static, str>>);

impl FieldPath {
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_ref())
    }

    fn push_front(&mut self, segment: Cow<'static, str>) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<value>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && !segment.starts_with('[') {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodingErrorKind {
    #[error("length {len} exceeds the declared maximum of {max}")]
    LengthExceedsMax { len: usize, max: usize },
    #[error("length {len} doesn't fit in a u32 length prefix")]
    LengthPrefixOverflow { len: usize },
    #[error("destination needs {needed} bytes but only {available} are available")]
    BufferTooSmall { needed: usize, available: usize },
    #[error("instruction data would be {len} bytes, over the {max} byte limit")]
    SizeLimitExceeded { len: usize, max: usize },
    #[error("wrote {written} bytes but measured {measured}")]
    LengthMismatch { written: usize, measured: usize },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("couldn't encode `{path}`: {kind}")]
pub struct EncodingError {
    pub path: FieldPath,
    pub kind: EncodingErrorKind,
}

impl EncodingError {
    pub fn new(kind: EncodingErrorKind) -> Self {
        Self {
            path: FieldPath::default(),
            kind,
        }
    }

    /// Prefixes the error path with a named field.
    pub fn within(mut self, field: &'static str) -> Self {
        self.path.push_front(Cow::Borrowed(field));
        self
    }

    /// Prefixes the error path with a sequence index.
    pub fn within_index(mut self, index: usize) -> Self {
        self.path.push_front(Cow::Owned(format!("[{index}]")));
        self
    }
}

impl From<EncodingErrorKind> for EncodingError {
    fn from(kind: EncodingErrorKind) -> Self {
        Self::new(kind)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodingErrorKind {
    #[error("needed {needed} bytes but only {available} remain")]
    Truncated { needed: usize, available: usize },
    #[error("invalid bool byte {0}")]
    InvalidBool(u8),
    #[error("invalid option tag {0}")]
    InvalidOptionTag(u8),
    #[error("unknown variant tag {tag} for `{type_name}`")]
    InvalidVariantTag { tag: u8, type_name: &'static str },
    #[error("length {len} exceeds the declared maximum of {max}")]
    LengthExceedsMax { len: usize, max: usize },
    #[error("bytes are not valid UTF-8")]
    InvalidUtf8,
    #[error("{remaining} trailing bytes after the encoded value")]
    TrailingBytes { remaining: usize },
    #[error("unknown instruction discriminator {0}")]
    UnknownDiscriminator(u8),
    #[error("expected discriminator {expected} but found {found}")]
    DiscriminatorMismatch { expected: u8, found: u8 },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("couldn't decode `{path}`: {kind}")]
pub struct DecodingError {
    pub path: FieldPath,
    pub kind: DecodingErrorKind,
}

impl DecodingError {
    pub fn new(kind: DecodingErrorKind) -> Self {
        Self {
            path: FieldPath::default(),
            kind,
        }
    }

    pub fn within(mut self, field: &'static str) -> Self {
        self.path.push_front(Cow::Borrowed(field));
        self
    }

    pub fn within_index(mut self, index: usize) -> Self {
        self.path.push_front(Cow::Owned(format!("[{index}]")));
        self
    }
}

impl From<DecodingErrorKind> for DecodingError {
    fn from(kind: DecodingErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Mismatches between an action's account template and the addresses a caller bound to it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("missing account for role `{role}`")]
    MissingAccount { role: String },
    #[error("role `{role}` isn't declared by the account template")]
    UndeclaredRole { role: String },
    #[error("role `{role}` was bound more than once")]
    DuplicateRole { role: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    #[error(transparent)]
    Account(#[from] AccountError),
}
