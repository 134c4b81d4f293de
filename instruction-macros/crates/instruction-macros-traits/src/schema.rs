//! Runtime descriptors of a layout: what [`crate::Layout::describe`] returns.
//!
//! Descriptors mirror the wire format one-to-one, so field order in a [`LayoutKind::Record`] is the
//! order bytes appear in.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    Unit,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    Bool,
    Address,
    /// `N` consecutive elements, no length prefix.
    Array { len: usize, element: Box<LayoutKind> },
    /// A `u32` little-endian length prefix followed by that many elements.
    Vec { element: Box<LayoutKind> },
    /// A `u32` little-endian byte length prefix followed by UTF-8 bytes.
    String,
    /// A presence tag (`0` or `1`) followed by the value when present.
    Option { inner: Box<LayoutKind> },
    Record { name: &'static str, fields: Vec<FieldLayout> },
    /// A `u8` variant tag followed by that variant's fields.
    Variants { name: &'static str, variants: Vec<VariantLayout> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub layout: LayoutKind,
    pub max_len: Option<usize>,
}

impl FieldLayout {
    pub fn new(name: &'static str, layout: LayoutKind) -> Self {
        Self {
            name,
            layout,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantLayout {
    pub name: &'static str,
    pub tag: u8,
    pub fields: Vec<FieldLayout>,
}

impl LayoutKind {
    /// The encoded size when every value of this layout has the same size, otherwise `None`.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::Unit => Some(0),
            Self::U8 | Self::I8 | Self::Bool => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::U32 | Self::I32 => Some(4),
            Self::U64 | Self::I64 => Some(8),
            Self::U128 | Self::I128 => Some(16),
            Self::Address => Some(32),
            Self::Array { len, element } => element.fixed_len().map(|e| e * len),
            Self::Vec { .. } | Self::String | Self::Option { .. } => None,
            Self::Record { fields, .. } => fields_fixed_len(fields),
            Self::Variants { variants, .. } => {
                let mut sizes = variants.iter().map(|v| fields_fixed_len(&v.fields));
                let first = sizes.next().unwrap_or(Some(0))?;
                sizes
                    .all(|size| size == Some(first))
                    .then_some(1 + first)
            }
        }
    }

    /// The field names of a record, in wire order. Empty for every other layout.
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            Self::Record { fields, .. } => fields.iter().map(|f| f.name).collect(),
            _ => vec![],
        }
    }
}

fn fields_fixed_len(fields: &[FieldLayout]) -> Option<usize> {
    fields.iter().map(|f| f.layout.fixed_len()).sum()
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "()"),
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::U128 => write!(f, "u128"),
            Self::I8 => write!(f, "i8"),
            Self::I16 => write!(f, "i16"),
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::I128 => write!(f, "i128"),
            Self::Bool => write!(f, "bool"),
            Self::Address => write!(f, "Address"),
            Self::Array { len, element } => write!(f, "[{element}; {len}]"),
            Self::Vec { element } => write!(f, "Vec<{element}>"),
            Self::String => write!(f, "String"),
            Self::Option { inner } => write!(f, "Option<{inner}>"),
            Self::Record { name, .. } | Self::Variants { name, .. } => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_len_of_records_and_variants() {
        let record = LayoutKind::Record {
            name: "Order",
            fields: vec![
                FieldLayout::new("price", LayoutKind::U64),
                FieldLayout::new("size", LayoutKind::U64),
                FieldLayout::new(
                    "owners",
                    LayoutKind::Array {
                        len: 2,
                        element: Box::new(LayoutKind::Address),
                    },
                ),
            ],
        };
        assert_eq!(record.fixed_len(), Some(80));
        assert_eq!(record.field_names(), ["price", "size", "owners"]);

        let same_sized = LayoutKind::Variants {
            name: "SwapType",
            variants: vec![
                VariantLayout {
                    name: "ExactIn",
                    tag: 0,
                    fields: vec![
                        FieldLayout::new("amount_in", LayoutKind::U64),
                        FieldLayout::new("min_amount_out", LayoutKind::U64),
                    ],
                },
                VariantLayout {
                    name: "ExactOut",
                    tag: 1,
                    fields: vec![
                        FieldLayout::new("amount_out", LayoutKind::U64),
                        FieldLayout::new("max_amount_in", LayoutKind::U64),
                    ],
                },
            ],
        };
        assert_eq!(same_sized.fixed_len(), Some(17));

        let uneven = LayoutKind::Variants {
            name: "Maybe",
            variants: vec![
                VariantLayout {
                    name: "Nothing",
                    tag: 0,
                    fields: vec![],
                },
                VariantLayout {
                    name: "Just",
                    tag: 1,
                    fields: vec![FieldLayout::new("value", LayoutKind::U32)],
                },
            ],
        };
        assert_eq!(uneven.fixed_len(), None);
    }

    #[test]
    fn variable_layouts_have_no_fixed_len() {
        let opt = LayoutKind::Option {
            inner: Box::new(LayoutKind::U64),
        };
        assert_eq!(opt.fixed_len(), None);
        assert_eq!(opt.to_string(), "Option<u64>");
    }
}
