//! Wire type classification.

/// The shape of an encoded value, as named by field and element headers.
///
/// Each protocol maps its own numeric codes onto these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// Terminates the fields of a struct. Never the type of a value.
    Stop,
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    /// Strings and binary blobs share an encoding.
    Binary,
    List,
    Set,
    Map,
    Struct,
}

impl TypeTag {
    pub fn is_stop(self) -> bool {
        self == TypeTag::Stop
    }
}
