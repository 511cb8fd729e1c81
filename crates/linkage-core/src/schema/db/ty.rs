use crate::stmt;

/// How a column is stored by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// A floating point number of `n` bytes
    Float(u8),

    Text,
    Uuid,
    Blob,
    Timestamp,

    /// A whole record or list, encoded as JSON.
    Json,
}

impl Type {
    /// Maps an application type onto its default storage type.
    pub fn from_app(ty: &stmt::Type) -> Type {
        match ty {
            stmt::Type::Bool => Type::Boolean,
            stmt::Type::I16 => Type::Integer(2),
            stmt::Type::I32 => Type::Integer(4),
            stmt::Type::I64 => Type::Integer(8),
            stmt::Type::F32 => Type::Float(4),
            stmt::Type::F64 => Type::Float(8),
            stmt::Type::String => Type::Text,
            stmt::Type::Uuid => Type::Uuid,
            stmt::Type::Bytes => Type::Blob,
            stmt::Type::Timestamp => Type::Timestamp,
            stmt::Type::Record(_) | stmt::Type::List(_) => Type::Json,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer(_))
    }
}
