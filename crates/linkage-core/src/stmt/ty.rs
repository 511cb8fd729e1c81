use crate::schema::app::RecordId;

/// The type of a record field, as declared by the application.
///
/// Primitive variants map onto a single column. `Record` links the field to
/// another record type, and `List` wraps either of them; a field is
/// list-valued when its outermost type is `List`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Uuid,
    Bytes,
    Timestamp,

    /// Another record type
    Record(RecordId),

    /// A list of the inner type
    List(Box<Type>),
}

impl Type {
    pub fn list(item: impl Into<Type>) -> Type {
        Type::List(Box::new(item.into()))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Type::List(_))
    }

    /// The element type of a list, or the type itself.
    pub fn element(&self) -> &Type {
        match self {
            Type::List(item) => item,
            ty => ty,
        }
    }

    pub fn as_record(&self) -> Option<RecordId> {
        match self {
            Type::Record(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Type::Record(_))
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Type::Record(_) | Type::List(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::I16 | Type::I32 | Type::I64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::F32 | Type::F64)
    }
}

impl From<RecordId> for Type {
    fn from(value: RecordId) -> Self {
        Type::Record(value)
    }
}
