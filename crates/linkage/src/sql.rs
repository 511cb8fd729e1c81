use linkage_core::stmt::Value;
use linkage_sql::{stmt::Statement, Serializer};

use std::fmt;

/// A rendered statement and the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Sql {
    pub text: String,
    pub params: Vec<Value>,
}

impl Sql {
    pub(crate) fn render(serializer: &Serializer<'_>, statement: &Statement) -> Sql {
        let mut params = vec![];
        let text = serializer.serialize(statement, &mut params);
        Sql { text, params }
    }
}

impl fmt::Display for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
