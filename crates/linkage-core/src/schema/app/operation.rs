/// A statement the application asks to have generated for a record type.
///
/// Record types that request nothing receive [`Operation::DEFAULTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTable,
    Insert,
    Select,
    Update,
}

impl Operation {
    pub const DEFAULTS: [Operation; 4] = [
        Operation::CreateTable,
        Operation::Insert,
        Operation::Select,
        Operation::Update,
    ];
}
