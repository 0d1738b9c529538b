//! Column schemas of pipeline views
//!
//! A schema is the ordered column list a pipeline stage exposes. Columns keep
//! the logical type of the tabular runtime (raw storage kind, key ranges,
//! vector shapes); translating them into IR types is the compiler's job.

use serde::{Deserialize, Serialize};

/// Raw storage kind of a column item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Text,
    Boolean,
    TimeSpan,
    DateTime,
    DateTimeZone,
    Uuid,
}

/// Type of a single column item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    /// Plain primitive value
    Primitive(DataKind),
    /// Key into a dictionary of `count` entries (0 when unbounded)
    Key { raw: DataKind, count: u64 },
}

/// Logical type of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// One item per row
    Scalar(ItemType),
    /// Fixed or variable length vector per row
    ///
    /// An empty `dims` list, or any zero dimension, means the length is
    /// unknown.
    Vector { item: ItemType, dims: Vec<u64> },
}

/// A column of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    /// Hidden columns are shadowed by a later column of the same name
    #[serde(default)]
    pub hidden: bool,
}

/// Ordered column list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl ItemType {
    pub fn raw_kind(&self) -> DataKind {
        match self {
            ItemType::Primitive(kind) => *kind,
            ItemType::Key { raw, .. } => *raw,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, ItemType::Key { .. })
    }
}

impl ColumnType {
    /// Scalar primitive column
    pub fn scalar(kind: DataKind) -> Self {
        ColumnType::Scalar(ItemType::Primitive(kind))
    }

    /// Scalar key column over `count` entries
    pub fn key(raw: DataKind, count: u64) -> Self {
        ColumnType::Scalar(ItemType::Key { raw, count })
    }

    /// Vector column of primitives with the given per-dimension sizes
    pub fn vector(kind: DataKind, dims: Vec<u64>) -> Self {
        ColumnType::Vector {
            item: ItemType::Primitive(kind),
            dims,
        }
    }

    /// Vector column of unknown length
    pub fn var_vector(kind: DataKind) -> Self {
        ColumnType::Vector {
            item: ItemType::Primitive(kind),
            dims: Vec::new(),
        }
    }

    pub fn item(&self) -> &ItemType {
        match self {
            ColumnType::Scalar(item) => item,
            ColumnType::Vector { item, .. } => item,
        }
    }

    pub fn raw_kind(&self) -> DataKind {
        self.item().raw_kind()
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, ColumnType::Vector { .. })
    }

    /// Number of items per row: 1 for scalars, the product of the dimensions
    /// for vectors, 0 when the vector length is unknown or does not fit a
    /// `u64`
    pub fn value_count(&self) -> u64 {
        match self {
            ColumnType::Scalar(_) => 1,
            ColumnType::Vector { dims, .. } if dims.is_empty() => 0,
            ColumnType::Vector { dims, .. } => dims
                .iter()
                .try_fold(1u64, |acc, d| acc.checked_mul(*d))
                .unwrap_or(0),
        }
    }

    /// Declared vector dimensions (empty for scalars)
    pub fn dims(&self) -> &[u64] {
        match self {
            ColumnType::Scalar(_) => &[],
            ColumnType::Vector { dims, .. } => dims,
        }
    }
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            hidden: false,
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, hiding any earlier column of the same name
    pub fn with_column(mut self, name: impl Into<String>, ty: ColumnType) -> Self {
        self.push(Column::new(name, ty));
        self
    }

    /// Append a column, hiding any earlier column of the same name
    pub fn push(&mut self, column: Column) {
        for existing in self.columns.iter_mut().filter(|c| c.name == column.name) {
            existing.hidden = true;
        }
        self.columns.push(column);
    }

    /// Append every column of `other`, in order
    pub fn extend(&mut self, other: &Schema) {
        for column in other.columns() {
            self.push(column.clone());
        }
    }

    /// All columns, hidden ones included
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Non-hidden columns in schema order
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.hidden)
    }

    /// The visible column named `name`
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.visible_columns().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<Column> for Schema {
    fn from_iter<T: IntoIterator<Item = Column>>(iter: T) -> Self {
        let mut schema = Schema::new();
        for column in iter {
            schema.push(column);
        }
        schema
    }
}
