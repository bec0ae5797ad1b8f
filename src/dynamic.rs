//! Runtime-shape path: paired rows described by a schema at query
//! definition instead of by types.
//!
//! Callers describe the paired row with a [`PairSchema`], point at its two
//! fields with a [`PairShape`], and hand [`adapt`] a binary [`Projection`]
//! carrying its declared parameter types. Every check — field lookup, type
//! compatibility, nullability of the item side — happens once, at
//! construction; a mismatched definition fails before any row flows.

use std::hash::Hash;

use crate::{
    error::AdaptError,
    join::{flatten_default, group_join},
    logging::seam_log,
};

/// An owned scalar in a runtime-schema row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; what an unmatched outer row carries in the item field.
    Null,
    /// Boolean scalar.
    Boolean(bool),
    /// 64-bit signed integer scalar.
    Int64(i64),
    /// 64-bit float scalar.
    Float64(f64),
    /// UTF-8 string scalar.
    String(String),
}

impl Value {
    /// Data type of the value, or `None` for `Null`.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Float64(_) => Some(DataType::Float64),
            Value::String(_) => Some(DataType::Utf8),
        }
    }

    /// Whether the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Data type of a [`Value`] or a declared [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Boolean.
    Boolean,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit float.
    Float64,
    /// UTF-8 string.
    Utf8,
}

/// A named, typed field of a pair schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    data_type: DataType,
    nullable: bool,
}

impl Field {
    /// Build a field.
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Whether the field may hold `Null`.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Declared shape of a paired row: a flat list of named fields, rows
/// aligned positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSchema {
    fields: Vec<Field>,
}

impl PairSchema {
    /// Build a schema from its fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Declared fields, in row order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Points at one field of a pair schema, by name or position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// By field name.
    Name(String),
    /// By field position.
    Index(usize),
}

/// The pair shape descriptor: which schema fields carry the outer value
/// and the item value.
///
/// Must match the shape the upstream pairing step actually constructs;
/// divergence fails [`adapt`], never silently misprojects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairShape {
    /// Selector for the outer-side field.
    pub outer: Selector,
    /// Selector for the item-side field.
    pub item: Selector,
}

impl PairShape {
    /// Shape addressing both fields by name.
    pub fn named(outer: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            outer: Selector::Name(outer.into()),
            item: Selector::Name(item.into()),
        }
    }

    /// Shape addressing both fields by position.
    pub fn indexed(outer: usize, item: usize) -> Self {
        Self {
            outer: Selector::Index(outer),
            item: Selector::Index(item),
        }
    }
}

struct ResolvedField {
    index: usize,
    field: Field,
}

fn resolve_selector(schema: &PairSchema, sel: &Selector) -> Result<ResolvedField, AdaptError> {
    match sel {
        Selector::Index(index) => match schema.fields().get(*index) {
            Some(field) => Ok(ResolvedField {
                index: *index,
                field: field.clone(),
            }),
            None => Err(AdaptError::FieldIndexOutOfBounds {
                index: *index,
                len: schema.len(),
            }),
        },
        Selector::Name(name) => schema
            .fields()
            .iter()
            .enumerate()
            .find(|(_, f)| f.name() == name)
            .map(|(index, field)| ResolvedField {
                index,
                field: field.clone(),
            })
            .ok_or_else(|| AdaptError::UnknownField(name.clone())),
    }
}

/// A caller-supplied binary projection over values, with its declared
/// parameter types.
///
/// The declared types are what [`adapt`] checks against the pair schema;
/// `eval` is only ever called with values of those types (or `Null` in the
/// item position, for unmatched rows).
pub struct Projection<F> {
    outer_type: DataType,
    item_type: DataType,
    eval: F,
}

impl<F> Projection<F>
where
    F: Fn(&Value, &Value) -> Value,
{
    /// Build a projection from its parameter types and evaluation function.
    pub fn new(outer_type: DataType, item_type: DataType, eval: F) -> Self {
        Self {
            outer_type,
            item_type,
            eval,
        }
    }
}

/// A unary projection over paired rows, produced by [`adapt`].
pub struct AdaptedProjection<F> {
    outer_index: usize,
    item_index: usize,
    projection: Projection<F>,
}

impl<F> core::fmt::Debug for AdaptedProjection<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdaptedProjection")
            .field("outer_index", &self.outer_index)
            .field("item_index", &self.item_index)
            .finish_non_exhaustive()
    }
}

impl<F> AdaptedProjection<F>
where
    F: Fn(&Value, &Value) -> Value,
{
    /// Resolved position of the outer field in the row.
    pub fn outer_index(&self) -> usize {
        self.outer_index
    }

    /// Resolved position of the item field in the row.
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Apply the projection to one paired row.
    ///
    /// The only check left at row level is that the row is wide enough for
    /// the resolved positions; everything else was validated at
    /// construction.
    pub fn apply(&self, row: &[Value]) -> Result<Value, AdaptError> {
        let outer = row
            .get(self.outer_index)
            .ok_or(AdaptError::FieldIndexOutOfBounds {
                index: self.outer_index,
                len: row.len(),
            })?;
        let item = row
            .get(self.item_index)
            .ok_or(AdaptError::FieldIndexOutOfBounds {
                index: self.item_index,
                len: row.len(),
            })?;
        Ok((self.projection.eval)(outer, item))
    }
}

/// Adapt a binary [`Projection`] to a unary one over rows of `schema`,
/// decomposed per `shape`.
///
/// Fails fast — at query definition, before any row — when a selector does
/// not resolve, the selectors collide, a declared parameter type does not
/// match its field, or the item field cannot hold `Null`.
pub fn adapt<F>(
    shape: &PairShape,
    schema: &PairSchema,
    projection: Projection<F>,
) -> Result<AdaptedProjection<F>, AdaptError>
where
    F: Fn(&Value, &Value) -> Value,
{
    let outer = resolve_selector(schema, &shape.outer)?;
    let item = resolve_selector(schema, &shape.item)?;
    if outer.index == item.index {
        return Err(AdaptError::SelectorsCollide(
            outer.field.name().to_string(),
        ));
    }
    if outer.field.data_type() != projection.outer_type {
        return Err(AdaptError::TypeMismatch {
            field: outer.field.name().to_string(),
            expected: projection.outer_type,
            actual: outer.field.data_type(),
        });
    }
    if item.field.data_type() != projection.item_type {
        return Err(AdaptError::TypeMismatch {
            field: item.field.name().to_string(),
            expected: projection.item_type,
            actual: item.field.data_type(),
        });
    }
    if !item.field.is_nullable() {
        return Err(AdaptError::ItemNotNullable(
            item.field.name().to_string(),
        ));
    }
    seam_log!(
        log::Level::Debug,
        "projection_adapted",
        "outer_index={} item_index={}",
        outer.index,
        item.index,
    );
    Ok(AdaptedProjection {
        outer_index: outer.index,
        item_index: item.index,
        projection,
    })
}

/// Dynamic left join: pair `outer` and `inner` values on their keys, build
/// one row per pairing (`Null` in the item field for unmatched outer
/// values), and project each row with the adapted projection.
///
/// The adapter is constructed first, so a mismatched `shape` fails before
/// any row is processed.
pub fn left_join_rows<K, It, Ii, FO, FI, F>(
    shape: &PairShape,
    schema: &PairSchema,
    outer: It,
    inner: Ii,
    outer_key: FO,
    inner_key: FI,
    projection: Projection<F>,
) -> Result<Vec<Value>, AdaptError>
where
    It: IntoIterator<Item = Value>,
    Ii: IntoIterator<Item = Value>,
    K: Hash + Eq,
    FO: Fn(&Value) -> K,
    FI: Fn(&Value) -> K,
    F: Fn(&Value, &Value) -> Value,
{
    let adapted = adapt(shape, schema, projection)?;
    let mut out = Vec::new();
    for pair in flatten_default(group_join(outer, inner, outer_key, inner_key)) {
        let mut row = vec![Value::Null; schema.len()];
        row[adapted.outer_index()] = pair.outer;
        row[adapted.item_index()] = pair.item.unwrap_or(Value::Null);
        out.push(adapted.apply(&row)?);
    }
    Ok(out)
}
