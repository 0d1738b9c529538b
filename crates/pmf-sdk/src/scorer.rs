//! Predictor-to-scorer binding
//!
//! A trained [`Predictor`] is turned into an exportable terminal stage by
//! binding it to the columns of the terminal view through a
//! [`RoleMapping`]. The resulting [`ScoringTransform`] appends the
//! predictor's output columns and exports them by declaring one variable
//! per visible output column and handing those names to the bound mapper.

use crate::pipeline::{Exportable, Transform};
use pmf_compiler::{GraphContext, Result, TypeTranslator};
use pmf_core::ast::builder::let_one;
use pmf_core::ast::Expression;
use pmf_core::types::{Column, Schema, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column role understood by predictors
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Label,
    Features,
    GroupId,
    Weight,
    Name,
    Custom(String),
}

impl Role {
    /// Roles assumed when a predictor carries no stored role mapping
    pub const DEFAULTS: [Role; 5] = [
        Role::Label,
        Role::Features,
        Role::GroupId,
        Role::Weight,
        Role::Name,
    ];

    /// Conventional column name of the role
    pub fn default_column(&self) -> &str {
        match self {
            Role::Label => "Label",
            Role::Features => "Features",
            Role::GroupId => "GroupId",
            Role::Weight => "Weight",
            Role::Name => "Name",
            Role::Custom(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_column())
    }
}

/// Role -> column assignment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleMapping {
    roles: BTreeMap<Role, String>,
}

impl RoleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every default role whose conventional column is present in
    /// `schema`; absent columns are skipped
    pub fn defaults_for(schema: &Schema) -> Self {
        let roles = Role::DEFAULTS
            .iter()
            .filter(|role| schema.column(role.default_column()).is_some())
            .map(|role| (role.clone(), role.default_column().to_string()))
            .collect();
        Self { roles }
    }

    pub fn with_role(mut self, role: Role, column: impl Into<String>) -> Self {
        self.roles.insert(role, column.into());
        self
    }

    pub fn column(&self, role: &Role) -> Option<&str> {
        self.roles.get(role).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Role, &str)> {
        self.roles.iter().map(|(r, c)| (r, c.as_str()))
    }
}

/// A trained predictor
pub trait Predictor {
    fn name(&self) -> &str;

    /// Bind to an input view; `None` when the predictor has no mapper for
    /// these roles
    fn bind(&self, input: &Schema, roles: &RoleMapping) -> Option<Box<dyn BindableMapper>>;
}

/// A predictor bound to concrete input columns
pub trait BindableMapper {
    /// Columns produced by the predictor
    fn output_schema(&self) -> &Schema;

    fn can_export(&self) -> bool;

    /// Emit the predictor's logic, writing its results into `outputs`
    ///
    /// `outputs` has one declared variable per visible column of
    /// [`BindableMapper::output_schema`], in order. Each starts out holding
    /// the neutral value of its kind and is meant to be assigned with `Set`.
    fn export(&self, ctx: &mut GraphContext, outputs: &[String]) -> Result<()>;
}

/// Terminal stage that appends a bound predictor's outputs to its input view
pub struct ScoringTransform {
    name: String,
    mapper: Box<dyn BindableMapper>,
    schema: Schema,
}

impl ScoringTransform {
    pub fn new(name: impl Into<String>, input: &Schema, mapper: Box<dyn BindableMapper>) -> Self {
        let mut schema = input.clone();
        schema.extend(mapper.output_schema());
        Self {
            name: name.into(),
            mapper,
            schema,
        }
    }

    pub fn mapper(&self) -> &dyn BindableMapper {
        self.mapper.as_ref()
    }
}

impl Transform for ScoringTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_schema(&self) -> &Schema {
        &self.schema
    }

    fn as_exportable(&self) -> Option<&dyn Exportable> {
        Some(self)
    }
}

impl Exportable for ScoringTransform {
    fn can_export(&self) -> bool {
        self.mapper.can_export()
    }

    fn export(&self, ctx: &mut GraphContext) -> Result<()> {
        let outputs = self
            .mapper
            .output_schema()
            .visible_columns()
            .map(|column| declare_output(ctx, column))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(scorer = %self.name, outputs = ?outputs, "exporting scorer");
        self.mapper.export(ctx, &outputs)
    }
}

/// Allocate a variable for a predictor output and initialize it
fn declare_output(ctx: &mut GraphContext, column: &Column) -> Result<String> {
    let kind = TypeTranslator::element_kind(column.ty.raw_kind())?;
    let name = ctx.add_intermediate_variable(&column.ty, &column.name)?;
    let initial = if column.ty.is_vector() {
        Value::empty(kind)
    } else {
        Value::zero(kind)
    };
    ctx.add_expression(let_one(name.clone(), Expression::Literal(initial)));
    Ok(name)
}

/// Resolves a predictor into an exportable scoring stage
pub trait ScorerResolver {
    fn resolve(
        &self,
        predictor: &dyn Predictor,
        input: &Schema,
        roles: Option<&RoleMapping>,
    ) -> Option<ScoringTransform>;
}

/// Binds the predictor with the given roles, or the default roles present
/// in the input view
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScorerResolver;

impl ScorerResolver for DefaultScorerResolver {
    fn resolve(
        &self,
        predictor: &dyn Predictor,
        input: &Schema,
        roles: Option<&RoleMapping>,
    ) -> Option<ScoringTransform> {
        let roles = match roles {
            Some(roles) => roles.clone(),
            None => RoleMapping::defaults_for(input),
        };
        let mapper = predictor.bind(input, &roles)?;
        Some(ScoringTransform::new(
            format!("{}Scorer", predictor.name()),
            input,
            mapper,
        ))
    }
}
