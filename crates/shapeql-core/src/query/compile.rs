use crate::{
    QueryError,
    key::TypeKey,
    query::{
        config::QueryConfig,
        metadata::{EncodedArguments, FieldMetadata},
    },
    scalar_registry::ScalarSet,
    shape::{Classification, Member, TypeDescriptor, classify},
};
use std::fmt;

///
/// SelectionSet
///
/// Compiled selection tree for one type. `Display` renders the wire form:
/// `{` fields joined by single spaces `}`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionSet {
    fields: Vec<SelectionField>,
}

impl SelectionSet {
    #[must_use]
    pub fn fields(&self) -> &[SelectionField] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SelectionField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{field}")?;
        }
        f.write_str("}")
    }
}

///
/// SelectionField
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectionField {
    name: String,
    alias: Option<String>,
    arguments: Vec<(String, String)>,
    selection: Option<SelectionSet>,
}

impl SelectionField {
    /// Local (rendered) field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remote field this local name maps to.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// `(name, encoded literal)` pairs in insertion order.
    #[must_use]
    pub fn arguments(&self) -> &[(String, String)] {
        &self.arguments
    }

    /// Nested selection; `None` for scalar leaves.
    #[must_use]
    pub const fn selection(&self) -> Option<&SelectionSet> {
        self.selection.as_ref()
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        if let Some(alias) = &self.alias {
            write!(f, ":{alias}")?;
        }

        if !self.arguments.is_empty() {
            f.write_str("(")?;
            for (i, (name, literal)) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{name}:{literal}")?;
            }
            f.write_str(")")?;
        }

        if let Some(selection) = &self.selection {
            write!(f, "{selection}")?;
        }

        Ok(())
    }
}

///
/// Compiler
///
/// One compilation pass. Reads metadata, pre-encoded arguments and the
/// scalar set, never writes any of them. Composite types currently being expanded are kept on a stack so a
/// type that contains itself is reported instead of recursing forever.
///

pub(crate) struct Compiler<'a> {
    scalars: ScalarSet<'a>,
    metadata: &'a FieldMetadata,
    arguments: &'a EncodedArguments,
    config: &'a QueryConfig,
    expanding: Vec<TypeKey>,
    path: Vec<&'static str>,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(
        scalars: ScalarSet<'a>,
        metadata: &'a FieldMetadata,
        arguments: &'a EncodedArguments,
        config: &'a QueryConfig,
    ) -> Self {
        Self {
            scalars,
            metadata,
            arguments,
            config,
            expanding: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Compile the root; a scalar root yields the empty set.
    pub(crate) fn compile_root(
        mut self,
        root: TypeDescriptor,
    ) -> Result<SelectionSet, QueryError> {
        Ok(self.compile_type(root)?.unwrap_or_default())
    }

    fn compile_type(
        &mut self,
        descriptor: TypeDescriptor,
    ) -> Result<Option<SelectionSet>, QueryError> {
        match classify(descriptor, &self.scalars) {
            Classification::Scalar(_) => Ok(None),
            Classification::Composite(descriptor) => self.expand(&descriptor).map(Some),
        }
    }

    fn expand(&mut self, descriptor: &TypeDescriptor) -> Result<SelectionSet, QueryError> {
        let key = descriptor.key();

        if self.expanding.contains(&key) {
            return Err(QueryError::CyclicShape {
                type_name: key.short_name(),
                path: self.path.join("."),
            });
        }

        tracing::trace!(shape = key.name(), depth = self.expanding.len(), "expanding shape");
        self.expanding.push(key);

        let members = descriptor.members();
        let mut fields = Vec::with_capacity(members.len());
        for member in members {
            self.path.push(member.name());
            fields.push(self.compile_member(member)?);
            self.path.pop();
        }

        self.expanding.pop();

        Ok(SelectionSet { fields })
    }

    fn compile_member(&mut self, member: &Member) -> Result<SelectionField, QueryError> {
        let id = member.id();

        let name = member.rename().map_or_else(
            || self.config.field_case.apply(member.name()),
            ToString::to_string,
        );

        let alias = self.metadata.alias(&id).map(ToString::to_string);

        let arguments = self.arguments.get(&id).cloned().unwrap_or_default();

        let selection = self.compile_type(member.descriptor())?;

        Ok(SelectionField {
            name,
            alias,
            arguments,
            selection,
        })
    }
}
