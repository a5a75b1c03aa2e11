use crate::{
    QueryError,
    key::FieldId,
    value::{EncodeError, LiteralEncoder, Value},
};
use indexmap::{IndexMap, map::Entry};
use std::collections::HashMap;

/// Encoded `(name, literal)` arguments per field, in insertion order.
pub(crate) type EncodedArguments = HashMap<FieldId, Vec<(String, String)>>;

///
/// FieldMetadata
///
/// Alias and parameter stores for one query, keyed by `FieldId`.
///

#[derive(Clone, Debug, Default)]
pub struct FieldMetadata {
    aliases: HashMap<FieldId, String>,
    parameters: HashMap<FieldId, IndexMap<String, Value>>,
}

impl FieldMetadata {
    /// Last write wins.
    pub(crate) fn set_alias(&mut self, id: FieldId, alias: String) {
        self.aliases.insert(id, alias);
    }

    pub(crate) fn add_parameter(
        &mut self,
        id: FieldId,
        name: String,
        value: Value,
    ) -> Result<(), QueryError> {
        match self.parameters.entry(id).or_default().entry(name) {
            Entry::Occupied(entry) => Err(QueryError::DuplicateParameter {
                field: id.to_string(),
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    /// Alias for `id`, ignoring blank aliases.
    #[must_use]
    pub fn alias(&self, id: &FieldId) -> Option<&str> {
        self.aliases
            .get(id)
            .map(String::as_str)
            .filter(|alias| !alias.trim().is_empty())
    }

    /// Parameters for `id` in insertion order.
    #[must_use]
    pub fn parameters(&self, id: &FieldId) -> Option<&IndexMap<String, Value>> {
        self.parameters.get(id).filter(|params| !params.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.parameters.values().all(IndexMap::is_empty)
    }

    /// Run every stored parameter through `encoder`.
    pub(crate) fn encode_parameters(
        &self,
        encoder: &dyn LiteralEncoder,
    ) -> Result<EncodedArguments, EncodeError> {
        self.parameters
            .iter()
            .filter(|(_, params)| !params.is_empty())
            .map(|(id, params)| {
                params
                    .iter()
                    .map(|(name, value)| {
                        encoder
                            .encode(value)
                            .map(|literal| (name.clone(), literal))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(|arguments| (*id, arguments))
            })
            .collect()
    }
}
