use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

///
/// QueryConfig
///
/// Rendering options for one query. Deserializable so applications can embed
/// it in their own configuration; shapeql never loads files itself.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub field_case: FieldCase,
}

impl QueryConfig {
    #[must_use]
    pub const fn with_field_case(mut self, field_case: FieldCase) -> Self {
        self.field_case = field_case;
        self
    }
}

///
/// FieldCase
///
/// How a declared member name becomes a query field name.
/// Members carrying an explicit rename bypass this entirely.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCase {
    /// Snake case joined at underscores only: `created_at` → `createdAt`,
    /// `Foo` → `foo`, `item2b` → `item2b`.
    #[default]
    Camel,

    /// First character lower-cased, remainder unchanged.
    LowerFirst,

    /// Declared identifier, untouched.
    Preserve,
}

impl FieldCase {
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        let name = name.strip_prefix("r#").unwrap_or(name);

        match self {
            Self::Camel => name.from_case(Case::Snake).to_case(Case::Camel),
            Self::LowerFirst => lower_first(name),
            Self::Preserve => name.to_string(),
        }
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

///
/// TESTS
///
