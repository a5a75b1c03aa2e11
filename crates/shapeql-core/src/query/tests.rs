use super::*;
use crate::{
    ErrorClass,
    test_fixtures::{
        Account, Author, Bar, Book, Empty, Film, Foo, FooList, FooNested, Geo, Kind, Manual,
        Marker, Node, Page, Pair, Single, Venue, registry,
    },
    value::EncodeError,
};
use proptest::prelude::*;
use time::{Date, Month};

fn builder() -> QueryBuilder {
    QueryBuilder::with_registry(registry())
}

fn render<T: Shape>() -> String {
    builder().build::<T>().get_query().unwrap()
}

///
/// Selection rendering
///

#[test]
fn scalar_members_render_space_separated() {
    assert_eq!(render::<Film>(), "{id name}");
}

#[test]
fn composite_members_nest_their_selection() {
    assert_eq!(render::<Foo>(), "{id foo{bar baz}}");
}

#[test]
fn collections_compile_like_their_element() {
    assert_eq!(render::<FooList>(), render::<Foo>());
}

#[test]
fn optional_and_nested_wrappers_unwrap() {
    assert_eq!(render::<FooNested>(), "{id foo{bar baz} tags released}");
}

#[test]
fn empty_composites_render_empty_braces() {
    assert_eq!(render::<Empty>(), "{}");
    assert_eq!(render::<Marker>(), "{}");
}

#[test]
fn scalar_roots_render_empty_braces() {
    assert_eq!(render::<i32>(), "{}");
    assert_eq!(render::<Vec<String>>(), "{}");
    assert_eq!(render::<Kind>(), "{}");
}

#[test]
fn generic_shapes_expand_their_arguments() {
    assert_eq!(render::<Page<Bar>>(), "{total items{bar baz}}");
    assert_eq!(render::<Page<i64>>(), "{total items}");
}

#[test]
fn hand_written_shapes_use_their_renames() {
    assert_eq!(render::<Manual>(), "{level details{bar baz}}");
}

///
/// Parameters
///

#[test]
fn single_parameter() {
    let mut query = builder().build::<Single>();
    query.field(|f| f.foo).add_parameter("x", 7).unwrap();

    assert_eq!(query.get_query().unwrap(), "{foo(x:7)}");
}

#[test]
fn parameters_keep_insertion_order() {
    let mut query = builder().build::<Single>();
    query
        .field(|f| f.foo)
        .add_parameter("x", 7)
        .unwrap()
        .add_parameter("bar", "baz")
        .unwrap()
        .add_parameter("date", Date::from_calendar_date(2021, Month::March, 19).unwrap())
        .unwrap();

    assert_eq!(
        query.get_query().unwrap(),
        r#"{foo(x:7,bar:"baz",date:"2021-03-19")}"#
    );
}

#[test]
fn enum_parameters_render_bare() {
    let mut query = builder().build::<Single>();
    query
        .field(|f| f.foo)
        .add_parameter("type", Kind::SomeValue)
        .unwrap()
        .add_parameter("other", &Kind::OtherValue)
        .unwrap();

    assert_eq!(
        query.get_query().unwrap(),
        "{foo(type:SomeValue,other:OTHER_VALUE)}"
    );
}

#[test]
fn structured_parameters_render_as_input_literals() {
    let mut query = builder().build::<Single>();
    query
        .field(|f| f.foo)
        .add_parameter("ids", vec![1, 2, 3])
        .unwrap()
        .add_parameter("filter", serde_json::json!({ "name": "x" }))
        .unwrap()
        .add_parameter("cursor", None::<String>)
        .unwrap();

    assert_eq!(
        query.get_query().unwrap(),
        r#"{foo(ids:[1,2,3],filter:{name:"x"},cursor:null)}"#
    );
}

#[test]
fn duplicate_parameter_is_rejected() {
    let mut query = builder().build::<Single>();
    let member = query.field(|f| f.foo).add_parameter("x", 7).unwrap();

    let err = member.add_parameter("x", 8).unwrap_err();
    assert!(matches!(
        &err,
        QueryError::DuplicateParameter { field, name } if field == "Single::foo" && name == "x"
    ));
    assert_eq!(err.class(), ErrorClass::Usage);

    // the first value is kept
    assert_eq!(query.get_query().unwrap(), "{foo(x:7)}");
}

#[test]
fn same_parameter_name_on_different_fields() {
    let mut query = builder().build::<Pair>();
    query.field(|f| f.foo).add_parameter("id", 1).unwrap();
    query.field(|f| f.bar).add_parameter("id", 2).unwrap();

    assert_eq!(query.get_query().unwrap(), "{foo(id:1){id} bar(id:2){id}}");
}

#[test]
fn unencodable_parameter_fails_compilation() {
    let mut query = builder().build::<Single>();
    query.field(|f| f.foo).add_parameter("x", f64::NAN).unwrap();

    let err = query.get_query().unwrap_err();
    assert!(matches!(
        err,
        QueryError::Encode(EncodeError::NonFiniteFloat)
    ));
    assert_eq!(err.class(), ErrorClass::Encode);
}

#[test]
fn custom_encoder_replaces_literals() {
    let encoder = |value: &Value| -> Result<String, EncodeError> {
        match value {
            Value::Int(n) => Ok(format!("${n}")),
            other => GraphqlLiteralEncoder.encode(other),
        }
    };

    let mut query = builder().encoder(encoder).build::<Single>();
    query
        .field(|f| f.foo)
        .add_parameter("x", 7_i64)
        .unwrap()
        .add_parameter("y", true)
        .unwrap();

    assert_eq!(query.get_query().unwrap(), "{foo(x:$7,y:true)}");
}

///
/// Aliases
///

#[test]
fn alias_maps_local_name_to_remote() {
    let mut query = builder().build::<Pair>();
    query.field(|f| f.foo).set_alias("bar");

    assert_eq!(query.get_query().unwrap(), "{foo:bar{id} bar{id}}");
}

#[test]
fn alias_and_parameters_in_either_order() {
    let mut query = builder().build::<Pair>();
    query
        .field(|f| f.foo)
        .set_alias("bar")
        .add_parameter("id", 7)
        .unwrap();
    query
        .field(|f| f.bar)
        .add_parameter("name", "maxbar")
        .unwrap()
        .set_alias("fubar");

    assert_eq!(
        query.get_query().unwrap(),
        r#"{foo:bar(id:7){id} bar:fubar(name:"maxbar"){id}}"#
    );
}

#[test]
fn last_alias_wins_and_blank_alias_is_ignored() {
    let mut query = builder().build::<Pair>();
    query.field(|f| f.foo).set_alias("first").set_alias("second");
    assert_eq!(query.get_query().unwrap(), "{foo:second{id} bar{id}}");

    query.field(|f| f.foo).set_alias("   ");
    assert_eq!(query.get_query().unwrap(), "{foo{id} bar{id}}");
}

#[test]
fn member_handle_reports_metadata() {
    let mut query = builder().build::<Single>();
    let member = query
        .field(|f| f.foo)
        .set_alias("remote")
        .add_parameter("x", 1)
        .unwrap();

    assert_eq!(member.id(), FieldId::of::<Single>("foo"));
    assert_eq!(member.alias(), Some("remote"));
    assert_eq!(member.parameters().map(IndexMap::len), Some(1));
    assert!(!query.metadata().is_empty());
}

///
/// Selectors
///

#[test]
fn select_by_name_matches_typed_selection() {
    let mut by_name = builder().build::<Pair>();
    by_name.select("foo").unwrap().set_alias("bar");

    let mut typed = builder().build::<Pair>();
    typed.field(|f| f.foo).set_alias("bar");

    assert_eq!(by_name.get_query().unwrap(), typed.get_query().unwrap());
}

#[test]
fn select_accepts_raw_identifiers() {
    let mut query = builder().build::<Account>();
    query.select("r#type").unwrap().add_parameter("x", 1).unwrap();
    query.select(" type ").unwrap().set_alias("kind");

    assert_eq!(
        query.get_query().unwrap(),
        "{accountId DisplayName type:kind(x:1)}"
    );
}

#[test]
fn non_member_selectors_are_rejected() {
    let mut query = builder().build::<Foo>();

    for selector in ["foo + 1", "foo.bar", "foo()", "", "missing", "session"] {
        let err = query.select(selector).unwrap_err();

        assert!(
            matches!(&err, QueryError::UnsupportedSelector { selector: s, .. } if s == selector),
            "unexpected error for {selector:?}: {err}"
        );
        assert_eq!(err.class(), ErrorClass::Usage);
    }

    assert!(query.metadata().is_empty());
    assert_eq!(query.get_query().unwrap(), "{id foo{bar baz}}");
}

#[test]
fn skipped_members_cannot_be_selected() {
    let mut query = builder().build::<Account>();
    let err = query.select("session").unwrap_err();

    assert!(err.to_string().contains("no selectable member named 'session'"));
}

///
/// Registry interaction
///

#[test]
fn registered_scalars_stop_expansion() {
    let shared = builder();
    let query = shared.build::<Venue>();
    assert_eq!(query.get_query().unwrap(), "{id location{lat lng} price}");

    // the registry is shared, so existing queries see the registration
    shared.register_scalar_type::<Geo>();
    assert_eq!(query.get_query().unwrap(), "{id location price}");
}

#[test]
fn registries_are_isolated() {
    let a = builder();
    let b = builder();
    a.register_scalar_type::<Bar>();

    assert_eq!(a.build::<Foo>().get_query().unwrap(), "{id foo}");
    assert_eq!(b.build::<Foo>().get_query().unwrap(), "{id foo{bar baz}}");
}

#[test]
fn encoders_may_register_on_the_query_registry() {
    let scalars = registry();
    let encoder = {
        let scalars = Arc::clone(&scalars);
        move |value: &Value| -> Result<String, EncodeError> {
            scalars.register::<Geo>();
            GraphqlLiteralEncoder.encode(value)
        }
    };

    let mut query = QueryBuilder::with_registry(scalars)
        .encoder(encoder)
        .build::<Venue>();
    query.field(|f| f.id).add_parameter("x", 1).unwrap();

    assert_eq!(query.get_query().unwrap(), "{id(x:1) location price}");
}

///
/// Cycles
///

#[test]
fn self_referential_shapes_are_rejected() {
    let err = builder().build::<Node>().get_query().unwrap_err();

    match &err {
        QueryError::CyclicShape { type_name, path } => {
            assert_eq!(type_name, "Node");
            assert_eq!(path, "children");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.class(), ErrorClass::Structure);
}

#[test]
fn indirect_cycles_report_the_path() {
    let err = builder().build::<Author>().get_query().unwrap_err();

    assert!(matches!(
        &err,
        QueryError::CyclicShape { type_name, path } if type_name == "Author" && path == "books.author"
    ));
}

#[test]
fn registering_a_cycle_member_breaks_the_cycle() {
    let shared = builder();
    shared.register_scalar_type::<Book>();

    assert_eq!(shared.build::<Author>().get_query().unwrap(), "{name books}");
}

#[test]
fn repeated_non_cyclic_types_are_allowed() {
    assert_eq!(render::<Pair>(), "{foo{id} bar{id}}");
}

///
/// Configuration
///

#[test]
fn field_case_policies() {
    let camel = builder().build::<Account>();
    assert_eq!(camel.get_query().unwrap(), "{accountId DisplayName type}");

    let preserve = builder()
        .config(QueryConfig::default().with_field_case(FieldCase::Preserve))
        .build::<Account>();
    assert_eq!(preserve.get_query().unwrap(), "{account_id DisplayName type}");

    let lower = builder()
        .build::<Account>()
        .with_config(QueryConfig::default().with_field_case(FieldCase::LowerFirst));
    assert_eq!(lower.get_query().unwrap(), "{account_id DisplayName type}");
}

///
/// Construction
///

#[test]
fn build_ignores_the_example_value() {
    let film = Film {
        id: 1,
        name: "Alien".to_string(),
    };

    let from_value = builder().build_for(&film);
    let from_type = builder().build::<Film>();

    assert_eq!(
        from_value.get_query().unwrap(),
        from_type.get_query().unwrap()
    );
    assert_eq!(Query::build(&film).get_query().unwrap(), "{id name}");
}

#[test]
fn compile_exposes_the_selection_tree() {
    let mut query = builder().build::<Foo>();
    query.field(|f| f.foo).set_alias("remote").add_parameter("n", 2).unwrap();

    let tree = query.compile().unwrap();
    assert_eq!(tree.fields().len(), 2);
    assert!(tree.field("id").unwrap().selection().is_none());

    let foo = tree.field("foo").unwrap();
    assert_eq!(foo.alias(), Some("remote"));
    assert_eq!(foo.arguments(), [("n".to_string(), "2".to_string())]);
    assert_eq!(foo.selection().map(SelectionSet::fields).map(<[_]>::len), Some(2));
    assert_eq!(tree.to_string(), query.get_query().unwrap());
}

#[test]
fn clones_carry_metadata_independently() {
    let mut query = builder().build::<Single>();
    query.field(|f| f.foo).add_parameter("x", 1).unwrap();

    let mut copy = query.clone();
    copy.field(|f| f.foo).set_alias("bar");

    assert_eq!(query.get_query().unwrap(), "{foo(x:1)}");
    assert_eq!(copy.get_query().unwrap(), "{foo:bar(x:1)}");
}

#[test]
fn queries_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Query<Foo>>();
    assert_send_sync::<QueryBuilder>();
}

proptest! {
    #[test]
    fn compilation_is_idempotent(x in any::<i64>(), text in ".*", alias in "[a-z]{1,8}") {
        let mut query = builder().build::<Pair>();
        query.field(|f| f.foo).add_parameter("x", x).unwrap().set_alias(alias.clone());
        query.field(|f| f.bar).add_parameter("text", text).unwrap();

        let first = query.get_query().unwrap();
        let second = query.get_query().unwrap();

        prop_assert_eq!(&first, &second);
        let expected_prefix = format!("{{foo:{alias}(x:{x}){{id}} bar(text:");
        prop_assert!(first.starts_with(&expected_prefix));
    }
}
