use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    graphql_input_value, ContainerDecl, InputValue, Primitive, Printer, Schema, SchemaError,
    Selection, Value,
};

use super::fixtures::starwars::{hero_response, search_response, StarWars};

#[test]
fn person_round_trip() {
    let mut schema = Schema::new();
    let node = schema
        .declare(ContainerDecl::interface("Node").field("id", Primitive::Id))
        .unwrap();
    let person = schema
        .declare(
            ContainerDecl::object("Person")
                .base(&node)
                .field("id", Primitive::Id)
                .field("name", Primitive::String),
        )
        .unwrap();

    assert_eq!(
        Printer::new(&schema).print_type(&person).unwrap(),
        "type Person implements Node {\n  id: ID\n  name: String\n}",
    );

    let mut value = schema
        .decode(&person, json!({"id": "42", "name": "Ada"}), None)
        .unwrap();
    let ada = value.as_mut_object().unwrap();
    assert_eq!(ada.get("id").unwrap().as_str(), Some("42"));
    assert_eq!(ada.get("name").unwrap().as_str(), Some("Ada"));
    assert_eq!(ada.to_json(), json!({"id": "42", "name": "Ada"}));

    ada.set("name", "Grace");
    assert_eq!(ada.to_json(), json!({"id": "42", "name": "Grace"}));
    assert_eq!(ada.json()["name"], json!("Grace"));
}

#[test]
fn hero_without_selection() {
    let starwars = StarWars::new();
    let value = starwars
        .schema
        .decode(&starwars.query, hero_response(), None)
        .unwrap();
    let query = value.as_object().unwrap();
    let hero = query.get("hero").unwrap().as_object().unwrap();

    assert_eq!(hero.type_name(), "Character");
    assert_eq!(hero.get("name").unwrap().as_str(), Some("R2-D2"));
    assert_eq!(
        hero.get("appears_in").unwrap(),
        &Value::list(vec![
            Value::enum_value("NEW_HOPE"),
            Value::enum_value("EMPIRE"),
            Value::enum_value("JEDI"),
        ]),
    );

    let friends = hero.get("friends").unwrap().as_list().unwrap();
    assert_eq!(friends.len(), 3);
    assert_eq!(friends[1].to_string(), "Character(id=1002, name=Han Solo)");
    assert_eq!(query.to_json(), hero_response());
}

#[test]
fn hero_with_nested_selection() {
    let starwars = StarWars::new();
    let character = &starwars.character;
    let selection = vec![
        Selection::of(&starwars.query, "hero")
            .unwrap()
            .with_alias("droid")
            .with_selections(vec![
                Selection::of(character, "name").unwrap(),
                Selection::of(character, "friends")
                    .unwrap()
                    .with_selections(vec![Selection::of(character, "name")
                        .unwrap()
                        .with_alias("called")]),
            ]),
    ];

    let value = starwars
        .schema
        .decode(&starwars.query, hero_response(), Some(&selection))
        .unwrap();
    let query = value.as_object().unwrap();
    assert!(!query.contains("hero"));

    let droid = query.get("droid").unwrap().as_object().unwrap();
    let keys: Vec<_> = droid.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["name", "friends"]);
    assert!(droid.get("id").is_err());
    assert_eq!(droid.selection().map(<[_]>::len), Some(2));

    let friends = droid.get("friends").unwrap().as_list().unwrap();
    let luke = friends[0].as_object().unwrap();
    assert_eq!(luke.get("called").unwrap().as_str(), Some("Luke Skywalker"));
    assert!(!luke.contains("name"));

    assert_eq!(
        query.to_json(),
        json!({
            "hero": {
                "name": "R2-D2",
                "friends": [
                    {"name": "Luke Skywalker"},
                    {"name": "Han Solo"},
                    {"name": "Leia Organa"},
                ],
            },
        }),
    );
}

#[test]
fn search_results_follow_typename() {
    let starwars = StarWars::new();
    let value = starwars
        .schema
        .decode(&starwars.query, search_response(), None)
        .unwrap();
    let results = value.as_object().unwrap().get("search").unwrap();
    let results = results.as_list().unwrap();

    let luke = results[0].as_object().unwrap();
    assert_eq!(luke.type_name(), "Human");
    assert_eq!(luke.get("home_planet").unwrap().as_str(), Some("Tatooine"));
    assert_eq!(luke.get("height").unwrap().as_float(), Some(1.72));
    assert_eq!(luke.field("height").unwrap().wire_name(), "heightInMeters");

    let threepio = results[1].as_object().unwrap();
    assert_eq!(threepio.type_name(), "Droid");
    assert_eq!(threepio.meta().name(), starwars.droid.name());
    assert_eq!(
        threepio.get("primary_function").unwrap().as_str(),
        Some("Protocol"),
    );
    assert!(!threepio.contains("home_planet"));
}

#[test]
fn nested_update_reaches_enclosing_json() {
    let starwars = StarWars::new();
    let mut response = hero_response();
    response["hero"]["__typename"] = json!("Droid");
    response["hero"]["serialNo"] = json!("3PO-X1");
    let mut value = starwars
        .schema
        .decode(&starwars.query, response, None)
        .unwrap();
    let query = value.as_mut_object().unwrap();

    query
        .update("hero", |hero| {
            if let Some(hero) = hero.as_mut_object() {
                hero.set("name", "Artoo");
            }
        })
        .unwrap();

    assert_eq!(query.json()["hero"]["name"], json!("Artoo"));
    assert_eq!(query.to_json()["hero"]["name"], json!("Artoo"));
    assert_eq!(query.json()["hero"]["id"], json!("2001"));
    assert_eq!(query.json()["hero"]["__typename"], json!("Droid"));
    assert_eq!(query.json()["hero"]["serialNo"], json!("3PO-X1"));
    assert_eq!(query.json()["hero"]["friends"][0]["name"], json!("Luke Skywalker"));
    assert!(query.to_json()["hero"].get("serialNo").is_none());
}

#[test]
fn invalid_enum_in_list_reports_field() {
    let starwars = StarWars::new();
    let response = json!({"id": "1000", "appearsIn": ["NEW_HOPE", "PHANTOM"]});

    let err = starwars
        .schema
        .decode(&starwars.human, response, None)
        .unwrap_err();
    let SchemaError::FieldDecodeFailure {
        container,
        attribute,
        value,
        cause,
    } = &err
    else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(container.as_str(), "Human");
    assert_eq!(attribute.as_str(), "appears_in");
    assert_eq!(value, &json!(["NEW_HOPE", "PHANTOM"]));
    assert!(matches!(**cause, SchemaError::InvalidEnumValue { .. }));
}

#[test]
fn node_id_is_non_null() {
    let starwars = StarWars::new();
    let err = starwars
        .schema
        .decode(&starwars.node, json!({"id": null}), None)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"Node selection "id": null (ID! received null value)"#,
    );
}

#[test]
fn query_arguments_as_literals() {
    let starwars = StarWars::new();
    let printer = Printer::new(&starwars.schema);
    let search = &starwars.query.field("search").unwrap().arguments;

    let InputValue::Object(values) = graphql_input_value!({
        "text": "o",
        "episodes": [EMPIRE, JEDI],
        "after": @cursor,
    }) else {
        unreachable!()
    };
    assert_eq!(
        printer.print_argument_values(search, &values).unwrap(),
        r#"(text: "o", episodes: [EMPIRE, JEDI], after: $cursor)"#,
    );

    let review = graphql_input_value!({"stars": 5, "commentary": "This is a great movie!"});
    assert_eq!(
        printer.print_literal(&starwars.review_input, &review).unwrap(),
        r#"{stars: 5, commentary: "This is a great movie!"}"#,
    );
    assert_eq!(
        printer.print_argument_values(search, &IndexMap::new()).unwrap(),
        "",
    );
}
