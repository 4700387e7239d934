use serde_json::{Value as JsonValue, json};

/// Response to `{ hero { id name appearsIn friends { id name } } }`.
pub fn hero_response() -> JsonValue {
    json!({
        "hero": {
            "id": "2001",
            "name": "R2-D2",
            "appearsIn": ["NEW_HOPE", "EMPIRE", "JEDI"],
            "friends": [
                {"id": "1000", "name": "Luke Skywalker"},
                {"id": "1002", "name": "Han Solo"},
                {"id": "1003", "name": "Leia Organa"},
            ],
        },
    })
}

/// Response to `{ search(text: "o") { __typename ... } }`.
pub fn search_response() -> JsonValue {
    json!({
        "search": [
            {
                "__typename": "Human",
                "id": "1000",
                "name": "Luke Skywalker",
                "homePlanet": "Tatooine",
                "heightInMeters": 1.72,
            },
            {
                "__typename": "Droid",
                "id": "2000",
                "name": "C-3PO",
                "primaryFunction": "Protocol",
            },
        ],
    })
}
