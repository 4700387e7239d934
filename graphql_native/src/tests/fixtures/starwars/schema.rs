use std::sync::Arc;

use crate::{
    Argument, Arguments, ContainerDecl, EnumMeta, Field, InputValue, MetaType, Primitive, Schema,
    UnionMeta,
};

/// The Star Wars trilogy, declared on its own schema.
pub struct StarWars {
    pub schema: Schema,
    pub episode: Arc<MetaType>,
    pub node: Arc<MetaType>,
    pub character: Arc<MetaType>,
    pub human: Arc<MetaType>,
    pub droid: Arc<MetaType>,
    pub search_result: Arc<MetaType>,
    pub review_input: Arc<MetaType>,
    pub query: Arc<MetaType>,
}

impl StarWars {
    pub fn new() -> Self {
        let mut schema = Schema::new();

        let episode = EnumMeta::from_choices_str("Episode", "NEW_HOPE EMPIRE JEDI").unwrap();
        let episode = schema.register(episode.into_meta()).unwrap();

        let id = schema.non_null(Primitive::Id).unwrap();
        let node = schema
            .declare(ContainerDecl::interface("Node").field("id", &id))
            .unwrap();

        let friends = schema.list_of("Character").unwrap();
        let episodes = schema.list_of(&episode).unwrap();
        let character = schema
            .declare(
                ContainerDecl::interface("Character")
                    .base(&node)
                    .field("name", Primitive::String)
                    .field("friends", &friends)
                    .field("appears_in", &episodes),
            )
            .unwrap();

        let human = schema
            .declare(
                ContainerDecl::object("Human")
                    .base(&character)
                    .field("home_planet", Primitive::String)
                    .field("height", Field::new(Primitive::Float).graphql_name("heightInMeters")),
            )
            .unwrap();
        let droid = schema
            .declare(
                ContainerDecl::object("Droid")
                    .base(&character)
                    .field("primary_function", Primitive::String),
            )
            .unwrap();

        let search_result = schema
            .register(UnionMeta::new("SearchResult", [&human, &droid]).into_meta())
            .unwrap();

        let review_input = schema
            .declare(
                ContainerDecl::input_object("ReviewInput")
                    .field("stars", Primitive::Int)
                    .field("commentary", Primitive::String),
            )
            .unwrap();

        let text = schema.non_null(Primitive::String).unwrap();
        let results = schema.list_of(&search_result).unwrap();
        let search_args: Arguments = [
            ("text", Argument::new(&text)),
            ("first", Argument::new(Primitive::Int).default_value(10)),
            ("after", Argument::new(Primitive::String)),
            ("episodes", Argument::new(&episodes)),
        ]
        .into_iter()
        .collect();
        let query = schema
            .declare(
                ContainerDecl::object("Query")
                    .field(
                        "hero",
                        Field::new(&character).argument(
                            "episode",
                            Argument::new(&episode).default_value(InputValue::enum_value("JEDI")),
                        ),
                    )
                    .field("human", Field::new(&human).argument("id", &id))
                    .field("search", Field::new(&results).arguments(search_args)),
            )
            .unwrap();

        Self {
            schema,
            episode,
            node,
            character,
            human,
            droid,
            search_result,
            review_input,
            query,
        }
    }
}
