mod response;
mod schema;

pub use self::{
    response::{hero_response, search_response},
    schema::StarWars,
};
