pub mod auth;

pub use auth::{
    CreateGames, CreatePersons, DeleteGames, DeletePersons, EditGames, EditPersons, ReadGames,
    ReadPersons,
};
