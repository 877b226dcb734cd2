pub mod game;
pub mod performance;
pub mod person;

pub use game::{Game, NewGame};
pub use performance::Performance;
pub use person::{NewPerson, Person};
