pub mod classes;
pub mod members;
pub mod messages;
pub mod overview;
pub mod products;
pub mod users;
