pub mod clips;
pub mod posts;
pub mod queries;
pub mod social;
pub mod trips;
pub mod users;
