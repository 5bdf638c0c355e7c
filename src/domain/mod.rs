pub mod clip;
pub mod error;
pub mod follow;
pub mod post;
pub mod rules;
pub mod trip;
pub mod user;
