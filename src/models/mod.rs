pub mod chat;
pub mod location;
pub mod trip;
