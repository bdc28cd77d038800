pub mod builder;
pub mod handlers;
pub mod slug;
