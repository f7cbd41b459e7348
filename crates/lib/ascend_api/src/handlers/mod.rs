//! Request handlers.

pub mod chat;
pub mod form;
pub mod health;
pub mod page;
