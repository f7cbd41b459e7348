//! Route paths served by the API.

pub const GET_INDEX: &str = "/";
pub const GET_API_HEALTH: &str = "/api/health";
pub const GET_API_FORM_SCHEMA: &str = "/api/form/schema";
pub const POST_API_CHAT: &str = "/api/chat";
