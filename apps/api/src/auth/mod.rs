// GitHub login: trades an OAuth code for a trimmed-down profile.
// Stateless: no session is created or stored.

pub mod github;
pub mod handlers;
