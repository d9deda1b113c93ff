// Uploaded document handling. Bytes live only as long as the request.

pub mod handlers;
pub mod pdf;
