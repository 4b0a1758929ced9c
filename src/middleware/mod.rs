// Middleware for the wallet route guard and CORS

pub mod cors;
pub mod guard;

pub use cors::*;
pub use guard::*;
