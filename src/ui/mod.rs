//! Terminal front end

pub mod session;

pub use session::Session;
