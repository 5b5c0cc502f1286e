pub mod resolver;
pub mod session;
pub mod transition;
