// Data models and request validation

pub mod member;
pub mod validation;
pub mod workout_session;

pub use member::*;
pub use validation::FieldErrors;
pub use workout_session::*;
