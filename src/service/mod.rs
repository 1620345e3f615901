//! Use-case layer: enforces the cross-entity invariants, then delegates to repositories.

mod posts;
mod users;
mod validation;

pub use posts::PostService;
pub use users::UserService;
pub use validation::RequestValidator;
