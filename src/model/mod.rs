//! Domain records and the request shapes that create or change them.

mod post;
mod user;

pub use post::{Post, PostBody, PostCreate, PostUpdate};
pub use user::{User, UserCreate};
