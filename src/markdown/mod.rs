mod builder;
mod engine;
mod post;

pub use builder::{build_posts, BuildOptions};
pub use post::Post;
