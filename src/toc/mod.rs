mod builder;
mod model;

pub use builder::{BuildOutcome, TocBuilder, TocContainer};
pub use model::{Heading, HeadingLevel, TocEntry};
