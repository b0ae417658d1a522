//! ANSI styling
//!
//! - [`style`] - the fixed palette and its escape sequences
//! - [`segment`] - recursive styled text and its renderer
//! - [`markup`] - `@|red,bold text|@` markup rendered through the same rules
//! - [`policy`] - whether escape sequences are emitted at all

pub mod markup;
pub mod policy;
pub mod segment;
pub mod style;

pub use segment::Segment;
pub use style::Style;
