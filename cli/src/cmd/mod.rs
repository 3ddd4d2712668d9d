mod cache;
mod fork;
mod intern;

pub use cache::{cache, load};
pub use fork::fork;
pub use intern::intern;
