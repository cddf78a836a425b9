mod sqlite_impl;
mod traits;

pub use sqlite_impl::*;
pub use traits::*;
