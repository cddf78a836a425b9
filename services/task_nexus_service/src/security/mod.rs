mod impls;
mod traits;

pub use impls::*;
pub use traits::*;
