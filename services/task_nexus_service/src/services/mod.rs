mod analytics;
mod analytics_impl;
mod boards;
mod boards_impl;
mod directory;
mod directory_impl;
mod membership;
mod membership_impl;
mod registration;
mod registration_impl;

pub use analytics::*;
pub use analytics_impl::*;
pub use boards::*;
pub use boards_impl::*;
pub use directory::*;
pub use directory_impl::*;
pub use membership::*;
pub use membership_impl::*;
pub use registration::*;
pub use registration_impl::*;
