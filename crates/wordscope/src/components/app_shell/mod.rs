//! App shell components: AppBar, Footer

mod appbar;
mod footer;

pub use appbar::{AppBar, ServiceStatus};
pub use footer::Footer;
