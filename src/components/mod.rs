//! The components module contains all shared components for the landing page.

mod app;
mod background_music;
mod decorations;
mod icons;
mod preloader;
mod sections;

pub use app::*;
pub use background_music::*;
pub use decorations::*;
pub use icons::*;
pub use preloader::*;
pub use sections::*;
