pub mod collection;
pub mod hero_panel;

pub use collection::CollectionFacade;
pub use hero_panel::{HeroSlidePanel, MIN_SLIDES};
