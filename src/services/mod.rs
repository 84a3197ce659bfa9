pub mod autocomplete;
pub mod providers;
pub mod recommendations;

pub use autocomplete::{AutocompleteWidget, TitleCatalog};
pub use recommendations::{Recommender, Stage};
