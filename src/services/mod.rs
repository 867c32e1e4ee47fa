pub mod analysis;
pub mod credits;
pub mod insights;
pub mod movie_dna;
pub mod providers;
pub mod recommendations;
pub mod title_search;
pub mod year_filter;

pub use movie_dna::{MovieDnaService, PipelineSettings};
