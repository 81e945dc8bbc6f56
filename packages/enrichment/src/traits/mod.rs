//! Trait definitions for dependency injection.
//!
//! These are INFRASTRUCTURE traits only - no business logic.
//! Pipeline stages take these traits so tests can substitute doubles.
//!
//! Naming convention: Base* for trait names (e.g., BaseWebScraper)

mod generator;
mod scraper;

pub use generator::BaseTextGenerator;
pub use scraper::{BaseWebScraper, ScrapedPage};
