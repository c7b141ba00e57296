pub mod api;
pub mod browser;
pub mod config;
pub mod criteria;
pub mod error;
pub mod interaction;
pub mod locator;
pub mod page;
pub mod scenarios;
pub mod selectors;

pub use error::{ProbeError, Result, ResultExt};
pub use page::ExtendedSearchPage;
