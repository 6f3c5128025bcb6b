//! Turning fetched markup into sliceable text.
//!
//! ### Conversion
//! - [`markdown::convert`] flattens HTML into `#` headings, blank-line paragraphs,
//!   `[text](href)` links, emphasis, and `- ` bullets via a fixed regex pipeline.
//!
//! ### Selection
//! - [`select::select`] applies headings-only, section, paragraph-range, and
//!   character-window options, in that order.
//!
//! Both are pure, total functions and safe to call from any task.

pub mod markdown;
pub mod select;

pub use markdown::convert;
pub use select::{SelectionRequest, select};
