//! Rich Text Model - Styled document tree and style sheet machinery
//!
//! This crate provides the data model behind rich text editing and export:
//! sparse attribute sets with right-biased merging, named style definitions
//! organized into style sheets, base-style cascade resolution, list styles
//! with ten indent levels, and a buffer of paragraphs, tables, text runs and
//! images that consumers walk to render or serialize the content.

mod error;
mod node_id;
mod attributes;
mod image;
pub mod style;
pub mod style_sheet;
pub mod sheet_chain;
pub mod list_style;
pub mod style_list;
pub mod buffer;

pub use error::*;
pub use node_id::*;
pub use attributes::*;
pub use image::*;
pub use style::*;
pub use style_sheet::*;
pub use sheet_chain::*;
pub use list_style::*;
pub use style_list::*;
pub use buffer::*;
