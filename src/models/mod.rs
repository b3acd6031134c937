//! 数据模型层

pub mod line_buffer;
pub mod listing;
pub mod side;

pub use line_buffer::LineBuffer;
pub use listing::{FileMeta, ListingEntry, PaneListing, PARENT_PLACEHOLDER};
pub use side::Side;
