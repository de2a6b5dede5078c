pub mod block;
pub mod constants;
pub mod math;
pub mod types;

pub use block::{block_by_name, block_name, display_name};
pub use types::{BlockId, ColumnCoord, Rect, WorldCoord};
