use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Block map is too small to place starts: {axis} extent {extent} leaves no room for margin {margin} and mine length {mine_length}")]
    MapTooSmall {
        axis: char,
        extent: i32,
        margin: i32,
        mine_length: i32,
    },
    #[error("Invalid survey config: {0}")]
    InvalidConfig(String),
}
