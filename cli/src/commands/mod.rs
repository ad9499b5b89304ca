pub mod plan;
pub mod predict;
