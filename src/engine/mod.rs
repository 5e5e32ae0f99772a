pub mod actions;
pub mod combat;
pub mod combat_math;
pub mod elements;
pub mod offline;
