pub mod cli;
pub mod theme;
