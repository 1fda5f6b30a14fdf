pub mod base;
pub mod chrome;
pub mod nse;
