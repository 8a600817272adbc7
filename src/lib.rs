pub mod console;
pub mod domain;
pub mod utils;
