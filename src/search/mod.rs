pub mod format;
pub mod results;
pub mod suggest;
