pub mod artifact;
pub mod compile;
pub mod error;
pub mod file;
pub mod fs;
pub mod work;
