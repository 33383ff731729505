pub mod atomic;
pub mod paths;

pub use atomic::write_atomic;
pub use paths::PathUtils;
