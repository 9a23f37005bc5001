//! Security validation modules.

pub mod filter;
pub mod path;
pub mod permissions;

pub use filter::filter_member;
pub use path::PathRejection;
pub use path::check_path;
pub use path::is_safe;
pub use permissions::sanitize_file_mode;
