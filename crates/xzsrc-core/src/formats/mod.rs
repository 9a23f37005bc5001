//! Archive format implementations.

pub mod compression;
pub mod detect;
pub mod tar;
pub mod traits;

// Re-export main types for convenience
pub use detect::ArchiveType;
pub use tar::TarArchive;
pub use traits::ArchiveFormat;
