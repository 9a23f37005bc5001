//! Core data types for archive extraction.

pub mod dest_dir;
pub mod member;

pub use dest_dir::DestDir;
pub use member::ArchiveMember;
pub use member::MemberKind;
