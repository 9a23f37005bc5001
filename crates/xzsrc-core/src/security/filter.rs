//! Per-member type and resource checks.

use crate::ExtractConfig;
use crate::error::SkipReason;
use crate::types::ArchiveMember;
use crate::types::MemberKind;

/// Applies the member filter selected by `config.native_filter`.
///
/// Special entries (devices, FIFOs, sparse files) are refused in either mode.
/// The size ceiling only applies when the native filter is unavailable.
///
/// # Errors
///
/// Returns the [`SkipReason`] if the member must not be extracted.
///
/// # Examples
///
/// ```
/// use xzsrc_core::ExtractConfig;
/// use xzsrc_core::security::filter_member;
/// use xzsrc_core::types::ArchiveMember;
///
/// let big = ArchiveMember::file("xz/huge.bin", 200 * 1024 * 1024);
///
/// let native = ExtractConfig::default();
/// assert!(filter_member(&big, &native).is_ok());
///
/// let manual = ExtractConfig::default().with_native_filter(false);
/// assert!(filter_member(&big, &manual).is_err());
/// ```
pub fn filter_member(member: &ArchiveMember, config: &ExtractConfig) -> Result<(), SkipReason> {
    match member.kind {
        MemberKind::Other => Err(SkipReason::UnsupportedKind),
        MemberKind::File if !config.native_filter && member.size > config.max_file_size => {
            Err(SkipReason::Oversized {
                size: member.size,
                max: config.max_file_size,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_ceiling_only_without_native_filter() {
        let member = ArchiveMember::file("xz/big", 200 * 1024 * 1024);

        let config = ExtractConfig::default().with_native_filter(false);
        assert_eq!(
            filter_member(&member, &config),
            Err(SkipReason::Oversized {
                size: 200 * 1024 * 1024,
                max: 100 * 1024 * 1024,
            })
        );

        let config = ExtractConfig::default();
        assert!(filter_member(&member, &config).is_ok());
    }

    #[test]
    fn test_size_at_ceiling_is_accepted() {
        let config = ExtractConfig::default().with_native_filter(false);
        let member = ArchiveMember::file("xz/exact", config.max_file_size);
        assert!(filter_member(&member, &config).is_ok());
    }

    #[test]
    fn test_special_entries_rejected() {
        let mut member = ArchiveMember::file("xz/fifo", 0);
        member.kind = MemberKind::Other;

        for native in [true, false] {
            let config = ExtractConfig::default().with_native_filter(native);
            assert_eq!(
                filter_member(&member, &config),
                Err(SkipReason::UnsupportedKind)
            );
        }
    }

    #[test]
    fn test_directories_ignore_size() {
        let mut member = ArchiveMember::directory("xz/dir/");
        member.size = u64::MAX;
        let config = ExtractConfig::default().with_native_filter(false);
        assert!(filter_member(&member, &config).is_ok());
    }
}
