//! File permission sanitization.

/// setuid, setgid and sticky bits.
const SPECIAL_BITS: u32 = 0o7000;

/// Group and other write bits.
const GROUP_OTHER_WRITE: u32 = 0o022;

/// Owner read and write bits.
const OWNER_READ_WRITE: u32 = 0o600;

/// Computes the mode to apply to an extracted regular file.
///
/// With the native data filter, special bits and group/other write bits are
/// cleared and the owner always gets read/write access. Without it the stored
/// mode is applied as-is, masked to the permission bits.
///
/// # Examples
///
/// ```
/// use xzsrc_core::security::sanitize_file_mode;
///
/// assert_eq!(sanitize_file_mode(0o4777, true), 0o755);
/// assert_eq!(sanitize_file_mode(0o4777, false), 0o777);
/// assert_eq!(sanitize_file_mode(0o444, true), 0o644);
/// ```
#[must_use]
pub const fn sanitize_file_mode(mode: u32, native_filter: bool) -> u32 {
    if native_filter {
        (mode & !(SPECIAL_BITS | GROUP_OTHER_WRITE) & 0o777) | OWNER_READ_WRITE
    } else {
        mode & 0o777
    }
}
