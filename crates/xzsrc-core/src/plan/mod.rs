//! Extraction planning: root rewriting and validation of every member.
//!
//! The plan is computed once from the member list, before anything is
//! written, so an archive with no usable members leaves the destination
//! untouched.

pub mod rewrite;

pub use rewrite::RootRewriter;

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;
use tracing::warn;

use crate::ExtractConfig;
use crate::error::SkipReason;
use crate::report::SkippedMember;
use crate::security::check_path;
use crate::security::filter_member;
use crate::security::path::resolve_link_target;
use crate::types::ArchiveMember;
use crate::types::MemberKind;

/// What to write for a planned member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Stream file content.
    File {
        /// Declared size in bytes.
        size: u64,
        /// Mode from the archive header.
        mode: Option<u32>,
    },

    /// Create a directory.
    Directory,

    /// Create a symbolic link.
    Symlink {
        /// Link text exactly as stored in the archive.
        target: String,
        /// Rewritten path of the member the link points at.
        resolved: String,
    },

    /// Create a hard link.
    Hardlink {
        /// Rewritten path of the member the link points at.
        target: String,
    },
}

impl PlannedAction {
    /// Kind of entry this action creates.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        match self {
            Self::File { .. } => MemberKind::File,
            Self::Directory => MemberKind::Directory,
            Self::Symlink { .. } => MemberKind::Symlink,
            Self::Hardlink { .. } => MemberKind::Hardlink,
        }
    }
}

/// A validated member with its rewritten output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMember {
    /// Position in the archive's member list.
    pub index: usize,

    /// Path as stored in the archive.
    pub original_path: String,

    /// Rewritten, validated path relative to the destination, without
    /// trailing slash.
    pub path: String,

    /// What to write.
    pub action: PlannedAction,
}

/// The accepted subset of an archive, in archive order.
///
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ExtractionPlan {
    root_dir: String,
    members: Vec<PlannedMember>,
    paths: HashSet<String>,
}

/// Result of planning: the plan plus every member that was rejected.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    /// Accepted members.
    pub plan: ExtractionPlan,

    /// Rejected members, in archive order.
    pub skipped: Vec<SkippedMember>,
}

impl ExtractionPlan {
    /// Validates `members` against `dest` and builds the plan.
    ///
    /// Every member is rewritten with a [`RootRewriter`] derived from the
    /// first member, then checked in order: path safety, link target safety,
    /// member filter. Rejections are logged and collected; they never abort
    /// planning.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use xzsrc_core::ExtractConfig;
    /// use xzsrc_core::plan::ExtractionPlan;
    /// use xzsrc_core::types::ArchiveMember;
    ///
    /// let members = vec![
    ///     ArchiveMember::directory("proj-abc123/"),
    ///     ArchiveMember::file("proj-abc123/src/a.c", 10),
    ///     ArchiveMember::file("proj-abc123/../escape.txt", 10),
    /// ];
    /// let outcome =
    ///     ExtractionPlan::build(&members, Path::new("/tmp/out"), &ExtractConfig::default());
    ///
    /// assert_eq!(outcome.plan.len(), 2);
    /// assert!(outcome.plan.contains("xz/src/a.c"));
    /// assert_eq!(outcome.skipped.len(), 1);
    /// ```
    #[must_use]
    pub fn build(members: &[ArchiveMember], dest: &Path, config: &ExtractConfig) -> PlanOutcome {
        let Some(rewriter) = RootRewriter::from_members(members, &config.root_name) else {
            return PlanOutcome::default();
        };
        debug!(root = rewriter.root_dir(), "archive root directory");

        let mut plan = Self {
            root_dir: rewriter.root_dir().to_string(),
            members: Vec::with_capacity(members.len()),
            paths: HashSet::with_capacity(members.len()),
        };
        let mut skipped = Vec::new();

        for (index, member) in members.iter().enumerate() {
            match plan_member(index, member, &rewriter, dest, config) {
                Ok(planned) => {
                    plan.paths.insert(planned.path.clone());
                    plan.members.push(planned);
                }
                Err(reason) => {
                    warn!(path = %member.path, %reason, "skipping archive member");
                    skipped.push(SkippedMember {
                        path: member.path.clone(),
                        reason,
                    });
                }
            }
        }

        PlanOutcome { plan, skipped }
    }

    /// Root directory name found in the archive.
    #[must_use]
    pub fn root_dir(&self) -> &str {
        &self.root_dir
    }

    /// Planned members in archive order.
    #[must_use]
    pub fn members(&self) -> &[PlannedMember] {
        &self.members
    }

    /// Number of planned members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no member survived validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if a member with this rewritten path is planned.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path.trim_end_matches('/'))
    }
}

fn plan_member(
    index: usize,
    member: &ArchiveMember,
    rewriter: &RootRewriter,
    dest: &Path,
    config: &ExtractConfig,
) -> Result<PlannedMember, SkipReason> {
    let rewritten = rewriter
        .rewrite(&member.path)
        .ok_or_else(|| SkipReason::OutsideRoot {
            root: rewriter.root_dir().to_string(),
        })?;

    check_path(&rewritten, dest).map_err(SkipReason::UnsafePath)?;
    let path = rewritten.trim_end_matches('/').to_string();

    let action = match member.kind {
        MemberKind::File => PlannedAction::File {
            size: member.size,
            mode: member.mode,
        },
        MemberKind::Directory => PlannedAction::Directory,
        MemberKind::Symlink => {
            let target = checked_link_target(member, dest)?;
            PlannedAction::Symlink {
                resolved: resolve_link_target(&path, target),
                target: target.to_string(),
            }
        }
        MemberKind::Hardlink => {
            let target = checked_link_target(member, dest)?;
            let rewritten_target =
                rewriter
                    .rewrite(target)
                    .ok_or_else(|| SkipReason::LinkTargetNotPlanned {
                        target: target.to_string(),
                    })?;
            PlannedAction::Hardlink {
                target: rewritten_target.trim_end_matches('/').to_string(),
            }
        }
        MemberKind::Other => return Err(SkipReason::UnsupportedKind),
    };

    filter_member(member, config)?;

    Ok(PlannedMember {
        index,
        original_path: member.path.clone(),
        path,
        action,
    })
}

fn checked_link_target<'a>(member: &'a ArchiveMember, dest: &Path) -> Result<&'a str, SkipReason> {
    let target = member.link_target.as_deref().unwrap_or_default();
    check_path(target, dest).map_err(SkipReason::UnsafeLinkTarget)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::PathRejection;

    fn dest() -> &'static Path {
        Path::new("/tmp/out")
    }

    fn reasons(outcome: &PlanOutcome) -> Vec<&SkipReason> {
        outcome.skipped.iter().map(|s| &s.reason).collect()
    }

    #[test]
    fn test_end_to_end_member_list() {
        let members = vec![
            ArchiveMember::directory("proj-abc123/"),
            ArchiveMember::file("proj-abc123/src/a.c", 5),
            ArchiveMember::file("proj-abc123/../escape.txt", 5),
        ];
        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());

        let paths: Vec<&str> = outcome
            .plan
            .members()
            .iter()
            .map(|m| m.path.as_str())
            .collect();
        assert_eq!(paths, vec!["xz", "xz/src/a.c"]);
        assert_eq!(
            reasons(&outcome),
            vec![&SkipReason::UnsafePath(PathRejection::ParentReference)]
        );
        assert_eq!(outcome.plan.root_dir(), "proj-abc123");
    }

    #[test]
    fn test_indices_follow_archive_order() {
        let members = vec![
            ArchiveMember::directory("p/"),
            ArchiveMember::file("/etc/passwd", 1),
            ArchiveMember::file("p/b", 1),
        ];
        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());
        let indices: Vec<usize> = outcome.plan.members().iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_members_outside_root_dropped() {
        let members = vec![
            ArchiveMember::directory("proj/"),
            ArchiveMember::file("intruder/evil.sh", 10),
        ];
        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());
        assert_eq!(outcome.plan.len(), 1);
        assert_eq!(
            reasons(&outcome),
            vec![&SkipReason::OutsideRoot {
                root: "proj".into()
            }]
        );
    }

    #[test]
    fn test_symlink_target_escape_rejected() {
        let members = vec![
            ArchiveMember::directory("proj/"),
            ArchiveMember::symlink("proj/passwd", "../../etc/passwd"),
            ArchiveMember::symlink("proj/abs", "/etc/shadow"),
        ];
        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());
        assert_eq!(outcome.plan.len(), 1);
        assert_eq!(
            reasons(&outcome),
            vec![
                &SkipReason::UnsafeLinkTarget(PathRejection::ParentReference),
                &SkipReason::UnsafeLinkTarget(PathRejection::Absolute),
            ]
        );
    }

    #[test]
    fn test_symlink_resolved_relative_to_link() {
        let members = vec![
            ArchiveMember::directory("proj/"),
            ArchiveMember::file("proj/lib/liblzma.so.5", 4),
            ArchiveMember::symlink("proj/lib/liblzma.so", "liblzma.so.5"),
        ];
        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());
        let link = &outcome.plan.members()[2];
        assert_eq!(
            link.action,
            PlannedAction::Symlink {
                target: "liblzma.so.5".into(),
                resolved: "xz/lib/liblzma.so.5".into(),
            }
        );
        assert!(outcome.plan.contains("xz/lib/liblzma.so.5"));
    }

    #[test]
    fn test_hardlink_target_rewritten() {
        let members = vec![
            ArchiveMember::directory("proj/"),
            ArchiveMember::file("proj/a", 4),
            ArchiveMember::hardlink("proj/b", "proj/a"),
            ArchiveMember::hardlink("proj/c", "elsewhere/a"),
        ];
        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());
        assert_eq!(
            outcome.plan.members()[2].action,
            PlannedAction::Hardlink {
                target: "xz/a".into()
            }
        );
        assert_eq!(
            reasons(&outcome),
            vec![&SkipReason::LinkTargetNotPlanned {
                target: "elsewhere/a".into()
            }]
        );
    }

    #[test]
    fn test_oversized_file_skipped_without_native_filter() {
        let members = vec![
            ArchiveMember::directory("proj/"),
            ArchiveMember::file("proj/huge.bin", 200 * 1024 * 1024),
        ];
        let config = ExtractConfig::default().with_native_filter(false);
        let outcome = ExtractionPlan::build(&members, dest(), &config);
        assert_eq!(outcome.plan.len(), 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::Oversized { .. }
        ));

        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());
        assert_eq!(outcome.plan.len(), 2);
    }

    #[test]
    fn test_custom_root_name() {
        let members = vec![ArchiveMember::file("xz-5.2.5/README", 1)];
        let config = ExtractConfig::default().with_root_name("liblzma");
        let outcome = ExtractionPlan::build(&members, dest(), &config);
        assert_eq!(outcome.plan.members()[0].path, "liblzma/README");
    }

    #[test]
    fn test_empty_members_give_empty_plan() {
        let outcome = ExtractionPlan::build(&[], dest(), &ExtractConfig::default());
        assert!(outcome.plan.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_all_unsafe_members_give_empty_plan() {
        let members = vec![
            ArchiveMember::file("../evil", 1),
            ArchiveMember::file("/etc/passwd", 1),
        ];
        let outcome = ExtractionPlan::build(&members, dest(), &ExtractConfig::default());
        assert!(outcome.plan.is_empty());
        assert_eq!(outcome.skipped.len(), 2);
    }
}
