//! The dispatcher: walks prerequisites and runs builders as needed.

use crate::artifact::ArtifactRef;
use crate::error::BuildError;

/// Ensure an artifact and its transitive prerequisites are current,
/// returning the number of builders that ran.
///
/// Recurses on the calling stack with no cycle detection and no
/// memoization: a prerequisite shared between subtrees as two separate
/// handles is visited, and potentially rebuilt, once per handle.  A stale
/// artifact with no builder is accepted silently; it cannot be rebuilt.
/// The first error aborts the whole dispatch, leaving already-completed
/// builds in place.
pub fn ensure_current(artifact: &ArtifactRef) -> Result<usize, BuildError> {
    if artifact.borrow_mut().up_to_date()? {
        return Ok(0);
    }

    let builder = match artifact.borrow().builder() {
        Some(b) => b,
        None => return Ok(0),
    };

    let mut ran = 0;
    let prereqs = builder.borrow().prerequisites();
    for prereq in &prereqs {
        ran += ensure_current(prereq)?;
    }

    // Outputs are not fed back into any graph; the builder's return value
    // only matters to direct callers of run().
    builder.borrow().run()?;
    Ok(ran + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{TrackedFile, VirtualFile};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn stale_without_builder_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src");
        std::fs::write(&path, "hands off").unwrap();
        filetime::set_file_mtime(&path, filetime::FileTime::from_unix_time(1_000, 0))
            .unwrap();

        // First check after construction reports stale, and there is no
        // recipe; the dispatcher accepts that silently.
        let file: ArtifactRef = Rc::new(RefCell::new(TrackedFile::new(&path).unwrap()));
        assert_eq!(ensure_current(&file).unwrap(), 0);

        assert_eq!(std::fs::read(&path).unwrap(), b"hands off");
        assert_eq!(
            crate::fs::stat(&path).unwrap(),
            crate::fs::MTime::Stamp(
                std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000)
            )
        );
    }

    #[test]
    fn virtual_file_is_touched_every_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src.c");
        let file: ArtifactRef = Rc::new(RefCell::new(VirtualFile::new(&path)));

        assert_eq!(ensure_current(&file).unwrap(), 1);
        assert!(path.exists());
        // Always stale, so a second dispatch touches again.
        assert_eq!(ensure_current(&file).unwrap(), 1);
    }
}
