//! The artifact/builder model: what can be built, and what builds it.

use crate::error::BuildError;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// A shared handle to an artifact.  Handles compare by identity: two
/// artifacts over the same path are distinct unless they are clones of the
/// same Rc.  Nothing deduplicates them.
pub type ArtifactRef = Rc<RefCell<dyn Artifact>>;

/// A shared handle to a builder.
pub type BuilderRef = Rc<RefCell<dyn Builder>>;

/// A named build product or input.
pub trait Artifact {
    /// Whether this artifact is currently considered fresh.  May refresh the
    /// artifact's cached timestamp as a side effect; does no I/O beyond a
    /// stat.  Note the tracked-file policy: a true result means "changed
    /// since the last check", so the first check after construction reports
    /// false (see file::TrackedFile).
    fn up_to_date(&mut self) -> Result<bool, BuildError>;

    /// The recipe that can (re)produce this artifact, or None if the
    /// artifact is terminal and cannot be rebuilt.
    fn builder(&self) -> Option<BuilderRef>;
}

/// A recipe: consumes prerequisites, produces outputs.
pub trait Builder {
    /// Artifacts that must be made current before this builder runs.
    /// Enumeration order is unspecified.
    fn prerequisites(&self) -> Vec<ArtifactRef>;

    /// Perform the build action.  Returns newly constructed artifacts for
    /// the outputs; callers are free to discard them.
    fn run(&self) -> Result<Vec<ArtifactRef>, BuildError>;
}

/// An artifact that lives at a filesystem path.
pub trait File: Artifact {
    fn path(&self) -> &Path;
}
