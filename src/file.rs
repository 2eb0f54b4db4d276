//! File-backed artifact variants and the trivial `touch` builder.

use crate::artifact::{Artifact, ArtifactRef, Builder, BuilderRef, File};
use crate::error::BuildError;
use crate::fs::{self, MTime};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A file that does not exist yet and must be created by a touch.
/// Always reports stale, so its builder runs every time it is visited.
pub struct VirtualFile {
    path: PathBuf,
}

impl VirtualFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VirtualFile { path: path.into() }
    }
}

impl Artifact for VirtualFile {
    fn up_to_date(&mut self) -> Result<bool, BuildError> {
        Ok(false)
    }

    fn builder(&self) -> Option<BuilderRef> {
        Some(Rc::new(RefCell::new(Touch {
            path: self.path.clone(),
        })))
    }
}

impl File for VirtualFile {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// Creates an empty file at its target path, leaving any existing contents
/// intact but advancing the mtime to now.
pub struct Touch {
    path: PathBuf,
}

impl Touch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Touch { path: path.into() }
    }
}

impl Builder for Touch {
    fn prerequisites(&self) -> Vec<ArtifactRef> {
        Vec::new()
    }

    fn run(&self) -> Result<Vec<ArtifactRef>, BuildError> {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)?;
        filetime::set_file_mtime(&self.path, filetime::FileTime::now())?;
        let out = TrackedFile::new(&self.path)?;
        Ok(vec![Rc::new(RefCell::new(out)) as ArtifactRef])
    }
}

/// A source file supplied by the environment; there is no recipe for it.
/// Snapshots the file's mtime at construction and on every check; a check
/// reports true exactly when the mtime advanced past the previous snapshot,
/// so the first check after construction reports false.
pub struct TrackedFile {
    path: PathBuf,
    mtime: MTime,
}

impl TrackedFile {
    pub fn new(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let mtime = fs::stat(&path)?;
        Ok(TrackedFile { path, mtime })
    }
}

impl Artifact for TrackedFile {
    fn up_to_date(&mut self) -> Result<bool, BuildError> {
        let mtime = fs::stat(&self.path)?;
        let newer = mtime.is_after(&self.mtime);
        self.mtime = mtime;
        Ok(newer)
    }

    fn builder(&self) -> Option<BuilderRef> {
        None
    }
}

impl File for TrackedFile {
    fn path(&self) -> &Path {
        &self.path
    }
}

/// An output file produced by a builder supplied at construction via a
/// factory over the target path.
pub struct DerivedFile {
    path: PathBuf,
    builder: BuilderRef,
    mtime: MTime,
}

impl DerivedFile {
    /// The factory runs once, here; the resulting builder is captured for
    /// the lifetime of the artifact.
    pub fn new<F>(path: impl Into<PathBuf>, factory: F) -> std::io::Result<Self>
    where
        F: FnOnce(&Path) -> BuilderRef,
    {
        let path = path.into();
        let builder = factory(&path);
        // MTime::Missing doubles as "never observed" here.
        let mtime = fs::stat(&path)?;
        Ok(DerivedFile {
            path,
            builder,
            mtime,
        })
    }
}

impl Artifact for DerivedFile {
    fn up_to_date(&mut self) -> Result<bool, BuildError> {
        let mtime = fs::stat(&self.path)?;
        if mtime == MTime::Missing {
            return Ok(false);
        }
        if self.mtime == MTime::Missing {
            // A pre-existing output seen for the first time is trusted as
            // current, without checking it against its inputs.
            self.mtime = mtime;
            return Ok(true);
        }
        let newer = mtime.is_after(&self.mtime);
        self.mtime = mtime;
        Ok(newer)
    }

    fn builder(&self) -> Option<BuilderRef> {
        Some(self.builder.clone())
    }
}

impl File for DerivedFile {
    fn path(&self) -> &Path {
        &self.path
    }
}
