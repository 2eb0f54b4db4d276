//! Filesystem timestamps.

use std::time::SystemTime;

/// MTime info gathered for a file.  This also models "file is absent".
/// It's not using an Option<> just because it makes the code using it easier
/// to follow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MTime {
    Missing,
    Stamp(SystemTime),
}

impl MTime {
    /// True when self is a strictly later timestamp than other.
    /// A missing file is never later than anything; any timestamp is later
    /// than a missing file.
    pub fn is_after(&self, other: &MTime) -> bool {
        match (self, other) {
            (MTime::Stamp(cur), MTime::Stamp(prev)) => cur > prev,
            (MTime::Stamp(_), MTime::Missing) => true,
            (MTime::Missing, _) => false,
        }
    }
}

/// stat() an on-disk path, producing its MTime.
pub fn stat(path: &std::path::Path) -> std::io::Result<MTime> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(MTime::Stamp(meta.modified()?)),
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                Ok(MTime::Missing)
            } else {
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn ordering() {
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1000);
        let t1 = t0 + Duration::from_nanos(1);
        assert!(MTime::Stamp(t1).is_after(&MTime::Stamp(t0)));
        assert!(!MTime::Stamp(t0).is_after(&MTime::Stamp(t0)));
        assert!(!MTime::Stamp(t0).is_after(&MTime::Stamp(t1)));
        assert!(MTime::Stamp(t0).is_after(&MTime::Missing));
        assert!(!MTime::Missing.is_after(&MTime::Stamp(t0)));
        assert!(!MTime::Missing.is_after(&MTime::Missing));
    }

    #[test]
    fn stat_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(stat(&dir.path().join("nope")).unwrap(), MTime::Missing);
    }
}
