use std::fs;
use std::path::Path;

use filetime::FileTime;

use crate::errors::JobError;

/// Copies `source`'s access and modification times onto `artifact`, so a
/// regenerated PDF carries exactly the timestamp of the data it was built from.
pub fn sync_to_source(source: &Path, artifact: &Path) -> Result<(), JobError> {
    let metadata = fs::metadata(source).map_err(|e| JobError::io(source, e))?;
    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);

    filetime::set_file_times(artifact, accessed, modified).map_err(|e| JobError::io(artifact, e))
}

#[cfg(test)]
mod tests {
    use filetime::set_file_times;

    use super::*;
    use crate::variants::freshness::{evaluate, Freshness};

    #[test]
    fn test_artifact_mtime_equals_source_after_sync() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("general.json");
        let artifact = dir.path().join("general.pdf");
        fs::write(&source, "{}").unwrap();
        fs::write(&artifact, "%PDF").unwrap();
        set_file_times(
            &source,
            FileTime::from_unix_time(1_600_000_000, 250),
            FileTime::from_unix_time(1_650_000_000, 123_456_789),
        )
        .unwrap();

        sync_to_source(&source, &artifact).unwrap();

        let source_meta = fs::metadata(&source).unwrap();
        let artifact_meta = fs::metadata(&artifact).unwrap();
        assert_eq!(
            source_meta.modified().unwrap(),
            artifact_meta.modified().unwrap()
        );
        assert_eq!(
            FileTime::from_last_access_time(&source_meta),
            FileTime::from_last_access_time(&artifact_meta)
        );
    }

    #[test]
    fn test_synced_artifact_evaluates_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("general.json");
        let artifact = dir.path().join("general.pdf");
        fs::write(&artifact, "%PDF").unwrap();
        fs::write(&source, "{}").unwrap();

        sync_to_source(&source, &artifact).unwrap();
        assert_eq!(
            evaluate(Some(&source), &artifact, false).unwrap(),
            Freshness::Skip
        );
    }

    #[test]
    fn test_missing_artifact_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("general.json");
        fs::write(&source, "{}").unwrap();

        let err = sync_to_source(&source, &dir.path().join("missing.pdf")).unwrap_err();
        assert!(matches!(err, JobError::Io { path, .. } if path.ends_with("missing.pdf")));
    }
}
