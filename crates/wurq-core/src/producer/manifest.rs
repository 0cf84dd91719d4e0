//! Assembler that writes an ordered concat list.
//!
//! Output is the ffmpeg concat-demuxer list format (`file '<path>'` per line)
//! so an external muxer can join the segments. No media is touched here.

use std::fs;
use std::path::PathBuf;

use super::{ArtifactRef, Assembler, ProducerError};

#[derive(Debug, Clone)]
pub struct ManifestAssembler {
    path: PathBuf,
}

impl ManifestAssembler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Quote one entry: single quotes are closed, escaped, and reopened.
fn quote(entry: &str) -> String {
    format!("'{}'", entry.replace('\'', r"'\''"))
}

/// Render the list body for `parts`.
pub(crate) fn render(parts: &[ArtifactRef]) -> String {
    let mut out = String::new();
    for part in parts {
        out.push_str("file ");
        out.push_str(&quote(part.as_str()));
        out.push('\n');
    }
    out
}

impl Assembler for ManifestAssembler {
    fn assemble(&self, parts: &[ArtifactRef]) -> Result<ArtifactRef, ProducerError> {
        if parts.is_empty() {
            return Err(ProducerError::Failed("nothing to assemble".into()));
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render(parts))?;
        tracing::debug!(path = %self.path.display(), parts = parts.len(), "wrote concat list");
        Ok(ArtifactRef::from(self.path.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_quotes_entries() {
        let parts = vec![
            ArtifactRef::new("/tmp/work_0000.mp4"),
            ArtifactRef::new("/tmp/it's.mp4"),
        ];
        assert_eq!(
            render(&parts),
            "file '/tmp/work_0000.mp4'\nfile '/tmp/it'\\''s.mp4'\n"
        );
    }

    #[test]
    fn assemble_writes_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("workout.txt");
        let assembler = ManifestAssembler::new(&path);
        let artifact = assembler
            .assemble(&[ArtifactRef::new("a.json"), ArtifactRef::new("b.json")])
            .unwrap();
        assert_eq!(artifact.as_str(), path.display().to_string());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "file 'a.json'\nfile 'b.json'\n"
        );
    }

    #[test]
    fn assemble_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let assembler = ManifestAssembler::new(dir.path().join("workout.txt"));
        assert!(matches!(
            assembler.assemble(&[]),
            Err(ProducerError::Failed(_))
        ));
    }
}
