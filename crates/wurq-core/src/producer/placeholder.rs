//! Stand-in producer that writes a JSON descriptor per segment.
//!
//! Lets the CLI run a full job end to end without a renderer attached. Each
//! segment becomes `<dir>/<kind>_<index>.json`; an optional delay emulates
//! render time.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::plan::Segment;

use super::{ArtifactRef, ProducerError, SegmentProducer};

#[derive(Serialize)]
struct Descriptor<'a> {
    #[serde(flatten)]
    segment: &'a Segment,
    label: String,
}

/// Writes segment descriptors into a work directory.
#[derive(Debug, Clone)]
pub struct PlaceholderProducer {
    dir: PathBuf,
    delay: Duration,
}

impl PlaceholderProducer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            delay: Duration::ZERO,
        }
    }

    /// Sleep this long per segment before writing it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, segment: &Segment) -> PathBuf {
        self.dir
            .join(format!("{}_{:04}.json", segment.kind.as_str(), segment.index))
    }
}

fn label(segment: &Segment) -> String {
    format!(
        "{} - station {} set {}",
        segment.kind.as_str().to_uppercase(),
        segment.station_index + 1,
        segment.set_index + 1
    )
}

impl SegmentProducer for PlaceholderProducer {
    fn produce(&self, segment: &Segment) -> Result<ArtifactRef, ProducerError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(segment);
        let body = serde_json::to_vec_pretty(&Descriptor {
            segment,
            label: label(segment),
        })
        .map_err(|e| ProducerError::Failed(format!("encode descriptor: {e}")))?;
        fs::write(&path, body)?;
        Ok(ArtifactRef::from(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::SegmentKind;

    #[test]
    fn writes_descriptor_file() {
        let dir = tempfile::tempdir().unwrap();
        let producer = PlaceholderProducer::new(dir.path().join("segments"));
        let seg = Segment {
            index: 7,
            kind: SegmentKind::Rest,
            station_index: 1,
            set_index: 0,
            duration_secs: 20,
        };
        let artifact = producer.produce(&seg).unwrap();
        let path = dir.path().join("segments").join("rest_0007.json");
        assert_eq!(artifact.as_str(), path.display().to_string());

        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["index"], 7);
        assert_eq!(value["kind"], "rest");
        assert_eq!(value["duration_secs"], 20);
        assert_eq!(value["label"], "REST - station 2 set 1");
    }
}
