//! Segment type and the immutable plan built from it.

use serde::Serialize;

/// What a segment shows: an exercise interval or a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Work,
    Rest,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Work => "work",
            SegmentKind::Rest => "rest",
        }
    }
}

/// One unit of generation work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Position in the plan (0-based).
    pub index: usize,
    pub kind: SegmentKind,
    /// Station this segment belongs to (0-based).
    pub station_index: usize,
    /// Set within the station (0-based).
    pub set_index: usize,
    /// Playback length of the segment in seconds.
    pub duration_secs: u64,
}

impl Segment {
    /// True for the rest segment that closes a station (the station change).
    pub fn is_station_change(&self, sets_per_station: usize) -> bool {
        self.kind == SegmentKind::Rest && self.set_index + 1 == sets_per_station
    }
}

/// Ordered, immutable sequence of segments for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlan {
    segments: Vec<Segment>,
    stations: usize,
    sets_per_station: usize,
}

impl SegmentPlan {
    pub(super) fn new(segments: Vec<Segment>, stations: usize, sets_per_station: usize) -> Self {
        Self {
            segments,
            stations,
            sets_per_station,
        }
    }

    /// Number of segments (`stations * sets_per_station * 2`).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn stations(&self) -> usize {
        self.stations
    }

    pub fn sets_per_station(&self) -> usize {
        self.sets_per_station
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Sum of all segment durations in seconds.
    pub fn estimated_duration_secs(&self) -> u64 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }
}

impl<'a> IntoIterator for &'a SegmentPlan {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
