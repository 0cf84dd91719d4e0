//! Fake collaborators for job tests.
//!
//! `ScriptedProducer` records call order and concurrency and can fail, panic,
//! or block on a gate at a chosen segment. `FixedAssembler` returns a fixed
//! reference or a fixed error, optionally after blocking on a gate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use wurq_core::plan::Segment;
use wurq_core::producer::{ArtifactRef, Assembler, ProducerError, SegmentProducer};

/// Blocks the producer at one segment until the test releases it.
pub struct Gate {
    pub at: usize,
    entered: tokio::sync::mpsc::UnboundedSender<usize>,
    release: Mutex<mpsc::Receiver<()>>,
}

/// Test side of a [`Gate`].
pub struct GateControl {
    pub entered: tokio::sync::mpsc::UnboundedReceiver<usize>,
    pub release: mpsc::Sender<()>,
}

pub fn gate(at: usize) -> (Gate, GateControl) {
    let (entered_tx, entered_rx) = tokio::sync::mpsc::unbounded_channel();
    let (release_tx, release_rx) = mpsc::channel();
    (
        Gate {
            at,
            entered: entered_tx,
            release: Mutex::new(release_rx),
        },
        GateControl {
            entered: entered_rx,
            release: release_tx,
        },
    )
}

#[derive(Default)]
pub struct Calls {
    pub order: Mutex<Vec<usize>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl Calls {
    pub fn order(&self) -> Vec<usize> {
        self.order.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct ScriptedProducer {
    pub calls: Arc<Calls>,
    pub delay: Duration,
    pub fail_at: Option<usize>,
    pub panic_at: Option<usize>,
    pub gate: Option<Gate>,
}

impl ScriptedProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn panicking_at(mut self, index: usize) -> Self {
        self.panic_at = Some(index);
        self
    }

    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Arc<Calls> {
        Arc::clone(&self.calls)
    }
}

impl SegmentProducer for ScriptedProducer {
    fn produce(&self, segment: &Segment) -> Result<ArtifactRef, ProducerError> {
        let now = self.calls.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.order.lock().unwrap().push(segment.index);

        if let Some(gate) = &self.gate {
            if gate.at == segment.index {
                let _ = gate.entered.send(segment.index);
                let _ = gate.release.lock().unwrap().recv();
            }
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if self.panic_at == Some(segment.index) {
            self.calls.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("renderer crashed on segment {}", segment.index);
        }

        self.calls.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail_at == Some(segment.index) {
            return Err(ProducerError::Failed(format!(
                "cannot render segment {}",
                segment.index
            )));
        }
        Ok(ArtifactRef::new(format!(
            "{}_{}.mp4",
            segment.kind.as_str(),
            segment.index
        )))
    }
}

pub struct FixedAssembler {
    pub result: Result<ArtifactRef, ProducerError>,
    pub parts_seen: Arc<Mutex<Vec<ArtifactRef>>>,
    pub gate: Option<Gate>,
}

impl FixedAssembler {
    pub fn ok(reference: &str) -> Self {
        Self {
            result: Ok(ArtifactRef::new(reference)),
            parts_seen: Arc::default(),
            gate: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(ProducerError::Failed(message.to_string())),
            parts_seen: Arc::default(),
            gate: None,
        }
    }

    /// Block inside `assemble` until released; the gate reports the part count.
    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }
}

impl Assembler for FixedAssembler {
    fn assemble(&self, parts: &[ArtifactRef]) -> Result<ArtifactRef, ProducerError> {
        *self.parts_seen.lock().unwrap() = parts.to_vec();
        if let Some(gate) = &self.gate {
            let _ = gate.entered.send(parts.len());
            let _ = gate.release.lock().unwrap().recv();
        }
        self.result.clone()
    }
}
