//! The detection session state machine.
//!
//! Owns the camera and the classifier for the duration of one session,
//! drives the classify-and-render loop, applies the announcement policy,
//! and tears everything down on `stop()` or failure.
//!
//! Lifecycle: `Idle -> Starting -> Active -> Stopping -> Idle`, with
//! `Starting/Active -> Error -> Idle` on load, acquire, or device failure.
//! `Error` is collapsed to `Idle` inside a single lock hold, so observers
//! only ever see it reflected in the status message.
//!
//! Duplicate `start()` while not idle is rejected (logged, no side effects);
//! `stop()` is safe from any state and a no-op from idle. Every async
//! continuation is guarded by a session epoch: a `stop()` issued while a
//! model load is in flight bumps the epoch, and the late resolution is
//! discarded with its resources released.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use notevox_camera::CameraSource;
use notevox_classifier::{Classifier, ClassifierLoader, ModelLocation, Prediction};
use notevox_foundation::{SessionPhase, SessionStatus, SharedClock};
use notevox_speech::SpeechAnnouncer;

use crate::policy::AnnouncePolicy;

pub const STATUS_LOADING: &str = "Loading model and initializing webcam...";
pub const STATUS_ACTIVE: &str = "Camera active. Point camera at an Indian currency note.";
pub const STATUS_CAMERA_ERROR: &str =
    "Unable to access camera. Please ensure camera permissions are granted.";
pub const STATUS_MODEL_ERROR: &str =
    "Failed to load the detection model. Please check your connection and try again.";
pub const STATUS_STOPPED: &str = "Detection stopped. Press Start to begin again.";
pub const STATUS_CAMERA_LOST: &str = "Camera connection lost. Press Start to try again.";
pub const ANNOUNCE_STARTED: &str =
    "Currency detection started. Point camera at an Indian currency note.";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub camera_width: u32,
    pub camera_height: u32,
    /// Mirror the feed for more intuitive aiming.
    pub mirrored: bool,
    pub model_location: ModelLocation,
    /// Frame pacing between ticks; the next tick is scheduled only after
    /// the current classification resolves.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            camera_width: 300,
            camera_height: 300,
            mirrored: true,
            model_location: ModelLocation::new(
                "https://teachablemachine.withgoogle.com/models/P9W9Ta1SH/",
            ),
            poll_interval: Duration::from_millis(33),
        }
    }
}

/// Read-only view of session state for the render sink.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub is_active: bool,
    pub predictions: Vec<Prediction>,
    pub detected_currency: String,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            status: SessionStatus::default(),
            is_active: false,
            predictions: Vec::new(),
            detected_currency: String::new(),
        }
    }
}

struct SessionInner {
    phase: SessionPhase,
    /// Bumped on every start and stop; async continuations compare it to
    /// detect that they belong to a session that no longer exists.
    epoch: u64,
    classifier: Option<Arc<dyn Classifier>>,
    loop_handle: Option<JoinHandle<()>>,
    policy: AnnouncePolicy,
    snapshot: SessionSnapshot,
}

impl SessionInner {
    fn set_phase(&mut self, next: SessionPhase) {
        debug_assert!(
            self.phase.can_transition(next),
            "invalid phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        self.phase = next;
    }
}

pub struct DetectionSession {
    inner: Arc<Mutex<SessionInner>>,
    camera: Arc<Mutex<Box<dyn CameraSource>>>,
    loader: Arc<dyn ClassifierLoader>,
    announcer: Arc<dyn SpeechAnnouncer>,
    clock: SharedClock,
    config: SessionConfig,
    watch_tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl DetectionSession {
    pub fn new(
        config: SessionConfig,
        camera: Box<dyn CameraSource>,
        loader: Arc<dyn ClassifierLoader>,
        announcer: Arc<dyn SpeechAnnouncer>,
        clock: SharedClock,
    ) -> Self {
        let (watch_tx, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                phase: SessionPhase::Idle,
                epoch: 0,
                classifier: None,
                loop_handle: None,
                policy: AnnouncePolicy::new(),
                snapshot: SessionSnapshot::default(),
            })),
            camera: Arc::new(Mutex::new(camera)),
            loader,
            announcer,
            clock,
            config,
            watch_tx: Arc::new(watch_tx),
        }
    }

    /// Subscribe to state snapshots. The receiver always holds the latest.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.watch_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot.clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().snapshot.is_active
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().phase
    }

    /// Start a detection session. Only valid from idle; a duplicate start
    /// while loading or active is rejected without side effects.
    pub async fn start(&self) {
        let epoch = {
            let mut inner = self.inner.lock();
            if inner.phase != SessionPhase::Idle {
                warn!(phase = ?inner.phase, "start requested while session is busy; rejected");
                return;
            }
            inner.set_phase(SessionPhase::Starting);
            inner.epoch += 1;
            inner.snapshot.status = SessionStatus::info(STATUS_LOADING);
            let _ = self.watch_tx.send(inner.snapshot.clone());
            inner.epoch
        };

        info!("starting detection session");
        let loaded = self.loader.load(&self.config.model_location).await;

        // The session may have been stopped while the load was in flight;
        // a stale result is discarded, dropping the classifier handle.
        {
            let inner = self.inner.lock();
            if inner.epoch != epoch || inner.phase != SessionPhase::Starting {
                info!("discarding model load result for a stopped session");
                return;
            }
        }

        let classifier = match loaded {
            Ok(classifier) => classifier,
            Err(e) => {
                error!(error = %e, "model load failed");
                self.fail_start(epoch, SessionStatus::error(STATUS_MODEL_ERROR));
                return;
            }
        };

        // Camera is acquired second; when it fails the classifier handle
        // is dropped so neither resource leaks out of a failed start.
        let acquired = self.camera.lock().acquire(
            self.config.camera_width,
            self.config.camera_height,
            self.config.mirrored,
        );
        if let Err(e) = acquired {
            error!(error = %e, "camera acquisition failed");
            drop(classifier);
            self.fail_start(epoch, SessionStatus::error(STATUS_CAMERA_ERROR));
            return;
        }

        {
            let mut inner = self.inner.lock();
            if inner.epoch != epoch || inner.phase != SessionPhase::Starting {
                drop(inner);
                // stop() won the race; give the camera back.
                self.camera.lock().release();
                return;
            }
            inner.classifier = Some(classifier.clone());
            inner.policy.reset();
            inner.snapshot.predictions =
                vec![Prediction::empty(); classifier.class_count()];
            inner.snapshot.detected_currency.clear();
            inner.snapshot.is_active = true;
            inner.snapshot.status = SessionStatus::success(STATUS_ACTIVE);
            inner.set_phase(SessionPhase::Active);
            let _ = self.watch_tx.send(inner.snapshot.clone());
        }
        info!(classes = classifier.class_count(), "detection session active");
        self.announcer.say(ANNOUNCE_STARTED).await;

        let handle = self.spawn_loop(epoch, classifier);
        let mut inner = self.inner.lock();
        if inner.epoch == epoch {
            inner.loop_handle = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Stop the session. Safe from any state; a no-op from idle that leaves
    /// the status untouched.
    pub fn stop(&self) {
        let handle = {
            let mut inner = self.inner.lock();
            if matches!(inner.phase, SessionPhase::Idle | SessionPhase::Stopping) {
                debug!(phase = ?inner.phase, "stop requested with nothing to do");
                return;
            }
            inner.epoch += 1;
            inner.set_phase(SessionPhase::Stopping);
            inner.classifier = None;
            inner.loop_handle.take()
        };
        if let Some(handle) = handle {
            handle.abort();
        }
        self.camera.lock().release();

        let mut inner = self.inner.lock();
        inner.policy.reset();
        inner.snapshot.is_active = false;
        inner.snapshot.predictions.clear();
        inner.snapshot.detected_currency.clear();
        inner.snapshot.status = SessionStatus::info(STATUS_STOPPED);
        inner.set_phase(SessionPhase::Idle);
        let snapshot = inner.snapshot.clone();
        drop(inner);
        let _ = self.watch_tx.send(snapshot);
        info!("detection session stopped");
    }

    /// Abort a failed start: surface the error status and return to idle,
    /// releasing whatever was acquired.
    fn fail_start(&self, epoch: u64, status: SessionStatus) {
        self.camera.lock().release();
        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            return;
        }
        inner.set_phase(SessionPhase::Error);
        inner.classifier = None;
        inner.snapshot.is_active = false;
        inner.snapshot.predictions.clear();
        inner.snapshot.detected_currency.clear();
        inner.snapshot.status = status;
        inner.set_phase(SessionPhase::Idle);
        let snapshot = inner.snapshot.clone();
        drop(inner);
        let _ = self.watch_tx.send(snapshot);
    }

    /// Spawn the poll loop. Ticks are strictly sequential: the next tick is
    /// scheduled only after the current classify call resolves, so there is
    /// at most one in-flight classification per session.
    fn spawn_loop(&self, epoch: u64, classifier: Arc<dyn Classifier>) -> JoinHandle<()> {
        let inner = self.inner.clone();
        let camera = self.camera.clone();
        let announcer = self.announcer.clone();
        let clock = self.clock.clone();
        let watch_tx = self.watch_tx.clone();
        let interval = self.config.poll_interval;

        tokio::spawn(async move {
            loop {
                // Confirm this loop still owns the session.
                {
                    let inner = inner.lock();
                    if inner.epoch != epoch || inner.phase != SessionPhase::Active {
                        break;
                    }
                }

                let frame = camera.lock().next_frame();
                let frame = match frame {
                    Ok(frame) => frame,
                    Err(e) => {
                        // Device loss is fatal to the session, unlike a
                        // failed classification.
                        error!(error = %e, "camera failed mid-session");
                        let snapshot = {
                            let mut inner = inner.lock();
                            if inner.epoch != epoch {
                                break;
                            }
                            inner.set_phase(SessionPhase::Error);
                            inner.classifier = None;
                            inner.policy.reset();
                            inner.snapshot.is_active = false;
                            inner.snapshot.predictions.clear();
                            inner.snapshot.detected_currency.clear();
                            inner.snapshot.status =
                                SessionStatus::error(STATUS_CAMERA_LOST);
                            inner.set_phase(SessionPhase::Idle);
                            inner.loop_handle = None;
                            inner.snapshot.clone()
                        };
                        camera.lock().release();
                        let _ = watch_tx.send(snapshot);
                        break;
                    }
                };

                match classifier.classify(&frame).await {
                    Ok(predictions) => {
                        let announced = {
                            let mut guard = inner.lock();
                            if guard.epoch != epoch || guard.phase != SessionPhase::Active {
                                break;
                            }
                            let state = &mut *guard;
                            state.snapshot.predictions = predictions;
                            let announced = state
                                .policy
                                .evaluate(&state.snapshot.predictions, clock.now());
                            if let Some(label) = &announced {
                                state.snapshot.detected_currency = label.clone();
                            }
                            let _ = watch_tx.send(state.snapshot.clone());
                            announced
                        };
                        if let Some(label) = announced {
                            info!(label, "currency detected");
                            announcer.say(&label).await;
                        }
                    }
                    Err(e) => {
                        // Transient by policy: log and keep the loop alive.
                        warn!(error = %e, "classification failed for this tick");
                    }
                }

                tokio::time::sleep(interval).await;
            }
        })
    }
}
