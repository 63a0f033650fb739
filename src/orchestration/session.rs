// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use crossbeam::channel::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strum_macros::Display;

/// Whether an [ActuationSession] is currently playing a pulse train.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum ActuationState {
    #[allow(missing_docs)]
    #[default]
    Idle,
    #[allow(missing_docs)]
    Driving,
}

/// Announces state changes of an [ActuationSession].
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A new pulse train started; the actuator will be busy for `total`.
    Driving {
        #[allow(missing_docs)]
        total: Milliseconds,
    },
    /// The most recent pulse train ran its course.
    Idle,
}

#[derive(Debug, Default)]
struct SessionShared {
    state: ActuationState,
    // Bumped on every start so that a superseded timer can tell it's stale.
    generation: u64,
}

type SharedState = Arc<Mutex<SessionShared>>;

fn lock(shared: &SharedState) -> MutexGuard<'_, SessionShared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The single pending auto-stop. Dropping it cancels it.
#[derive(Debug)]
struct DeferredIdle {
    // Never sent on; dropping it disconnects the timer's cancel channel.
    _cancel: Sender<()>,
}
impl DeferredIdle {
    fn schedule(
        after: Milliseconds,
        generation: u64,
        shared: SharedState,
        events: Sender<SessionEvent>,
    ) -> Self {
        let (cancel, cancelled) = crossbeam::channel::bounded::<()>(0);
        let deadline = crossbeam::channel::after(after.as_duration());
        std::thread::spawn(move || {
            crossbeam::select! {
                recv(cancelled) -> _ => {}
                recv(deadline) -> _ => {
                    let mut s = lock(&shared);
                    if s.generation == generation && s.state == ActuationState::Driving {
                        s.state = ActuationState::Idle;
                        // Sent under the lock so a concurrent start() can't
                        // overtake it.
                        let _ = events.send(SessionEvent::Idle);
                        log::info!("actuation session {generation} finished after {after}ms");
                    }
                }
            }
        });
        Self { _cancel: cancel }
    }
}

/// Owns the one-and-only pulse-train playback on an actuator.
///
/// At most one session is ever active. Starting a new one stops the actuator,
/// forgets the old session's auto-stop, and replaces it; there is no queueing
/// and no other way to cancel. Each session returns to
/// [ActuationState::Idle] by itself once its pulse train's total length has
/// elapsed.
///
/// Without an actuator the session does nothing and stays idle.
#[derive(Debug)]
pub struct ActuationSession {
    actuator: Option<Box<dyn Vibrates>>,
    shared: SharedState,
    pending: Option<DeferredIdle>,
    events: CrossbeamChannel<SessionEvent>,
}
impl Default for ActuationSession {
    fn default() -> Self {
        Self::new_with(None)
    }
}
impl ActuationSession {
    #[allow(missing_docs)]
    pub fn new_with(actuator: Option<Box<dyn Vibrates>>) -> Self {
        Self {
            actuator,
            shared: Default::default(),
            pending: None,
            events: Default::default(),
        }
    }

    /// Whether there's an actuator to drive.
    pub fn is_available(&self) -> bool {
        self.actuator.is_some()
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> ActuationState {
        lock(&self.shared).state
    }

    #[allow(missing_docs)]
    pub fn is_driving(&self) -> bool {
        self.state() == ActuationState::Driving
    }

    /// Session state changes, in order.
    pub fn events(&self) -> &Receiver<SessionEvent> {
        &self.events.receiver
    }

    /// Plays a pulse train, superseding whatever was playing. Returns the
    /// resulting state.
    pub fn start(&mut self, train: &PulseTrain) -> ActuationState {
        let Some(actuator) = self.actuator.as_mut() else {
            log::warn!("no actuator available; ignoring {}ms pulse train", train.total());
            return lock(&self.shared).state;
        };

        actuator.stop();
        self.pending = None;

        let generation = {
            let mut s = lock(&self.shared);
            s.generation = s.generation.wrapping_add(1);
            s.state = ActuationState::Driving;
            actuator.drive(train.pattern());
            let _ = self.events.sender.send(SessionEvent::Driving {
                total: train.total(),
            });
            s.generation
        };
        log::info!(
            "actuation session {generation} driving {} segments for {}ms",
            train.pattern().len(),
            train.total()
        );

        self.pending = Some(DeferredIdle::schedule(
            train.total(),
            generation,
            Arc::clone(&self.shared),
            self.events.sender.clone(),
        ));
        ActuationState::Driving
    }

    /// Compiles the config's pulse train and plays it.
    pub fn play(&mut self, config: &VibrationConfig) -> ActuationState {
        self.start(&compile_pulse_train(config))
    }
}
