// Copyright (c) 2024 Mike Tsao

//! A simulated vibration motor that plays on/off patterns in real time.

use crossbeam::channel::{Receiver, Sender};
use std::time::Duration;
use text2vibe::prelude::*;

/// The client sends requests to the actuator through [ActuatorServiceInput]
/// messages.
#[derive(Clone, Debug, PartialEq)]
pub enum ActuatorServiceInput {
    /// Start playing an alternating on/off pattern of millisecond durations,
    /// beginning with "on". Replaces whatever was playing.
    Drive(Vec<u32>),

    /// Silence the motor now.
    Stop,

    /// The app is ready to quit, so the service should end.
    Quit,
}

/// The service reports what the motor is doing through [ActuatorServiceEvent]
/// messages.
#[derive(Clone, Debug, PartialEq)]
pub enum ActuatorServiceEvent {
    /// The motor started on this pattern.
    Driving(Vec<u32>),

    /// The last segment of the pattern has elapsed.
    Finished,

    /// A [ActuatorServiceInput::Stop] was handled.
    Stopped,

    /// The service has ended.
    Quit,
}

/// A channel-based stand-in for a vibration motor. Clones talk to the same
/// daemon thread, so one clone can be handed to an
/// [ActuationSession](text2vibe::orchestration::ActuationSession) while
/// another listens for events.
#[derive(Debug, Clone)]
pub struct ActuatorService {
    inputs: CrossbeamChannel<ActuatorServiceInput>,
    events: CrossbeamChannel<ActuatorServiceEvent>,
}
impl Default for ActuatorService {
    fn default() -> Self {
        let r = Self {
            inputs: Default::default(),
            events: Default::default(),
        };
        r.spawn_thread();
        r
    }
}
impl ProvidesService<ActuatorServiceInput, ActuatorServiceEvent> for ActuatorService {
    fn sender(&self) -> &Sender<ActuatorServiceInput> {
        &self.inputs.sender
    }

    fn receiver(&self) -> &Receiver<ActuatorServiceEvent> {
        &self.events.receiver
    }
}
impl Vibrates for ActuatorService {
    fn drive(&mut self, pattern: &[u32]) {
        self.send_input(ActuatorServiceInput::Drive(pattern.to_vec()));
    }

    fn stop(&mut self) {
        self.send_input(ActuatorServiceInput::Stop);
    }
}
impl ActuatorService {
    fn spawn_thread(&self) {
        let receiver = self.inputs.receiver.clone();
        let sender = self.events.sender.clone();
        std::thread::spawn(move || {
            let mut daemon = ActuatorServiceDaemon::new_with(receiver, sender);
            daemon.execute();
        });
    }
}

struct ActuatorServiceDaemon {
    receiver: Receiver<ActuatorServiceInput>,
    sender: Sender<ActuatorServiceEvent>,

    is_on: bool,
}
impl ActuatorServiceDaemon {
    fn new_with(
        receiver: Receiver<ActuatorServiceInput>,
        sender: Sender<ActuatorServiceEvent>,
    ) -> Self {
        Self {
            receiver,
            sender,
            is_on: false,
        }
    }

    fn execute(&mut self) {
        let mut next = None;
        loop {
            let input = match next.take() {
                Some(input) => input,
                None => match self.receiver.recv() {
                    Ok(input) => input,
                    // Every client is gone.
                    Err(_) => break,
                },
            };
            match input {
                ActuatorServiceInput::Drive(pattern) => next = self.play(pattern),
                ActuatorServiceInput::Stop => {
                    self.set_motor(false);
                    let _ = self.sender.send(ActuatorServiceEvent::Stopped);
                }
                ActuatorServiceInput::Quit => {
                    self.set_motor(false);
                    let _ = self.sender.send(ActuatorServiceEvent::Quit);
                    break;
                }
            }
        }
    }

    /// Walks the pattern in real time. Returns early with any input that
    /// arrives meanwhile.
    fn play(&mut self, pattern: Vec<u32>) -> Option<ActuatorServiceInput> {
        let _ = self
            .sender
            .send(ActuatorServiceEvent::Driving(pattern.clone()));
        for (i, ms) in pattern.iter().enumerate() {
            self.set_motor(i % 2 == 0);
            let deadline = crossbeam::channel::after(Duration::from_millis(u64::from(*ms)));
            crossbeam::select! {
                recv(self.receiver) -> input => {
                    return Some(input.unwrap_or(ActuatorServiceInput::Quit));
                }
                recv(deadline) -> _ => {}
            }
        }
        self.set_motor(false);
        let _ = self.sender.send(ActuatorServiceEvent::Finished);
        None
    }

    fn set_motor(&mut self, is_on: bool) {
        if is_on != self.is_on {
            self.is_on = is_on;
            log::trace!("motor {}", if is_on { "on" } else { "off" });
        }
    }
}
