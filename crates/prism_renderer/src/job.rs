//! Background render worker.
//!
//! A worker thread owns the world and waits for [`JobCommand`]s. A start
//! command renders one frame, streaming a [`JobEvent::Partial`] snapshot
//! every [`PROGRESS_INTERVAL`](crate::PROGRESS_INTERVAL) scanlines and a
//! [`JobEvent::Result`] when done. Renders cannot be cancelled once
//! started. The worker exits after its command sender is dropped.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

use prism_core::{OptionsError, RenderOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::{render, Framebuffer, HittableList};

/// Errors from talking to the worker thread.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Render worker has stopped")]
    WorkerStopped,

    #[error("Render worker panicked")]
    WorkerPanicked,
}

/// Inbound messages to the worker.
#[derive(Debug, Clone)]
pub enum JobCommand {
    /// Render one frame; `seed` initializes the sampling RNG
    Start { options: RenderOptions, seed: u64 },
}

/// Outbound notifications from the worker.
#[derive(Debug)]
pub enum JobEvent {
    /// Snapshot taken before scanline `rows_completed`; not a completion signal
    Partial {
        rows_completed: u32,
        framebuffer: Framebuffer,
    },
    /// The finished frame
    Result(Framebuffer),
    /// The start command carried invalid options; nothing was rendered
    Rejected(OptionsError),
}

/// Handle to a render thread.
pub struct RenderWorker {
    commands: Option<Sender<JobCommand>>,
    events: Receiver<JobEvent>,
    handle: Option<JoinHandle<()>>,
}

impl RenderWorker {
    /// Spawn a worker that renders `world`.
    pub fn spawn(world: HittableList) -> Result<Self, JobError> {
        let (command_tx, command_rx) = channel();
        let (event_tx, event_rx) = channel();

        let handle = thread::Builder::new()
            .name("prism-render".into())
            .spawn(move || run(world, command_rx, event_tx))?;

        Ok(Self {
            commands: Some(command_tx),
            events: event_rx,
            handle: Some(handle),
        })
    }

    /// Queue a render. Returns immediately; progress arrives as events.
    pub fn start(&self, options: RenderOptions, seed: u64) -> Result<(), JobError> {
        self.send(JobCommand::Start { options, seed })
    }

    /// Send a raw command to the worker.
    pub fn send(&self, command: JobCommand) -> Result<(), JobError> {
        self.commands
            .as_ref()
            .ok_or(JobError::WorkerStopped)?
            .send(command)
            .map_err(|_| JobError::WorkerStopped)
    }

    /// Block until the next event. `None` once the worker has exited.
    pub fn recv(&self) -> Option<JobEvent> {
        self.events.recv().ok()
    }

    /// Stop accepting commands and wait for queued renders to finish.
    pub fn shutdown(mut self) -> Result<(), JobError> {
        self.join()
    }

    fn join(&mut self) -> Result<(), JobError> {
        self.commands.take();
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| JobError::WorkerPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        if let Err(err) = self.join() {
            log::error!("{err}");
        }
    }
}

fn run(world: HittableList, commands: Receiver<JobCommand>, events: Sender<JobEvent>) {
    log::debug!("Render worker started with {} surfaces", world.len());

    for command in commands.iter() {
        match command {
            JobCommand::Start { options, seed } => {
                log::debug!("Start command received (seed {seed})");

                if let Err(err) = options.validate() {
                    log::warn!("Rejecting render: {err}");
                    if events.send(JobEvent::Rejected(err)).is_err() {
                        break;
                    }
                    continue;
                }

                let mut rng = StdRng::seed_from_u64(seed);
                let framebuffer = render(&options, &world, &mut rng, |snapshot, rows_completed| {
                    // Renders run to completion even if nobody is listening
                    let _ = events.send(JobEvent::Partial {
                        rows_completed,
                        framebuffer: snapshot.clone(),
                    });
                });

                if events.send(JobEvent::Result(framebuffer)).is_err() {
                    break;
                }
            }
        }
    }

    log::debug!("Render worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_world;
    use prism_core::SceneDescription;
    use prism_math::Vec3;

    fn options() -> RenderOptions {
        RenderOptions {
            width: 8,
            height: 60,
            viewport_width: 0.5,
            viewport_height: 2.0,
            camera_origin: Vec3::ZERO,
            focal_length: 1.0,
            sample_count: 1,
            max_depth: 3,
        }
    }

    fn worker() -> RenderWorker {
        RenderWorker::spawn(build_world(&SceneDescription::reference()).unwrap()).unwrap()
    }

    #[test]
    fn test_partial_then_result() {
        let worker = worker();
        worker.start(options(), 7).unwrap();

        let mut partial_rows = Vec::new();
        let result = loop {
            match worker.recv().unwrap() {
                JobEvent::Partial { rows_completed, .. } => partial_rows.push(rows_completed),
                JobEvent::Result(fb) => break fb,
                JobEvent::Rejected(err) => panic!("unexpected rejection: {err}"),
            }
        };

        assert_eq!(partial_rows, vec![0, 50]);
        assert_eq!(result.as_bytes().len(), 8 * 60 * 4);
        worker.shutdown().unwrap();
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let worker = worker();
        let bad = RenderOptions {
            sample_count: 0,
            ..options()
        };
        worker.start(bad, 0).unwrap();

        assert!(matches!(
            worker.recv(),
            Some(JobEvent::Rejected(OptionsError::ZeroSamples))
        ));

        // The worker keeps serving after a rejection
        worker.start(options(), 0).unwrap();
        let finished = std::iter::from_fn(|| worker.recv())
            .any(|event| matches!(event, JobEvent::Result(_)));
        assert!(finished);
    }

    #[test]
    fn test_same_seed_same_frame() {
        let worker = worker();
        worker.start(options(), 123).unwrap();
        worker.start(options(), 123).unwrap();

        let results: Vec<Framebuffer> = std::iter::from_fn(|| worker.recv())
            .filter_map(|event| match event {
                JobEvent::Result(fb) => Some(fb),
                _ => None,
            })
            .take(2)
            .collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn test_shutdown_waits_for_queued_render() {
        let worker = worker();
        worker.start(options(), 1).unwrap();
        worker.shutdown().unwrap();
    }

    #[test]
    fn test_events_end_after_worker_exits() {
        let mut worker = worker();
        worker.join().unwrap();

        assert!(worker.recv().is_none());
        assert!(matches!(
            worker.start(options(), 0),
            Err(JobError::WorkerStopped)
        ));
    }
}
