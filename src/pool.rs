//! Fixed-size worker pool with an unbounded submission queue and a
//! completion-counter drain barrier.
//!
//! Workers consume one shared channel and run each job to completion; a job
//! performing a remote exchange holds its worker for the full round trip.
//! The barrier counts in-flight jobs instead of retaining join handles:
//! `wait_idle` flips the pool into draining mode, rejects later
//! submissions, and blocks on a condvar until the count reaches zero.

use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use crossbeam_channel::{unbounded, Sender};

use crate::error::{DaedalusError, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Barrier {
    state: Mutex<BarrierState>,
    idle: Condvar,
}

struct BarrierState {
    in_flight: usize,
    draining: bool,
}

pub struct WorkerPool {
    tx: Sender<Job>,
    barrier: Arc<Barrier>,
}

impl WorkerPool {
    /// Spawn `workers` threads consuming the shared queue. The queue is
    /// unbounded: no job is ever rejected for capacity, a busy pool only
    /// delays dequeue.
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (tx, rx) = unbounded::<Job>();
        let barrier = Arc::new(Barrier {
            state: Mutex::new(BarrierState {
                in_flight: 0,
                draining: false,
            }),
            idle: Condvar::new(),
        });

        for id in 0..workers {
            let rx = rx.clone();
            let barrier = Arc::clone(&barrier);
            thread::Builder::new()
                .name(format!("maze-worker-{id}"))
                .spawn(move || {
                    log::debug!("worker {id} started");
                    while let Ok(job) = rx.recv() {
                        // a panicking job must neither kill the worker nor
                        // leave the barrier counting a job that will never
                        // finish
                        let outcome =
                            std::panic::catch_unwind(std::panic::AssertUnwindSafe(job));
                        if outcome.is_err() {
                            log::error!("worker {id}: task panicked");
                        }
                        let mut state = barrier.state.lock().expect("barrier lock");
                        state.in_flight -= 1;
                        if state.in_flight == 0 {
                            barrier.idle.notify_all();
                        }
                    }
                    log::debug!("worker {id} exiting");
                })
                .expect("spawn worker thread");
        }

        Self { tx, barrier }
    }

    /// Enqueue a job. Fire-and-forget: returns as soon as the job is
    /// queued. Fails only once draining has begun.
    pub fn submit<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut state = self.barrier.state.lock().expect("barrier lock");
            if state.draining {
                return Err(DaedalusError::Internal(
                    "worker pool is draining; submission rejected".into(),
                ));
            }
            state.in_flight += 1;
        }
        // Counted before send, so wait_idle can never observe a queued but
        // uncounted job.
        self.tx
            .send(Box::new(job))
            .map_err(|_| DaedalusError::Internal("worker pool channel closed".into()))
    }

    /// Drain barrier: stop accepting work, then block until every job
    /// submitted before this call has completed. Idempotent; with nothing
    /// pending it returns immediately.
    pub fn wait_idle(&self) {
        let mut state = self.barrier.state.lock().expect("barrier lock");
        state.draining = true;
        while state.in_flight > 0 {
            state = self.barrier.idle.wait(state).expect("barrier wait");
        }
    }

    /// Jobs submitted but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.barrier.state.lock().expect("barrier lock").in_flight
    }

    pub fn is_draining(&self) -> bool {
        self.barrier.state.lock().expect("barrier lock").draining
    }
}
