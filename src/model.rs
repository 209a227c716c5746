//! Orchestrator composing the store, worker pool, codec, solvers, and
//! notification bus.
//!
//! Generate and solve run on the pool and report asynchronously; every
//! other operation runs on the caller. Either way each call produces
//! exactly one notification, success or failure, and no error escapes to
//! kill a worker.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::bus::{Notification, NotificationBus};
use crate::codec;
use crate::config::Properties;
use crate::error::{DaedalusError, Result};
use crate::generate::{GrowingTreeGenerator, MazeGenerator};
use crate::maze::{Axis, Maze3d, Position};
use crate::pool::WorkerPool;
use crate::remote::SolveClient;
use crate::solve::{BfsSolver, MazeSolver};
use crate::store::MazeStore;

/// Where a solve task runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// In-process solver collaborator.
    Local,
    /// Delegate to the configured remote peer, one socket per request.
    Remote,
}

pub struct MazeModel {
    store: Arc<MazeStore>,
    bus: Arc<NotificationBus>,
    pool: WorkerPool,
    generator: Arc<dyn MazeGenerator>,
    solver: Arc<dyn MazeSolver>,
    remote_addr: String,
}

impl MazeModel {
    /// Model with the reference collaborators: growing-tree generation and
    /// breadth-first local solving.
    pub fn new(props: &Properties) -> Self {
        Self::with_collaborators(
            props,
            Arc::new(GrowingTreeGenerator::default()),
            Arc::new(BfsSolver),
        )
    }

    /// Model with caller-supplied generator/solver collaborators.
    pub fn with_collaborators(
        props: &Properties,
        generator: Arc<dyn MazeGenerator>,
        solver: Arc<dyn MazeSolver>,
    ) -> Self {
        Self {
            store: Arc::new(MazeStore::new()),
            bus: Arc::new(NotificationBus::new()),
            pool: WorkerPool::new(props.threads),
            generator,
            solver,
            remote_addr: props.remote_addr(),
        }
    }

    /// Subscribe the presentation layer to outcome notifications.
    pub fn subscribe(&self) -> Receiver<Notification> {
        self.bus.subscribe()
    }

    pub fn store(&self) -> &MazeStore {
        &self.store
    }

    /// Direct read access for display; no notification involved.
    pub fn maze(&self, name: &str) -> Result<Arc<Maze3d>> {
        self.store.get(name)
    }

    /// Queue maze generation. Returns immediately; a `MazeReady` or
    /// `Error` notification follows.
    pub fn generate_maze(&self, name: &str, width: u32, height: u32, depth: u32) {
        let task_name = name.to_string();
        let store = Arc::clone(&self.store);
        let bus = Arc::clone(&self.bus);
        let generator = Arc::clone(&self.generator);
        let submitted = self.pool.submit(move || {
            let outcome = generator.generate(width, height, depth).map(|maze| {
                store.put(&task_name, maze);
                Notification::MazeReady {
                    name: task_name.clone(),
                }
            });
            publish_outcome(&bus, &task_name, outcome);
        });
        if let Err(err) = submitted {
            self.bus.publish(Notification::failure(Some(name), &err));
        }
    }

    /// Queue a solve. `from` solves a copy with an alternate start; the
    /// stored maze is never mutated. Returns immediately; a
    /// `SolutionReady` or `Error` notification follows.
    pub fn solve_maze(&self, name: &str, mode: SolveMode, from: Option<Position>) {
        let task_name = name.to_string();
        let store = Arc::clone(&self.store);
        let bus = Arc::clone(&self.bus);
        let solver = Arc::clone(&self.solver);
        let remote_addr = self.remote_addr.clone();
        let submitted = self.pool.submit(move || {
            let outcome = solve_task(&store, &solver, &remote_addr, &task_name, mode, from);
            publish_outcome(&bus, &task_name, outcome);
        });
        if let Err(err) = submitted {
            self.bus.publish(Notification::failure(Some(name), &err));
        }
    }

    /// Compress the named maze into `path` (complete overwrite) and record
    /// the backing file.
    pub fn save_maze(&self, name: &str, path: &Path) {
        let outcome = self.store.get(name).and_then(|maze| {
            codec::write_maze_file(&maze, path)?;
            self.store.record_file(name, path)?;
            Ok(Notification::MazeSaved {
                name: name.to_string(),
                path: path.to_path_buf(),
            })
        });
        publish_outcome(&self.bus, name, outcome);
    }

    /// Load a maze file and store it under `name`, replacing any previous
    /// maze and backing path for that name in one step.
    pub fn load_maze(&self, path: &Path, name: &str) {
        let outcome = codec::decode_maze_file(path).map(|maze| {
            self.store.put_with_file(name, maze, path);
            Notification::MazeLoaded {
                name: name.to_string(),
                path: path.to_path_buf(),
            }
        });
        publish_outcome(&self.bus, name, outcome);
    }

    /// Canonical-encoding size of the named maze.
    pub fn maze_size(&self, name: &str) {
        let outcome = self.store.size_in_memory(name).map(|bytes| {
            Notification::MazeSize {
                name: name.to_string(),
                bytes,
            }
        });
        publish_outcome(&self.bus, name, outcome);
    }

    /// On-disk size of the named maze's backing file.
    pub fn file_size(&self, name: &str) {
        let outcome = self.store.size_on_disk(name).map(|bytes| {
            Notification::FileSize {
                name: name.to_string(),
                bytes,
            }
        });
        publish_outcome(&self.bus, name, outcome);
    }

    /// Cross-section along `axis` ("X", "Y", or "Z") at `index`.
    pub fn cross_section(&self, name: &str, axis: &str, index: u32) {
        let outcome = axis.parse::<Axis>().and_then(|axis| {
            let maze = self.store.get(name)?;
            let plane = maze.cross_section(axis, index)?;
            Ok(Notification::CrossSection {
                name: name.to_string(),
                axis,
                index,
                plane,
            })
        });
        publish_outcome(&self.bus, name, outcome);
    }

    /// List a directory, sorted by name.
    pub fn dir_listing(&self, path: &Path) {
        let outcome = read_dir_names(path).map(|entries| Notification::DirectoryListing {
            path: path.to_path_buf(),
            entries,
        });
        match outcome {
            Ok(n) => self.bus.publish(n),
            Err(err) => self.bus.publish(Notification::failure(None, &err)),
        }
    }

    /// Drain barrier: block until every previously queued task finishes,
    /// then announce shutdown. New submissions are rejected once draining
    /// has begun.
    pub fn wait_for_completion(&self) {
        log::info!("draining worker pool");
        self.pool.wait_idle();
        self.bus.publish(Notification::ShutdownComplete);
    }
}

fn solve_task(
    store: &MazeStore,
    solver: &Arc<dyn MazeSolver>,
    remote_addr: &str,
    name: &str,
    mode: SolveMode,
    from: Option<Position>,
) -> Result<Notification> {
    let stored = store.get(name)?;
    // An alternate start means a new maze value; the stored one is never
    // aliased while the solve is outstanding.
    let maze: Option<Maze3d> = match from {
        Some(start) => {
            if !stored.in_bounds(start) {
                return Err(DaedalusError::InvalidArgument(format!(
                    "start {} outside {}x{}x{}",
                    start,
                    stored.width(),
                    stored.height(),
                    stored.depth()
                )));
            }
            let mut copy = (*stored).clone();
            copy.set_start(start);
            Some(copy)
        }
        None => None,
    };
    let target: &Maze3d = maze.as_ref().unwrap_or(&stored);
    let solution = match mode {
        SolveMode::Local => solver.solve(target)?,
        SolveMode::Remote => SolveClient::new(remote_addr)?.solve_remote(target)?,
    };
    Ok(Notification::SolutionReady {
        name: name.to_string(),
        solution,
    })
}

fn publish_outcome(bus: &NotificationBus, name: &str, outcome: Result<Notification>) {
    match outcome {
        Ok(notification) => bus.publish(notification),
        Err(err) => {
            log::warn!("operation on '{name}' failed: {err}");
            bus.publish(Notification::failure(Some(name), &err));
        }
    }
}

fn read_dir_names(path: &Path) -> Result<Vec<String>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DaedalusError::NotFound(format!("directory {}", path.display()))
        } else {
            DaedalusError::Io(e)
        }
    })? {
        entries.push(entry?.file_name().to_string_lossy().into_owned());
    }
    entries.sort();
    Ok(entries)
}
