//! Typed notification bus from the core to the presentation layer.
//!
//! Every operation outcome, success or failure, becomes exactly one
//! [`Notification`]. Delivery order is not submission order; consumers key
//! on the maze name carried in each notification.

use std::path::PathBuf;
use std::sync::Mutex;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::DaedalusError;
use crate::maze::Axis;
use crate::solve::Solution;

/// Failure domain tag carried by [`Notification::Error`], mirroring
/// [`DaedalusError`] so consumers can match without the error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Format,
    Connection,
    Protocol,
    InvalidArgument,
    Io,
    Internal,
}

impl From<&DaedalusError> for ErrorKind {
    fn from(err: &DaedalusError) -> Self {
        match err {
            DaedalusError::NotFound(_) => ErrorKind::NotFound,
            DaedalusError::Format(_) => ErrorKind::Format,
            DaedalusError::Connection(_) => ErrorKind::Connection,
            DaedalusError::Protocol(_) => ErrorKind::Protocol,
            DaedalusError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DaedalusError::Io(_) => ErrorKind::Io,
            DaedalusError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// One outcome, published once.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    MazeReady {
        name: String,
    },
    SolutionReady {
        name: String,
        solution: Solution,
    },
    MazeSaved {
        name: String,
        path: PathBuf,
    },
    MazeLoaded {
        name: String,
        path: PathBuf,
    },
    MazeSize {
        name: String,
        bytes: usize,
    },
    FileSize {
        name: String,
        bytes: u64,
    },
    CrossSection {
        name: String,
        axis: Axis,
        index: u32,
        plane: Vec<Vec<u8>>,
    },
    DirectoryListing {
        path: PathBuf,
        entries: Vec<String>,
    },
    Error {
        name: Option<String>,
        kind: ErrorKind,
        message: String,
    },
    ShutdownComplete,
}

impl Notification {
    /// Build the single error notification for a failed operation.
    pub fn failure(name: Option<&str>, err: &DaedalusError) -> Self {
        Notification::Error {
            name: name.map(str::to_string),
            kind: ErrorKind::from(err),
            message: err.to_string(),
        }
    }
}

/// Publish/subscribe fan-out. Each subscriber gets its own unbounded
/// channel; publishing never blocks the core.
#[derive(Default)]
pub struct NotificationBus {
    subscribers: Mutex<Vec<Sender<Notification>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<Notification> {
        let (tx, rx) = unbounded();
        self.subscribers.lock().expect("bus lock").push(tx);
        rx
    }

    /// Deliver to every live subscriber, pruning dropped ones.
    pub fn publish(&self, notification: Notification) {
        let mut subs = self.subscribers.lock().expect("bus lock");
        subs.retain(|tx| tx.send(notification.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().expect("bus lock").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_reaches_all_subscribers() {
        let bus = NotificationBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(Notification::MazeReady { name: "m".into() });
        assert_eq!(a.recv().unwrap(), Notification::MazeReady { name: "m".into() });
        assert_eq!(b.recv().unwrap(), Notification::MazeReady { name: "m".into() });
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = NotificationBus::new();
        let rx = bus.subscribe();
        drop(rx);
        bus.publish(Notification::ShutdownComplete);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn failure_carries_kind_and_name() {
        let err = DaedalusError::NotFound("maze 'm'".into());
        match Notification::failure(Some("m"), &err) {
            Notification::Error { name, kind, message } => {
                assert_eq!(name.as_deref(), Some("m"));
                assert_eq!(kind, ErrorKind::NotFound);
                assert!(message.contains("maze 'm'"));
            }
            other => panic!("unexpected notification: {other:?}"),
        }
    }
}
