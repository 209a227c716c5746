use std::time::Duration;

use daedalus::{ErrorKind, MazeModel, Notification, Properties};

fn ready_model() -> (MazeModel, crossbeam_channel::Receiver<Notification>) {
    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();
    model.generate_maze("m", 5, 4, 3);
    match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
        Notification::MazeReady { .. } => {}
        other => panic!("unexpected notification: {other:?}"),
    }
    (model, rx)
}

#[test]
fn valid_section_has_plane_dimensions() {
    let (model, rx) = ready_model();
    model.cross_section("m", "X", 2);
    match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
        Notification::CrossSection { plane, .. } => {
            // x-section of a 5x4x3 maze is height x depth
            assert_eq!(plane.len(), 4);
            assert_eq!(plane[0].len(), 3);
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn out_of_range_index_is_invalid_argument() {
    let (model, rx) = ready_model();
    model.cross_section("m", "X", 5);
    match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
        Notification::Error { name, kind, message } => {
            assert_eq!(name.as_deref(), Some("m"));
            assert_eq!(kind, ErrorKind::InvalidArgument);
            assert!(message.contains("out of range"));
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn unknown_axis_gets_the_distinct_message() {
    let (model, rx) = ready_model();
    model.cross_section("m", "W", 0);
    match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
        Notification::Error { kind, message, .. } => {
            assert_eq!(kind, ErrorKind::InvalidArgument);
            assert!(message.contains("axis must be X, Y, or Z"));
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn section_of_missing_maze_is_not_found() {
    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();
    model.cross_section("ghost", "Y", 0);
    match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
        Notification::Error { kind, .. } => assert_eq!(kind, ErrorKind::NotFound),
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn size_queries_report_through_the_bus() {
    let (model, rx) = ready_model();
    model.maze_size("m");
    match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
        Notification::MazeSize { name, bytes } => {
            assert_eq!(name, "m");
            assert_eq!(bytes, 36 + 5 * 4 * 3);
        }
        other => panic!("unexpected notification: {other:?}"),
    }

    // no file recorded yet
    model.file_size("m");
    match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
        Notification::Error { kind, .. } => assert_eq!(kind, ErrorKind::NotFound),
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn dir_listing_is_sorted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.maze"), b"x").unwrap();
    std::fs::write(dir.path().join("a.maze"), b"x").unwrap();

    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();
    model.dir_listing(dir.path());
    match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
        Notification::DirectoryListing { entries, .. } => {
            assert_eq!(entries, vec!["a.maze".to_string(), "b.maze".to_string()]);
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}
