use std::time::Duration;

use daedalus::{MazeModel, Notification, Position, Properties, SolveMode};

fn recv(rx: &crossbeam_channel::Receiver<Notification>) -> Notification {
    rx.recv_timeout(Duration::from_secs(5)).unwrap()
}

#[test]
fn save_then_load_under_a_new_name_is_structurally_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m1.maze");

    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();

    model.generate_maze("m1", 7, 5, 5);
    assert!(matches!(recv(&rx), Notification::MazeReady { .. }));

    model.save_maze("m1", &path);
    assert!(matches!(recv(&rx), Notification::MazeSaved { .. }));

    model.load_maze(&path, "m2");
    assert!(matches!(recv(&rx), Notification::MazeLoaded { .. }));

    let m1 = model.maze("m1").unwrap();
    let m2 = model.maze("m2").unwrap();
    assert_eq!(*m1, *m2);

    // both names now report a backing file
    model.file_size("m1");
    assert!(matches!(recv(&rx), Notification::FileSize { .. }));
    model.file_size("m2");
    assert!(matches!(recv(&rx), Notification::FileSize { .. }));
}

#[test]
fn on_disk_size_matches_compressed_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.maze");

    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();

    model.generate_maze("m", 5, 5, 5);
    assert!(matches!(recv(&rx), Notification::MazeReady { .. }));
    model.save_maze("m", &path);
    assert!(matches!(recv(&rx), Notification::MazeSaved { .. }));

    let maze = model.maze("m").unwrap();
    let compressed_len = daedalus::codec::encode_maze(&maze).len() as u64;

    model.file_size("m");
    match recv(&rx) {
        Notification::FileSize { bytes, .. } => assert_eq!(bytes, compressed_len),
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn solve_from_alternate_start_leaves_stored_maze_untouched() {
    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();

    model.generate_maze("m", 7, 7, 7);
    assert!(matches!(recv(&rx), Notification::MazeReady { .. }));

    let before = model.maze("m").unwrap();
    let original_start = before.start();
    let goal = before.goal();

    // the goal cell is open, so solving from it must succeed
    model.solve_maze("m", SolveMode::Local, Some(goal));
    match recv(&rx) {
        Notification::SolutionReady { solution, .. } => assert!(solution.is_solved()),
        other => panic!("unexpected notification: {other:?}"),
    }

    let after = model.maze("m").unwrap();
    assert_eq!(after.start(), original_start);
    assert_eq!(*before, *after);
}

#[test]
fn solve_from_out_of_bounds_start_is_invalid_argument() {
    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();

    model.generate_maze("m", 5, 5, 5);
    assert!(matches!(recv(&rx), Notification::MazeReady { .. }));

    model.solve_maze("m", SolveMode::Local, Some(Position::new(99, 0, 0)));
    match recv(&rx) {
        Notification::Error { kind, .. } => {
            assert_eq!(kind, daedalus::ErrorKind::InvalidArgument)
        }
        other => panic!("unexpected notification: {other:?}"),
    }
}

#[test]
fn loading_replaces_an_existing_name_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.maze");

    let model = MazeModel::new(&Properties::default());
    let rx = model.subscribe();

    model.generate_maze("big", 9, 9, 9);
    assert!(matches!(recv(&rx), Notification::MazeReady { .. }));
    model.save_maze("big", &path);
    assert!(matches!(recv(&rx), Notification::MazeSaved { .. }));

    // overwrite the name with a smaller maze, then load the old file back
    model.generate_maze("big", 3, 3, 3);
    assert!(matches!(recv(&rx), Notification::MazeReady { .. }));
    assert_eq!(model.maze("big").unwrap().width(), 3);

    model.load_maze(&path, "big");
    assert!(matches!(recv(&rx), Notification::MazeLoaded { .. }));
    assert_eq!(model.maze("big").unwrap().width(), 9);
}
