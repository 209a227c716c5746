use std::path::PathBuf;

use clap::{Parser, Subcommand};

use daedalus::{load_properties, MazeModel, Notification, Position, Properties, SolveMode};

#[derive(Parser)]
#[command(name = "daedalus", about = "3D maze generation and solving client")]
struct Cli {
    /// Properties file (JSON: threads, host, port).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a maze and write it to a compressed maze file.
    Generate {
        name: String,
        width: u32,
        height: u32,
        depth: u32,
        /// Output maze file.
        #[arg(long)]
        out: PathBuf,
    },
    /// Load a maze file and solve it.
    Solve {
        /// Input maze file.
        file: PathBuf,
        /// Delegate to the configured remote peer instead of solving
        /// locally.
        #[arg(long)]
        remote: bool,
        /// Alternate start position "x,y,z".
        #[arg(long)]
        from: Option<String>,
    },
    /// Report in-memory and on-disk sizes of a maze file.
    Info { file: PathBuf },
    /// Print a cross-section of a maze file.
    Section {
        file: PathBuf,
        /// X, Y, or Z.
        axis: String,
        index: u32,
    },
    /// List a directory.
    Ls { dir: PathBuf },
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> daedalus::Result<()> {
    let cli = Cli::parse();
    let props = match &cli.config {
        Some(path) => load_properties(path)?,
        None => Properties::default(),
    };
    let model = MazeModel::new(&props);
    let rx = model.subscribe();

    match cli.command {
        Command::Generate {
            name,
            width,
            height,
            depth,
            out,
        } => {
            model.generate_maze(&name, width, height, depth);
            model.wait_for_completion();
            model.save_maze(&name, &out);
        }
        Command::Solve { file, remote, from } => {
            model.load_maze(&file, "maze");
            let mode = if remote {
                SolveMode::Remote
            } else {
                SolveMode::Local
            };
            let from = from.as_deref().map(parse_position).transpose()?;
            model.solve_maze("maze", mode, from);
            model.wait_for_completion();
        }
        Command::Info { file } => {
            model.load_maze(&file, "maze");
            model.maze_size("maze");
            model.file_size("maze");
        }
        Command::Section { file, axis, index } => {
            model.load_maze(&file, "maze");
            model.cross_section("maze", &axis, index);
        }
        Command::Ls { dir } => {
            model.dir_listing(&dir);
        }
    }

    drop(model);
    for notification in rx {
        print_notification(&notification);
    }
    Ok(())
}

fn parse_position(s: &str) -> daedalus::Result<Position> {
    let parts: Vec<_> = s.split(',').map(str::trim).collect();
    let err = || {
        daedalus::DaedalusError::InvalidArgument(format!(
            "position must be \"x,y,z\", got '{s}'"
        ))
    };
    if parts.len() != 3 {
        return Err(err());
    }
    let x = parts[0].parse().map_err(|_| err())?;
    let y = parts[1].parse().map_err(|_| err())?;
    let z = parts[2].parse().map_err(|_| err())?;
    Ok(Position::new(x, y, z))
}

fn print_notification(notification: &Notification) {
    match notification {
        Notification::MazeReady { name } => println!("maze '{name}' is ready"),
        Notification::SolutionReady { name, solution } => match solution {
            daedalus::Solution::Path(steps) => {
                println!("solution for '{name}' ({} steps):", steps.len());
                for step in steps {
                    println!("  {step}");
                }
            }
            daedalus::Solution::Unsolvable => println!("maze '{name}' is unsolvable"),
        },
        Notification::MazeSaved { name, path } => {
            println!("maze '{name}' saved to {}", path.display())
        }
        Notification::MazeLoaded { name, path } => {
            println!("maze '{name}' loaded from {}", path.display())
        }
        Notification::MazeSize { name, bytes } => println!("maze '{name}': {bytes} bytes"),
        Notification::FileSize { name, bytes } => {
            println!("maze '{name}' on disk: {bytes} bytes")
        }
        Notification::CrossSection {
            name,
            axis,
            index,
            plane,
        } => {
            println!("cross-section of '{name}' at {axis}={index}:");
            for row in plane {
                let line: String = row
                    .iter()
                    .map(|&c| if c == daedalus::maze::WALL { '#' } else { '.' })
                    .collect();
                println!("  {line}");
            }
        }
        Notification::DirectoryListing { path, entries } => {
            println!("{}:", path.display());
            for entry in entries {
                println!("  {entry}");
            }
        }
        Notification::Error {
            name,
            kind,
            message,
        } => match name {
            Some(name) => eprintln!("error ({kind:?}) on '{name}': {message}"),
            None => eprintln!("error ({kind:?}): {message}"),
        },
        Notification::ShutdownComplete => println!("all tasks finished"),
    }
}
