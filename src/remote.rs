//! One-shot solve exchange with a remote peer.
//!
//! Wire format: each direction carries one frame, a 32-bit big-endian
//! length prefix followed by the payload. The request payload is the
//! maze's canonical byte form; the response payload is a bincode
//! [`Solution`]. One request/response per connection, then the socket is
//! closed; no reuse, no retry.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{DaedalusError, Result};
use crate::maze::Maze3d;
use crate::solve::{MazeSolver, Solution};

/// Upper bound on a response frame; anything larger is a malformed peer.
const MAX_RESPONSE_LEN: u32 = 16 * 1024 * 1024;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the remote solving peer. Cheap to clone; each solve opens
/// its own connection.
#[derive(Debug, Clone)]
pub struct SolveClient {
    addr: SocketAddr,
    timeout: Duration,
}

impl SolveClient {
    /// Resolve `addr` ("host:port"). Resolution failure is a `Connection`
    /// error: the peer is unreachable either way.
    pub fn new(addr: &str) -> Result<Self> {
        let addr = addr
            .to_socket_addrs()
            .map_err(|e| DaedalusError::Connection(format!("cannot resolve '{addr}': {e}")))?
            .next()
            .ok_or_else(|| {
                DaedalusError::Connection(format!("'{addr}' resolved to no addresses"))
            })?;
        Ok(Self {
            addr,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run one full exchange: connect, send the maze, receive the
    /// solution, close. Every stage is bounded by the client timeout, so a
    /// silent peer cannot hang the calling worker forever.
    pub fn solve_remote(&self, maze: &Maze3d) -> Result<Solution> {
        let mut stream = self.connect()?;
        self.send_maze(&mut stream, maze)?;
        let solution = self.receive_solution(&mut stream)?;
        // Socket drops here; one request per connection.
        Ok(solution)
    }

    fn connect(&self) -> Result<TcpStream> {
        log::debug!("connecting to solver at {}", self.addr);
        let stream = TcpStream::connect_timeout(&self.addr, self.timeout)
            .map_err(|e| DaedalusError::Connection(format!("connect to {}: {e}", self.addr)))?;
        stream
            .set_read_timeout(Some(self.timeout))
            .and_then(|_| stream.set_write_timeout(Some(self.timeout)))
            .map_err(|e| DaedalusError::Connection(format!("socket setup: {e}")))?;
        Ok(stream)
    }

    fn send_maze(&self, stream: &mut TcpStream, maze: &Maze3d) -> Result<()> {
        let bytes = maze.to_bytes();
        stream
            .write_u32::<BigEndian>(bytes.len() as u32)
            .and_then(|_| stream.write_all(&bytes))
            .and_then(|_| stream.flush())
            .map_err(|e| DaedalusError::Connection(format!("send maze: {e}")))?;
        log::debug!("sent {} maze bytes to {}", bytes.len(), self.addr);
        Ok(())
    }

    fn receive_solution(&self, stream: &mut TcpStream) -> Result<Solution> {
        let len = stream.read_u32::<BigEndian>().map_err(|e| {
            DaedalusError::Protocol(format!("reading response length: {e}"))
        })?;
        if len == 0 || len > MAX_RESPONSE_LEN {
            return Err(DaedalusError::Protocol(format!(
                "implausible response length {len}"
            )));
        }
        let mut payload = vec![0u8; len as usize];
        stream.read_exact(&mut payload).map_err(|e| {
            DaedalusError::Protocol(format!("response truncated: {e}"))
        })?;
        let solution: Solution = bincode::deserialize(&payload)
            .map_err(|e| DaedalusError::Protocol(format!("malformed solution payload: {e}")))?;
        log::debug!(
            "received solution ({} steps) from {}",
            solution.len(),
            self.addr
        );
        Ok(solution)
    }
}

/// The solve client is just another solver behind the same seam.
impl MazeSolver for SolveClient {
    fn solve(&self, maze: &Maze3d) -> Result<Solution> {
        self.solve_remote(maze)
    }
}

/// Serve one exchange on an accepted connection. The inverse of
/// [`SolveClient::solve_remote`]; test peers and emulators build on it.
pub fn serve_one_exchange<S>(stream: &mut TcpStream, solver: &S) -> Result<()>
where
    S: MazeSolver + ?Sized,
{
    let len = stream
        .read_u32::<BigEndian>()
        .map_err(|e| DaedalusError::Protocol(format!("reading maze length: {e}")))?;
    if len == 0 || len > MAX_RESPONSE_LEN {
        return Err(DaedalusError::Protocol(format!(
            "implausible maze length {len}"
        )));
    }
    let mut payload = vec![0u8; len as usize];
    stream
        .read_exact(&mut payload)
        .map_err(|e| DaedalusError::Protocol(format!("maze truncated: {e}")))?;
    let maze = Maze3d::from_bytes(&payload)?;
    let solution = solver.solve(&maze)?;
    let encoded = bincode::serialize(&solution)
        .map_err(|e| DaedalusError::Internal(format!("encode solution: {e}")))?;
    stream
        .write_u32::<BigEndian>(encoded.len() as u32)
        .and_then(|_| stream.write_all(&encoded))
        .and_then(|_| stream.flush())
        .map_err(|e| DaedalusError::Connection(format!("send solution: {e}")))?;
    Ok(())
}
