use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            // arbitrary bytes must either bootstrap into a maze or fail
            // with a typed error; never panic, never over-allocate
            let _ = daedalus::codec::decode_maze_bytes(data);
        });
    }
}
