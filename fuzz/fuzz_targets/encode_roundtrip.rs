use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let compressed = daedalus::codec::encode(data);
            let decoded = daedalus::codec::decode(&compressed, data.len()).unwrap();
            assert_eq!(decoded, data);
        });
    }
}
