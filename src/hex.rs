/// Hex encode and decode helpers for digest values.

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex += &format!("{byte:02x}");
    }
    hex
}

pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err(format!("odd hex string length {}", hex.len()));
    }
    let chars: Vec<char> = hex.chars().collect();
    chars.chunks(2).map(hex_pair_to_byte).collect()
}

fn hex_pair_to_byte(pair: &[char]) -> Result<u8, String> {
    u8::from_str_radix(&pair.iter().collect::<String>(), 16).map_err(|e| format!("{e}"))
}
