//! Display formatting shared by frontends.

/// Shortens a wallet address to `0x1234...abcd`.
///
/// Addresses of ten characters or fewer are returned unchanged.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// One-based room label for a zero-based room index.
pub fn room_label(room: u32) -> String {
    format!("Room {}", room.saturating_add(1))
}

/// Loading label shown while leaving `room` for the next one.
pub fn entering_label(room: u32) -> String {
    format!("Entering Room {}", room.saturating_add(2))
}

/// Text health bar of `width` cells, e.g. `[#######...]`.
pub fn health_bar(ratio: f32, width: usize) -> String {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let filled = (ratio * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_addresses_are_shortened() {
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef"),
            "0x1234...cdef"
        );
        assert_eq!(short_address("0x1234"), "0x1234");
    }

    #[test]
    fn labels_are_one_based() {
        assert_eq!(room_label(0), "Room 1");
        assert_eq!(entering_label(0), "Entering Room 2");
    }

    #[test]
    fn health_bar_rounds_and_clamps() {
        assert_eq!(health_bar(0.5, 10), "[#####.....]");
        assert_eq!(health_bar(1.5, 4), "[####]");
        assert_eq!(health_bar(f32::NAN, 2), "[..]");
    }
}
