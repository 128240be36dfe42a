use ratatui::style::Color;

/// Background colours for initials avatars
const PALETTE: [Color; 8] = [
    Color::Rgb(0xEF, 0x44, 0x44),
    Color::Rgb(0xF5, 0x9E, 0x0B),
    Color::Rgb(0x10, 0xB9, 0x81),
    Color::Rgb(0x3B, 0x82, 0xF6),
    Color::Rgb(0x63, 0x66, 0xF1),
    Color::Rgb(0x8B, 0x5C, 0xF6),
    Color::Rgb(0xEC, 0x48, 0x99),
    Color::Rgb(0x14, 0xB8, 0xA6),
];

/// Stable colour for a user's initials avatar; the same name always maps to
/// the same colour.
pub fn avatar_color(name: &str) -> Color {
    let hash = name
        .to_lowercase()
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_mul(31).wrapping_add(c as u32));
    PALETTE[hash as usize % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_and_case_insensitive() {
        assert_eq!(avatar_color("alice"), avatar_color("alice"));
        assert_eq!(avatar_color("Alice"), avatar_color("alice"));
        assert_eq!(avatar_color(""), PALETTE[0]);
    }

    #[test]
    fn spreads_across_palette() {
        let names = ["alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi"];
        let distinct: std::collections::HashSet<String> =
            names.iter().map(|n| format!("{:?}", avatar_color(n))).collect();
        assert!(distinct.len() > 1);
    }
}
