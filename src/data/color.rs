use std::fmt::Display;

/// Plain RGB color. Rendering is left to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colors handed out to reasons by their position. The last one is reserved for "Other".
pub const PALETTE: [Color; 8] = [
    Color::rgb(0x00, 0x7A, 0xFF), // blue
    Color::rgb(0xFF, 0x95, 0x00), // orange
    Color::rgb(0x34, 0xC7, 0x59), // green
    Color::rgb(0xAF, 0x52, 0xDE), // purple
    Color::rgb(0xFF, 0x2D, 0x55), // pink
    Color::rgb(0x5A, 0xC8, 0xFA), // teal
    Color::rgb(0xFF, 0xCC, 0x00), // yellow
    Color::rgb(0x8E, 0x8E, 0x93), // gray
];

/// Color of a custom reason at `position` in the editable list.
pub fn color_at(position: usize) -> Color {
    PALETTE[position % PALETTE.len()]
}

/// Color of the "Other" reason, and of anything the registry no longer knows about.
pub fn other_color() -> Color {
    PALETTE[PALETTE.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::{color_at, other_color, Color, PALETTE};

    #[test]
    fn test_color_wraps_around_palette() {
        assert_eq!(color_at(0), PALETTE[0]);
        assert_eq!(color_at(PALETTE.len() + 2), PALETTE[2]);
        assert_eq!(other_color(), PALETTE[7]);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0, 122, 255).to_string(), "#007AFF");
    }
}
