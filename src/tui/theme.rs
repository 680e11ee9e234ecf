use ratatui::style::Color;

// Accent colors
pub const ACCENT_MINT: Color = Color::Rgb(161, 193, 129);       // #A1C181
pub const ACCENT_BLUE: Color = Color::Rgb(124, 175, 194);       // #7CAFC2
pub const ACCENT_GOLD: Color = Color::Rgb(219, 171, 121);       // #DBAB79

// UI colors
pub const TEXT_DIM: Color = Color::Rgb(136, 136, 136);          // #888888
pub const TEXT_WHITE: Color = Color::Rgb(255, 255, 255);        // #FFFFFF
pub const CENTER_BAND: Color = Color::Rgb(40, 44, 52);          // #282C34

/// Gray level for an item with the given focus alpha.
pub fn faded(alpha: f32) -> Color {
    let level = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(level, level, level)
}
