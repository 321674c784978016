use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(229, 57, 53);
pub const TEXT_PRIMARY: Color = Color::Rgb(235, 235, 235);
pub const TEXT_SECONDARY: Color = Color::Rgb(160, 160, 160);
pub const TEXT_DIM: Color = Color::Rgb(100, 100, 100);
pub const HIGHLIGHT_BG: Color = Color::Rgb(45, 45, 48);
pub const BORDER: Color = Color::Rgb(70, 70, 75);
pub const GOLD: Color = Color::Rgb(255, 193, 7);
pub const PROGRESS: Color = Color::Rgb(76, 175, 80);
