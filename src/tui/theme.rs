use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(12, 18, 24);
pub const SURFACE: Color = Color::Rgb(18, 28, 38);
pub const BORDER: Color = Color::Rgb(40, 62, 80);
pub const TEXT: Color = Color::Rgb(214, 228, 238);
pub const TEXT_DIM: Color = Color::Rgb(110, 134, 152);
pub const WATER: Color = Color::Rgb(86, 182, 214);
pub const DEEP: Color = Color::Rgb(52, 120, 190);
pub const GREEN: Color = Color::Rgb(92, 168, 120);
pub const AMBER: Color = Color::Rgb(214, 160, 72);
pub const RED: Color = Color::Rgb(196, 92, 80);
pub const EMPTY: Color = Color::Rgb(30, 44, 56);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn water() -> Style {
    Style::default().fg(WATER)
}

pub fn deep() -> Style {
    Style::default().fg(DEEP)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn empty() -> Style {
    Style::default().fg(EMPTY)
}
