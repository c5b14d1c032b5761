use dashboard_core::Theme;
use ratatui::style::Color;

pub const APP_TITLE: &str = "ObsidiaShell";
pub const NAV_WIDTH: u16 = 26;
pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 8;
pub const TOAST_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
}

const LIGHT: Palette = Palette {
    background: Color::White,
    text: Color::Black,
    muted: Color::DarkGray,
    accent: Color::Blue,
    success: Color::Green,
    error: Color::Red,
    warning: Color::Yellow,
};

const DARK: Palette = Palette {
    background: Color::Black,
    text: Color::Gray,
    muted: Color::DarkGray,
    accent: Color::Cyan,
    success: Color::LightGreen,
    error: Color::LightRed,
    warning: Color::LightYellow,
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}
