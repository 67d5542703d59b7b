use ratatui::prelude::Color;

/// Palette used to render one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub important: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub badge: Color,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            name: "light",
            background: Color::Rgb(245, 245, 245),
            surface: Color::White,
            text: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Blue,
            important: Color::Rgb(212, 160, 23),
            border: Color::Gray,
            selection_bg: Color::Rgb(252, 214, 112),
            selection_fg: Color::Black,
            badge: Color::Rgb(200, 60, 60),
        }
    }

    pub fn night() -> Self {
        Theme {
            name: "night",
            background: Color::Rgb(18, 18, 22),
            surface: Color::Rgb(22, 24, 30),
            text: Color::Gray,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            important: Color::Yellow,
            border: Color::DarkGray,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            badge: Color::LightRed,
        }
    }

    /// The silly screen ignores night mode and always uses this palette.
    pub fn silly() -> Self {
        Theme {
            name: "silly",
            background: Color::Rgb(255, 228, 240),
            surface: Color::Rgb(255, 250, 205),
            text: Color::Rgb(90, 0, 120),
            muted: Color::Magenta,
            accent: Color::LightMagenta,
            important: Color::Red,
            border: Color::LightGreen,
            selection_bg: Color::LightGreen,
            selection_fg: Color::Black,
            badge: Color::Rgb(255, 0, 0),
        }
    }
}
