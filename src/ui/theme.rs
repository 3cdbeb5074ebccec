use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub number: Color,
    pub register: Color,
    pub border: Color,
    pub current_line_bg: Color,
    pub involved: Color, // Highlight for registers touched by the next instruction
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),  // Blue for mnemonics
    number: Color::Rgb(250, 179, 135),   // Orange for literals
    register: Color::Rgb(148, 226, 213), // Cyan/teal for register names
    border: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70), // Slightly lighter BG for current line
    involved: Color::Rgb(249, 226, 175),     // Yellow
};
