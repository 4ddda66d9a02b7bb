use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 130, g: 230, b: 150 };
pub const IPV4_PREFIX: Color = Color::Green;
pub const IPV6_ADDR: Color = Color::TrueColor { r: 190, g: 150, b: 255 };
pub const IPV6_PREFIX: Color = Color::Magenta;
pub const MAC_ADDR: Color = Color::TrueColor { r: 255, g: 150, b: 200 };
pub const GOOD: Color = Color::Green;
pub const BAD: Color = Color::Red;
pub const MUTED: Color = Color::BrightBlack;
