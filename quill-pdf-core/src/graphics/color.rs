/// A device color with 0-255 components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Gray(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn gray(level: u8) -> Self {
        Color::Gray(level)
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    pub fn black() -> Self {
        Color::Gray(0)
    }

    pub fn white() -> Self {
        Color::Gray(255)
    }

    /// Stroking operator, e.g. `0.000 G` or `1.000 0.000 0.000 RG`
    pub fn stroke_operator(&self) -> String {
        self.operator("G", "RG")
    }

    /// Non-stroking operator, e.g. `0.000 g` or `1.000 0.000 0.000 rg`
    pub fn fill_operator(&self) -> String {
        self.operator("g", "rg")
    }

    fn operator(&self, gray_op: &str, rgb_op: &str) -> String {
        match *self {
            // Pure black is always written as gray
            Color::Gray(level) | Color::Rgb(level @ 0, 0, 0) => {
                format!("{:.3} {gray_op}", level as f64 / 255.0)
            }
            Color::Rgb(r, g, b) => format!(
                "{:.3} {:.3} {:.3} {rgb_op}",
                r as f64 / 255.0,
                g as f64 / 255.0,
                b as f64 / 255.0
            ),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

impl From<u8> for Color {
    fn from(level: u8) -> Self {
        Color::Gray(level)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}
