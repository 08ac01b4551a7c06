use colored::{Color, ColoredString, Colorize};

/// Console treatment of a channel: an optional foreground color plus text
/// attributes. Never applied to persisted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        bold: false,
        underline: false,
    };

    pub fn new(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::PLAIN
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn underline(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }

    /// Wraps `text` in the escape sequences of this style. The returned value
    /// resets the terminal state itself once displayed.
    pub fn apply(&self, text: &str) -> ColoredString {
        let mut styled = text.normal();
        if let Some(color) = self.color {
            styled = styled.color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        if self.underline {
            styled = styled.underline();
        }
        styled
    }
}

/// Forces colors on or off for the whole process, or restores detection.
pub fn set_color_override(enabled: Option<bool>) {
    match enabled {
        Some(enabled) => colored::control::set_override(enabled),
        None => colored::control::unset_override(),
    }
}
