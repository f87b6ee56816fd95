/// ANSI color pair for plain-text output. Light mode renders uncolored so
/// output stays clean on light terminals and in pipes.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

pub fn palette_for_mode(dark_mode: bool) -> Palette {
    if dark_mode {
        Palette {
            accent: "\x1b[38;5;39m",
            muted: "\x1b[38;5;245m",
            reset: "\x1b[0m",
        }
    } else {
        Palette {
            accent: "",
            muted: "",
            reset: "",
        }
    }
}
