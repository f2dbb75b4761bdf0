// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark themes: categorical palettes and text colors used as component defaults.

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub text: &'static str,
    pub categorical: &'static [&'static str],
}

const DARK_CATEGORICAL: &[&str] = &[
    "#40a0ff",
    "#28c878",
    "#dc5050",
    "#ffe646",
    "#609cff",
    "#b48cff",
];

const LIGHT_CATEGORICAL: &[&str] = &[
    "#1e78f0",
    "#1a9e5c",
    "#c83c3c",
    "#e0a800",
    "#3c64c8",
    "#7850c8",
];

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            text: "#ebebf5",
            categorical: DARK_CATEGORICAL,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            text: "#14141e",
            categorical: LIGHT_CATEGORICAL,
        }
    }

    /// Owned copy of the categorical palette.
    pub fn palette(&self) -> Vec<String> {
        self.categorical.iter().map(|c| c.to_string()).collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_by_theme() {
        assert_eq!(Theme::default(), Theme::light());
        assert_ne!(Theme::dark().palette(), Theme::light().palette());
        assert_eq!(Theme::dark().palette().len(), 6);
    }
}
