//! Light/dark theme palette
//!
//! A theme is a list of CSS custom properties, each with a light and a dark
//! value. The page stylesheet only refers to `var(--name)`, so palettes can be
//! swapped without touching markup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::assets;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariable {
    /// Property name without the leading `--`
    pub name: String,
    pub light: String,
    pub dark: String,
}

impl ThemeVariable {
    pub fn new(name: &str, light: &str, dark: &str) -> Self {
        Self {
            name: name.to_string(),
            light: light.to_string(),
            dark: dark.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default, rename = "variable")]
    variables: Vec<ThemeVariable>,
}

impl Theme {
    pub fn new(variables: Vec<ThemeVariable>) -> Result<Self> {
        let theme = Self { variables };
        theme.validate()?;
        Ok(theme)
    }

    /// The palette compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml(&assets::load(assets::DEFAULT_THEME)?)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let theme: Theme = toml::from_str(text)?;
        theme.validate()?;
        Ok(theme)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ThemeRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn variables(&self) -> &[ThemeVariable] {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<&ThemeVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Overlay `other` on this theme: same-named variables are replaced in
    /// place, new ones are appended.
    pub fn merge(mut self, other: Theme) -> Self {
        for variable in other.variables {
            match self.variables.iter_mut().find(|v| v.name == variable.name) {
                Some(existing) => *existing = variable,
                None => self.variables.push(variable),
            }
        }
        self
    }

    /// `:root` and `body.dark-mode` rule blocks
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for v in &self.variables {
            css.push_str(&format!("    --{}: {};\n", v.name, v.light));
        }
        css.push_str("}\nbody.dark-mode {\n");
        for v in &self.variables {
            css.push_str(&format!("    --{}: {};\n", v.name, v.dark));
        }
        css.push_str("}\n");
        css
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for v in &self.variables {
            let invalid = |reason| Error::Theme {
                name: v.name.clone(),
                reason,
            };
            if v.name.is_empty() {
                return Err(invalid("name is empty"));
            }
            if !v.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(invalid("name may only contain ASCII letters, digits and '-'"));
            }
            if !seen.insert(v.name.as_str()) {
                return Err(invalid("name is defined twice"));
            }
            for value in [&v.light, &v.dark] {
                if value.trim().is_empty() {
                    return Err(invalid("value is empty"));
                }
                if value.contains([';', '{', '}', '<', '>']) {
                    return Err(invalid("value contains one of ; { } < >"));
                }
            }
        }
        Ok(())
    }
}
