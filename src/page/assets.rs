use rust_embed::RustEmbed;

use crate::error::{Error, Result};

#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.css"]
#[include = "*.js"]
#[include = "themes/*.toml"]
struct PageAssets;

pub(crate) const STYLESHEET: &str = "page.css";
pub(crate) const SCRIPT: &str = "page.js";
pub(crate) const DEFAULT_THEME: &str = "themes/default.toml";

pub(crate) fn load(name: &'static str) -> Result<String> {
    let file = PageAssets::get(name).ok_or(Error::MissingAsset(name))?;
    String::from_utf8(file.data.into_owned()).map_err(|_| Error::InvalidAsset(name))
}
