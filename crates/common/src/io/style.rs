#![allow(missing_docs)]
use yansi::Style;

pub const ERROR: Style = Style::new().red().bold();
pub const WARN: Style = Style::new().yellow().bold();
pub const LABEL: Style = Style::new().blue();
pub const SUCCESS: Style = Style::new().green();
