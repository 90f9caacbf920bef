//! Styles for the tagkit CLI.
//!
//! Code refers to semantic names (a tag, a group header, a count) rather than to
//! colors, so the look can change in one place. `console` drops the escape codes
//! by itself when stdout is not a terminal, which keeps piped output and tests
//! plain.
//!
//! All styles are built once through `once_cell::sync::Lazy`.

use console::Style;
use once_cell::sync::Lazy;

pub struct Theme {
    pub title: Style,
    pub muted: Style,
    pub faint: Style,
    pub index: Style,
    pub tag: Style,
    pub group: Style,
    pub count: Style,
    pub success: Style,
    pub warning: Style,
}

pub static THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    Theme {
        title: Style::new().bold(),
        faint: Style::new().color256(240),
        index: Style::new().yellow(),
        tag: Style::new().cyan(),
        group: Style::new().magenta().bold(),
        count: muted.clone().italic(),
        success: Style::new().green(),
        warning: Style::new().yellow().bold(),
        muted,
    }
});
