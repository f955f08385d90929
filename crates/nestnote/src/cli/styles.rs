//! Styles for the nestnote CLI.
//!
//! Rendering code refers to styles by what they mark (a title, a time, a
//! block marker), never by color. The palette lives here only, so changing the
//! look never touches `render.rs`.
//!
//! `console` drops the escape codes by itself when stdout is not a terminal or
//! when `NO_COLOR` is set, so piped output stays plain.

use console::Style;
use once_cell::sync::Lazy;

pub struct Styles {
    pub title: Style,
    pub muted: Style,
    pub faint: Style,
    pub time: Style,
    pub index: Style,
    pub marker: Style,
    pub link: Style,
    pub selected: Style,
    pub checked: Style,
    pub placeholder: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
}

pub static STYLES: Lazy<Styles> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    Styles {
        title: Style::new().bold(),
        faint: Style::new().color256(240),
        time: muted.clone().italic(),
        index: Style::new().color256(178),
        marker: Style::new().cyan(),
        link: Style::new().blue().underlined(),
        selected: Style::new().yellow().bold(),
        checked: muted.clone().strikethrough(),
        placeholder: Style::new().color256(240).italic(),
        info: muted.clone(),
        success: Style::new().green(),
        warning: Style::new().yellow().bold(),
        error: Style::new().red().bold(),
        muted,
    }
});
