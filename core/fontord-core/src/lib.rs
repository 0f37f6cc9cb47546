//! fontord-core: the quiet usher of font families
//!
//! Every font family arrives at the party as a jumble of PostScript-ish
//! names: `Helvetica-Bold`, `Helvetica-LightOblique`, `Helvetica`. This
//! library gives each of them a proper name badge ("Bold", "LightOblique",
//! "Regular") and then lines them up the way a typographer would expect to
//! see them in a font menu: light to heavy, upright before italic.
//!
//! ## Two Small Talents
//!
//! **Naming**: [`style::style_name`] reads the style out of a raw font name.
//!
//! **Ordering**: [`order::is_ordered_before`] decides which of two raw names
//! comes first. It is a strict weak ordering, so it plugs straight into a
//! sort; [`order::sort_font_names`] does exactly that.
//!
//! Everything else (grouping names into families, the synthesized system
//! families, filters, JSON output) is built on top of those two.
//!
//! ## A Sample Conversation
//!
//! ```rust
//! use fontord_core::order::sort_font_names;
//! use fontord_core::style::style_name;
//!
//! let mut names = vec!["Avenir-Heavy", "Avenir-Book", "Avenir-BookOblique", "Avenir-Light"];
//! sort_font_names(&mut names);
//!
//! let labels: Vec<String> = names.iter().map(|n| style_name(n)).collect();
//! assert_eq!(labels, ["Light", "Book", "BookOblique", "Heavy"]);
//! ```
//!
//! ## Where the Names Come From
//!
//! Nothing here opens a font file. Names are handed over by a
//! [`family::FontNameSource`]: an in-memory table, or a directory walk that
//! trusts file stems. Plug in your own platform enumeration if you have one.
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod family;
pub mod order;
pub mod output;
pub mod query;
pub mod style;
pub mod system;
pub mod weights;
