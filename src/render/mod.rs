//! # Render Module
//!
//! Pure, synchronous rendering of listing panels. Nothing in here touches the
//! filesystem or spawns processes; every function returns a `String` meant to
//! be written straight to a terminal.
//!
//! ## Components
//!
//! | Layer | Module | Entry point |
//! |-------|--------|-------------|
//! | Measurement | [`measure`] | [`measure::visible_width`] |
//! | Column layout | [`columns`] | [`columns::layout_columns`] |
//! | Panels | [`panel`] | [`panel::render_panel`] |
//! | Listings | [`lists`] | [`lists::render_voices`], [`lists::render_personalities`], [`lists::render_list`] |
//! | Colors | [`theme`] | [`theme::Theme`] |
//!
//! ## Flow
//!
//! ```text
//! entities ──► lists (sort, mark current) ──► columns ──► panel ──► String
//!                                               │
//!                                               └── measure (padding)
//! ```

pub mod columns;
pub mod lists;
pub mod measure;
pub mod panel;
pub mod theme;

pub use columns::{layout_columns, DisplayItem, LayoutConfig};
pub use lists::{
    render_list, render_personalities, render_voices, sort_personalities, sort_voices,
    ListOptions, PersonalitiesOptions, PersonalityEntry, VoiceEntry, VoicesOptions,
};
pub use measure::visible_width;
pub use panel::{render_panel, BorderStyle, PanelConfig, TitleAlignment};
pub use theme::Theme;
