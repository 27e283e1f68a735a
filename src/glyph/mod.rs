// src/glyph/mod.rs
// Glyph mesh assembly entry point
// RELEVANT FILES:src/glyph/builder.rs,src/session.rs

mod builder;

pub use builder::GlyphBuilder;
