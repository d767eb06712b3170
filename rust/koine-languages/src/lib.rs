//! # Koine language packs
//!
//! The representative language packs for the koine engine: English
//! (SVO, prepositions, spaces), Japanese (SOV, particles, optional
//! spacing), and Turkish (SOV, attached case suffixes). Each pack is a
//! module exporting its tokenizer, profile, pattern set, and a
//! `register` helper; [`full_registry`] builds a registry with all three.
//!
//! A pack is data plus one tokenizer impl — adding a language is a new
//! module and a `register` call, never an engine change.

use koine::registry::Registry;

pub mod en;
pub mod ja;
pub mod tr;

/// A registry with every shipped language pack registered.
pub fn full_registry() -> Registry {
    let mut registry = Registry::new();
    en::register(&mut registry);
    ja::register(&mut registry);
    tr::register(&mut registry);
    registry
}
