//! Phrase catalog and random selection.
//!
//! A [`PhraseSource`] is built once per session from a non-empty catalog and
//! hands out entries uniformly at random, with replacement. The catalog
//! content is flavor text: entries may repeat and may hold any UTF-8.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::CatalogError;

/// Origin label used in errors and logs for the compiled-in catalog.
pub const BUILTIN_ORIGIN: &str = "built-in";

/// Phrases shipped with the game.
pub const BUILTIN_PHRASES: &[&str] = &[
    // Everyday phrases
    "El perro corre rápido",
    "Hoy hace mucho calor en Cali",
    "Me gusta el chocolate con pan",
    "Estudiar en la noche es complicado",
    "La lluvia cae fuerte en septiembre",
    "El café colombiano es el mejor",
    "Las estrellas brillan en el cielo nocturno",
    "No estaba muerto andaba de parranda",
    "Me dio pereza levantarme de la cama",
    "Se armó la gorda en la fiesta",
    "Me salió más caro el caldo que los huevos",
    // Proverbs
    "Más vale tarde que nunca",
    "Camarón que se duerme se lo lleva la corriente",
    "El que madruga Dios lo ayuda",
    "A caballo regalado no se le mira el diente",
    "Al mal tiempo buena cara",
    "Ojos que no ven corazón que no siente",
    "Cría cuervos y te sacarán los ojos",
    // Pop culture
    "Que la fuerza te acompañe",
    "No me quiero ir señor Stark",
    "Hakuna Matata",
    "Hasta el infinito y más allá",
    "Winter is coming",
    "May the Force be with you",
    "I'll be back",
    "I am inevitable",
    "Wubba Lubba Dub Dub!",
    "Bazinga!",
    "All your base are belong to us",
    "Praise the Sun \\[T]/",
    "It's dangerous to go alone!",
    "Fus Ro Dah!",
    "¡Hadouken!",
    "Among Us sus",
    "Doge: wow, much code, very fast",
    "One does not simply walk into Mordor",
    "Shrek es amor, Shrek es vida.",
    // Tongue twisters and pangrams
    "Tres tristes tigres tragaban trigo en un trigal",
    "El veloz murciélago hindú comía feliz cardillo y kiwi",
    "La cigüeña tocaba el saxofón detrás del palenque de paja",
    "Quiere la boca exhausta vid, kiwi, piña y fugaz jamón",
    "Pablito clavó un clavito en la calva de un calvito",
    "Sphinx of black quartz, judge my vow",
    "The quick brown fox jumps over the lazy dog",
    // Long descriptive sentences
    "En una pequeña aldea todos se conocían y compartían historias",
    "La biblioteca estaba llena de libros antiguos y aroma a papel viejo",
    "El trayecto hacia la cumbre fue duro pero la vista valió la pena",
    "Caminó bajo la lluvia sin prisa, pensando en el futuro incierto",
];

/// Fixed phrase catalog with its own random number generator.
pub struct PhraseSource {
    phrases: Vec<String>,
    rng: StdRng,
}

impl PhraseSource {
    /// Loads the catalog at `catalog`, or the built-in one when `None`.
    ///
    /// With a `seed`, selections are reproducible; otherwise the generator
    /// is seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingFile`] or [`CatalogError::ParseError`]
    /// if the file cannot be used, and the errors of [`new`](Self::new) for
    /// its content.
    pub fn load(catalog: Option<&Path>, seed: Option<u64>) -> Result<Self, CatalogError> {
        match catalog {
            Some(path) => {
                let origin = path.display().to_string();
                debug!(catalog = %origin, "loading phrase catalog");
                Self::new(read_catalog(path)?, &origin, seed)
            }
            None => Self::new(builtin_phrases(), BUILTIN_ORIGIN, seed),
        }
    }

    /// Creates a source over `phrases`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] if `phrases` is empty and
    /// [`CatalogError::BlankEntry`] if any entry is empty or whitespace
    /// only, since no answer could ever match it.
    pub fn new(
        phrases: Vec<String>,
        origin: &str,
        seed: Option<u64>,
    ) -> Result<Self, CatalogError> {
        if phrases.is_empty() {
            return Err(CatalogError::Empty {
                origin: origin.to_string(),
            });
        }
        if let Some(index) = phrases.iter().position(|p| p.trim().is_empty()) {
            return Err(CatalogError::BlankEntry {
                origin: origin.to_string(),
                index,
            });
        }

        for (index, phrase) in phrases.iter().enumerate() {
            if phrase.trim() != phrase {
                warn!(
                    origin,
                    index,
                    phrase = %phrase,
                    "phrase has surrounding whitespace and can never be matched"
                );
            }
        }

        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        debug!(origin, count = phrases.len(), seeded = seed.is_some(), "phrase catalog ready");
        Ok(Self { phrases, rng })
    }

    /// Returns one phrase chosen uniformly at random.
    ///
    /// Consecutive calls are independent and may repeat.
    pub fn random_phrase(&mut self) -> &str {
        let index = self.rng.random_range(0..self.phrases.len());
        &self.phrases[index]
    }

    /// Every phrase in catalog order.
    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Number of phrases in the catalog. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Always `false`; empty catalogs are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl std::fmt::Debug for PhraseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhraseSource")
            .field("len", &self.phrases.len())
            .finish_non_exhaustive()
    }
}

/// The compiled-in catalog as owned strings.
#[must_use]
fn builtin_phrases() -> Vec<String> {
    BUILTIN_PHRASES.iter().map(|&s| s.to_string()).collect()
}

/// Parses a catalog document without building a source.
///
/// # Errors
///
/// Returns [`CatalogError::ParseError`] on malformed input.
fn parse_catalog(yaml: &str, origin: &str) -> Result<Vec<String>, CatalogError> {
    // An empty document deserializes as unit, not as an empty list.
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(yaml).map_err(|e| CatalogError::ParseError {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

/// Reads and parses a catalog file.
///
/// # Errors
///
/// Returns [`CatalogError::MissingFile`] if the file does not exist and
/// [`CatalogError::ParseError`] if it cannot be read or parsed.
fn read_catalog(path: &Path) -> Result<Vec<String>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let origin = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::ParseError {
        origin: origin.clone(),
        message: e.to_string(),
    })?;
    parse_catalog(&raw, &origin)
}
