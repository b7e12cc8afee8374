//! Word normalization
//!
//! Turns raw page text and query words into the tokens stored in the
//! inverted index: strip non-letters, lowercase, drop stop words, stem.

mod normalizer;
mod stopwords;

pub use normalizer::Normalizer;
