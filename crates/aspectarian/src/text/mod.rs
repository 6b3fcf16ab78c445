pub mod corpus;
pub mod resolver;
pub mod slug;

pub use corpus::{pair_key, sorted_pair_key, TextCorpus, TextDictionary};
pub use resolver::TextResolver;
pub use slug::{body_slug, fold_diacritics, sign_slug, slugify};
