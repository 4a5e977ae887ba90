#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! CoNLL-2009 output for [`layered_annotation`] stores.
//!
//! [`Conll2009Writer`] serializes the sentences of an
//! [`AnnotationStore`](layered_annotation::AnnotationStore) as tab-separated
//! token lines. Tokens, lemmas, parts of speech, morphology, basic
//! dependencies and semantic predicate/argument structure are projected onto
//! one row per token; which columns are filled is controlled by
//! [`Conll2009Config`].

mod config;
mod emit;
mod errors;
mod row;
mod writer;

pub use config::Conll2009Config;
pub use emit::{RowEmitter, RowFields, UNUSED};
pub use errors::{ConllError, ConllResult};
pub use row::{AttachedDependency, Row, SentenceTable};
pub use writer::Conll2009Writer;
