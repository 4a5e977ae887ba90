#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Span-indexed annotation layers over a source text.
//!
//! An [`AnnotationStore`] holds a document's text together with its
//! annotation layers: sentences, tokens, morphology, dependencies, semantic
//! predicates and arguments, and compound split trees. Every annotation is a
//! [`Span`] over the text; annotations refer to each other through typed
//! [`Id`]s. Writers (like `layered-conll`) consume a fully populated store.
//!
//! ## Example
//!
//! ```
//! use layered_annotation::{AnnotationStoreBuilder, Dependency, Token};
//!
//! let mut builder = AnnotationStoreBuilder::new();
//! let tokens = builder.push_sentence(&["I", "eat", "."]);
//! builder.add(Dependency::new(tokens[1], tokens[0], "SBJ"));
//! let store = builder.build().unwrap();
//!
//! let (_, sentence) = store.sentences().next().unwrap();
//! assert_eq!(store.select_covered::<Token>(sentence.span).count(), 3);
//! ```

mod compound;
mod display;
mod id;
mod layer;
mod span;
mod span_index;
mod store;

pub use compound::{
    Compound, CompoundError, CompoundPart, CompoundSplitLevel, LinkingMorpheme, Split,
};
pub use display::{DisplayLabel, DisplayLink, SentenceDisplay};
pub use id::Id;
pub use layer::{
    Annotation, Dependency, DependencyFlavor, Layer, LayerKind, Layers, MorphologicalFeatures,
    SemArg, SemArgLink, SemPred, Sentence, Token,
};
pub use span::Span;
pub use span_index::{index_covered, CoverIndex};
pub use store::{AnnotationStore, AnnotationStoreBuilder, StoreError};
