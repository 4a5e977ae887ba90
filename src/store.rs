//! The read-only annotation store and its builder.

use crate::layer::{Annotation, Layer, LayerKind, Layers};
use crate::span_index::{index_covered, CoverIndex};
use crate::{Dependency, Id, MorphologicalFeatures, SemArg, SemPred, Sentence, Span, Token};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Errors raised while sealing an [`AnnotationStoreBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A span is reversed, runs past the text or splits a character.
    #[error("{kind} #{index} has invalid span [{begin}, {end}) over a text of {text_len} bytes")]
    InvalidSpan {
        kind: LayerKind,
        index: usize,
        begin: usize,
        end: usize,
        text_len: usize,
    },

    /// An annotation refers to an id that does not exist in the target layer.
    #[error("{kind} #{index} refers to missing {target} #{target_index}")]
    DanglingReference {
        kind: LayerKind,
        index: usize,
        target: LayerKind,
        target_index: usize,
    },
}

/// A source text with its annotation layers.
///
/// The store is immutable once built. Every layer is kept in document order
/// (ascending begin offset, ties in insertion order) and all selections
/// yield annotations in that order.
#[derive(Debug)]
pub struct AnnotationStore {
    text: String,
    document_id: Option<String>,
    layers: Layers,
}

impl AnnotationStore {
    /// Start building a store over `text`.
    pub fn builder(text: impl Into<String>) -> AnnotationStoreBuilder {
        AnnotationStoreBuilder::with_text(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Identifier used to name per-document output, if one was set.
    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    /// The text under `span`, or `""` if the span does not address the text.
    pub fn covered_text(&self, span: Span) -> &str {
        self.text.get(span.range()).unwrap_or("")
    }

    /// The whole layer for `T`.
    pub fn layer<T: Annotation>(&self) -> &Layer<T> {
        T::layer(&self.layers)
    }

    pub fn get<T: Annotation>(&self, id: Id<T>) -> Option<&T> {
        self.layer::<T>().get(id)
    }

    /// Every annotation of layer `T` in document order.
    pub fn select<T: Annotation>(&self) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        self.layer::<T>().iter()
    }

    /// Annotations of layer `T` contained in `span`, in document order.
    pub fn select_covered<T: Annotation>(
        &self,
        span: Span,
    ) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        self.layer::<T>().covered(span)
    }

    pub fn sentences(&self) -> impl Iterator<Item = (Id<Sentence>, &Sentence)> + '_ {
        self.select::<Sentence>()
    }

    /// Map each `O` annotation to the `I` annotations its span contains.
    pub fn index_covered<O: Annotation, I: Annotation>(&self) -> CoverIndex<O, I> {
        index_covered(self.layer::<O>(), self.layer::<I>())
    }
}

impl<T: Annotation> std::ops::Index<Id<T>> for AnnotationStore {
    type Output = T;

    fn index(&self, id: Id<T>) -> &T {
        &self.layer::<T>()[id]
    }
}

/// Accumulates text and annotations, then validates them into an
/// [`AnnotationStore`].
///
/// Text can be given up front or appended piecewise with the `push_*`
/// helpers, which return the span of what they appended.
#[derive(Debug, Default)]
pub struct AnnotationStoreBuilder {
    text: String,
    document_id: Option<String>,
    layers: Layers,
}

impl AnnotationStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current end of the text.
    pub fn position(&self) -> usize {
        self.text.len()
    }

    /// Append `text` and return its span.
    pub fn push_text(&mut self, text: &str) -> Span {
        let begin = self.text.len();
        self.text.push_str(text);
        Span::new(begin, self.text.len())
    }

    /// Append `form` and annotate it as a token.
    pub fn push_token(&mut self, form: &str) -> Id<Token> {
        let span = self.push_text(form);
        self.add(Token::new(span))
    }

    /// Append the forms as space-separated tokens and cover them with a sentence.
    ///
    /// A separating space is inserted first if the text doesn't already end in
    /// whitespace.
    pub fn push_sentence(&mut self, forms: &[&str]) -> Vec<Id<Token>> {
        self.separate();
        let begin = self.position();
        let mut tokens = Vec::with_capacity(forms.len());
        for (i, form) in forms.iter().enumerate() {
            if i > 0 {
                self.push_text(" ");
            }
            tokens.push(self.push_token(form));
        }
        self.add(Sentence::new(Span::new(begin, self.position())));
        tokens
    }

    /// Append `sentence`, split into tokens on Unicode word boundaries, and
    /// cover it with a sentence. Whitespace segments are not tokens.
    pub fn push_sentence_text(&mut self, sentence: &str) -> Vec<Id<Token>> {
        self.separate();
        let span = self.push_text(sentence);
        let tokens = sentence
            .split_word_bound_indices()
            .filter(|(_, segment)| !segment.trim().is_empty())
            .map(|(offset, segment)| {
                let begin = span.begin + offset;
                Token::new(Span::new(begin, begin + segment.len()))
            })
            .collect::<Vec<_>>();
        let ids = tokens.into_iter().map(|token| self.add(token)).collect();
        self.add(Sentence::new(span));
        ids
    }

    fn separate(&mut self) {
        if self.text.chars().next_back().map_or(false, |c| !c.is_whitespace()) {
            self.push_text(" ");
        }
    }

    /// Add an annotation to its layer.
    pub fn add<T: Annotation>(&mut self, annotation: T) -> Id<T> {
        T::layer_mut(&mut self.layers).push(annotation)
    }

    pub fn get_mut<T: Annotation>(&mut self, id: Id<T>) -> Option<&mut T> {
        T::layer_mut(&mut self.layers).get_mut(id)
    }

    /// Validate spans and references and seal the layers into document order.
    pub fn build(mut self) -> Result<AnnotationStore, StoreError> {
        check_spans::<Sentence>(&self.text, &self.layers)?;
        check_spans::<Token>(&self.text, &self.layers)?;
        check_spans::<MorphologicalFeatures>(&self.text, &self.layers)?;
        check_spans::<SemArg>(&self.text, &self.layers)?;
        check_spans::<SemPred>(&self.text, &self.layers)?;
        check_spans::<crate::Compound>(&self.text, &self.layers)?;
        self.check_references()?;
        self.anchor_dependencies();
        self.layers.seal();

        tracing::trace!(
            text_len = self.text.len(),
            sentences = Sentence::layer(&self.layers).len(),
            tokens = Token::layer(&self.layers).len(),
            "sealed annotation store"
        );

        Ok(AnnotationStore {
            text: self.text,
            document_id: self.document_id,
            layers: self.layers,
        })
    }

    fn check_references(&self) -> Result<(), StoreError> {
        let morphology = MorphologicalFeatures::layer(&self.layers).len();
        let tokens = Token::layer(&self.layers).len();
        let sem_args = SemArg::layer(&self.layers).len();

        for (index, token) in Token::layer(&self.layers).items().iter().enumerate() {
            if let Some(morph) = token.morph {
                check_reference(LayerKind::Token, index, morph, morphology)?;
            }
        }
        for (index, dependency) in Dependency::layer(&self.layers).items().iter().enumerate() {
            check_reference(LayerKind::Dependency, index, dependency.governor, tokens)?;
            check_reference(LayerKind::Dependency, index, dependency.dependent, tokens)?;
        }
        for (index, pred) in SemPred::layer(&self.layers).items().iter().enumerate() {
            for link in &pred.arguments {
                check_reference(LayerKind::SemPred, index, link.target, sem_args)?;
            }
        }
        Ok(())
    }

    /// Dependencies take the span of their dependent.
    fn anchor_dependencies(&mut self) {
        let spans: Vec<Span> = Token::layer(&self.layers)
            .items()
            .iter()
            .map(|token| token.span)
            .collect();
        let dependencies = Dependency::layer_mut(&mut self.layers);
        for index in 0..dependencies.len() {
            if let Some(dependency) = dependencies.get_mut(Id::new(index)) {
                dependency.span = spans[dependency.dependent.index()];
            }
        }
    }
}

fn check_spans<T: Annotation>(text: &str, layers: &Layers) -> Result<(), StoreError> {
    for (index, annotation) in T::layer(layers).items().iter().enumerate() {
        let span = annotation.span();
        let valid = span.begin <= span.end
            && span.end <= text.len()
            && text.is_char_boundary(span.begin)
            && text.is_char_boundary(span.end);
        if !valid {
            return Err(StoreError::InvalidSpan {
                kind: T::KIND,
                index,
                begin: span.begin,
                end: span.end,
                text_len: text.len(),
            });
        }
    }
    Ok(())
}

fn check_reference<T: Annotation>(
    kind: LayerKind,
    index: usize,
    target: Id<T>,
    target_len: usize,
) -> Result<(), StoreError> {
    if target.index() < target_len {
        Ok(())
    } else {
        Err(StoreError::DanglingReference {
            kind,
            index,
            target: T::KIND,
            target_index: target.index(),
        })
    }
}
