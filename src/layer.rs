//! Annotation layers and the annotation types they hold.
//!
//! Every layer is a flat list of span-carrying annotations. Cross references
//! between layers (a dependency's governor, an argument link's target) are
//! [`Id`]s into the referenced layer rather than owning pointers.

use crate::compound::Compound;
use crate::{Id, Span};
use std::fmt::Debug;

/// The closed set of layers the store carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Sentence,
    Token,
    MorphologicalFeatures,
    Dependency,
    SemArg,
    SemPred,
    Compound,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LayerKind::Sentence => "Sentence",
            LayerKind::Token => "Token",
            LayerKind::MorphologicalFeatures => "MorphologicalFeatures",
            LayerKind::Dependency => "Dependency",
            LayerKind::SemArg => "SemArg",
            LayerKind::SemPred => "SemPred",
            LayerKind::Compound => "Compound",
        };
        f.write_str(name)
    }
}

/// A span-carrying annotation stored in one of the store's layers.
///
/// Implemented for every type in [`LayerKind`]; selection queries on the
/// store are generic over this trait.
pub trait Annotation: Debug + Sized + 'static {
    const KIND: LayerKind;

    fn span(&self) -> Span;

    #[doc(hidden)]
    fn layer(layers: &Layers) -> &Layer<Self>;

    #[doc(hidden)]
    fn layer_mut(layers: &mut Layers) -> &mut Layer<Self>;
}

/// One layer: annotations in insertion order plus a begin-sorted view.
pub struct Layer<T> {
    items: Vec<T>,
    order: Vec<Id<T>>,
}

impl<T> Default for Layer<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Annotation> Debug for Layer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("kind", &T::KIND)
            .field("len", &self.items.len())
            .finish()
    }
}

impl<T: Annotation> Layer<T> {
    pub(crate) fn push(&mut self, item: T) -> Id<T> {
        let id = Id::new(self.items.len());
        self.items.push(item);
        id
    }

    pub(crate) fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        self.items.get_mut(id.index())
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    /// Sort the document-order view. Ties in begin keep insertion order.
    pub(crate) fn seal(&mut self) {
        let items = &self.items;
        let mut order: Vec<Id<T>> = (0..items.len()).map(Id::new).collect();
        order.sort_by_key(|id| items[id.index()].span().begin);
        self.order = order;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.items.get(id.index())
    }

    /// Ids in document order.
    pub fn order(&self) -> &[Id<T>] {
        &self.order
    }

    /// All annotations in document order.
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        self.order.iter().map(move |&id| (id, &self.items[id.index()]))
    }

    /// Position in [`order`](Self::order) of the first annotation whose begin
    /// is not before `begin`.
    pub(crate) fn lower_bound(&self, begin: usize) -> usize {
        self.order
            .partition_point(|id| self.items[id.index()].span().begin < begin)
    }

    /// Annotations contained in `outer`, in document order.
    pub fn covered(&self, outer: Span) -> impl Iterator<Item = (Id<T>, &T)> + '_ {
        let start = self.lower_bound(outer.begin);
        self.order[start..]
            .iter()
            .map(move |&id| (id, &self.items[id.index()]))
            .take_while(move |(_, item)| item.span().begin <= outer.end)
            .filter(move |(_, item)| item.span().end <= outer.end)
    }
}

impl<T: Annotation> std::ops::Index<Id<T>> for Layer<T> {
    type Output = T;

    fn index(&self, id: Id<T>) -> &T {
        &self.items[id.index()]
    }
}

/// Storage for every layer of a document.
#[derive(Debug, Default)]
pub struct Layers {
    sentences: Layer<Sentence>,
    tokens: Layer<Token>,
    morphology: Layer<MorphologicalFeatures>,
    dependencies: Layer<Dependency>,
    sem_args: Layer<SemArg>,
    sem_preds: Layer<SemPred>,
    compounds: Layer<Compound>,
}

impl Layers {
    pub(crate) fn seal(&mut self) {
        self.sentences.seal();
        self.tokens.seal();
        self.morphology.seal();
        self.dependencies.seal();
        self.sem_args.seal();
        self.sem_preds.seal();
        self.compounds.seal();
    }
}

macro_rules! impl_annotation {
    ($ty:ident, $field:ident) => {
        impl Annotation for $ty {
            const KIND: LayerKind = LayerKind::$ty;

            fn span(&self) -> Span {
                self.span
            }

            fn layer(layers: &Layers) -> &Layer<Self> {
                &layers.$field
            }

            fn layer_mut(layers: &mut Layers) -> &mut Layer<Self> {
                &mut layers.$field
            }
        }
    };
}

impl_annotation!(Sentence, sentences);
impl_annotation!(Token, tokens);
impl_annotation!(MorphologicalFeatures, morphology);
impl_annotation!(Dependency, dependencies);
impl_annotation!(SemArg, sem_args);
impl_annotation!(SemPred, sem_preds);
impl_annotation!(Compound, compounds);

/// A sentence. Its tokens are the tokens whose spans it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub span: Span,
}

impl Sentence {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

/// An atomic lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Span,
    pub lemma: Option<String>,
    pub pos: Option<String>,
    pub morph: Option<Id<MorphologicalFeatures>>,
}

impl Token {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            lemma: None,
            pos: None,
            morph: None,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = Some(pos.into());
        self
    }

    pub fn with_morph(mut self, morph: Id<MorphologicalFeatures>) -> Self {
        self.morph = Some(morph);
        self
    }
}

/// A morphological feature bundle, e.g. `Case=Nom|Number=Sing`, or `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphologicalFeatures {
    pub span: Span,
    pub value: String,
}

impl MorphologicalFeatures {
    pub fn new(span: Span, value: impl Into<String>) -> Self {
        Self {
            span,
            value: value.into(),
        }
    }
}

/// Which graph a dependency edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyFlavor {
    /// Tree-forming dependencies, one governor per dependent
    Basic,
    /// Enhanced/collapsed dependencies, may add extra governors
    Enhanced,
}

/// A directed, labelled edge from a governor token to a dependent token.
///
/// The dependency is anchored on the span of its dependent, which the
/// builder fills in when the store is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub governor: Id<Token>,
    pub dependent: Id<Token>,
    pub dependency_type: String,
    /// `None` is treated as [`DependencyFlavor::Basic`]
    pub flavor: Option<DependencyFlavor>,
    pub(crate) span: Span,
}

impl Dependency {
    pub fn new(
        governor: Id<Token>,
        dependent: Id<Token>,
        dependency_type: impl Into<String>,
    ) -> Self {
        Self {
            governor,
            dependent,
            dependency_type: dependency_type.into(),
            flavor: None,
            span: Span::default(),
        }
    }

    pub fn with_flavor(mut self, flavor: DependencyFlavor) -> Self {
        self.flavor = Some(flavor);
        self
    }

    /// `true` for dependencies of unset or basic flavor.
    pub fn is_basic(&self) -> bool {
        matches!(self.flavor, None | Some(DependencyFlavor::Basic))
    }
}

/// The surface realization of a semantic argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemArg {
    pub span: Span,
}

impl SemArg {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

/// A role-labelled link from a predicate to one of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemArgLink {
    pub role: String,
    pub target: Id<SemArg>,
}

impl SemArgLink {
    pub fn new(role: impl Into<String>, target: Id<SemArg>) -> Self {
        Self {
            role: role.into(),
            target,
        }
    }
}

/// A semantic predicate with its sense identifier and ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemPred {
    pub span: Span,
    /// Sense identifier, e.g. `eat.01`
    pub category: String,
    pub arguments: Vec<SemArgLink>,
}

impl SemPred {
    pub fn new(span: Span, category: impl Into<String>) -> Self {
        Self {
            span,
            category: category.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, role: impl Into<String>, target: Id<SemArg>) -> Self {
        self.arguments.push(SemArgLink::new(role, target));
        self
    }
}
