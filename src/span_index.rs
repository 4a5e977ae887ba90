//! Containment index between two layers.

use crate::layer::{Annotation, Layer};
use crate::Id;

/// For every annotation of the outer layer `O`, the annotations of the inner
/// layer `I` whose spans it contains.
///
/// Built once per document by [`index_covered`]; lookups are O(1).
pub struct CoverIndex<O, I> {
    covered: Vec<Vec<Id<I>>>,
    marker: std::marker::PhantomData<fn() -> O>,
}

impl<O: Annotation, I: Annotation> CoverIndex<O, I> {
    /// Inner annotations contained in `outer`, in document order.
    ///
    /// Returns an empty slice for ids that don't belong to the indexed layer.
    pub fn get(&self, outer: Id<O>) -> &[Id<I>] {
        self.covered
            .get(outer.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of outer annotations indexed.
    pub fn len(&self) -> usize {
        self.covered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }
}

impl<O: Annotation, I: Annotation> std::fmt::Debug for CoverIndex<O, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverIndex")
            .field("outer", &O::KIND)
            .field("inner", &I::KIND)
            .field("covered", &self.covered)
            .finish()
    }
}

/// Index which `inner` annotations each `outer` annotation contains.
///
/// Containment is `outer.begin <= inner.begin && inner.end <= outer.end`.
/// Both layers are walked in begin order: the first candidate for each outer
/// annotation only moves forward, and the scan for one outer annotation stops
/// at the first inner annotation beginning after its end. Inner annotations
/// with equal begins stay in insertion order.
pub fn index_covered<O: Annotation, I: Annotation>(
    outer: &Layer<O>,
    inner: &Layer<I>,
) -> CoverIndex<O, I> {
    let mut covered = vec![Vec::new(); outer.len()];
    let inner_order = inner.order();
    let mut first = 0;

    for &outer_id in outer.order() {
        let span = outer[outer_id].span();

        while first < inner_order.len() && inner[inner_order[first]].span().begin < span.begin {
            first += 1;
        }

        covered[outer_id.index()] = inner_order[first..]
            .iter()
            .copied()
            .take_while(|&id| inner[id].span().begin <= span.end)
            .filter(|&id| inner[id].span().end <= span.end)
            .collect();
    }

    CoverIndex {
        covered,
        marker: std::marker::PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use crate::{AnnotationStoreBuilder, Id, SemArg, SemPred, Span, Token};

    #[test]
    fn predicates_are_indexed_under_their_token() {
        let mut builder = AnnotationStoreBuilder::new();
        let tokens = builder.push_sentence(&["I", "eat", "apples"]);
        builder.add(SemPred::new(Span::new(2, 5), "eat.01"));
        builder.add(SemPred::new(Span::new(6, 12), "apple.01"));
        let store = builder.build().unwrap();

        let index = store.index_covered::<Token, SemPred>();
        let categories = |token: Id<Token>| {
            index
                .get(token)
                .iter()
                .map(|&pred| store[pred].category.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(categories(tokens[0]), Vec::<&str>::new());
        assert_eq!(categories(tokens[1]), vec!["eat.01"]);
        assert_eq!(categories(tokens[2]), vec!["apple.01"]);
    }

    #[test]
    fn argument_index_lists_every_covered_token() {
        let mut builder = AnnotationStoreBuilder::new();
        let tokens = builder.push_sentence(&["the", "red", "apple", "fell"]);
        let phrase = builder.add(SemArg::new(Span::new(0, 13)));
        let head = builder.add(SemArg::new(Span::new(8, 13)));
        let store = builder.build().unwrap();

        let index = store.index_covered::<SemArg, Token>();

        assert_eq!(index.get(phrase), &tokens[..3]);
        assert_eq!(index.get(head), &tokens[2..3]);
    }

    #[test]
    fn equal_begins_keep_insertion_order() {
        let mut builder = AnnotationStoreBuilder::with_text("ab");
        let outer = builder.add(Token::new(Span::new(0, 2)));
        let long = builder.add(SemPred::new(Span::new(0, 2), "long"));
        let short = builder.add(SemPred::new(Span::new(0, 1), "short"));
        let store = builder.build().unwrap();

        let index = store.index_covered::<Token, SemPred>();
        assert_eq!(index.get(outer), &[long, short]);
    }

    #[test]
    fn partial_overlap_is_not_containment() {
        let mut builder = AnnotationStoreBuilder::new();
        let tokens = builder.push_sentence(&["New", "York"]);
        let arg = builder.add(SemArg::new(Span::new(2, 8)));
        let store = builder.build().unwrap();

        let index = store.index_covered::<SemArg, Token>();
        assert_eq!(index.get(arg), &tokens[1..2]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn nested_outer_spans_share_inner_annotations() {
        let mut builder = AnnotationStoreBuilder::new();
        let tokens = builder.push_sentence(&["a", "b", "c"]);
        let wide = builder.add(SemArg::new(Span::new(0, 5)));
        let narrow = builder.add(SemArg::new(Span::new(2, 3)));
        let store = builder.build().unwrap();

        let index = store.index_covered::<SemArg, Token>();
        assert_eq!(index.get(wide), &tokens[..]);
        assert_eq!(index.get(narrow), &tokens[1..2]);
    }

    mod properties {
        use crate::{AnnotationStore, SemArg, Span, Token};
        use proptest::prelude::*;

        fn spans() -> impl Strategy<Value = Vec<Span>> {
            prop::collection::vec((0usize..24, 0usize..8), 0..16).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .map(|(begin, len)| Span::new(begin, (begin + len).min(24)))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn sweep_agrees_with_pairwise_containment(outer in spans(), inner in spans()) {
                let mut builder = AnnotationStore::builder("x".repeat(24));
                for span in &outer {
                    builder.add(SemArg::new(*span));
                }
                for span in &inner {
                    builder.add(Token::new(*span));
                }
                let store = builder.build().unwrap();

                let index = store.index_covered::<SemArg, Token>();
                for (arg_id, arg) in store.select::<SemArg>() {
                    let expected: Vec<_> = store
                        .select::<Token>()
                        .filter(|(_, token)| arg.span.contains(&token.span))
                        .map(|(id, _)| id)
                        .collect();
                    prop_assert_eq!(index.get(arg_id), &expected[..]);
                }
            }
        }
    }
}
