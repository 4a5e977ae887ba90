//! Structural properties of the writer output over generated documents.

use crate::{Conll2009Config, Conll2009Writer};
use layered_annotation::{
    AnnotationStore, AnnotationStoreBuilder, Dependency, MorphologicalFeatures, SemArg, SemPred,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct TokenSpec {
    form: String,
    lemma: Option<String>,
    pos: Option<String>,
    governor: Option<usize>,
    predicate: bool,
}

#[derive(Debug, Clone)]
struct SentenceSpec {
    tokens: Vec<TokenSpec>,
    morphology: bool,
}

fn token_spec() -> impl Strategy<Value = TokenSpec> {
    (
        "[a-zäöü]{1,6}",
        proptest::option::of("[a-z]{1,4}"),
        proptest::option::of("[A-Z]{2,3}"),
        proptest::option::of(0usize..8),
        proptest::bool::weighted(0.3),
    )
        .prop_map(|(form, lemma, pos, governor, predicate)| TokenSpec {
            form,
            lemma,
            pos,
            governor,
            predicate,
        })
}

fn document_spec() -> impl Strategy<Value = Vec<SentenceSpec>> {
    let sentence = (prop::collection::vec(token_spec(), 1..8), any::<bool>())
        .prop_map(|(tokens, morphology)| SentenceSpec { tokens, morphology });
    prop::collection::vec(sentence, 1..5)
}

fn build(document: &[SentenceSpec]) -> AnnotationStore {
    let mut builder = AnnotationStoreBuilder::new();

    for sentence in document {
        let forms: Vec<&str> = sentence.tokens.iter().map(|t| t.form.as_str()).collect();
        let ids = builder.push_sentence(&forms);
        let spans: Vec<_> = ids
            .iter()
            .map(|&id| builder.get_mut(id).unwrap().span)
            .collect();
        let first = builder.add(SemArg::new(spans[0]));

        for (i, spec) in sentence.tokens.iter().enumerate() {
            let token = builder.get_mut(ids[i]).unwrap();
            token.lemma = spec.lemma.clone();
            token.pos = spec.pos.clone();

            if let Some(governor) = spec.governor {
                builder.add(Dependency::new(ids[governor % ids.len()], ids[i], "DEP"));
            }
            if spec.predicate {
                builder.add(SemPred::new(spans[i], "p.01").with_argument("A0", first));
            }
            if sentence.morphology {
                builder.add(MorphologicalFeatures::new(spans[i], "F=1"));
            }
        }
    }

    builder.build().unwrap()
}

fn blocks(output: &str) -> Vec<Vec<Vec<&str>>> {
    let mut blocks: Vec<&str> = output.split("\n\n").collect();
    assert_eq!(blocks.pop(), Some(""), "output ends with a blank line");
    blocks
        .into_iter()
        .map(|block| block.lines().map(|line| line.split('\t').collect()).collect())
        .collect()
}

proptest! {
    #[test]
    fn one_line_per_token(document in document_spec()) {
        let output = Conll2009Writer::default().write_to_string(&build(&document)).unwrap();
        let blocks = blocks(&output);

        prop_assert_eq!(blocks.len(), document.len());
        for (block, sentence) in blocks.iter().zip(&document) {
            prop_assert_eq!(block.len(), sentence.tokens.len());

            for (i, (row, spec)) in block.iter().zip(&sentence.tokens).enumerate() {
                let id = (i + 1).to_string();
                prop_assert_eq!(row[0], id.as_str());
                prop_assert_eq!(row[1], spec.form.as_str());
            }
        }
    }

    #[test]
    fn field_count_follows_predicates(document in document_spec()) {
        let output = Conll2009Writer::default().write_to_string(&build(&document)).unwrap();

        for (block, sentence) in blocks(&output).iter().zip(&document) {
            let predicates = sentence.tokens.iter().filter(|t| t.predicate).count();
            for row in block {
                prop_assert_eq!(row.len(), 14 + predicates.max(1));
            }
        }
    }

    #[test]
    fn predicted_columns_mirror_gold(document in document_spec()) {
        let output = Conll2009Writer::default().write_to_string(&build(&document)).unwrap();

        for block in blocks(&output) {
            for row in block {
                for gold in [2, 4, 6, 8, 10] {
                    prop_assert_eq!(row[gold], row[gold + 1]);
                }
            }
        }
    }

    #[test]
    fn heads_point_into_the_sentence(document in document_spec()) {
        let output = Conll2009Writer::default().write_to_string(&build(&document)).unwrap();

        for (block, sentence) in blocks(&output).iter().zip(&document) {
            for (row, spec) in block.iter().zip(&sentence.tokens) {
                match spec.governor {
                    None => {
                        prop_assert_eq!(row[8], "_");
                    }
                    Some(_) => {
                        let head: usize = row[8].parse().unwrap();
                        prop_assert!(head <= block.len());
                        prop_assert_ne!(row[10], "_");
                    }
                }
            }
        }
    }

    #[test]
    fn feat_requires_complete_morphology(document in document_spec()) {
        let output = Conll2009Writer::default().write_to_string(&build(&document)).unwrap();

        for (block, sentence) in blocks(&output).iter().zip(&document) {
            let expected = if sentence.morphology { "F=1" } else { "_" };
            for row in block {
                prop_assert_eq!(row[6], expected);
            }
        }
    }

    #[test]
    fn disabled_columns_are_placeholders(document in document_spec()) {
        let config = Conll2009Config::default()
            .with_lemma(false)
            .with_pos(false)
            .with_morph(false)
            .with_dependency(false)
            .with_semantic_predicate(false);
        let writer = Conll2009Writer::new(config).unwrap();
        let output = writer.write_to_string(&build(&document)).unwrap();

        for (block, sentence) in blocks(&output).iter().zip(&document) {
            let predicates = sentence.tokens.iter().filter(|t| t.predicate).count();
            for row in block {
                prop_assert!(row[2..14].iter().all(|field| *field == "_"), "{:?}", row);
                if predicates == 0 {
                    prop_assert_eq!(&row[14..], &[""][..]);
                } else {
                    prop_assert!(row[14..].iter().all(|field| *field == "_"), "{:?}", row);
                }
            }
        }
    }
}
