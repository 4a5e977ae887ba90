//! The per-sentence row table.
//!
//! A [`SentenceTable`] has one [`Row`] per token of a sentence, in token
//! order. It is filled in three steps: [`SentenceTable::build`] lays out the
//! rows with their morphology and predicate,
//! [`SentenceTable::project_dependencies`] attaches the basic dependency of
//! each row, and [`SentenceTable::project_arguments`] spreads argument roles
//! over the rows they cover.

use crate::{ConllError, ConllResult};
use layered_annotation::{
    AnnotationStore, CoverIndex, Dependency, Id, MorphologicalFeatures, SemArg, SemArgLink,
    SemPred, Sentence, Token,
};
use std::collections::HashMap;

/// A dependency attached to a row, with its governor resolved to a row id.
#[derive(Debug, Clone, Copy)]
pub struct AttachedDependency<'a> {
    pub dependency: &'a Dependency,
    /// Row id of the governor, `0` if the dependency is a self-loop
    pub head: usize,
}

/// One output line: a token and everything projected onto it.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    /// 1-based position in the sentence
    pub id: usize,
    pub token_id: Id<Token>,
    pub token: &'a Token,
    pub feats: Option<&'a MorphologicalFeatures>,
    pub dependency: Option<AttachedDependency<'a>>,
    pub pred: Option<&'a SemPred>,
    /// Argument role of this token for each predicate of the sentence
    pub args: Vec<Option<&'a SemArgLink>>,
}

#[derive(Debug)]
pub struct SentenceTable<'a> {
    sentence: &'a Sentence,
    rows: Vec<Row<'a>>,
    row_of: HashMap<Id<Token>, usize>,
    preds: Vec<&'a SemPred>,
}

impl<'a> SentenceTable<'a> {
    /// Lay out one row per token of `sentence`.
    ///
    /// Morphology is assigned by position, and only if the sentence holds as
    /// many feature bundles as tokens. A token covering several predicates
    /// keeps the first one.
    pub fn build(
        store: &'a AnnotationStore,
        sentence: &'a Sentence,
        pred_index: &CoverIndex<Token, SemPred>,
    ) -> Self {
        let tokens: Vec<(Id<Token>, &Token)> = store.select_covered(sentence.span).collect();
        let morphology: Vec<&MorphologicalFeatures> = store
            .select_covered::<MorphologicalFeatures>(sentence.span)
            .map(|(_, feats)| feats)
            .collect();
        let preds: Vec<&SemPred> = store
            .select_covered::<SemPred>(sentence.span)
            .map(|(_, pred)| pred)
            .collect();

        let use_feats = morphology.len() == tokens.len();
        if !use_feats && !morphology.is_empty() {
            tracing::debug!(
                tokens = tokens.len(),
                morphology = morphology.len(),
                "morphology does not line up with tokens, omitting FEAT for sentence"
            );
        }

        let mut rows = Vec::with_capacity(tokens.len());
        let mut row_of = HashMap::with_capacity(tokens.len());
        for (i, (token_id, token)) in tokens.into_iter().enumerate() {
            let preds_for_token = pred_index.get(token_id);
            if preds_for_token.len() > 1 {
                tracing::debug!(
                    token = store.covered_text(token.span),
                    predicates = preds_for_token.len(),
                    "token carries several predicates, keeping the first"
                );
            }

            row_of.insert(token_id, i);
            rows.push(Row {
                id: i + 1,
                token_id,
                token,
                feats: if use_feats { Some(morphology[i]) } else { None },
                dependency: None,
                pred: preds_for_token.first().map(|&pred| &store[pred]),
                args: vec![None; preds.len()],
            });
        }

        Self {
            sentence,
            rows,
            row_of,
            preds,
        }
    }

    /// Attach each basic dependency of the sentence to its dependent's row.
    ///
    /// Dependencies of a non-basic flavor are ignored. A token that is the
    /// dependent of two basic dependencies is an error.
    pub fn project_dependencies(&mut self, store: &'a AnnotationStore) -> ConllResult<()> {
        let basic_deps = store
            .select_covered::<Dependency>(self.sentence.span)
            .map(|(_, dep)| dep)
            .filter(|dep| dep.is_basic());

        for dep in basic_deps {
            let row_idx = self.row_index(store, dep.dependent, "dependent")?;
            if self.rows[row_idx].dependency.is_some() {
                return Err(ConllError::IllegalDependencyStructure {
                    token: store.covered_text(self.rows[row_idx].token.span).to_string(),
                });
            }

            let governor_idx = self.row_index(store, dep.governor, "governor")?;
            let mut head = self.rows[governor_idx].id;
            if head == self.rows[row_idx].id {
                // ROOT dependencies may be modeled as a loop
                head = 0;
            }

            self.rows[row_idx].dependency = Some(AttachedDependency {
                dependency: dep,
                head,
            });
        }
        Ok(())
    }

    /// Give every token covered by an argument the argument's role, in the
    /// column of the predicate the argument belongs to.
    pub fn project_arguments(
        &mut self,
        store: &'a AnnotationStore,
        arg_index: &CoverIndex<SemArg, Token>,
    ) {
        for (p, &pred) in self.preds.iter().enumerate() {
            for link in &pred.arguments {
                for token in arg_index.get(link.target) {
                    match self.row_of.get(token) {
                        Some(&row_idx) => self.rows[row_idx].args[p] = Some(link),
                        None => tracing::debug!(
                            predicate = %pred.category,
                            role = %link.role,
                            token = store.covered_text(store[*token].span),
                            "argument token outside the predicate's sentence, skipped"
                        ),
                    }
                }
            }
        }
    }

    fn row_index(
        &self,
        store: &AnnotationStore,
        token: Id<Token>,
        role: &'static str,
    ) -> ConllResult<usize> {
        self.row_of
            .get(&token)
            .copied()
            .ok_or_else(|| ConllError::TokenOutsideSentence {
                role,
                token: store
                    .get(token)
                    .map(|t| store.covered_text(t.span))
                    .unwrap_or_default()
                    .to_string(),
            })
    }

    pub fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }

    /// Predicates of the sentence, in APRED column order.
    pub fn predicates(&self) -> &[&'a SemPred] {
        &self.preds
    }

    pub fn row_of(&self, token: Id<Token>) -> Option<&Row<'a>> {
        self.row_of.get(&token).map(|&idx| &self.rows[idx])
    }
}
