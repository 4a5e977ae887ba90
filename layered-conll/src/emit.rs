//! Row formatting.

use crate::row::Row;
use crate::Conll2009Config;
use layered_annotation::AnnotationStore;
use std::fmt;
use std::io::{self, Write};

/// Placeholder for a column with no value.
pub const UNUSED: &str = "_";

/// The values of one CoNLL-2009 line.
///
/// Only the gold columns are stored; each predicted column (PLEMMA, PPOS,
/// PFEAT, PHEAD, PDEPREL) mirrors its gold column when written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields<'a> {
    pub id: usize,
    pub form: &'a str,
    pub lemma: &'a str,
    pub pos: &'a str,
    pub feat: &'a str,
    /// `None` when the row has no dependency or dependencies are not written
    pub head: Option<usize>,
    pub deprel: &'a str,
    pub fillpred: &'a str,
    pub pred: &'a str,
    /// One role (or `_`) per predicate of the sentence
    pub apreds: Vec<&'a str>,
}

impl fmt::Display for RowFields<'_> {
    /// Writes the fourteen fixed columns and the APRED tail, without the
    /// line terminator. The tail always follows a tab, so a sentence without
    /// predicates ends each line with an empty field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.head.map(|head| head.to_string());
        let head = head.as_deref().unwrap_or(UNUSED);

        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
            self.id,
            self.form,
            self.lemma,
            self.lemma,
            self.pos,
            self.pos,
            self.feat,
            self.feat,
            head,
            head,
            self.deprel,
            self.deprel,
            self.fillpred,
            self.pred,
        )?;

        for (i, apred) in self.apreds.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            f.write_str(apred)?;
        }
        Ok(())
    }
}

/// Turns [`Row`]s into lines, honoring the `write*` switches of the
/// configuration. Disabled columns are still written, as `_`.
#[derive(Debug, Clone, Copy)]
pub struct RowEmitter<'c> {
    config: &'c Conll2009Config,
}

impl<'c> RowEmitter<'c> {
    pub fn new(config: &'c Conll2009Config) -> Self {
        Self { config }
    }

    pub fn fields<'a>(&self, store: &'a AnnotationStore, row: &Row<'a>) -> RowFields<'a> {
        let config = self.config;

        let lemma = match &row.token.lemma {
            Some(lemma) if config.write_lemma => lemma.as_str(),
            _ => UNUSED,
        };

        let pos = match &row.token.pos {
            Some(pos) if config.write_pos => pos.as_str(),
            _ => UNUSED,
        };

        let feat = match row.feats {
            Some(feats) if config.write_morph => feats.value.as_str(),
            _ => UNUSED,
        };

        let (head, deprel) = match row.dependency {
            Some(attached) if config.write_dependency => (
                Some(attached.head),
                attached.dependency.dependency_type.as_str(),
            ),
            _ => (None, UNUSED),
        };

        let (fillpred, pred) = match row.pred {
            Some(pred) if config.write_semantic_predicate => ("Y", pred.category.as_str()),
            _ => (UNUSED, UNUSED),
        };

        let apreds = row
            .args
            .iter()
            .map(|arg| match *arg {
                Some(link) if config.write_semantic_predicate => link.role.as_str(),
                _ => UNUSED,
            })
            .collect();

        RowFields {
            id: row.id,
            form: store.covered_text(row.token.span),
            lemma,
            pos,
            feat,
            head,
            deprel,
            fillpred,
            pred,
            apreds,
        }
    }

    /// Write one row followed by `\n`.
    pub fn write_row<W: Write>(
        &self,
        out: &mut W,
        store: &AnnotationStore,
        row: &Row<'_>,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.fields(store, row))
    }
}
