//! The CoNLL-2009 document writer.

use crate::emit::RowEmitter;
use crate::row::SentenceTable;
use crate::{Conll2009Config, ConllResult};
use layered_annotation::{AnnotationStore, SemArg, SemPred, Sentence, Token};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Used for output file names when the store carries no document id.
const DEFAULT_DOCUMENT_ID: &str = "document";

/// Writes annotation stores in the CoNLL-2009 format.
///
/// Each sentence becomes one tab-separated line per token followed by a blank
/// line:
///
/// | # | Column   | Source                                         |
/// |---|----------|------------------------------------------------|
/// | 1 | ID       | token position in the sentence, from 1         |
/// | 2 | FORM     | token text                                     |
/// | 3 | LEMMA    | token lemma                                    |
/// | 4 | PLEMMA   | copy of LEMMA                                  |
/// | 5 | POS      | token part of speech                           |
/// | 6 | PPOS     | copy of POS                                    |
/// | 7 | FEAT     | morphological features                         |
/// | 8 | PFEAT    | copy of FEAT                                   |
/// | 9 | HEAD     | ID of the governor, `0` for the root           |
/// | 10| PHEAD    | copy of HEAD                                   |
/// | 11| DEPREL   | dependency type                                |
/// | 12| PDEPREL  | copy of DEPREL                                 |
/// | 13| FILLPRED | `Y` if the token carries a predicate           |
/// | 14| PRED     | predicate sense                                |
/// | 15+| APREDs  | role of the token for each predicate, in order |
///
/// Missing values are written as `_`.
///
/// ```
/// use layered_annotation::AnnotationStoreBuilder;
/// use layered_conll::Conll2009Writer;
///
/// let mut builder = AnnotationStoreBuilder::new();
/// builder.push_sentence(&["Hi"]);
/// let store = builder.build().unwrap();
///
/// let output = Conll2009Writer::default().write_to_string(&store).unwrap();
/// assert_eq!(output, "1\tHi\t_\t_\t_\t_\t_\t_\t_\t_\t_\t_\t_\t_\t\n\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Conll2009Writer {
    config: Conll2009Config,
}

impl Conll2009Writer {
    /// Create a writer, rejecting encodings other than UTF-8.
    pub fn new(config: Conll2009Config) -> ConllResult<Self> {
        config.check_encoding()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Conll2009Config {
        &self.config
    }

    /// Write every sentence of `store` to `out` and flush it.
    ///
    /// On error, whatever was already written stays in `out`.
    pub fn write<W: Write>(&self, store: &AnnotationStore, mut out: W) -> ConllResult<()> {
        let pred_index = store.index_covered::<Token, SemPred>();
        let arg_index = store.index_covered::<SemArg, Token>();
        let emitter = RowEmitter::new(&self.config);

        tracing::debug!(
            document = store.document_id().unwrap_or(DEFAULT_DOCUMENT_ID),
            sentences = store.layer::<Sentence>().len(),
            "writing CoNLL-2009 document"
        );

        for (_, sentence) in store.sentences() {
            let mut table = SentenceTable::build(store, sentence, &pred_index);
            table.project_dependencies(store)?;
            table.project_arguments(store, &arg_index);

            tracing::trace!(
                tokens = table.rows().len(),
                predicates = table.predicates().len(),
                "writing sentence"
            );

            for row in table.rows() {
                emitter.write_row(&mut out, store, row)?;
            }
            out.write_all(b"\n")?;
        }

        out.flush()?;
        Ok(())
    }

    /// Render `store` into a string.
    pub fn write_to_string(&self, store: &AnnotationStore) -> ConllResult<String> {
        let mut buffer = Vec::new();
        self.write(store, &mut buffer)?;
        // Everything written comes from `&str`s
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Where [`write_document`](Self::write_document) puts the output for
    /// `store`: `<dir>/<document id><filename suffix>`.
    pub fn output_path(&self, store: &AnnotationStore, dir: &Path) -> PathBuf {
        let document_id = store.document_id().unwrap_or(DEFAULT_DOCUMENT_ID);
        dir.join(format!("{}{}", document_id, self.config.filename_suffix))
    }

    /// Write `store` to its own file under `dir` and return the file's path.
    ///
    /// The file handle is closed on every path, including errors.
    pub fn write_document(&self, store: &AnnotationStore, dir: &Path) -> ConllResult<PathBuf> {
        let path = self.output_path(store, dir);
        let file = File::create(&path)?;
        self.write(store, BufWriter::new(file))?;
        Ok(path)
    }
}
