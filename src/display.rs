use crate::compound::Compound;
use crate::layer::Annotation;
use crate::{
    AnnotationStore, Dependency, DependencyFlavor, Id, MorphologicalFeatures, SemArg, SemPred,
    Sentence, Span, Token,
};
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Inclusive range of token indexes within the displayed sentence.
type TokenRange = (usize, usize);

/// Separates tokens on the header line.
const TOKEN_GAP: &str = "  ";

/// A labelled edge from an annotation to another span, e.g. a dependency's
/// governor or a predicate's argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLink {
    pub label: String,
    pub target: Span,
}

/// How an annotation is labelled in a [`SentenceDisplay`].
pub trait DisplayLabel: Annotation {
    fn display_label(&self) -> String;

    fn display_links(&self, _store: &AnnotationStore) -> Vec<DisplayLink> {
        Vec::new()
    }
}

impl DisplayLabel for Sentence {
    fn display_label(&self) -> String {
        "Sentence".to_string()
    }
}

impl DisplayLabel for Token {
    fn display_label(&self) -> String {
        match (&self.lemma, &self.pos) {
            (Some(lemma), Some(pos)) => format!("Token({}, {})", lemma, pos),
            (Some(lemma), None) => format!("Token({})", lemma),
            (None, Some(pos)) => format!("Token({})", pos),
            (None, None) => "Token".to_string(),
        }
    }
}

impl DisplayLabel for MorphologicalFeatures {
    fn display_label(&self) -> String {
        format!("Morph({})", self.value)
    }
}

impl DisplayLabel for Dependency {
    fn display_label(&self) -> String {
        match self.flavor {
            Some(DependencyFlavor::Enhanced) => {
                format!("Dependency({}, Enhanced)", self.dependency_type)
            }
            _ => format!("Dependency({})", self.dependency_type),
        }
    }

    fn display_links(&self, store: &AnnotationStore) -> Vec<DisplayLink> {
        store
            .get(self.governor)
            .map(|governor| DisplayLink {
                label: "governor".to_string(),
                target: governor.span,
            })
            .into_iter()
            .collect()
    }
}

impl DisplayLabel for SemArg {
    fn display_label(&self) -> String {
        "SemArg".to_string()
    }
}

impl DisplayLabel for SemPred {
    fn display_label(&self) -> String {
        format!("SemPred({})", self.category)
    }

    fn display_links(&self, store: &AnnotationStore) -> Vec<DisplayLink> {
        self.arguments
            .iter()
            .filter_map(|link| {
                store.get(link.target).map(|arg| DisplayLink {
                    label: link.role.clone(),
                    target: arg.span,
                })
            })
            .collect()
    }
}

impl DisplayLabel for Compound {
    fn display_label(&self) -> String {
        format!("Compound(depth {})", self.depth())
    }
}

/// One annotation drawn under the sentence.
struct LayerRow {
    tokens: TokenRange,
    label: String,
    links: Vec<(String, Option<TokenRange>)>,
}

/// Token positions as CoNLL ids: `2`, `1-3`, or `outside` for spans that
/// touch no token of the sentence.
struct Positions(Option<TokenRange>);

impl fmt::Display for Positions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("outside"),
            Some((first, last)) if first == last => write!(f, "{}", first + 1),
            Some((first, last)) => write!(f, "{}-{}", first + 1, last + 1),
        }
    }
}

fn underline(width: usize) -> String {
    if width <= 1 {
        return "└".to_string();
    }
    format!("└{}┘", "─".repeat(width - 2))
}

/// Renders one sentence with annotation layers drawn underneath its tokens.
///
/// Links are printed after the label and name their target by the 1-based
/// token position used for CoNLL ids.
///
/// ```text
/// I  eat  .
/// └ Dependency(SBJ) governor→2
///    └─┘ SemPred(eat.01) A0→1
/// ```
pub struct SentenceDisplay<'a> {
    store: &'a AnnotationStore,
    sentence: Span,
    tokens: Vec<(Id<Token>, &'a Token)>,
    rows: Vec<LayerRow>,
}

impl fmt::Display for SentenceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = String::new();
        let mut columns = Vec::with_capacity(self.tokens.len());
        for (i, (_, token)) in self.tokens.iter().enumerate() {
            if i > 0 {
                header.push_str(TOKEN_GAP);
            }
            let start = header.width();
            header.push_str(self.store.covered_text(token.span));
            columns.push((start, header.width()));
        }
        f.write_str(&header)?;

        for row in &self.rows {
            let (start, _) = columns[row.tokens.0];
            let (_, end) = columns[row.tokens.1];
            write!(f, "\n{:start$}{} {}", "", underline(end - start), row.label)?;
            for (role, target) in &row.links {
                write!(f, " {}→{}", role, Positions(*target))?;
            }
        }
        Ok(())
    }
}

impl<'a> SentenceDisplay<'a> {
    pub fn new(store: &'a AnnotationStore, sentence: Id<Sentence>) -> Self {
        let span = store.get(sentence).map(|s| s.span).unwrap_or_default();
        SentenceDisplay {
            store,
            sentence: span,
            tokens: store.select_covered::<Token>(span).collect(),
            rows: Vec::new(),
        }
    }

    /// Tokens of the sentence touched by `span`, as an inclusive index range.
    fn token_range(&self, span: Span) -> Option<TokenRange> {
        let touches = |token: &Token| {
            token.span.overlaps(&span) || (span.is_empty() && token.span.contains(&span))
        };
        let first = self.tokens.iter().position(|(_, t)| touches(t))?;
        let last = self.tokens.iter().rposition(|(_, t)| touches(t))?;
        Some((first, last))
    }

    fn push<T: DisplayLabel>(&mut self, show_links: bool) {
        let store = self.store;
        for (_, annotation) in store.select_covered::<T>(self.sentence) {
            let Some(tokens) = self.token_range(annotation.span()) else {
                continue;
            };
            let links = if show_links {
                annotation
                    .display_links(store)
                    .into_iter()
                    .map(|link| (link.label, self.token_range(link.target)))
                    .collect()
            } else {
                Vec::new()
            };
            self.rows.push(LayerRow {
                tokens,
                label: annotation.display_label(),
                links,
            });
        }
    }

    pub fn include<T: DisplayLabel>(&mut self) {
        self.push::<T>(false);
    }

    /// Include annotations of type T and print where their links point.
    pub fn include_with_links<T: DisplayLabel>(&mut self) {
        self.push::<T>(true);
    }

    pub fn with<T: DisplayLabel>(mut self) -> Self {
        self.include::<T>();
        self
    }

    pub fn with_links<T: DisplayLabel>(mut self) -> Self {
        self.include_with_links::<T>();
        self
    }
}
