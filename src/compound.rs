//! Compound words and their recursive split trees.
//!
//! A [`Compound`] decomposes a word into an ordered list of [`Split`]s. A
//! split is either a [`CompoundPart`], which may be decomposed further, or a
//! [`LinkingMorpheme`] that only glues parts together (the `e` in
//! `getränk|e|automat`). Depth 1 is the direct children of the compound.

use crate::Span;
use std::str::FromStr;
use thiserror::Error;

/// Errors from compound validation and split level parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompoundError {
    /// A split does not start where the previous one ended.
    #[error("split {split:?} of {parent:?} should begin at {expected_begin}")]
    MisalignedSplit {
        parent: Span,
        split: Span,
        expected_begin: usize,
    },

    /// The splits stop short of (or run past) the end of their parent.
    #[error("splits of {parent:?} end at {covered_end}")]
    IncompleteCover { parent: Span, covered_end: usize },

    #[error("unknown split level `{0}`, expected one of all, lowest, highest, none")]
    UnknownSplitLevel(String),
}

/// Which splits of the tree a traversal returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundSplitLevel {
    /// Every split, internal parts before their own sub-parts
    All,
    /// The leaves of the split tree
    Lowest,
    /// The direct children of the compound
    Highest,
    /// Nothing
    None,
}

impl FromStr for CompoundSplitLevel {
    type Err = CompoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(CompoundSplitLevel::All),
            "lowest" => Ok(CompoundSplitLevel::Lowest),
            "highest" => Ok(CompoundSplitLevel::Highest),
            "none" => Ok(CompoundSplitLevel::None),
            _ => Err(CompoundError::UnknownSplitLevel(s.to_string())),
        }
    }
}

/// A node of the split tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    Part(CompoundPart),
    LinkingMorpheme(LinkingMorpheme),
}

impl Split {
    pub fn part(span: Span) -> Self {
        Split::Part(CompoundPart::new(span))
    }

    pub fn part_with(span: Span, splits: Vec<Split>) -> Self {
        Split::Part(CompoundPart { span, splits })
    }

    pub fn morpheme(span: Span) -> Self {
        Split::LinkingMorpheme(LinkingMorpheme { span })
    }

    pub fn span(&self) -> Span {
        match self {
            Split::Part(part) => part.span,
            Split::LinkingMorpheme(morpheme) => morpheme.span,
        }
    }

    pub fn is_morpheme(&self) -> bool {
        matches!(self, Split::LinkingMorpheme(_))
    }

    /// Sub-splits of a part; morphemes have none.
    pub fn splits(&self) -> &[Split] {
        match self {
            Split::Part(part) => &part.splits,
            Split::LinkingMorpheme(_) => &[],
        }
    }
}

/// A part of a compound, possibly decomposed further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundPart {
    pub span: Span,
    pub splits: Vec<Split>,
}

impl CompoundPart {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            splits: Vec::new(),
        }
    }
}

/// Surface material joining two parts, e.g. German `s` or `e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkingMorpheme {
    pub span: Span,
}

/// A compound word and its split tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub span: Span,
    pub splits: Vec<Split>,
}

impl Compound {
    pub fn new(span: Span, splits: Vec<Split>) -> Self {
        Self { span, splits }
    }

    /// The splits at `level`, linking morphemes left out.
    ///
    /// [`All`](CompoundSplitLevel::All) walks the tree in pre-order, so for
    /// `[getränk, [auto, mat]]` it yields `getränk, automat, auto, mat`.
    pub fn splits_without_morpheme(&self, level: CompoundSplitLevel) -> Vec<&Split> {
        let mut out = Vec::new();
        collect(&self.splits, level, false, &mut out);
        out
    }

    /// The splits at `level`, linking morphemes included.
    pub fn splits(&self, level: CompoundSplitLevel) -> Vec<&Split> {
        let mut out = Vec::new();
        collect(&self.splits, level, true, &mut out);
        out
    }

    /// Depth of the deepest split, 0 for an undecomposed compound.
    pub fn depth(&self) -> usize {
        fn depth_of(splits: &[Split]) -> usize {
            splits
                .iter()
                .map(|split| 1 + depth_of(split.splits()))
                .max()
                .unwrap_or(0)
        }
        depth_of(&self.splits)
    }

    /// Check that at every level the splits tile their parent: ordered,
    /// gap-free and ending exactly at the parent's end.
    pub fn validate(&self) -> Result<(), CompoundError> {
        validate_tiling(self.span, &self.splits)
    }
}

fn collect<'a>(
    splits: &'a [Split],
    level: CompoundSplitLevel,
    keep_morphemes: bool,
    out: &mut Vec<&'a Split>,
) {
    for split in splits {
        if split.is_morpheme() && !keep_morphemes {
            continue;
        }
        match level {
            CompoundSplitLevel::None => return,
            CompoundSplitLevel::Highest => out.push(split),
            CompoundSplitLevel::Lowest => {
                if split.splits().is_empty() {
                    out.push(split);
                } else {
                    collect(split.splits(), level, keep_morphemes, out);
                }
            }
            CompoundSplitLevel::All => {
                out.push(split);
                collect(split.splits(), level, keep_morphemes, out);
            }
        }
    }
}

fn validate_tiling(parent: Span, splits: &[Split]) -> Result<(), CompoundError> {
    if splits.is_empty() {
        return Ok(());
    }

    let mut expected_begin = parent.begin;
    for split in splits {
        let span = split.span();
        if span.begin != expected_begin || span.end < span.begin {
            return Err(CompoundError::MisalignedSplit {
                parent,
                split: span,
                expected_begin,
            });
        }
        validate_tiling(span, split.splits())?;
        expected_begin = span.end;
    }

    if expected_begin != parent.end {
        return Err(CompoundError::IncompleteCover {
            parent,
            covered_end: expected_begin,
        });
    }
    Ok(())
}
