use std::fmt;

/// A recoverable problem found while preparing the segments. None of these
/// stop the run.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    UnknownFlag { index: usize, flag: i32 },
    /// Two polyline boundaries right after each other.
    ConsecutiveFlags { index: usize, flag: i32 },
    /// A polyline closed with a single point; it yields no segments.
    SinglePointPolyLine { index: usize },
    /// Points left in a polyline that never got its terminal flag.
    UnterminatedPolyLine { points: usize },
    /// Polylines collected for a multi polyline whose seed pair never closed.
    UnclosedMultiPolyLine { poly_lines: usize },
    SingularFrame { segment: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownFlag { index, flag } => {
                write!(f, "unknown flag {flag} at sample {index}")
            }
            Diagnostic::ConsecutiveFlags { index, flag } => {
                write!(f, "consecutive flags {flag} at sample {index}")
            }
            Diagnostic::SinglePointPolyLine { index } => {
                write!(f, "polyline ending at sample {index} has a single point")
            }
            Diagnostic::UnterminatedPolyLine { points } => {
                write!(f, "dropped unterminated polyline of {points} points")
            }
            Diagnostic::UnclosedMultiPolyLine { poly_lines } => {
                write!(f, "dropped unclosed multi polyline of {poly_lines} polylines")
            }
            Diagnostic::SingularFrame { segment } => {
                write!(f, "singular frame for segment {segment}, using identity inverse")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.items.push(diagnostic);
    }

    pub fn append(&mut self, mut other: Diagnostics) {
        self.items.append(&mut other.items);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
