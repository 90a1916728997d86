//! Error types for loading scenes and applying edits

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in a scene file
pub type Span = std::ops::Range<usize>;

/// Errors that can occur while loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene TOML: {}", .0.message())]
    Parse(#[from] toml::de::Error),

    #[error("duplicate name '{name}'")]
    DuplicateName { name: String, span: Span },

    #[error("undefined {kind} '{name}'")]
    Undefined {
        kind: &'static str,
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("shape '{name}' is not normalized: nw must be above and left of se")]
    InvalidRect { name: String, span: Span },

    #[error("port '{name}' has negative clearance {clearance}")]
    NegativeClearance {
        name: String,
        clearance: f64,
        span: Span,
    },

    #[error("solver.max_iterations must be at least 1")]
    ZeroIterations,
}

impl SceneError {
    pub fn undefined(
        kind: &'static str,
        name: impl Into<String>,
        span: Span,
        suggestions: Vec<String>,
    ) -> Self {
        Self::Undefined {
            kind,
            name: name.into(),
            span,
            suggestions,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Parse(e) => e.span(),
            Self::DuplicateName { span, .. }
            | Self::Undefined { span, .. }
            | Self::InvalidRect { span, .. }
            | Self::NegativeClearance { span, .. } => Some(span.clone()),
            Self::Io(_) | Self::ZeroIterations => None,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::Undefined { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("Error: {self}");
        };

        let mut report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            );
        if let Some(suggestions) = self.suggestions().filter(|s| !s.is_empty()) {
            report = report.with_help(format!("did you mean {}?", suggestions.join(", ")));
        }

        let mut buf = Vec::new();
        match report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
        {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {self}"),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Parse(e) => e.message().to_string(),
            Self::DuplicateName { .. } => "already defined".to_string(),
            Self::Undefined { kind, .. } => format!("no {kind} with this name"),
            Self::InvalidRect { .. } => "corners out of order".to_string(),
            Self::NegativeClearance { .. } => "clearance must be zero or more".to_string(),
            Self::Io(_) | Self::ZeroIterations => self.to_string(),
        }
    }
}

/// Errors from editing a loaded scene
#[derive(Error, Debug)]
pub enum EditError {
    #[error("undefined {kind} '{name}'")]
    Undefined {
        kind: &'static str,
        name: String,
        suggestions: Vec<String>,
    },

    #[error("invalid edit '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    #[error("invalid size {width}x{height} for shape '{name}': must be finite and not negative")]
    InvalidSize {
        name: String,
        width: f64,
        height: f64,
    },

    #[error("non-finite coordinates ({x}, {y}) for '{name}'")]
    NonFinite { name: String, x: f64, y: f64 },
}

impl EditError {
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}
