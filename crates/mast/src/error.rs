//! Error types for the component engine.

use mast_dom::{DomError, SelectorError};

/// Result type alias for component operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, rendering or placing components.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A model was requested by a name nothing registered.
    #[error("No model with that name ({name}) exists")]
    InvalidModel { name: String },

    /// Neither a pattern nor a template selector was configured.
    #[error("No pattern or template selector specified for component")]
    MissingRenderSource,

    /// A subcomponent declaration named no component, or an unknown one.
    #[error("{}", unknown_subcomponent_message(.component))]
    UnknownSubcomponentType { component: Option<String> },

    /// No outlet selector was given or configured.
    #[error("No outlet selector specified to render into")]
    NoOutlet,

    /// The outlet selector did not match exactly one element.
    #[error("{}", outlet_cardinality_message(.selector, .found, .context))]
    OutletCardinality {
        selector: String,
        found: usize,
        context: Option<String>,
    },

    /// A placement was attempted on a destroyed component.
    #[error("Component has been destroyed")]
    Destroyed,

    /// A template selector that no template is registered under.
    #[error("No template matches the selector '{selector}'")]
    Template { selector: String },

    /// A template's placeholders failed to compile or render.
    #[error("Failed to render template '{template}'")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Selector parsing error.
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// Host document error.
    #[error(transparent)]
    Dom(DomError),

    /// A component manifest could not be parsed.
    #[error("Invalid component manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl From<DomError> for Error {
    fn from(error: DomError) -> Self {
        match error {
            DomError::Selector(error) => Self::Selector(error),
            other => Self::Dom(other),
        }
    }
}

impl Error {
    /// Create an invalid model error.
    pub fn invalid_model(name: impl Into<String>) -> Self {
        Self::InvalidModel { name: name.into() }
    }

    /// Create an unknown subcomponent error.
    pub fn unknown_subcomponent(component: Option<&str>) -> Self {
        Self::UnknownSubcomponentType {
            component: component.map(str::to_string),
        }
    }

    /// Create an outlet cardinality error.
    pub fn outlet_cardinality(
        selector: impl Into<String>,
        found: usize,
        context: Option<String>,
    ) -> Self {
        Self::OutletCardinality {
            selector: selector.into(),
            found,
            context,
        }
    }

    /// Create a template rendering error.
    pub fn render(template: impl Into<String>, source: tera::Error) -> Self {
        Self::Render {
            template: template.into(),
            source,
        }
    }

    /// Create a missing template error.
    pub fn template(selector: impl Into<String>) -> Self {
        Self::Template {
            selector: selector.into(),
        }
    }
}

fn unknown_subcomponent_message(component: &Option<String>) -> String {
    match component {
        None => "Cannot register subcomponent because 'component' was not defined".to_string(),
        Some(name) => format!(
            "Cannot register subcomponent because specified component, '{name}', does not exist"
        ),
    }
}

fn outlet_cardinality_message(selector: &str, found: &usize, context: &Option<String>) -> String {
    let count = if *found > 1 {
        "More than one element exists"
    } else {
        "No elements exist"
    };
    match context {
        Some(context) => format!(
            "{count} in this template context ({context}) for the specified child outlet selector ('{selector}')"
        ),
        None => format!("{count} for the specified outlet selector ('{selector}')"),
    }
}
