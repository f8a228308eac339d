//! Loading of static configuration artifacts: the trust template, the
//! extraction parameters, and the few-shot exemplar corpus.

use crate::error::{CliError, Result};
use std::fs;
use std::path::Path;
use tracing::info;
use trustform_domain::Schema;
use trustform_extract::{adapt_corpus, Exemplar, ExtractParams};

/// Load the template schema, falling back to the built-in trust
/// template when no path is given.
pub fn load_schema(path: Option<&Path>) -> Result<Schema> {
    match path {
        Some(path) => {
            let template = fs::read_to_string(path)?;
            let schema = Schema::from_template(&template)?;
            info!(path = %path.display(), fields = schema.field_count(), "loaded template");
            Ok(schema)
        }
        None => Ok(Schema::trust_default()),
    }
}

/// Load extraction parameters from a `.json` or `.toml` file, falling
/// back to the defaults when no path is given.
pub fn load_params(path: Option<&Path>) -> Result<ExtractParams> {
    let params = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let is_toml = path.extension().is_some_and(|ext| ext == "toml");
            let params = if is_toml {
                ExtractParams::from_toml(&content)
            } else {
                ExtractParams::from_json(&content)
            }
            .map_err(CliError::Config)?;
            info!(path = %path.display(), "loaded params");
            params
        }
        None => ExtractParams::default(),
    };
    params.validate().map_err(CliError::Config)?;
    Ok(params)
}

/// Load and adapt the few-shot exemplar corpus; no path means no
/// exemplars.
pub fn load_exemplars(path: Option<&Path>) -> Result<Vec<Exemplar>> {
    match path {
        Some(path) => {
            let corpus = fs::read_to_string(path)?;
            let exemplars = adapt_corpus(&corpus)?;
            info!(path = %path.display(), exemplars = exemplars.len(), "adapted exemplar corpus");
            Ok(exemplars)
        }
        None => Ok(Vec::new()),
    }
}
