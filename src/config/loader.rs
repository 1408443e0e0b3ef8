//! Loading GAN specifications from YAML

use std::fs;
use std::path::Path;

use tracing::debug;

use super::schema::GanSpec;
use super::validate::validate_spec;
use crate::error::{Error, Result};

/// Parse and validate a specification from YAML text.
pub fn parse_spec(yaml: &str) -> Result<GanSpec> {
    let spec: GanSpec = serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;
    validate_spec(&spec)?;
    Ok(spec)
}

/// Load and validate a specification file
///
/// # Example
///
/// ```no_run
/// use contienda::config::load_spec;
///
/// let spec = load_spec("gan.yaml")?;
/// println!("policy: {}", spec.gan.policy);
/// # Ok::<(), contienda::Error>(())
/// ```
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<GanSpec> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;
    let spec = parse_spec(&yaml)?;
    debug!(path = %path.display(), policy = %spec.gan.policy, "loaded GAN spec");
    Ok(spec)
}
