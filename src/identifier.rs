//! Canonical module identifiers.
//!
//! Identifiers follow a Maven-style coordinate with an extension suffix:
//! `<namespace>:<id>:<version>@<extension>`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::classification::ClassificationResult;
use crate::record::ModuleRecord;

/// Extension used when an archive filename has none.
pub const DEFAULT_EXTENSION: &str = "jar";

/// A namespace-qualified id and version placed in the distribution manifest.
///
/// # Examples
///
/// ```
/// use modmeta::identifier::CanonicalIdentifier;
///
/// let identifier = CanonicalIdentifier::new("generated.localdevice", "jei", "4.16.1.302", "jar");
/// assert_eq!(identifier.to_string(), "generated.localdevice:jei:4.16.1.302@jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalIdentifier {
    namespace: String,
    id: String,
    version: String,
    extension: String,
}

impl CanonicalIdentifier {
    /// Compose an identifier from already-resolved components.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        id: impl Into<String>,
        version: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
            version: version.into(),
            extension: extension.into(),
        }
    }

    /// Namespace component.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Id component.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Version component.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Extension component.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl fmt::Display for CanonicalIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}@{}",
            self.namespace, self.id, self.version, self.extension
        )
    }
}

impl Serialize for CanonicalIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Lowercase extension of `filename`, or [`DEFAULT_EXTENSION`].
#[must_use]
pub fn archive_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension)
        .filter(|extension| !extension.is_empty())
        .map_or_else(|| DEFAULT_EXTENSION.to_owned(), str::to_ascii_lowercase)
}

/// Composes canonical identifiers from finalised records.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierGenerator<'a> {
    default_namespace: &'a str,
}

impl<'a> IdentifierGenerator<'a> {
    /// Create a generator falling back to `default_namespace`.
    #[must_use]
    pub const fn new(default_namespace: &'a str) -> Self {
        Self { default_namespace }
    }

    /// Identifier for `record`, read from the archive named `filename`.
    ///
    /// The namespace is the classification group when present and non-blank,
    /// otherwise the default namespace.
    #[must_use]
    pub fn generate(
        &self,
        record: &ModuleRecord,
        classification: Option<&ClassificationResult>,
        filename: &str,
    ) -> CanonicalIdentifier {
        let namespace = classification
            .and_then(|result| result.group.as_deref())
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .unwrap_or(self.default_namespace);
        CanonicalIdentifier::new(
            namespace,
            record.id(),
            record.version(),
            archive_extension(filename),
        )
    }
}
