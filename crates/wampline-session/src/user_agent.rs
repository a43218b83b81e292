//! Client identification: the `User-Agent` string sent on every connect.

use std::fmt;

/// A deterministic identification string for outbound handshakes.
///
/// Always carries this library's name and version; an embedding
/// application can chain its own identity with
/// [`with_application`](Self::with_application). The value is computed
/// when the client is constructed and injected into each fresh socket's
/// options before connecting; there is no hidden process-global cache,
/// and producing the string never touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    product: String,
    version: String,
    application: Option<(String, String)>,
}

impl UserAgent {
    /// This library's own identity, from the crate metadata.
    pub fn library() -> Self {
        Self {
            product: env!("CARGO_PKG_NAME").to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            application: None,
        }
    }

    /// Chains the embedding application's name and version after the
    /// library identity.
    pub fn with_application(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.application = Some((name.into(), version.into()));
        self
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product, self.version)?;
        if let Some((name, version)) = &self.application {
            write!(f, " {name}/{version}")?;
        }
        Ok(())
    }
}
