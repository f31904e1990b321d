use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::pair::{FieldMatcher, Pair};

/// The only document schema version accepted on input.
pub const SCHEMA_VERSION: &str = "v5";

/// A delay applied to every proxied request whose URL matches `url_pattern`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delay {
    pub url_pattern: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub http_method: String,
    /// Milliseconds.
    pub delay: u64,
}

/// Document-wide behaviour that applies across pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalActions {
    #[serde(default)]
    pub delays: Vec<Delay>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationData {
    #[serde(default)]
    pub pairs: Vec<Pair>,
    #[serde(default)]
    pub global_actions: GlobalActions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub simulator_version: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.into(),
            simulator_version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// The full simulation: ordered pairs plus metadata.
///
/// Documents are only ever changed as a whole. Every mutation reads the
/// current document, derives a new one and writes it back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationDocument {
    pub data: SimulationData,
    pub meta: Meta,
}

impl SimulationDocument {
    /// A document holding `pairs` and default metadata.
    pub fn with_pairs(pairs: Vec<Pair>) -> Self {
        Self {
            data: SimulationData { pairs, ..Default::default() },
            meta: Meta::default(),
        }
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.data.pairs
    }

    /// Same metadata and global actions, different pairs.
    pub fn replace_pairs(&self, pairs: Vec<Pair>) -> Self {
        Self {
            data: SimulationData {
                pairs,
                global_actions: self.data.global_actions.clone(),
            },
            meta: self.meta.clone(),
        }
    }

    /// Decode and validate a full-document request body.
    pub fn from_json_slice(body: &[u8]) -> SchemaResult<Self> {
        let doc: Self = serde_json::from_slice(body)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json_vec(&self) -> SchemaResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(SchemaError::from)
    }

    fn validate(&self) -> SchemaResult<()> {
        match self.meta.schema_version.as_str() {
            "" => return Err(SchemaError::MissingField("meta.schemaVersion")),
            SCHEMA_VERSION => {}
            other => return Err(SchemaError::UnsupportedVersion(other.to_string())),
        }
        self.data.pairs.iter().try_for_each(validate_pair)
    }
}

/// Body of a single-pair upsert.
///
/// Any `id` present in the body is ignored; the identifier always comes
/// from the request path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SinglePairView(pub Pair);

impl SinglePairView {
    pub fn from_json_slice(body: &[u8]) -> SchemaResult<Self> {
        let view: Self = serde_json::from_slice(body)?;
        validate_pair(&view.0)?;
        Ok(view)
    }

    /// The carried pair, stamped with `id`.
    pub fn into_pair(self, id: &str) -> Pair {
        self.0.with_id(id)
    }
}

fn validate_pair(pair: &Pair) -> SchemaResult<()> {
    let req = &pair.request;
    let fields = [
        &req.path,
        &req.method,
        &req.destination,
        &req.scheme,
        &req.body,
        &req.query,
    ];
    fields
        .into_iter()
        .flatten()
        .chain(req.headers.values().flatten())
        .try_for_each(validate_matcher)
}

fn validate_matcher(m: &FieldMatcher) -> SchemaResult<()> {
    if m.matcher.trim().is_empty() {
        return Err(SchemaError::InvalidField {
            field: "matcher",
            reason: "matcher kind must not be empty".into(),
        });
    }
    Ok(())
}
