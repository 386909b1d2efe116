use serde::{Deserialize, Serialize};

// EXPERIMENTS

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperimentId(String);

impl AsRef<str> for ExperimentId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<String> for ExperimentId {
    fn from(id: String) -> Self {
        ExperimentId(id)
    }
}

impl From<&str> for ExperimentId {
    fn from(id: &str) -> Self {
        ExperimentId(id.to_owned())
    }
}

// VARIANTS

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(String);

impl AsRef<str> for VariantId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<String> for VariantId {
    fn from(id: String) -> Self {
        VariantId(id)
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        VariantId(id.to_owned())
    }
}
