use crate::services::dispatcher::ModelSpec;
use crate::services::Provider;
use serde::Serialize;

/// Entry of the model selector.
#[derive(Debug, Serialize)]
pub struct Model {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: Provider,
    pub description: &'static str,
}

impl From<&ModelSpec> for Model {
    fn from(spec: &ModelSpec) -> Self {
        Self {
            id: spec.id,
            name: spec.name,
            provider: spec.provider,
            description: spec.description,
        }
    }
}
