use crate::document::{read_input, Document};
use crate::error::{ParseDocument, Result};
use crate::layout::Layout;
use k8s_openapi::api::{apps::v1::Deployment, core::v1::ServiceAccount, rbac::v1::PolicyRule};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{de::DeserializeOwned, Deserialize};
use serde_yaml::Value;
use snafu::ResultExt;
use std::marker::PhantomData;
use std::path::Path;

/// A template checked against a typed model on load, but kept as an untyped document.
///
/// All edits go through `document`, so fields the typed model doesn't know about survive.
/// `raw` is the source text, for verbatim copies.
#[derive(Clone, Debug)]
pub struct Template<T> {
    pub raw: String,
    pub document: Document,
    _kind: PhantomData<T>,
}

impl<T> Template<T>
where
    T: DeserializeOwned,
{
    pub fn load(path: &Path) -> Result<Self> {
        let raw = read_input(path)?;
        let value: Value = serde_yaml::from_str(&raw).context(ParseDocument { path })?;
        serde_yaml::from_value::<T>(value.clone()).context(ParseDocument { path })?;

        Ok(Self {
            raw,
            document: Document::new(path, value),
            _kind: PhantomData,
        })
    }

    pub fn name(&self) -> Result<&str> {
        self.document.get_str(&["metadata", "name"])
    }
}

/// Shape of either a `Role` or a `ClusterRole`.
#[derive(Clone, Debug, Deserialize)]
pub struct RuleSet {
    pub metadata: ObjectMeta,
    pub rules: Vec<PolicyRule>,
}

/// All base templates, loaded up front.
#[derive(Clone, Debug)]
pub struct Templates {
    pub crd: Document,
    pub csv: Document,
    pub role: Template<RuleSet>,
    pub role_binding: Template<Value>,
    pub service_account: Template<ServiceAccount>,
    pub deployment: Template<Deployment>,
}

impl Templates {
    pub fn load(layout: &Layout) -> Result<Self> {
        Ok(Self {
            crd: Document::load(&layout.crd_template())?,
            csv: Document::load(&layout.csv_template())?,
            role: Template::load(&layout.role())?,
            role_binding: Template::load(&layout.role_binding())?,
            service_account: Template::load(&layout.service_account())?,
            deployment: Template::load(&layout.deployment())?,
        })
    }
}
