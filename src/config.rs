use crate::document::read_input;
use crate::error::{InvalidConfig, Result};
use serde::{de, Deserialize, Deserializer};
use snafu::ResultExt;
use std::fmt;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub operator: OperatorInfo,
    pub bundle: BundleInfo,
}

/// Version, release and image coordinates of the operator itself.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OperatorInfo {
    #[serde(deserialize_with = "scalar")]
    pub version: String,
    #[serde(deserialize_with = "scalar")]
    pub release: String,
    pub repo: String,
    pub image_name: String,
    #[serde(deserialize_with = "scalar")]
    pub core_image_tag: String,
    /// Repository used for the plain Kubernetes deploy set, if different
    #[serde(default)]
    pub public_repo: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BundleInfo {
    #[serde(deserialize_with = "scalar")]
    pub version: String,
    #[serde(deserialize_with = "scalar")]
    pub release: String,
    pub dev: IndexImageInfo,
    #[serde(rename = "alm-example")]
    pub alm_example: serde_yaml::Value,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct IndexImageInfo {
    pub index_image_name: String,
    #[serde(deserialize_with = "scalar")]
    pub bundle_build: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_input(path)?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context(InvalidConfig { path })
    }
}

/// Accepts strings and integers. Floats are refused, as `2.10` would turn into `2.1`.
fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> de::Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Err(E::custom(format!(
                "found the number {}, quote version values to keep them intact",
                v
            )))
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

#[cfg(test)]
mod test {

    use super::*;

    const CONFIG: &str = include_str!("../manifests/config.yaml");

    #[test]
    fn test_load_shipped_config() {
        let config = Config::parse(Path::new("config.yaml"), CONFIG).unwrap();

        assert_eq!(config.operator.image_name, "nvmesh-operator");
        assert_eq!(
            config.operator.public_repo.as_deref(),
            Some("docker.io/excelero")
        );
        assert_eq!(config.bundle.alm_example["kind"], "NVMesh");
    }

    #[test]
    fn test_integer_release() {
        let config = Config::parse(
            Path::new("config.yaml"),
            r#"
operator: {version: "2.0", release: 1, repo: r, image_name: i, core_image_tag: "2.5.0-1"}
bundle: {version: "2.0.1", release: 3, dev: {index_image_name: idx, bundle_build: 7}, alm-example: {}}
"#,
        )
        .unwrap();

        assert_eq!(config.operator.release, "1");
        assert_eq!(config.bundle.release, "3");
        assert_eq!(config.bundle.dev.bundle_build, "7");
        assert_eq!(config.operator.public_repo, None);
    }

    #[test]
    fn test_float_version_rejected() {
        let err = Config::parse(
            Path::new("config.yaml"),
            r#"
operator: {version: 2.10, release: "1", repo: r, image_name: i, core_image_tag: t}
bundle: {version: "2.0.1", release: "3", dev: {index_image_name: idx, bundle_build: "7"}, alm-example: {}}
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("quote"), "{}", err);
    }

    #[test]
    fn test_missing_version() {
        let err = Config::parse(
            Path::new("config.yaml"),
            r#"
operator: {release: "1", repo: r, image_name: i, core_image_tag: t}
bundle: {version: "2.0.1", release: "3", dev: {index_image_name: idx, bundle_build: "7"}, alm-example: {}}
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("version"), "{}", err);
    }
}
