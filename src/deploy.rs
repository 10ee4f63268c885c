use crate::document::{with_header, Document, Generated};
use crate::error::{
    CopyFile, CreateDir, MissingContainer, NotASequence, ReadDir, RemoveDir, RemoveFile, Result,
};
use crate::image::ImageRef;
use crate::layout::Layout;
use crate::templates::Templates;
use serde_yaml::{Mapping, Value};
use snafu::{OptionExt, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

const CONTAINERS: &[&str] = &["spec", "template", "spec", "containers"];

/// Manifests for installing the operator with plain `kubectl apply`.
#[derive(Clone, Debug)]
pub struct DeploySet {
    pub files: Vec<Generated>,
    pub samples: SamplesMirror,
}

impl DeploySet {
    pub fn build(
        layout: &Layout,
        templates: &Templates,
        crd: &Document,
        image: &ImageRef,
    ) -> Result<Self> {
        let mut deployment = templates.deployment.document.clone();
        set_operator_image(&mut deployment, image)?;

        let files = vec![
            Generated::from_document(&layout.deploy_crd(), crd)?,
            Generated::new(
                layout.deploy_service_account(),
                with_header(&templates.service_account.raw),
            ),
            Generated::new(layout.deploy_role(), with_header(&templates.role.raw)),
            Generated::new(
                layout.deploy_role_binding(),
                with_header(&templates.role_binding.raw),
            ),
            Generated::from_document(&layout.deploy_deployment(), &deployment)?,
        ];

        log::info!(
            "Prepared {} deploy manifests, operator image {}",
            files.len(),
            image
        );

        Ok(Self {
            files,
            samples: SamplesMirror {
                source: layout.samples(),
                target: layout.deploy_samples(),
            },
        })
    }

    pub fn write(&self) -> Result<()> {
        for file in &self.files {
            file.write()?;
        }
        self.samples.apply()
    }
}

/// The container running the operator: the first one of the pod.
fn operator_container(deployment: &mut Document) -> Result<&mut Mapping> {
    let path = deployment.path().to_path_buf();
    deployment
        .get_mut(CONTAINERS)?
        .as_sequence_mut()
        .and_then(|containers| containers.first_mut())
        .and_then(Value::as_mapping_mut)
        .context(MissingContainer { path })
}

pub fn set_operator_image(deployment: &mut Document, image: &ImageRef) -> Result<()> {
    operator_container(deployment)?.insert("image".into(), image.to_string().into());
    Ok(())
}

/// Appends to the operator container's arguments, creating the list if needed.
pub fn append_operator_args(deployment: &mut Document, args: Vec<String>) -> Result<()> {
    let path = deployment.path().to_path_buf();
    let container = operator_container(deployment)?;

    let key = Value::from("args");
    match container.get_mut(&key) {
        Some(Value::Sequence(existing)) => {
            existing.extend(args.into_iter().map(Value::from));
        }
        Some(Value::Null) | None => {
            container.insert(key, Value::Sequence(args.into_iter().map(Value::from).collect()));
        }
        Some(_) => {
            return NotASequence {
                path,
                field: "spec.template.spec.containers[0].args",
            }
            .fail()
        }
    }

    Ok(())
}

/// Replaces a directory with a copy of another one.
#[derive(Clone, Debug)]
pub struct SamplesMirror {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl SamplesMirror {
    pub fn apply(&self) -> Result<()> {
        if self.target.is_dir() {
            log::debug!("Removing {}", self.target.display());
            fs::remove_dir_all(&self.target).context(RemoveDir { path: &self.target })?;
        } else if self.target.exists() {
            log::debug!("Removing file {} in place of a directory", self.target.display());
            fs::remove_file(&self.target).context(RemoveFile { path: &self.target })?;
        }
        copy_dir(&self.source, &self.target)
    }
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir(to).context(CreateDir { path: to })?;

    for entry in fs::read_dir(from).context(ReadDir { path: from })? {
        let entry = entry.context(ReadDir { path: from })?;
        let source = entry.path();
        let target = to.join(entry.file_name());

        if entry.file_type().context(ReadDir { path: from })?.is_dir() {
            copy_dir(&source, &target)?;
        } else {
            log::debug!("Copying {} to {}", source.display(), target.display());
            fs::copy(&source, &target).context(CopyFile {
                from: &source,
                to: &target,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::config::Config;
    use crate::crd;
    use crate::document::GENERATED_HEADER;
    use crate::templates::fixtures;
    use k8s_openapi::api::apps::v1::Deployment;

    fn deployment(yaml: &str) -> Document {
        Document::new("deployment.yaml", serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn test_build_deploy_set() {
        let (_dir, layout) = fixtures::root();
        let templates = Templates::load(&layout).unwrap();
        let config = Config::load(&layout.config()).unwrap();
        let crd = crd::normalize(&templates.crd).unwrap();
        let image = ImageRef::public_operator(&config.operator);

        let set = DeploySet::build(&layout, &templates, &crd, &image).unwrap();

        let names: Vec<_> = set
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "010_nvmesh_crd.yaml",
                "020_service_account.yaml",
                "030_role.yaml",
                "040_role_binding.yaml",
                "050_operator-deployment.yaml",
            ]
        );

        for file in &set.files {
            assert!(file.contents.starts_with(GENERATED_HEADER));
        }
        assert!(!set.files[0].contents.contains("creationTimestamp"));
        assert_eq!(
            set.files[2].contents,
            format!("{}{}", GENERATED_HEADER, fixtures::ROLE)
        );

        let deployment: Deployment = serde_yaml::from_str(&set.files[4].contents).unwrap();
        let pod = deployment.spec.unwrap().template.spec.unwrap();
        let container = &pod.containers[0];
        assert_eq!(
            container.image.as_deref(),
            Some("docker.io/excelero/nvmesh-operator:1.0.0-1")
        );
        assert_eq!(
            container.args,
            Some(vec!["--enable-leader-election".to_string()])
        );
    }

    #[test]
    fn test_samples_mirror_drops_stale_files() {
        let (_dir, layout) = fixtures::root();
        let target = layout.deploy_samples();
        fs::create_dir_all(target.join("old")).unwrap();
        fs::write(target.join("stale.yaml"), "kind: Stale\n").unwrap();
        fs::write(target.join("old").join("nested.yaml"), "kind: Stale\n").unwrap();

        let mirror = SamplesMirror {
            source: layout.samples(),
            target: target.clone(),
        };
        mirror.apply().unwrap();

        let mut entries: Vec<_> = fs::read_dir(&target)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        entries.sort();

        assert_eq!(entries, vec!["nvmesh_v1_nvmesh.yaml"]);
        assert_eq!(
            fs::read_to_string(target.join("nvmesh_v1_nvmesh.yaml")).unwrap(),
            fixtures::SAMPLE
        );
    }

    #[test]
    fn test_samples_mirror_nested() {
        let (_dir, layout) = fixtures::root();
        let nested = layout.samples().join("extra");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("second.yaml"), "kind: NVMesh\n").unwrap();

        SamplesMirror {
            source: layout.samples(),
            target: layout.deploy_samples(),
        }
        .apply()
        .unwrap();

        assert!(layout.deploy_samples().join("extra/second.yaml").is_file());
    }

    #[test]
    fn test_samples_target_is_a_file() {
        let (_dir, layout) = fixtures::root();
        fs::write(layout.deploy_samples(), "not a directory\n").unwrap();

        SamplesMirror {
            source: layout.samples(),
            target: layout.deploy_samples(),
        }
        .apply()
        .unwrap();

        assert!(layout
            .deploy_samples()
            .join("nvmesh_v1_nvmesh.yaml")
            .is_file());
    }

    #[test]
    fn test_append_args() {
        let mut d = deployment(fixtures::DEPLOYMENT);
        append_operator_args(&mut d, vec!["--openshift".into()]).unwrap();

        assert_eq!(
            d.get(CONTAINERS).unwrap()[0]["args"],
            serde_yaml::from_str::<Value>("[--enable-leader-election, --openshift]").unwrap()
        );
    }

    #[test]
    fn test_append_args_without_list() {
        let mut d = deployment(&fixtures::DEPLOYMENT.replace(
            "        args:\n        - --enable-leader-election\n",
            "",
        ));
        append_operator_args(&mut d, vec!["--openshift".into()]).unwrap();

        assert_eq!(
            d.get(CONTAINERS).unwrap()[0]["args"],
            serde_yaml::from_str::<Value>("[--openshift]").unwrap()
        );
    }

    #[test]
    fn test_no_container() {
        let mut d = deployment(
            "apiVersion: apps/v1\nkind: Deployment\nspec:\n  template:\n    spec:\n      containers: []\n",
        );

        let image = ImageRef {
            repository: "repo".into(),
            name: "op".into(),
            tag: "1-1".into(),
        };

        assert!(matches!(
            set_operator_image(&mut d, &image),
            Err(crate::error::Error::MissingContainer { .. })
        ));
    }

    #[test]
    fn test_unknown_deployment_fields_kept() {
        let (_dir, layout) = fixtures::root();
        fs::write(
            layout.deployment(),
            fixtures::DEPLOYMENT
                .replace("  replicas: 1\n", "  replicas: 1\n  minReadySeconds: 5\n")
                .replace(
                    "      serviceAccountName:",
                    "      os:\n        name: linux\n      serviceAccountName:",
                ),
        )
        .unwrap();
        let templates = Templates::load(&layout).unwrap();
        let config = Config::load(&layout.config()).unwrap();
        let crd = crd::normalize(&templates.crd).unwrap();

        let set = DeploySet::build(
            &layout,
            &templates,
            &crd,
            &ImageRef::public_operator(&config.operator),
        )
        .unwrap();

        let out: Value = serde_yaml::from_str(&set.files[4].contents).unwrap();
        assert_eq!(out["spec"]["minReadySeconds"].as_u64(), Some(5));
        assert_eq!(out["spec"]["template"]["spec"]["os"]["name"], "linux");
        assert_eq!(
            out["spec"]["template"]["spec"]["containers"][0]["image"],
            "docker.io/excelero/nvmesh-operator:1.0.0-1"
        );
    }
}
