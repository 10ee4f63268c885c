use std::path::{Path, PathBuf};

/// Where inputs are read from and outputs written to, relative to a root directory.
#[derive(Clone, Debug)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn manifests(&self) -> PathBuf {
        self.root.join("manifests")
    }

    fn bases(&self) -> PathBuf {
        self.manifests().join("bases")
    }

    pub fn config(&self) -> PathBuf {
        self.manifests().join("config.yaml")
    }

    // inputs

    pub fn crd_template(&self) -> PathBuf {
        self.bases().join("crd").join("nvmesh.crd.yaml")
    }

    pub fn csv_template(&self) -> PathBuf {
        self.bases().join("csv").join("csv.yaml")
    }

    pub fn role(&self) -> PathBuf {
        self.bases().join("rbac").join("role.yaml")
    }

    pub fn role_binding(&self) -> PathBuf {
        self.bases().join("rbac").join("role_binding.yaml")
    }

    pub fn service_account(&self) -> PathBuf {
        self.bases().join("extra").join("service_account.yaml")
    }

    pub fn deployment(&self) -> PathBuf {
        self.bases().join("operator").join("deployment.yaml")
    }

    pub fn samples(&self) -> PathBuf {
        self.bases().join("samples")
    }

    // plain kubernetes deploy set, prefixed in apply order

    pub fn deploy_dir(&self) -> PathBuf {
        self.root.join("deploy")
    }

    pub fn deploy_crd(&self) -> PathBuf {
        self.deploy_dir().join("010_nvmesh_crd.yaml")
    }

    pub fn deploy_service_account(&self) -> PathBuf {
        self.deploy_dir().join("020_service_account.yaml")
    }

    pub fn deploy_role(&self) -> PathBuf {
        self.deploy_dir().join("030_role.yaml")
    }

    pub fn deploy_role_binding(&self) -> PathBuf {
        self.deploy_dir().join("040_role_binding.yaml")
    }

    pub fn deploy_deployment(&self) -> PathBuf {
        self.deploy_dir().join("050_operator-deployment.yaml")
    }

    pub fn deploy_samples(&self) -> PathBuf {
        self.deploy_dir().join("samples")
    }

    // operator bundle

    fn operator_hub(&self) -> PathBuf {
        self.root.join("operator-hub")
    }

    pub fn bundle_manifests_dir(&self) -> PathBuf {
        self.operator_hub().join("catalog_bundle").join("manifests")
    }

    pub fn bundle_csv(&self) -> PathBuf {
        self.bundle_manifests_dir()
            .join("cluster_service_version.yaml")
    }

    pub fn bundle_crd(&self) -> PathBuf {
        self.bundle_manifests_dir().join("nvmesh_crd.yaml")
    }

    // dev environment

    pub fn dev_dir(&self) -> PathBuf {
        self.operator_hub().join("dev")
    }

    pub fn dev_example_cr(&self) -> PathBuf {
        self.dev_dir().join("alm_example_cr.yaml")
    }

    pub fn dev_catalog_source(&self) -> PathBuf {
        self.dev_dir().join("catalog_source.yaml")
    }

    pub fn dev_subscription(&self) -> PathBuf {
        self.dev_dir().join("subscription.yaml")
    }

    /// Directories that must exist before anything gets written.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.deploy_dir(),
            self.bundle_manifests_dir(),
            self.dev_dir(),
        ]
    }
}
