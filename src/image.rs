use crate::config::OperatorInfo;
use std::fmt;

/// Container image reference of the operator: `{repository}/{name}:{version}-{release}`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    pub fn operator(info: &OperatorInfo) -> Self {
        Self {
            repository: info.repo.clone(),
            name: info.image_name.clone(),
            tag: format!("{}-{}", info.version, info.release),
        }
    }

    /// The image as published for plain `kubectl` deployments.
    pub fn public_operator(info: &OperatorInfo) -> Self {
        let image = Self::operator(info);
        match &info.public_repo {
            Some(repo) => image.with_repository(repo),
            None => image,
        }
    }

    pub fn with_repository<S>(self, repository: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            repository: repository.into(),
            ..self
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}:{}", self.repository, self.name, self.tag)
    }
}
