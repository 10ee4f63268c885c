use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("required input {} does not exist", path.display()))]
    MissingInput { path: PathBuf },

    #[snafu(display("field '{}' is missing in {}", field, path.display()))]
    MissingField { path: PathBuf, field: String },

    #[snafu(display("field '{}' in {} is not a mapping", field, path.display()))]
    NotAMapping { path: PathBuf, field: String },

    #[snafu(display("field '{}' in {} is not a sequence", field, path.display()))]
    NotASequence { path: PathBuf, field: String },

    #[snafu(display("deployment in {} has no container", path.display()))]
    MissingContainer { path: PathBuf },

    #[snafu(display("example custom resource in {} must be a mapping", path.display()))]
    InvalidExample { path: PathBuf },

    #[snafu(display("failed to read {}: {}", path.display(), source))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {}", path.display(), source))]
    ParseDocument {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[snafu(display("invalid configuration in {}: {}", path.display(), source))]
    InvalidConfig {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[snafu(display("failed to encode {} as YAML: {}", path.display(), source))]
    EncodeDocument {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[snafu(display("failed to encode embedded JSON payload: {}", source))]
    EncodeJson { source: serde_json::Error },

    #[snafu(display("failed to decode embedded JSON payload: {}", source))]
    DecodeJson { source: serde_json::Error },

    #[snafu(display("failed to write {}: {}", path.display(), source))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to copy {} to {}: {}", from.display(), to.display(), source))]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to create directory {}: {}", path.display(), source))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to read directory {}: {}", path.display(), source))]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to remove {}: {}", path.display(), source))]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to remove directory {}: {}", path.display(), source))]
    RemoveDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
