/*
 * Copyright (c) 2021 Excelero Ltd.
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Eclipse Public License 2.0 which is available at
 * http://www.eclipse.org/legal/epl-2.0
 *
 * SPDX-License-Identifier: EPL-2.0
 */
use crate::error::{DecodeJson, EncodeDocument, EncodeJson, InvalidExample, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_yaml::Value;
use snafu::{ensure, ResultExt};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::Path;

/// Status of the NVMesh custom resource, as the bundle validation expects it on examples.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NVMeshStatus {
    pub actions_status: BTreeMap<String, BTreeMap<String, String>>,
    pub reconcile_status: BTreeMap<String, String>,
}

/// Takes the configured example resource and attaches an empty status.
pub fn example_resource(config_path: &Path, example: &Value) -> Result<Value> {
    ensure!(example.is_mapping(), InvalidExample { path: config_path });

    let mut example = example.clone();
    example["status"] =
        serde_yaml::to_value(NVMeshStatus::default()).context(EncodeDocument { path: config_path })?;

    Ok(example)
}

/// A value that is stored as a compact JSON string inside another document.
#[derive(Debug, PartialEq)]
pub struct EmbeddedJson<T> {
    encoded: String,
    _marker: PhantomData<T>,
}

impl<T> EmbeddedJson<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn encode(value: &T) -> Result<Self> {
        Ok(Self {
            encoded: serde_json::to_string(value).context(EncodeJson)?,
            _marker: PhantomData,
        })
    }

    pub fn from_encoded<S>(encoded: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            encoded: encoded.into(),
            _marker: PhantomData,
        }
    }

    pub fn decode(&self) -> Result<T> {
        serde_json::from_str(&self.encoded).context(DecodeJson)
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl<T> From<EmbeddedJson<T>> for Value {
    fn from(json: EmbeddedJson<T>) -> Self {
        Value::String(json.encoded)
    }
}

/// The `alm-examples` annotation: a JSON list of example resources.
pub type AlmExamples = EmbeddedJson<Vec<Value>>;
