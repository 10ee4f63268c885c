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

use crate::config::{Config, OperatorInfo};
use crate::deploy::{append_operator_args, set_operator_image};
use crate::document::{render_object, Document, Generated};
use crate::example::{example_resource, AlmExamples};
use crate::error::{EncodeDocument, Result};
use crate::image::ImageRef;
use crate::layout::Layout;
use crate::templates::Templates;
use crate::PRODUCT;
use serde::Serialize;
use serde_yaml::Value;
use snafu::ResultExt;
use std::path::Path;

const ANNOTATION_ALM_EXAMPLES: &[&str] = &["metadata", "annotations", "alm-examples"];
const ANNOTATION_CONTAINER_IMAGE: &[&str] = &["metadata", "annotations", "containerImage"];
const INSTALL_DEPLOYMENTS: &[&str] = &["spec", "install", "spec", "deployments"];
const INSTALL_CLUSTER_PERMISSIONS: &[&str] = &["spec", "install", "spec", "clusterPermissions"];

/// Entry of `spec.install.spec.deployments`
#[derive(Serialize)]
struct InstallDeployment<'a> {
    name: &'a str,
    spec: &'a Value,
}

/// Entry of `spec.install.spec.clusterPermissions`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClusterPermission<'a> {
    service_account_name: &'a str,
    rules: &'a Value,
}

/// Name of the ClusterServiceVersion, which is also what subscriptions start from.
pub fn csv_name(bundle_version: &str) -> String {
    format!("{}-operator.{}", PRODUCT, bundle_version)
}

/// Arguments the bundled operator gets on top of the ones from the deployment template.
pub fn operator_args(info: &OperatorInfo) -> Vec<String> {
    vec![
        "--openshift".into(),
        format!("--core-image-tag={}", info.core_image_tag),
    ]
}

/// The operator bundle: the CSV, the CRD next to it, and the example resource for dev testing.
#[derive(Clone, Debug)]
pub struct Bundle {
    pub name: String,
    pub csv: Generated,
    pub crd: Generated,
    pub example: Generated,
}

impl Bundle {
    pub fn build(
        layout: &Layout,
        config: &Config,
        templates: &Templates,
        crd: &Document,
    ) -> Result<Self> {
        let csv_path = layout.bundle_csv();
        let image = ImageRef::operator(&config.operator);

        let mut deployment = templates.deployment.document.clone();
        set_operator_image(&mut deployment, &image)?;
        append_operator_args(&mut deployment, operator_args(&config.operator))?;

        let deployments = vec![InstallDeployment {
            name: templates.deployment.name()?,
            spec: deployment.get(&["spec"])?,
        }];
        let permissions = vec![ClusterPermission {
            service_account_name: templates.service_account.name()?,
            rules: templates.role.document.get(&["rules"])?,
        }];

        let example = example_resource(&layout.config(), &config.bundle.alm_example)?;
        let alm_examples = AlmExamples::encode(&vec![example.clone()])?;

        let name = csv_name(&config.bundle.version);

        let mut csv = Document::new(&csv_path, templates.csv.value().clone());
        csv.set(&["metadata", "name"], name.as_str())?;
        csv.set(ANNOTATION_ALM_EXAMPLES, alm_examples)?;
        csv.set(ANNOTATION_CONTAINER_IMAGE, image.to_string())?;
        csv.set(&["spec", "version"], config.operator.version.as_str())?;
        csv.set(INSTALL_DEPLOYMENTS, to_value(&csv_path, &deployments)?)?;
        csv.set(INSTALL_CLUSTER_PERMISSIONS, to_value(&csv_path, &permissions)?)?;

        log::info!("Prepared ClusterServiceVersion {} with image {}", name, image);

        Ok(Self {
            csv: Generated::from_document(&csv_path, &csv)?,
            crd: Generated::from_document(&layout.bundle_crd(), crd)?,
            example: Generated::new(
                layout.dev_example_cr(),
                render_object(&layout.dev_example_cr(), &example)?,
            ),
            name,
        })
    }

    pub fn write(&self) -> Result<()> {
        self.example.write()?;
        self.csv.write()?;
        println!(
            "ClusterServiceVersion file generated at {}",
            self.csv.path.display()
        );
        self.crd.write()
    }
}

fn to_value<T>(path: &Path, value: &T) -> Result<Value>
where
    T: Serialize,
{
    serde_yaml::to_value(value).context(EncodeDocument { path })
}
