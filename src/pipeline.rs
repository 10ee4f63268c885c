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

//! Load everything, transform in memory, then write everything.
//!
//! Nothing is written until all inputs are loaded and all outputs are rendered, so a broken
//! input never leaves a half updated set of manifests behind.

use crate::bundle::Bundle;
use crate::catalog;
use crate::config::Config;
use crate::crd;
use crate::deploy::DeploySet;
use crate::document::{Document, Generated};
use crate::error::{MissingInput, Result};
use crate::image::ImageRef;
use crate::layout::Layout;
use crate::templates::Templates;
use snafu::ensure;

#[derive(Clone, Debug)]
pub struct Inputs {
    pub config: Config,
    pub templates: Templates,
    pub catalog_source: Document,
    pub subscription: Document,
}

impl Inputs {
    pub fn load(layout: &Layout) -> Result<Self> {
        let config = Config::load(&layout.config())?;
        let templates = Templates::load(layout)?;

        let samples = layout.samples();
        ensure!(samples.is_dir(), MissingInput { path: samples });
        for dir in layout.output_dirs() {
            ensure!(dir.is_dir(), MissingInput { path: dir });
        }

        Ok(Self {
            config,
            templates,
            catalog_source: Document::load(&layout.dev_catalog_source())?,
            subscription: Document::load(&layout.dev_subscription())?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Outputs {
    pub deploy: DeploySet,
    pub bundle: Bundle,
    pub catalog_source: Generated,
    pub subscription: Generated,
}

impl Outputs {
    pub fn write(&self) -> Result<()> {
        self.deploy.write()?;
        self.bundle.write()?;
        self.catalog_source.write()?;
        self.subscription.write()
    }
}

pub fn assemble(layout: &Layout, inputs: &Inputs) -> Result<Outputs> {
    let Inputs {
        config, templates, ..
    } = inputs;

    let crd = crd::normalize(&templates.crd)?;
    let deploy = DeploySet::build(
        layout,
        templates,
        &crd,
        &ImageRef::public_operator(&config.operator),
    )?;
    let bundle = Bundle::build(layout, config, templates, &crd)?;
    let catalog_source = catalog::update_catalog_source(&inputs.catalog_source, &config.bundle)?;
    let subscription = catalog::update_subscription(&inputs.subscription, &bundle.name)?;

    Ok(Outputs {
        deploy,
        bundle,
        catalog_source,
        subscription,
    })
}

pub fn run(layout: &Layout) -> Result<()> {
    log::info!("Building manifests in {}", layout.root().display());

    let inputs = Inputs::load(layout)?;
    let outputs = assemble(layout, &inputs)?;
    outputs.write()?;

    log::info!("All manifests written");

    Ok(())
}
