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

use nvmesh_manifests::{pipeline, Layout};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let root = std::env::var_os("MANIFESTS_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    pipeline::run(&Layout::new(root))?;

    Ok(())
}
