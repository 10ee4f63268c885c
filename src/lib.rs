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

//! Builds the NVMesh operator manifests: the plain Kubernetes deploy set, the operator
//! bundle, and the dev catalog source and subscription.

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod crd;
pub mod deploy;
pub mod document;
pub mod error;
pub mod example;
pub mod image;
pub mod layout;
pub mod pipeline;
pub mod templates;

pub use error::{Error, Result};
pub use layout::Layout;

/// Prefix of all derived resource names.
pub const PRODUCT: &str = "nvmesh";
