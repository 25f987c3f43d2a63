// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod currency;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod importer;
pub mod profiles;
pub mod reports;
pub mod stats;
pub mod transactions;
