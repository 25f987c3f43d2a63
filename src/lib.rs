// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod fx;
pub mod ledger;
pub mod models;
pub mod session;
pub mod stats;
pub mod storage;
pub mod utils;
