// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::Error;
use crate::models::{CategorySets, Profile};
use crate::session::ensure_active_profile;
use crate::storage::Store;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Result};
use serde::Serialize;
use uuid::Uuid;

pub fn handle(store: impl Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(&store, sub)?,
        Some(("list", sub)) => list(&store, sub)?,
        Some(("switch", sub)) => switch(&store, sub)?,
        Some(("rename", sub)) => rename(&store, sub)?,
        Some(("rm", sub)) => rm(&store, sub)?,
        _ => {}
    }
    Ok(())
}

fn find_by_name(store: &impl Store, name: &str) -> Result<Profile> {
    let profiles = store.list_profiles()?;
    match profiles.into_iter().find(|p| p.name == name) {
        Some(p) => Ok(p),
        None => bail!("No profile named '{}'", name),
    }
}

fn add(store: &impl Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        name: name.clone(),
    };
    store.create_profile(&profile)?;
    // New profiles start from the default category lists; nothing is copied
    // from any other profile.
    store.save_categories(&profile.id, &CategorySets::defaults())?;
    store.set_active_profile(&profile.id)?;
    println!("Created profile '{}' and switched to it", name);
    Ok(())
}

#[derive(Serialize)]
struct ProfileRow {
    name: String,
    active: bool,
}

fn list(store: &impl Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let active = ensure_active_profile(store)?;
    let data: Vec<ProfileRow> = store
        .list_profiles()?
        .into_iter()
        .map(|p| ProfileRow {
            active: p.id == active.id,
            name: p.name,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|r| vec![r.name, if r.active { "*".into() } else { String::new() }])
            .collect();
        println!("{}", pretty_table(&["Profile", "Active"], rows));
    }
    Ok(())
}

fn switch(store: &impl Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let profile = find_by_name(store, name)?;
    store.set_active_profile(&profile.id)?;
    println!("Switched to profile '{}'", name);
    Ok(())
}

fn rename(store: &impl Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let to = sub.get_one::<String>("to").unwrap();
    let profile = find_by_name(store, name)?;
    store.rename_profile(&profile.id, to)?;
    println!("Renamed profile '{}' to '{}'", name, to);
    Ok(())
}

fn rm(store: &impl Store, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let profiles = store.list_profiles()?;
    if profiles.len() <= 1 {
        return Err(Error::LastProfile.into());
    }
    let victim = match profiles.iter().find(|p| p.name == name.as_str()) {
        Some(p) => p.clone(),
        None => bail!("No profile named '{}'", name),
    };
    let was_active = store.active_profile()? == Some(victim.id.clone());
    store.delete_profile(&victim.id)?;
    println!("Deleted profile '{}' and all of its data", name);
    if was_active {
        if let Some(survivor) = profiles.iter().find(|p| p.id != victim.id) {
            store.set_active_profile(&survivor.id)?;
            println!("Active profile is now '{}'", survivor.name);
        }
    }
    Ok(())
}
