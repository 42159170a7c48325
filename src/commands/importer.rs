// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::fs;

use crate::store::Ledger;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    let file = m.get_one::<String>("file").unwrap();
    let doc = fs::read_to_string(file).with_context(|| format!("Read backup '{}'", file))?;
    ledger.restore(&doc)?;
    println!("Restored backup from {}", file);
    Ok(())
}
