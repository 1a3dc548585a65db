/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “TROPO” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::path::PathBuf;

use clap::Parser;
use tropo_orbits::{errors::Result, OrbitConfig, OrbitResolver};

#[derive(Parser)]
#[command(about="spacecraft orbit file download tool")]
struct Args {
    /// filename of orbit source config file (RON), use built-in sources if not set
    #[arg(short,long)]
    config: Option<String>,

    /// directory where to store the downloaded orbit files
    #[arg(short,long,default_value=".")]
    dir: PathBuf,

    /// run verbose
    #[arg(short,long)]
    verbose: bool,

    /// scene/product identifiers to acquire orbit coverage for
    #[arg(required=true)]
    scene_ids: Vec<String>,
}

#[tokio::main(flavor="current_thread")]
async fn main () -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_max_level( level).init();

    let config: OrbitConfig = match &args.config {
        Some(path) => tropo_common::load_config_path( path)?,
        None => OrbitConfig::default()
    };

    let resolver = OrbitResolver::new( config)?;
    let files = resolver.fetch_scene_orbits( &args.scene_ids, &args.dir).await?;

    for file in &files {
        println!("{}", file.display());
    }
    Ok(())
}
