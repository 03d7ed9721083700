/*
 *  build.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Stamps the build date and target triple into OUT_DIR/build_info.rs
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */
use chrono::Utc;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

fn main() -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR not set"))?;

    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    // cross builds for the Pi report e.g. armv7-unknown-linux-gnueabihf
    let target = env::var("TARGET").unwrap_or_default();

    fs::write(
        out_dir.join("build_info.rs"),
        format!(
            "pub const BUILD_DATE: &str = {build_date:?};\npub const BUILD_TARGET: &str = {target:?};\n"
        ),
    )?;

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
