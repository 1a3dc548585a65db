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
#![allow(unused)]

use std::fs::{self,File,OpenOptions};
use std::io::{self,Read,Write,Error as IOError,ErrorKind};
use std::path::{Path,PathBuf};
use io::ErrorKind::*;

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn extension<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str())
}

pub fn filestem<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

pub fn file_contents_as_string (file: &mut fs::File) -> Result<String> {
    let len = file.metadata()?.len();
    let mut contents = String::with_capacity(len as usize);
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open(path)?;
    file_contents_as_string( &mut file)
}

pub fn filepath_contents <P: AsRef<Path>> (path: &P) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut contents: Vec<u8> = Vec::with_capacity(len as usize);
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

pub fn file_length (path: impl AsRef<Path>) -> Option<u64> {
    fs::metadata( path.as_ref()).ok().map(|md| md.len())
}

pub fn path_to_lossy_string (path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().as_ref().to_string()
}

/// create an empty file that is only readable/writable by the owning user.
/// The invariant holds from creation on - permissions are set before anything is stored in the file
pub fn create_private_file (path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();

    #[cfg(unix)] {
        use std::os::unix::fs::OpenOptionsExt;
        OpenOptions::new().write(true).create_new(true).mode(0o600).open(path)
    }
    #[cfg(not(unix))] {
        OpenOptions::new().write(true).create_new(true).open(path)
    }
}

/// restrict an existing file to owner read/write
pub fn set_owner_only_permissions (path: impl AsRef<Path>) -> Result<()> {
    #[cfg(unix)] {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions( path.as_ref(), fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

pub fn store_string_in_file (path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let mut file = File::create( path.as_ref())?;
    file.write_all( contents.as_bytes())?;
    file.flush()
}
