// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;

use texel_core::fetch::{FetchError, ImageFetcher};
use texel_infra::FileImageFetcher;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

#[test]
fn test_reads_files_below_the_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("textures")).unwrap();
    fs::write(dir.path().join("textures/brick.png"), b"not really a png").unwrap();
    let fetcher = FileImageFetcher::new(dir.path());

    let bytes = runtime()
        .block_on(fetcher.fetch("textures/brick.png"))
        .unwrap();

    assert_eq!(bytes, b"not really a png");
    assert_eq!(fetcher.root(), dir.path());
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = FileImageFetcher::new(dir.path());

    let err = runtime().block_on(fetcher.fetch("nope.png")).unwrap_err();

    assert_eq!(
        err,
        FetchError::NotFound {
            locator: "nope.png".to_owned()
        }
    );
}

#[test]
fn test_locators_cannot_leave_the_root() {
    let dir = tempfile::tempdir().unwrap();
    let inner = dir.path().join("assets");
    fs::create_dir(&inner).unwrap();
    fs::write(dir.path().join("secret.png"), b"outside").unwrap();
    let fetcher = FileImageFetcher::new(&inner);

    let err = runtime()
        .block_on(fetcher.fetch("../secret.png"))
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
}

#[test]
fn test_directory_is_a_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("folder")).unwrap();
    let fetcher = FileImageFetcher::new(dir.path());

    let err = runtime().block_on(fetcher.fetch("folder")).unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
}
