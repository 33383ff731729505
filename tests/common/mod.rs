#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const PACKAGE_ID: &str = "jp.aramaa.ochibi-chans-converter-tool";

/// Listing with a single 0.3.1 release, formatted the way the tool writes
pub const LISTING: &str = r#"{
    "name": "aramaa VPM Repository",
    "id": "jp.aramaa.vpm",
    "url": "https://aramaa.github.io/vpm-repos/vpm.json",
    "author": "aramaa",
    "packages": {
        "jp.aramaa.ochibi-chans-converter-tool": {
            "versions": {
                "0.3.1": {
                    "name": "jp.aramaa.ochibi-chans-converter-tool",
                    "displayName": "おちびちゃんズ化ツール",
                    "version": "0.3.1",
                    "unity": "2022.3",
                    "url": "https://github.com/aramaa/ochibi-chans-converter-tool/releases/download/0.3.1/ochibi-chans-converter-tool-0.3.1.zip",
                    "vpmDependencies": {
                        "com.vrchat.avatars": ">=3.5.0"
                    }
                }
            }
        }
    }
}
"#;

/// `LISTING` after adding 0.3.2
pub const LISTING_WITH_0_3_2: &str = r#"{
    "name": "aramaa VPM Repository",
    "id": "jp.aramaa.vpm",
    "url": "https://aramaa.github.io/vpm-repos/vpm.json",
    "author": "aramaa",
    "packages": {
        "jp.aramaa.ochibi-chans-converter-tool": {
            "versions": {
                "0.3.1": {
                    "name": "jp.aramaa.ochibi-chans-converter-tool",
                    "displayName": "おちびちゃんズ化ツール",
                    "version": "0.3.1",
                    "unity": "2022.3",
                    "url": "https://github.com/aramaa/ochibi-chans-converter-tool/releases/download/0.3.1/ochibi-chans-converter-tool-0.3.1.zip",
                    "vpmDependencies": {
                        "com.vrchat.avatars": ">=3.5.0"
                    }
                },
                "0.3.2": {
                    "name": "jp.aramaa.ochibi-chans-converter-tool",
                    "displayName": "おちびちゃんズ化ツール",
                    "version": "0.3.2",
                    "unity": "2022.3",
                    "url": "https://github.com/aramaa/ochibi-chans-converter-tool/releases/download/0.3.2/ochibi-chans-converter-tool-0.3.2.zip",
                    "vpmDependencies": {
                        "com.vrchat.avatars": ">=3.5.0"
                    }
                }
            }
        }
    }
}
"#;

/// Write `contents` to `dir/name` and return the path
pub fn write_listing(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Version keys of the default package, in document order
pub fn version_keys(text: &str) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_str(text).unwrap();
    value["packages"][PACKAGE_ID]["versions"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect()
}
