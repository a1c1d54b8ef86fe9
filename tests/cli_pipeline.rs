//! The patch, icons and init-layout commands against a template project on disk.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use webwrap::commands;
use webwrap_core::ProjectLayout;
use webwrap_core::icon::ScaleMode;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.myexampoint.webtoapp">
    <application
        android:icon="@mipmap/ic_launcher"
        android:label="WebToApp"
        android:roundIcon="@mipmap/ic_launcher_round">
        <activity android:name=".MainActivity" android:label="WebToApp" />
    </application>
</manifest>
"#;

const BUILD_GRADLE: &str = r#"android {
    namespace 'com.myexampoint.webtoapp'
    defaultConfig {
        applicationId "com.myexampoint.webtoapp"
        minSdk 21
    }
}
"#;

const ACTIVITY: &str = r#"package com.myexampoint.webtoapp;

import android.app.Activity;

public class MainActivity extends Activity {
    String myurl = "https://abduznik.github.io/tomermeme/";
}
"#;

fn template() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let main = root.join("app/src/main");
    fs::create_dir_all(main.join("java/com/myexampoint/webtoapp")).unwrap();
    fs::write(main.join("AndroidManifest.xml"), MANIFEST).unwrap();
    fs::write(root.join("app/build.gradle"), BUILD_GRADLE).unwrap();
    fs::write(main.join("java/com/myexampoint/webtoapp/MainActivity.java"), ACTIVITY).unwrap();
    for sub in ["mipmap-mdpi", "mipmap-anydpi-v26"] {
        fs::create_dir_all(main.join("res").join(sub)).unwrap();
    }
    fs::write(main.join("res/mipmap-mdpi/ic_launcher.webp"), b"old").unwrap();
    fs::write(main.join("res/mipmap-anydpi-v26/ic_launcher.xml"), "<adaptive-icon/>").unwrap();
    dir
}

fn icon_file(dir: &Path) -> PathBuf {
    let path = dir.join("logo.png");
    RgbaImage::from_pixel(64, 64, Rgba([0, 128, 255, 255]))
        .save(&path)
        .unwrap();
    path
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn patch_relocates_into_new_package() {
    let dir = template();
    let root = dir.path();

    commands::patch::run(root, None, "Test App", "https://x.test", Some("testapp123")).unwrap();

    let manifest = read(root, "app/src/main/AndroidManifest.xml");
    assert_eq!(manifest.matches(r#"android:label="Test App""#).count(), 2);
    assert!(manifest.contains(r#"package="com.testapp123""#));
    assert!(manifest.contains("xmlns:android="));

    let gradle = read(root, "app/build.gradle");
    assert!(gradle.contains(r#"applicationId "com.testapp123""#));
    assert!(gradle.contains("namespace 'com.myexampoint.webtoapp'"));

    let source = read(root, "app/src/main/java/com/testapp123/MainActivity.java");
    assert!(source.starts_with("package com.testapp123;"));
    assert!(source.contains(r#"String myurl = "https://x.test";"#));
    assert!(!root.join("app/src/main/java/com/myexampoint").exists());
}

#[test]
fn patch_then_repatch_moves_again() {
    let dir = template();
    let root = dir.path();

    commands::patch::run(root, None, "First", "https://one.test", Some("first")).unwrap();
    commands::patch::run(root, None, "Second", "https://two.test", Some("second.app")).unwrap();

    let source = read(root, "app/src/main/java/com/second/app/MainActivity.java");
    assert!(source.contains("package com.second.app;"));
    assert!(source.contains(r#""https://two.test""#));
    assert!(!root.join("app/src/main/java/com/first").exists());
    assert!(read(root, "app/src/main/AndroidManifest.xml").contains(r#"package="com.second.app""#));
}

#[test]
fn label_with_markup_is_escaped() {
    let dir = template();
    let root = dir.path();

    commands::patch::run(root, None, r#"Tom & "Jerry""#, "https://x.test", None).unwrap();

    let manifest = read(root, "app/src/main/AndroidManifest.xml");
    assert!(manifest.contains(r#"android:label="Tom &amp; &quot;Jerry&quot;""#));
}

#[test]
fn icons_replace_stale_files_and_keep_adaptive_xml() {
    let dir = template();
    let root = dir.path();
    let icon = icon_file(root);

    let report = commands::icons::run(root, None, &icon, ScaleMode::Identical).unwrap();

    assert_eq!(report.removed, 1);
    assert_eq!((report.width, report.height), (64, 64));
    let res = root.join("app/src/main/res");
    assert!(!res.join("mipmap-mdpi/ic_launcher.webp").exists());
    assert!(res.join("mipmap-anydpi-v26/ic_launcher.xml").exists());
    for density in ["mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"] {
        let dir = res.join(format!("mipmap-{}", density));
        for name in ["ic_launcher.png", "ic_launcher_foreground.png", "ic_launcher_round.png"] {
            assert!(dir.join(name).is_file(), "{}/{} missing", density, name);
        }
    }
}

#[test]
fn custom_layout_drives_patching() {
    let dir = template();
    let root = dir.path();
    let layout_path = root.join("layout.json");

    commands::init_layout::run(&layout_path, false).unwrap();
    let mut layout = ProjectLayout::load(&layout_path).unwrap();
    layout.url_variable = "homePage".to_string();
    layout.save(&layout_path).unwrap();

    let activity = root.join("app/src/main/java/com/myexampoint/webtoapp/MainActivity.java");
    fs::write(&activity, ACTIVITY.replace("myurl", "homePage")).unwrap();

    commands::patch::run(root, Some(&layout_path), "A", "https://a.test", None).unwrap();
    assert!(fs::read_to_string(&activity)
        .unwrap()
        .contains(r#"String homePage = "https://a.test";"#));
}

#[test]
fn missing_url_variable_is_reported() {
    let dir = template();
    let root = dir.path();
    let activity = root.join("app/src/main/java/com/myexampoint/webtoapp/MainActivity.java");
    fs::write(&activity, ACTIVITY.replace("myurl", "other")).unwrap();

    let err = commands::patch::run(root, None, "A", "https://a.test", None).unwrap_err();
    assert!(err.to_string().contains("MainActivity.java"));
}
