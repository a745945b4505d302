use std::fs;
use std::path::Path;

use faixa_lib::build_index;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"img").unwrap();
}

#[test]
fn missing_root_gives_empty_index() {
    let dir = tempfile::tempdir().unwrap();
    let index = build_index(&dir.path().join("does-not-exist"));
    assert!(index.is_empty());
    assert_eq!(index.folder_count(), 0);
    assert!(index.folders("HONDA").is_empty());
}

#[test]
fn indexes_image_folders_below_brand() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "Honda/CG 160/Fan/azul.jpg");
    touch(root, "Honda/CG 160/Fan/preta.PNG");
    touch(root, "Honda/CG 160/Fan/notes.txt");
    touch(root, "Honda/Biz/125/vermelha.jpeg");
    touch(root, "Yamaha/Fazer 250/Azul/lateral.jpg");

    let index = build_index(root);
    assert_eq!(index.brand_count(), 2);
    assert_eq!(index.folder_count(), 3);
    assert_eq!(index.image_count(), 4);

    let honda = index.folders("honda");
    assert_eq!(honda.len(), 2);
    assert_eq!(honda[0].path, "Honda/Biz/125");
    assert_eq!(honda[0].normalized_key, "BIZ 125");
    assert_eq!(honda[1].path, "Honda/CG 160/Fan");
    assert_eq!(honda[1].normalized_key, "CG 160 FAN");
    assert_eq!(honda[1].images, vec!["azul.jpg", "preta.PNG"]);
}

#[test]
fn nested_image_folders_are_indexed_independently() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "Suzuki/Hayabusa/capa.jpg");
    touch(root, "Suzuki/Hayabusa/2008/Azul/tanque.jpg");

    let index = build_index(root);
    let folders = index.folders("SUZUKI");
    let keys: Vec<&str> = folders.iter().map(|f| f.normalized_key.as_str()).collect();
    assert_eq!(keys, vec!["HAYABUSA", "HAYABUSA 2008 AZUL"]);
    assert_eq!(folders[1].images, vec!["tanque.jpg"]);
}

#[test]
fn brand_key_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Citroën/C3/foto.jpg");
    let index = build_index(dir.path());
    assert_eq!(index.folders("CITROEN").len(), 1);
    assert_eq!(index.folders("citroën").len(), 1);
}

#[cfg(unix)]
#[test]
fn symlinked_folders_are_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "Honda/CG 160/azul.jpg");
    std::os::unix::fs::symlink(root.join("Honda"), root.join("Honda/CG 160/loop")).unwrap();

    let index = build_index(root);
    assert_eq!(index.folder_count(), 1);
    assert_eq!(index.folders("HONDA")[0].path, "Honda/CG 160");
}
