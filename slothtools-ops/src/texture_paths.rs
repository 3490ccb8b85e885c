//! Rewriting texture file extensions to `.png`
//!
//! Paths are treated as plain strings: they may be relative to the scene
//! file (`//textures/bark.dds`) or use either slash style, so they are not
//! resolved against the filesystem.

use crate::report::OperatorReport;
use crate::Operator;
use slothtools_core::{Scene, TexturePathRewriter, ToolSettings};
use tracing::{debug, info};

const PNG_EXTENSION: &str = ".png";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Final path component
pub fn file_name(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Split `path` into everything before the extension and the extension itself
/// (dot included). Leading dots of the file name never start an extension.
pub fn split_extension(path: &str) -> (&str, &str) {
    let name_start = path.rfind(is_separator).map(|i| i + 1).unwrap_or(0);
    let name = &path[name_start..];
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => {
            path.split_at(name_start + dot)
        }
        _ => (path, ""),
    }
}

/// The `.png` variant of `path`, if its extension is one of `extensions`
/// (lowercase, dot included). Matching ignores case.
pub fn png_path(path: &str, extensions: &[&str]) -> Option<String> {
    let (stem, ext) = split_extension(path);
    if ext.is_empty() {
        return None;
    }
    let ext = ext.to_lowercase();
    if extensions.iter().any(|e| *e == ext) {
        Some(format!("{}{}", stem, PNG_EXTENSION))
    } else {
        None
    }
}

/// Rewrite every matching image texture path, renaming the node and the image
/// after the new file. Returns the number of textures rewritten.
///
/// Two images that land on the same file name get distinct names, the later
/// one suffixed `.001`, `.002`, ...
///
/// Images shared by several nodes are rewritten once; later nodes see the
/// `.png` path and are skipped.
pub fn remap_texture_paths<R: TexturePathRewriter + ?Sized>(
    target: &mut R,
    extensions: &[&str],
) -> usize {
    let mut changed = 0;
    for material in 0..target.material_count() {
        for (node, image) in target.image_texture_nodes(material) {
            let Some(new_path) = target
                .image_path(image)
                .filter(|p| !p.is_empty())
                .and_then(|p| png_path(p, extensions))
            else {
                continue;
            };

            let name = file_name(&new_path).to_string();
            debug!(material, node, path = %new_path, "remapped texture");
            target.set_image_path(image, new_path);
            target.set_node_name(material, node, name.clone());
            target.set_image_name(image, name);
            changed += 1;
        }
    }
    changed
}

pub struct RemapImagePathsToPng;

impl Operator for RemapImagePathsToPng {
    fn id(&self) -> &'static str {
        "sloths.remap_image_paths_to_png"
    }

    fn label(&self) -> &'static str {
        "Remap Image Paths to .png"
    }

    fn section(&self) -> &'static str {
        "Textures"
    }

    fn execute(&self, scene: &mut Scene, settings: &ToolSettings) -> OperatorReport {
        let extensions = settings.png_source_extensions();
        let changed = remap_texture_paths(scene, &extensions);
        info!(changed, extensions = ?extensions, "remapped textures");
        OperatorReport::finished(format!("Remapped {} textures", changed), changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slothtools_core::{Image, Material, Node, NodeTree};

    const ALL: &[&str] = &[".dds", ".jpg", ".jpeg", ".webp"];

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("//tex/bark.dds"), ("//tex/bark", ".dds"));
        assert_eq!(split_extension("a.b.c"), ("a.b", ".c"));
        assert_eq!(split_extension("C:\\tex\\leaf.JPG"), ("C:\\tex\\leaf", ".JPG"));
        assert_eq!(split_extension("dir.v2/readme"), ("dir.v2/readme", ""));
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
        assert_eq!(split_extension("..dds"), ("..dds", ""));
    }

    #[test]
    fn test_png_path() {
        assert_eq!(png_path("tex/bark.DDS", ALL).as_deref(), Some("tex/bark.png"));
        assert_eq!(png_path("leaf.jpeg", ALL).as_deref(), Some("leaf.png"));
        assert_eq!(png_path("leaf.Webp", ALL).as_deref(), Some("leaf.png"));
        assert_eq!(png_path("leaf.png", ALL), None);
        assert_eq!(png_path("leaf.jpg", &[".dds"]), None);
        assert_eq!(png_path("noext", ALL), None);
    }

    fn scene_with_textures(paths: &[&str]) -> Scene {
        let mut scene = Scene::new();
        let mut tree = NodeTree::new();
        for (i, path) in paths.iter().enumerate() {
            let image = scene.add_image(Image::new(format!("img{}", i), *path));
            tree.add_node(Node::image_texture(format!("Image Texture.{:03}", i), Some(image)));
        }
        tree.add_node(Node::principled("Principled BSDF"));
        scene.add_material(Material::with_nodes("Tree", tree));
        scene
    }

    #[test]
    fn test_rewrites_paths_and_names() {
        let mut scene = scene_with_textures(&["//textures/bark.dds", "//textures/leaf.png", ""]);
        let report = RemapImagePathsToPng.execute(&mut scene, &ToolSettings::default());

        assert_eq!(report.changed, 1);
        assert_eq!(report.message, "Remapped 1 textures");
        assert_eq!(scene.images[0].filepath, "//textures/bark.png");
        assert_eq!(scene.images[0].name, "bark.png");
        assert_eq!(scene.materials[0].node_tree.as_ref().unwrap().nodes[0].name, "bark.png");
        assert_eq!(scene.images[1].filepath, "//textures/leaf.png");
        assert_eq!(scene.images[2].name, "img2");
    }

    #[test]
    fn test_disabled_extension_is_left_alone() {
        let mut scene = scene_with_textures(&["bark.dds", "leaf.webp"]);
        let settings = ToolSettings {
            png_convert_dds: false,
            ..Default::default()
        };
        let report = RemapImagePathsToPng.execute(&mut scene, &settings);
        assert_eq!(report.changed, 1);
        assert_eq!(scene.images[0].filepath, "bark.dds");
        assert_eq!(scene.images[1].filepath, "leaf.png");
    }

    #[test]
    fn test_shared_image_counts_once() {
        let mut scene = Scene::new();
        let image = scene.add_image(Image::new("bark", "bark.jpg"));
        let mut tree = NodeTree::new();
        tree.add_node(Node::image_texture("A", Some(image)));
        tree.add_node(Node::image_texture("B", Some(image)));
        scene.add_material(Material::with_nodes("Tree", tree));

        assert_eq!(remap_texture_paths(&mut scene, ALL), 1);
        let nodes = &scene.materials[0].node_tree.as_ref().unwrap().nodes;
        assert_eq!(nodes[0].name, "bark.png");
        assert_eq!(nodes[1].name, "B");
    }

    #[test]
    fn test_colliding_names_get_suffixes() {
        let mut scene = scene_with_textures(&["//a/bark.dds", "//b/bark.jpg"]);
        assert_eq!(remap_texture_paths(&mut scene, ALL), 2);

        assert_eq!(scene.images[0].filepath, "//a/bark.png");
        assert_eq!(scene.images[1].filepath, "//b/bark.png");
        assert_eq!(scene.images[0].name, "bark.png");
        assert_eq!(scene.images[1].name, "bark.png.001");
        let nodes = &scene.materials[0].node_tree.as_ref().unwrap().nodes;
        assert_eq!(nodes[0].name, "bark.png");
        assert_eq!(nodes[1].name, "bark.png.001");
    }

    #[test]
    fn test_material_without_nodes_is_skipped() {
        let mut scene = scene_with_textures(&["bark.dds"]);
        scene.materials[0].use_nodes = false;
        assert_eq!(remap_texture_paths(&mut scene, ALL), 0);
        assert_eq!(scene.images[0].filepath, "bark.dds");
    }
}
