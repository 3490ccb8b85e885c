//! Integration tests for slothtools-ops
//!
//! These run the operators through the registry on small scenes and check
//! the batch semantics: per-object failures, selection restore and counts.

use slothtools_core::*;
use slothtools_ops::*;

/// A "tree": one big trunk quad plus a fan of small leaf triangles
fn tree_mesh(leaves: usize) -> PolyMesh {
    let mut mesh = PolyMesh::new();
    let a = mesh.add_vertex(Point3f::new(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(Point3f::new(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(Point3f::new(1.0, 0.0, 4.0));
    let d = mesh.add_vertex(Point3f::new(0.0, 0.0, 4.0));
    mesh.add_face(vec![a, b, c, d]);

    for i in 0..leaves {
        let x = 2.0 + i as f32;
        let p = mesh.add_vertex(Point3f::new(x, 0.0, 5.0));
        let q = mesh.add_vertex(Point3f::new(x + 0.2, 0.0, 5.0));
        let r = mesh.add_vertex(Point3f::new(x, 0.0, 5.2));
        mesh.add_face(vec![p, q, r]);
    }
    mesh
}

fn selected(scene: &mut Scene, object: SceneObject) -> ObjectId {
    let id = scene.add_object(object);
    scene.objects[id.0].selected = true;
    id
}

#[test]
fn test_clean_trees_batch_continues_past_locked_object() {
    let mut scene = Scene::new();
    let oak = selected(&mut scene, SceneObject::mesh("Oak", tree_mesh(6)));
    let mut locked = SceneObject::mesh("LinkedPine", tree_mesh(3));
    locked.editable = false;
    let pine = selected(&mut scene, locked);
    let birch = selected(&mut scene, SceneObject::mesh("Birch", tree_mesh(2)));
    scene.set_active(Some(oak));

    let registry = OperatorRegistry::new();
    let report = registry
        .run("sloths.clean_trees_selected", &mut scene, &ToolSettings::default())
        .unwrap();

    assert_eq!(report.changed, 2);
    assert_eq!(report.message, "Cleaned 2 tree objects");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].item, "LinkedPine");
    assert_eq!(report.level, ReportLevel::Warning);
    assert_eq!(
        report.details,
        vec!["Oak: kept 1, removed 6", "Birch: kept 1, removed 2"]
    );

    assert_eq!(scene.objects[oak.0].as_mesh().unwrap().face_count(), 1);
    assert_eq!(scene.objects[birch.0].as_mesh().unwrap().face_count(), 1);
    assert_eq!(scene.objects[pine.0].as_mesh().unwrap(), &tree_mesh(3));

    assert_eq!(scene.selected_objects(), vec![oak, pine, birch]);
    assert_eq!(scene.active, Some(oak));
}

#[test]
fn test_clean_trees_uses_world_space_areas() {
    let mut scene = Scene::new();
    let mut mesh = PolyMesh::new();
    for (i, &side) in [1.0f32, 1.05].iter().enumerate() {
        let x = i as f32 * 3.0;
        let a = mesh.add_vertex(Point3f::new(x, 0.0, 0.0));
        let b = mesh.add_vertex(Point3f::new(x + side, 0.0, 0.0));
        let c = mesh.add_vertex(Point3f::new(x + side, side, 0.0));
        let d = mesh.add_vertex(Point3f::new(x, side, 0.0));
        mesh.add_face(vec![a, b, c, d]);
    }

    // areas 1.0 and 1.1025 are within 0.2 of each other, 100 and 110.25 are not
    let mut small = SceneObject::mesh("Local", mesh.clone());
    small.selected = true;
    let mut big = SceneObject::mesh("Scaled", mesh);
    big.matrix_world = Transform3D::uniform_scaling(10.0);
    big.selected = true;
    scene.add_object(small);
    scene.add_object(big);

    let settings = ToolSettings {
        clean_trees_area_threshold: 0.2,
        ..Default::default()
    };
    CleanTreesSelected.execute(&mut scene, &settings);

    assert_eq!(scene.objects[0].as_mesh().unwrap().face_count(), 2);
    assert_eq!(scene.objects[1].as_mesh().unwrap().face_count(), 1);
}

#[test]
fn test_clean_trees_on_far_placed_object_keeps_equal_faces() {
    let mut mesh = PolyMesh::new();
    for i in 0..8 {
        let x = i as f32 * 2.0;
        let a = mesh.add_vertex(Point3f::new(x, 0.0, 0.0));
        let b = mesh.add_vertex(Point3f::new(x + 1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3f::new(x + 1.0, 1.0, 0.0));
        let d = mesh.add_vertex(Point3f::new(x, 1.0, 0.0));
        mesh.add_face(vec![a, b, c, d]);
    }
    let mut oak = SceneObject::mesh("Oak", mesh);
    oak.matrix_world = Transform3D::translation(Vector3::new(5000.0, 5000.0, 5000.0));

    let mut scene = Scene::new();
    selected(&mut scene, oak);
    let report = CleanTreesSelected.execute(&mut scene, &ToolSettings::default());

    assert_eq!(report.details, vec!["Oak: kept 8, removed 0"]);
    assert_eq!(scene.objects[0].as_mesh().unwrap().face_count(), 8);
}

#[test]
fn test_clean_trees_without_meshes_warns() {
    let mut scene = Scene::new();
    selected(&mut scene, SceneObject::new("Sun", ObjectKind::Light));

    let report = CleanTreesSelected.execute(&mut scene, &ToolSettings::default());
    assert!(report.is_cancelled());
    assert_eq!(report.message, "No mesh objects selected");
}

#[test]
fn test_edit_mode_is_restored_after_batch() {
    let mut scene = Scene::new();
    let oak = selected(&mut scene, SceneObject::mesh("Oak", tree_mesh(1)));
    let birch = selected(&mut scene, SceneObject::mesh("Birch", tree_mesh(1)));
    scene.set_active(Some(birch));
    scene.set_mode(EditorMode::EditMesh).unwrap();

    let report = ClearCustomSplitNormalsSelected.execute(&mut scene, &ToolSettings::default());
    assert_eq!(report.changed, 2);
    assert_eq!(scene.mode, EditorMode::EditMesh);
    assert_eq!(scene.active, Some(birch));
    assert_eq!(scene.selected_objects(), vec![oak, birch]);
}

#[test]
fn test_all_operators_run_on_one_scene() {
    let mut scene = Scene::new();
    selected(&mut scene, SceneObject::mesh("Oak", tree_mesh(4)));
    let bark = scene.add_image(Image::new("bark.dds", "//tex/bark.dds"));
    let mut tree = NodeTree::new();
    let tex = tree.add_node(Node::image_texture("bark.dds", Some(bark)));
    let bsdf = tree.add_node(Node::principled("Principled BSDF"));
    tree.link(tex, "Color", bsdf, "Base Color");
    tree.link(tex, "Alpha", bsdf, ALPHA_INPUT);
    scene.add_material(Material::with_nodes("Bark", tree));

    let registry = OperatorRegistry::new();
    let settings = ToolSettings {
        roughness_value: 0.8,
        ..Default::default()
    };
    let ids: Vec<&str> = registry.iter().map(|op| op.id()).collect();
    let changed: Vec<usize> = ids
        .iter()
        .map(|id| registry.run(id, &mut scene, &settings).unwrap().changed)
        .collect();
    assert_eq!(changed, vec![1, 1, 1, 1, 1]);

    let mat = &scene.materials[0];
    assert_eq!(mat.input_default(bsdf, ROUGHNESS_INPUT), Some(0.8));
    assert_eq!(mat.node_tree.as_ref().unwrap().links.len(), 1);
    assert_eq!(scene.images[0].filepath, "//tex/bark.png");
}
