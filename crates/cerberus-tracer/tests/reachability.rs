/// Reachability and deduplication properties of the collectors on synthetic avatars
use cerberus_scene::{LayerType, Motion, NodeId, Scene, SceneBuilder};
use cerberus_tracer::{
    AnimationCollector, AvatarInspector, CollectOptions, CycleSite, ExclusionSet,
    InspectorConfig, MaterialCollector,
};
use indexmap::IndexSet;

fn inspect(scene: &Scene, root: NodeId) -> cerberus_tracer::InspectionReport {
    AvatarInspector::new(InspectorConfig::default())
        .check(scene, Some(root))
        .clone()
}

#[test]
fn test_materials_shared_between_renderers() {
    let mut builder = SceneBuilder::new("materials");
    let root = builder.node("Avatar");
    let a = builder.child(root, "A");
    let b = builder.child(root, "B");
    let t1 = builder.texture("T1", None);
    let t2 = builder.texture("T2", None);
    let m1 = builder.material("M1", None, [("_MainTex", Some(t1)), ("_BumpMap", Some(t2))]);
    let m2 = builder.material("M2", None, [("_MainTex", Some(t1)), ("_DetailMap", Some(t1))]);
    builder.renderer(a, [Some(m1), Some(m2)]);
    builder.renderer(b, [Some(m1)]);
    let scene = builder.build();

    let report = MaterialCollector::default().collect(&scene, Some(root));

    assert_eq!(report.usage.keys().copied().collect::<Vec<_>>(), vec![m1, m2]);
    assert_eq!(report.usage[&m1], vec![a, b]);
    assert_eq!(report.usage[&m2], vec![a]);
    assert_eq!(report.textures[&m1], IndexSet::from([t1, t2]));
    assert_eq!(report.textures[&m2], IndexSet::from([t1]));
    assert_eq!(report.unique_textures(), IndexSet::from([t1, t2]));
}

#[test]
fn test_pre_order_discovery() {
    let mut builder = SceneBuilder::new("order");
    let root = builder.node("Avatar");
    let body = builder.child(root, "Body");
    let arm = builder.child(body, "Arm");
    let hair = builder.child(root, "Hair");
    let m_root = builder.material::<&str>("Root", None, []);
    let m_arm = builder.material::<&str>("Arm", None, []);
    let m_hair = builder.material::<&str>("Hair", None, []);
    builder.renderer(hair, [Some(m_hair)]);
    builder.renderer(arm, [Some(m_arm)]);
    builder.renderer(root, [Some(m_root)]);
    let scene = builder.build();

    let report = MaterialCollector::default().collect(&scene, Some(root));
    assert_eq!(
        report.materials().collect::<Vec<_>>(),
        vec![m_root, m_arm, m_hair]
    );
}

#[test]
fn test_proxy_clip_in_sub_state_machine_is_excluded() {
    let mut builder = SceneBuilder::new("proxy");
    let root = builder.node("Avatar");
    let idle = builder.clip("Idle");
    let wave = builder.clip("proxy_Wave");
    let sub = builder.state_machine("Sub", [("S2", Motion::Clip(wave))], []);
    let base = builder.state_machine("Base", [("S1", Motion::Clip(idle))], [sub]);
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    let buckets = &report.animation.controller_clips[&controller];
    assert_eq!(buckets.keys().collect::<Vec<_>>(), vec!["Base"]);
    assert_eq!(buckets["Base"], IndexSet::from([idle]));
    assert_eq!(report.animation.unique_clips, IndexSet::from([idle]));
}

#[test]
fn test_excluded_clip_absent_on_every_path() {
    let mut builder = SceneBuilder::new("paths");
    let root = builder.node("Avatar");
    let proxy = builder.clip("proxy_idle");
    let walk = builder.clip("Walk");
    let tree = builder.blend_tree("Move", [Motion::Clip(walk), Motion::Clip(proxy)]);
    let fx = builder.state_machine("FX", [("P", Motion::Clip(proxy))], []);
    let base = builder.state_machine(
        "Base",
        [("Move", Motion::BlendTree(tree)), ("P", Motion::Clip(proxy))],
        [],
    );
    let locomotion = builder.controller("Locomotion", [("Base Layer", base)]);
    let effects = builder.controller("Effects", [("FX", fx), ("Moves", base)]);
    builder.avatar(
        root,
        [
            (LayerType::Base, Some(locomotion)),
            (LayerType::Fx, Some(effects)),
        ],
    );
    let scene = builder.build();

    let report = inspect(&scene, root);
    assert!(!report.animation.unique_clips.contains(&proxy));
    for buckets in report.animation.controller_clips.values() {
        for bucket in buckets.values() {
            assert!(!bucket.contains(&proxy));
        }
    }
    let effect_buckets = &report.animation.controller_clips[&effects];
    // Buckets are named after the root state machine, not the controller layer
    assert!(!effect_buckets.contains_key("Moves"));
    assert_eq!(effect_buckets["Base"], IndexSet::from([walk]));
    assert!(effect_buckets["FX"].is_empty());
}

#[test]
fn test_custom_filter_without_proxy_token() {
    let mut builder = SceneBuilder::new("custom");
    let root = builder.node("Avatar");
    let keep = builder.clip("Dance");
    let drop = builder.clip("WIP_Dance");
    let base = builder.state_machine(
        "Base",
        [("A", Motion::Clip(keep)), ("B", Motion::Clip(drop))],
        [],
    );
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Action, Some(controller))]);
    let scene = builder.build();

    let filter = |name: &str| name.starts_with("WIP_");
    let report = AnimationCollector::new(&filter, CollectOptions::default())
        .collect(&scene, Some(root));
    assert_eq!(report.unique_clips, IndexSet::from([keep]));
}

#[test]
fn test_global_set_is_union_of_buckets() {
    let mut builder = SceneBuilder::new("union");
    let root = builder.node("Avatar");
    let clips: Vec<_> = (0..6).map(|i| builder.clip(format!("Clip{i}"))).collect();
    let inner = builder.blend_tree("Inner", [Motion::Clip(clips[4]), Motion::Clip(clips[0])]);
    let outer = builder.blend_tree("Outer", [Motion::Clip(clips[3]), Motion::BlendTree(inner)]);
    let gestures = builder.state_machine(
        "Gestures",
        [("Fist", Motion::Clip(clips[1])), ("Blend", Motion::BlendTree(outer))],
        [],
    );
    let base = builder.state_machine(
        "Base",
        [("Idle", Motion::Clip(clips[0])), ("Empty", Motion::Empty)],
        [],
    );
    let extra = builder.state_machine("Extra", [("Jump", Motion::Clip(clips[5]))], []);
    let first = builder.controller("First", [("Base", base), ("Gesture", gestures)]);
    let second = builder.controller("Second", [("Extra", extra), ("Base", base)]);
    builder.avatar(
        root,
        [
            (LayerType::Base, Some(first)),
            (LayerType::Gesture, Some(second)),
            (LayerType::Fx, None),
        ],
    );
    let scene = builder.build();

    let report = inspect(&scene, root);
    let union = report.clips_in_buckets();
    assert_eq!(union.len(), report.animation.unique_clips.len());
    assert!(union.iter().all(|clip| report.animation.unique_clips.contains(clip)));
    assert!(!report.animation.unique_clips.contains(&clips[2]));
}

#[test]
fn test_check_is_idempotent() {
    let mut builder = SceneBuilder::new("repeat");
    let root = builder.node("Avatar");
    let body = builder.child(root, "Body");
    let tex = builder.texture("albedo", None);
    let mat = builder.material("Skin", None, [("_MainTex", Some(tex))]);
    builder.renderer(body, [Some(mat), None, Some(mat)]);
    let idle = builder.clip("Idle");
    let base = builder.state_machine("Base", [("Idle", Motion::Clip(idle))], []);
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let mut inspector = AvatarInspector::new(InspectorConfig::default());
    let first = inspector.check(&scene, Some(root)).clone();
    let second = inspector.check(&scene, Some(root)).clone();
    assert_eq!(first, second);
    assert_eq!(second.materials.usage[&mat], vec![body, body]);
}

#[test]
fn test_clip_three_levels_down_lands_in_root_bucket() {
    let mut builder = SceneBuilder::new("nested");
    let root = builder.node("Avatar");
    let deep = builder.clip("Deep");
    let level3 = builder.state_machine("Level3", [("Deep", Motion::Clip(deep))], []);
    let level2 = builder.state_machine::<&str>("Level2", [], [level3]);
    let level1 = builder.state_machine::<&str>("Level1", [], [level2]);
    let base = builder.state_machine::<&str>("Base", [], [level1]);
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Fx, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    let buckets = &report.animation.controller_clips[&controller];
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets["Base"], IndexSet::from([deep]));
}

#[test]
fn test_nested_blend_trees_flatten() {
    let mut builder = SceneBuilder::new("blend");
    let root = builder.node("Avatar");
    let walk = builder.clip("Walk");
    let run = builder.clip("Run");
    let inner = builder.blend_tree("Inner", [Motion::Clip(run)]);
    let outer = builder.blend_tree("Outer", [Motion::Clip(walk), Motion::BlendTree(inner)]);
    let base = builder.state_machine("Base", [("Move", Motion::BlendTree(outer))], []);
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    assert_eq!(
        report.animation.controller_clips[&controller]["Base"],
        IndexSet::from([walk, run])
    );
}

#[test]
fn test_state_machine_cycle_is_truncated() {
    let mut builder = SceneBuilder::new("cycle");
    let root = builder.node("Avatar");
    let idle = builder.clip("Idle");
    let wave = builder.clip("Wave");
    let inner = builder.state_machine("Inner", [("Wave", Motion::Clip(wave))], []);
    let base = builder.state_machine("Base", [("Idle", Motion::Clip(idle))], [inner]);
    builder.push_sub_state_machine(inner, base);
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    assert_eq!(report.animation.cycles, vec![CycleSite::StateMachine(base)]);
    assert_eq!(report.animation.unique_clips, IndexSet::from([idle, wave]));
    assert!(!report.animation.truncated);
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let mut builder = SceneBuilder::new("diamond");
    let root = builder.node("Avatar");
    let clip = builder.clip("Shared");
    let shared = builder.state_machine("Shared", [("S", Motion::Clip(clip))], []);
    let left = builder.state_machine::<&str>("Left", [], [shared]);
    let right = builder.state_machine::<&str>("Right", [], [shared]);
    let base = builder.state_machine::<&str>("Base", [], [left, right]);
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    assert!(report.animation.cycles.is_empty());
    assert_eq!(report.animation.unique_clips, IndexSet::from([clip]));
}

#[test]
fn test_deep_diamond_chain_is_walked_once_per_level() {
    let mut builder = SceneBuilder::new("lattice");
    let root = builder.node("Avatar");
    let leaf_clip = builder.clip("Leaf");
    let tree = builder.blend_tree("Blend", [Motion::Clip(leaf_clip)]);
    let mut current = builder.state_machine("Leaf", [("Play", Motion::BlendTree(tree))], []);
    // Each level reaches the one below through two children
    for level in 0..40 {
        current = builder.state_machine::<&str>(format!("Level {level}"), [], [current, current]);
    }
    let controller = builder.controller("C", [("Base Layer", current)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    assert!(report.animation.cycles.is_empty());
    assert!(!report.animation.truncated);
    assert_eq!(report.animation.unique_clips, IndexSet::from([leaf_clip]));
    assert_eq!(
        report.animation.controller_clips[&controller]["Level 39"],
        IndexSet::from([leaf_clip])
    );
}

#[test]
fn test_sub_graph_shared_between_buckets_feeds_both() {
    let mut builder = SceneBuilder::new("shared");
    let root = builder.node("Avatar");
    let wave = builder.clip("Wave");
    let shared = builder.state_machine("Gestures", [("Wave", Motion::Clip(wave))], []);
    let left = builder.state_machine::<&str>("Left Hand", [], [shared]);
    let right = builder.state_machine::<&str>("Right Hand", [], [shared]);
    let controller = builder.controller("Hands", [("Left", left), ("Right", right)]);
    builder.avatar(root, [(LayerType::Gesture, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    let buckets = &report.animation.controller_clips[&controller];
    assert_eq!(buckets["Left Hand"], IndexSet::from([wave]));
    assert_eq!(buckets["Right Hand"], IndexSet::from([wave]));
}

#[test]
fn test_dangling_ids_contribute_nothing() {
    let scene = Scene::from_json_str(
        r#"{
            "root": 0,
            "nodes": [
                { "name": "Avatar", "children": [7],
                  "renderers": [ { "materials": [3] } ],
                  "avatar": { "layers": [
                      { "layer_type": "Base", "controller": 0 },
                      { "layer_type": "FX", "controller": 5 }
                  ] } }
            ],
            "controllers": [ { "name": "C",
                "layers": [ { "name": "Base Layer", "state_machine": 0 },
                            { "name": "Broken", "state_machine": 9 } ] } ],
            "state_machines": [ { "name": "Base",
                "states": [ { "name": "Gone", "motion": { "kind": "clip", "id": 4 } },
                            { "name": "Tree", "motion": { "kind": "blend_tree", "id": 2 } } ],
                "children": [8] } ]
        }"#,
    )
    .unwrap();

    let report = inspect(&scene, NodeId(0));
    assert_eq!(report.materials.usage.len(), 1);
    assert!(report.materials.unique_textures().is_empty());
    assert_eq!(report.animation.controller_usage.len(), 2);
    assert!(report.animation.unique_clips.is_empty());
    assert!(report.animation.cycles.is_empty());
}

#[test]
fn test_same_names_stay_distinct() {
    let mut builder = SceneBuilder::new("twins");
    let root = builder.node("Avatar");
    let idle_a = builder.clip("Idle");
    let idle_b = builder.clip("Idle");
    let m_a = builder.material::<&str>("Body", None, []);
    let m_b = builder.material::<&str>("Body", None, []);
    builder.renderer(root, [Some(m_a), Some(m_b)]);
    let base = builder.state_machine(
        "Base",
        [("A", Motion::Clip(idle_a)), ("B", Motion::Clip(idle_b))],
        [],
    );
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let report = inspect(&scene, root);
    assert_eq!(report.materials.usage.len(), 2);
    assert_eq!(report.animation.unique_clips, IndexSet::from([idle_a, idle_b]));
}

#[test]
fn test_no_default_exclusions_keeps_proxy_clips() {
    let mut builder = SceneBuilder::new("keep");
    let root = builder.node("Avatar");
    let proxy = builder.clip("proxy_stand_still");
    let base = builder.state_machine("Base", [("P", Motion::Clip(proxy))], []);
    let controller = builder.controller("C", [("Base Layer", base)]);
    builder.avatar(root, [(LayerType::Base, Some(controller))]);
    let scene = builder.build();

    let config = InspectorConfig {
        exclusion: ExclusionSet::none(),
        ..InspectorConfig::default()
    };
    let mut inspector = AvatarInspector::new(config);
    let report = inspector.check(&scene, Some(root));
    assert_eq!(report.animation.unique_clips, IndexSet::from([proxy]));
}
