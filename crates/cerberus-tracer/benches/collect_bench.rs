use cerberus_scene::{LayerType, Motion, NodeId, Scene, SceneBuilder};
use cerberus_tracer::{
    AnimationCollector, AvatarInspector, CollectOptions, ExclusionSet, InspectorConfig,
    MaterialCollector,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// A wide hierarchy with shared materials and a deep, bushy controller set
fn synthetic_avatar(bones: usize, controllers: usize) -> (Scene, NodeId) {
    let mut builder = SceneBuilder::new("bench");
    let root = builder.node("Avatar");

    let textures: Vec<_> = (0..16)
        .map(|i| builder.texture(format!("tex_{i}"), None))
        .collect();
    let materials: Vec<_> = (0..32)
        .map(|i| {
            builder.material(
                format!("mat_{i}"),
                None,
                [
                    ("_MainTex", Some(textures[i % textures.len()])),
                    ("_BumpMap", Some(textures[(i * 7) % textures.len()])),
                ],
            )
        })
        .collect();

    let mut parent = root;
    for i in 0..bones {
        let node = builder.child(if i % 8 == 0 { root } else { parent }, format!("bone_{i}"));
        builder.renderer(
            node,
            [
                Some(materials[i % materials.len()]),
                None,
                Some(materials[(i * 3) % materials.len()]),
            ],
        );
        parent = node;
    }

    let clips: Vec<_> = (0..64)
        .map(|i| {
            let name = if i % 10 == 0 {
                format!("proxy_{i}")
            } else {
                format!("clip_{i}")
            };
            builder.clip(name)
        })
        .collect();

    let mut layers = Vec::new();
    for c in 0..controllers {
        let leaf = builder.blend_tree(
            format!("leaf_{c}"),
            clips.iter().skip(c).step_by(5).map(|&clip| Motion::Clip(clip)),
        );
        let tree = builder.blend_tree(
            format!("tree_{c}"),
            [Motion::BlendTree(leaf), Motion::Clip(clips[c % clips.len()])],
        );
        let mut machine = builder.state_machine(
            format!("sub_{c}_0"),
            [("Blend", Motion::BlendTree(tree))],
            [],
        );
        for depth in 1..6 {
            machine = builder.state_machine(
                format!("sub_{c}_{depth}"),
                [("Idle", Motion::Clip(clips[(c + depth) % clips.len()]))],
                [machine],
            );
        }
        let controller = builder.controller(format!("controller_{c}"), [("Base Layer", machine)]);
        layers.push((LayerType::Fx, Some(controller)));
    }
    builder.avatar(root, layers);
    (builder.build(), root)
}

fn benchmark_materials(c: &mut Criterion) {
    let (scene, root) = synthetic_avatar(2_000, 4);
    let collector = MaterialCollector::default();
    c.bench_function("collect_materials", |b| {
        b.iter(|| black_box(collector.collect(&scene, Some(black_box(root)))))
    });
}

fn benchmark_animation(c: &mut Criterion) {
    let (scene, root) = synthetic_avatar(8, 64);
    let filter = ExclusionSet::default();
    let collector = AnimationCollector::new(&filter, CollectOptions::default());
    c.bench_function("collect_animation", |b| {
        b.iter(|| black_box(collector.collect(&scene, Some(black_box(root)))))
    });
}

fn benchmark_check(c: &mut Criterion) {
    let (scene, root) = synthetic_avatar(500, 16);
    let mut inspector = AvatarInspector::new(InspectorConfig::default());
    c.bench_function("avatar_check", |b| {
        b.iter(|| {
            let report = inspector.check(&scene, Some(root));
            black_box(report.animation.unique_clips.len());
        })
    });
}

criterion_group!(
    benches,
    benchmark_materials,
    benchmark_animation,
    benchmark_check
);
criterion_main!(benches);
