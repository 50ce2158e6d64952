use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use uimap_editor::engine;
use uimap_editor::{Action, UiMap, UiMapDocument, UiObject};

/// `windows` top-level windows, each holding `panes` panes of `buttons`
/// buttons, with one action bound to every button.
fn generate(windows: usize, panes: usize, buttons: usize) -> UiMapDocument {
    let mut map = UiMap::new("BenchUIMap");
    let mut doc = UiMapDocument::new();

    for w in 0..windows {
        let mut window = UiObject::new(format!("UIWindow{}", w));
        for p in 0..panes {
            let mut pane = UiObject::new(format!("UIPane{}", p));
            for b in 0..buttons {
                pane = pane.with_child(UiObject::new(format!("UIButton{}", b)));
                let bound = format!("BenchUIMap.UIWindow{}.UIPane{}.UIButton{}", w, p, b);
                doc = doc.with_action(Action::new(format!("action{}_{}_{}", w, p, b), Some(bound.as_str())));
            }
            window = window.with_child(pane);
        }
        map = map.with_window(window);
    }

    doc.with_map(map)
}

fn find_deep_element(c: &mut Criterion) {
    let doc = generate(20, 20, 20);

    c.bench_function("find_deep_element", |b| {
        b.iter(|| engine::find(black_box(&doc), black_box("BenchUIMap.UIWindow19.UIPane19.UIButton19")))
    });
}

fn move_with_action_rewrite(c: &mut Criterion) {
    let doc = generate(20, 20, 20);

    c.bench_function("move_with_action_rewrite", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| {
                engine::move_element(&mut doc, None, "BenchUIMap.UIWindow3.UIPane7", "BenchUIMap.UIWindow11.UIPane2")
            },
            BatchSize::SmallInput,
        )
    });
}

fn merge_windows(c: &mut Criterion) {
    let target = generate(10, 20, 20);
    let mut source = generate(10, 20, 20);
    source.execute_actions.actions.clear();

    c.bench_function("merge_top_level_across_documents", |b| {
        b.iter_batched(
            || (target.clone(), source.clone()),
            |(mut target, mut src)| {
                engine::move_element(&mut target, Some(&mut src), "BenchUIMap.UIWindow4", "BenchUIMap")
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, find_deep_element, move_with_action_rewrite, merge_windows);
criterion_main!(benches);
