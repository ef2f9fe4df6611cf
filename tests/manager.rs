use scenario_undo::{Element, ElementId, Error, Map, Marker, Scene, Signal, UndoManager, UndoRecord};
use std::cell::RefCell;
use std::rc::Rc;

type Record = UndoRecord<Scene<Marker>>;
type Manager<S = ()> = UndoManager<Record, S>;

const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];

fn add(scene: &mut Scene<Marker>, manager: &mut Manager, name: &'static str) -> ElementId {
    let id = scene.insert(Marker::new(name));
    manager.record(Record::add_element(id));
    id
}

fn names(scene: &Scene<Marker>) -> Vec<&'static str> {
    let mut names = scene.iter().map(|(_, m)| m.name).collect::<Vec<_>>();
    names.sort_unstable();
    names
}

#[test]
fn undo_all_restores_initial_state() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    for name in NAMES {
        add(&mut scene, &mut manager, name);
    }
    assert_eq!(scene.len(), 5);
    for _ in 0..NAMES.len() {
        manager.undo(&mut scene).unwrap().unwrap();
    }
    assert!(scene.is_empty());
    assert_eq!(manager.redo_len(), 5);
}

#[test]
fn undo_then_redo_are_inverse() {
    for k in 0..=NAMES.len() {
        let mut scene = Scene::new();
        let mut manager = Manager::new();
        let mut ids = Vec::new();
        for name in NAMES {
            ids.push(add(&mut scene, &mut manager, name));
        }
        let before = scene.ids().collect::<Vec<_>>();
        for _ in 0..k {
            manager.undo(&mut scene).unwrap().unwrap();
        }
        assert_eq!(scene.len(), NAMES.len() - k);
        for _ in 0..k {
            manager.redo(&mut scene).unwrap().unwrap();
        }
        assert_eq!(scene.ids().collect::<Vec<_>>(), before);
        assert_eq!(ids, before);
        assert!(!manager.can_redo());
    }
}

#[test]
fn record_after_undo_invalidates_redo() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    add(&mut scene, &mut manager, "a");
    add(&mut scene, &mut manager, "b");
    manager.undo(&mut scene).unwrap().unwrap();
    assert!(manager.can_redo());
    add(&mut scene, &mut manager, "c");
    assert!(!manager.can_redo());
    assert_eq!(manager.len(), 2);
    assert!(manager.redo(&mut scene).is_none());
}

#[test]
fn undo_on_empty_history() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    assert!(manager.undo(&mut scene).is_none());
    assert!(manager.redo(&mut scene).is_none());
    assert!(manager.is_empty());

    add(&mut scene, &mut manager, "a");
    manager.undo(&mut scene).unwrap().unwrap();
    assert!(manager.undo(&mut scene).is_none());
    assert_eq!(manager.undo_len(), 0);
    assert_eq!(manager.redo_len(), 1);
}

#[test]
fn eviction_keeps_element_live() {
    let mut scene = Scene::new();
    let mut manager: Manager = UndoManager::builder().limit(2).build();
    let marker = Marker::new("a");
    let disposals = marker.disposals();
    let a = scene.insert(marker);
    manager.record(Record::add_element(a));
    add(&mut scene, &mut manager, "b");
    add(&mut scene, &mut manager, "c");
    assert_eq!(manager.len(), 2);
    assert!(scene.get(a).unwrap().on_map);
    assert_eq!(disposals.get(), 0);

    manager.undo(&mut scene).unwrap().unwrap();
    manager.undo(&mut scene).unwrap().unwrap();
    assert!(manager.undo(&mut scene).is_none());
    assert_eq!(names(&scene), ["a"]);
}

#[test]
fn add_two_undo_one() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let a = add(&mut scene, &mut manager, "a");
    let b = add(&mut scene, &mut manager, "b");

    manager.undo(&mut scene).unwrap().unwrap();
    assert!(scene.contains(a));
    assert!(!scene.contains(b));
    assert_eq!(manager.undo_len(), 1);
    assert_eq!(manager.redo_len(), 1);

    manager.redo(&mut scene).unwrap().unwrap();
    assert!(scene.get(b).unwrap().on_map);
    assert_eq!(manager.undo_len(), 2);
    assert_eq!(manager.redo_len(), 0);
}

#[test]
fn invalidated_record_disposed_once() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let marker = Marker::new("a");
    let disposals = marker.disposals();
    let a = scene.insert(marker);
    manager.record(Record::add_element(a));
    manager.undo(&mut scene).unwrap().unwrap();
    assert_eq!(disposals.get(), 0);

    add(&mut scene, &mut manager, "c");
    assert!(!manager.can_redo());
    assert_eq!(disposals.get(), 1);

    manager.clear();
    drop(manager);
    assert_eq!(disposals.get(), 1);
}

#[test]
fn stale_reference_drops_record() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let a = add(&mut scene, &mut manager, "a");
    let b = add(&mut scene, &mut manager, "b");
    manager.undo(&mut scene).unwrap().unwrap();
    let c = add(&mut scene, &mut manager, "c");

    // `a` is removed by a code path that does not go through the history.
    assert!(scene.despawn(a));
    let c_marker = scene.get(c).unwrap().clone();
    manager.undo(&mut scene).unwrap().unwrap();
    assert_eq!(
        manager.undo(&mut scene),
        Some(Err(Error::StaleReference(a)))
    );
    assert!(!manager.can_undo());
    assert_eq!(manager.redo_len(), 1);
    assert!(!scene.contains(b));
    assert_eq!(c_marker.disposals().get(), 0);

    manager.redo(&mut scene).unwrap().unwrap();
    assert_eq!(names(&scene), ["c"]);
}

#[test]
fn remove_and_restore_keep_later_records_valid() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let a = add(&mut scene, &mut manager, "a");
    let mut previous = 30;
    scene.get_mut(a).unwrap().swap_property(&mut previous);
    manager.record(Record::property_changed(a, previous));
    let marker = scene.remove(a).unwrap();
    manager.record(Record::remove_element(a, marker));
    assert!(scene.is_empty());

    manager.go_to(&mut scene, 0).unwrap().unwrap();
    assert!(scene.is_empty());
    manager.go_to(&mut scene, 2).unwrap().unwrap();
    assert_eq!(scene.get(a).unwrap().speed, 30);
    manager.undo(&mut scene).unwrap().unwrap();
    assert_eq!(scene.get(a).unwrap().speed, 0);
    assert!(manager.go_to(&mut scene, 4).is_none());
}

#[test]
fn clear_and_drop_dispose_detached_elements() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let mut counters = Vec::new();
    for name in ["a", "b", "c"] {
        let marker = Marker::new(name);
        counters.push(marker.disposals());
        let id = scene.insert(marker);
        let marker = scene.remove(id).unwrap();
        manager.record(Record::remove_element(id, marker));
    }
    manager.undo(&mut scene).unwrap().unwrap();
    assert_eq!(names(&scene), ["c"]);
    manager.clear();
    assert!(manager.is_empty());
    assert_eq!(counters.iter().map(|c| c.get()).collect::<Vec<_>>(), [1, 1, 0]);

    let marker = Marker::new("d");
    let disposals = marker.disposals();
    let id = scene.insert(marker);
    let marker = scene.remove(id).unwrap();
    manager.record(Record::remove_element(id, marker));
    drop(manager);
    assert_eq!(disposals.get(), 1);
    assert_eq!(names(&scene), ["c"]);
}

#[test]
fn saved_state() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    assert!(manager.is_saved());
    add(&mut scene, &mut manager, "a");
    add(&mut scene, &mut manager, "b");
    assert!(!manager.is_saved());
    manager.set_saved(true);
    add(&mut scene, &mut manager, "c");
    manager.undo(&mut scene).unwrap().unwrap();
    manager.undo(&mut scene).unwrap().unwrap();
    assert!(!manager.is_saved());
    manager.revert(&mut scene).unwrap().unwrap();
    assert!(manager.is_saved());
    assert_eq!(names(&scene), ["a", "b"]);
}

#[test]
fn signals() {
    let signals = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&signals);
    let mut scene = Scene::new();
    let mut manager: Manager<_> = UndoManager::builder()
        .connect(move |signal: Signal| sink.borrow_mut().push(signal))
        .build();

    let id = scene.insert(Marker::new("a"));
    manager.record(Record::add_element(id));
    manager.undo(&mut scene).unwrap().unwrap();
    manager.redo(&mut scene).unwrap().unwrap();
    manager.clear();
    assert_eq!(
        *signals.borrow(),
        [
            Signal::Undo(true),
            Signal::Saved(false),
            Signal::Undo(false),
            Signal::Redo(true),
            Signal::Saved(true),
            Signal::Undo(true),
            Signal::Redo(false),
            Signal::Saved(false),
            Signal::Undo(false),
        ]
    );
}

#[test]
fn checkpoint_cancel() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let a = add(&mut scene, &mut manager, "a");
    add(&mut scene, &mut manager, "b");
    manager.set_saved(true);

    let marker = Marker::new("c");
    let disposals = marker.disposals();
    let mut cp = manager.checkpoint();
    let c = scene.insert(marker);
    cp.record(Record::add_element(c));
    let mut previous = 7;
    scene.get_mut(a).unwrap().swap_property(&mut previous);
    cp.record(Record::property_changed(a, previous));
    cp.cancel(&mut scene).unwrap().unwrap();

    assert_eq!(scene.get(a).unwrap().speed, 0);
    assert!(!scene.contains(c));
    assert_eq!(disposals.get(), 1);
    assert_eq!(manager.len(), 2);
    assert!(!manager.can_redo());
    assert!(manager.is_saved());
}

#[test]
fn checkpoint_cancel_undo() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    add(&mut scene, &mut manager, "a");
    let b = add(&mut scene, &mut manager, "b");

    let mut cp = manager.checkpoint();
    cp.undo(&mut scene).unwrap().unwrap();
    assert!(!scene.contains(b));
    cp.cancel(&mut scene).unwrap().unwrap();
    assert!(scene.get(b).unwrap().on_map);
    assert_eq!(manager.undo_len(), 2);
    assert!(!manager.can_redo());
}

#[test]
fn checkpoint_commit() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let mut cp = manager.checkpoint();
    let a = scene.insert(Marker::new("a"));
    cp.record(Record::add_element(a));
    cp.commit();
    assert_eq!(manager.len(), 1);
    assert!(scene.contains(a));
}

#[test]
fn undo_text() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    assert_eq!(manager.undo_text(), None);
    let a = add(&mut scene, &mut manager, "a");
    let b = scene.insert(Marker::new("b"));
    let c = scene.insert(Marker::new("c"));
    manager.record(Record::batch(
        "Paste 2 markers",
        vec![Record::add_element(b), Record::add_element(c)],
    ));
    assert_eq!(manager.undo_text().as_deref(), Some("Paste 2 markers"));
    manager.undo(&mut scene).unwrap().unwrap();
    assert_eq!(scene.ids().collect::<Vec<_>>(), [a]);
    assert_eq!(manager.undo_text(), Some(format!("Add element {a}")));
    assert_eq!(manager.redo_text().as_deref(), Some("Paste 2 markers"));
}

#[test]
#[cfg(not(feature = "colored"))]
fn display() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    add(&mut scene, &mut manager, "a");
    add(&mut scene, &mut manager, "b");
    manager.undo(&mut scene).unwrap().unwrap();
    assert_eq!(
        manager.display().detailed(false).to_string(),
        "2 Add element 1v1\n1 [HEAD] Add element 0v1\n0 [SAVED]\n"
    );
}

#[test]
fn failed_redo_drops_record() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let marker = Marker::new("a");
    let disposals = marker.disposals();
    let a = scene.insert(marker);
    manager.record(Record::add_element(a));
    manager.set_saved(true);
    manager.undo(&mut scene).unwrap().unwrap();
    assert!(!manager.is_saved());

    // Another tool places an element in the freed slot.
    let x = scene.insert(Marker::new("x"));
    assert_eq!(x.index(), a.index());
    let err = manager.redo(&mut scene).unwrap().unwrap_err();
    assert_eq!(err, Error::Occupied(a));
    assert_eq!(err.element(), a);
    assert!(manager.is_empty());
    assert_eq!(disposals.get(), 1);
    // The saved state needed the dropped record.
    assert!(!manager.is_saved());
    assert!(manager.revert(&mut scene).is_none());
    assert_eq!(names(&scene), ["x"]);
}

#[test]
fn failed_undo_at_saved_state() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    add(&mut scene, &mut manager, "a");
    let b = add(&mut scene, &mut manager, "b");
    manager.set_saved(true);
    scene.despawn(b);
    assert_eq!(
        manager.undo(&mut scene),
        Some(Err(Error::StaleReference(b)))
    );
    // Nothing was changed on the scene by the failed undo.
    assert!(manager.is_saved());
    assert_eq!(manager.len(), 1);
    manager.undo(&mut scene).unwrap().unwrap();
    assert!(!manager.is_saved());
    manager.revert(&mut scene).unwrap().unwrap();
    assert!(manager.is_saved());
}

#[test]
fn failed_undo_loses_earlier_saved_state() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    add(&mut scene, &mut manager, "a");
    manager.set_saved(true);
    let b = add(&mut scene, &mut manager, "b");
    scene.despawn(b);
    assert!(manager.undo(&mut scene).unwrap().is_err());
    assert!(!manager.is_saved());
    assert!(manager.revert(&mut scene).is_none());
    assert_eq!(manager.undo_len(), 1);
}

#[test]
fn stale_element_in_batch() {
    let mut scene = Scene::new();
    let mut manager: Manager<Vec<Signal>> = UndoManager::builder().connect(Vec::new()).build();
    let a = scene.insert(Marker::new("a"));
    let marker = Marker::new("b");
    let disposals = marker.disposals();
    let b = scene.insert(marker);
    manager.record(Record::batch(
        "Paste 2 markers",
        vec![Record::add_element(a), Record::add_element(b)],
    ));

    scene.despawn(a);
    assert_eq!(
        manager.undo(&mut scene),
        Some(Err(Error::StaleReference(a)))
    );
    // `b` was put back when the batch rolled back and stays on the map.
    assert!(scene.get(b).unwrap().on_map);
    assert_eq!(disposals.get(), 0);
    assert!(manager.is_empty());
    assert_eq!(
        manager.disconnect().unwrap(),
        [
            Signal::Undo(true),
            Signal::Saved(false),
            Signal::Discarded(Error::StaleReference(a)),
            Signal::Undo(false),
        ]
    );
}

#[test]
fn history_in_recorded_order() {
    let mut scene = Scene::new();
    let mut manager = Manager::new();
    let a = add(&mut scene, &mut manager, "a");
    let b = add(&mut scene, &mut manager, "b");
    manager.undo(&mut scene).unwrap().unwrap();

    let history = manager.history();
    let texts = history
        .entries()
        .map(|entry| entry.get().to_string())
        .collect::<Vec<_>>();
    assert_eq!(texts, [format!("Add element {a}"), format!("Add element {b}")]);
    assert_eq!(history.peek_undo().unwrap().get().to_string(), texts[0]);
    assert_eq!(history.peek_redo().unwrap().get().to_string(), texts[1]);
}
